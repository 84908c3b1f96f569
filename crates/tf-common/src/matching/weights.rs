/// Maximum points each component contributes to the 0〜100 compatibility score.
pub const COMPONENT_WEIGHTS: ComponentWeights = ComponentWeights {
    skills: 50.0,
    responsibilities: 25.0,
    ambitions: 15.0,
    dedication: 10.0,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentWeights {
    pub skills: f64,
    pub responsibilities: f64,
    pub ambitions: f64,
    pub dedication: f64,
}

impl ComponentWeights {
    pub fn sum(&self) -> f64 {
        self.skills + self.responsibilities + self.ambitions + self.dedication
    }
}
