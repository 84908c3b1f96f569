use serde::{Deserialize, Serialize};
use strum::AsRefStr;

/// Readiness bucket shown next to a ranked score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadinessLabel {
    Ready,
    ReadyWithSupport,
    Near,
    Far,
    NotViable,
}

/// Lower bounds (exclusive) of each bucket, in integer percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessThresholds {
    pub ready: u32,
    pub ready_with_support: u32,
    pub near: u32,
    pub far: u32,
}

impl Default for ReadinessThresholds {
    fn default() -> Self {
        Self {
            ready: 85,
            ready_with_support: 70,
            near: 50,
            far: 25,
        }
    }
}

impl ReadinessThresholds {
    /// `percent` is the integer display score (see `CompatibilityScore::display_percent`).
    pub fn classify(&self, percent: u32) -> ReadinessLabel {
        if percent > self.ready {
            ReadinessLabel::Ready
        } else if percent > self.ready_with_support {
            ReadinessLabel::ReadyWithSupport
        } else if percent > self.near {
            ReadinessLabel::Near
        } else if percent > self.far {
            ReadinessLabel::Far
        } else {
            ReadinessLabel::NotViable
        }
    }
}

impl ReadinessLabel {
    /// e.g. `87% (READY)`
    pub fn format_percent(&self, percent: u32) -> String {
        format!("{}% ({})", percent, self.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_exclusive() {
        let t = ReadinessThresholds::default();
        assert_eq!(t.classify(86), ReadinessLabel::Ready);
        assert_eq!(t.classify(85), ReadinessLabel::ReadyWithSupport);
        assert_eq!(t.classify(71), ReadinessLabel::ReadyWithSupport);
        assert_eq!(t.classify(70), ReadinessLabel::Near);
        assert_eq!(t.classify(51), ReadinessLabel::Near);
        assert_eq!(t.classify(50), ReadinessLabel::Far);
        assert_eq!(t.classify(26), ReadinessLabel::Far);
        assert_eq!(t.classify(25), ReadinessLabel::NotViable);
        assert_eq!(t.classify(0), ReadinessLabel::NotViable);
    }

    #[test]
    fn custom_thresholds_shift_buckets() {
        let t = ReadinessThresholds {
            ready: 95,
            ..ReadinessThresholds::default()
        };
        assert_eq!(t.classify(90), ReadinessLabel::ReadyWithSupport);
    }

    #[test]
    fn display_names() {
        assert_eq!(ReadinessLabel::ReadyWithSupport.as_ref(), "READY_WITH_SUPPORT");
        assert_eq!(ReadinessLabel::NotViable.format_percent(12), "12% (NOT_VIABLE)");
        assert_eq!(
            serde_json::to_value(ReadinessLabel::Ready).unwrap(),
            serde_json::json!("READY")
        );
    }
}
