pub mod ambition;
pub mod dedication;
pub mod ranking;
pub mod readiness;
pub mod responsibilities;
pub mod scoring;
pub mod skills;
pub mod weights;

pub use ranking::{
    RankedCandidate, RankedRole, RankingReport, RoleCoverage, RoleRanking, ScoringFailure,
};
pub use readiness::{ReadinessLabel, ReadinessThresholds};
pub use scoring::{
    calculate_total_compatibility, CompatibilityEngine, CompatibilityScore, ComponentScore,
    MatchStatus, ScoringError,
};
