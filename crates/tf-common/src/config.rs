use std::env;

use crate::matching::readiness::ReadinessThresholds;
use crate::RetentionRisk;

/// Best internal score below which a future role counts as a critical gap.
pub const DEFAULT_CRITICAL_GAP_THRESHOLD: u32 = 50;
/// Possessed level below which a required skill is listed as a development gap.
pub const DEFAULT_SKILL_GAP_LEVEL: u8 = 7;
/// Total dedication above which a person is over-allocated.
pub const DEFAULT_OVER_ALLOCATION_THRESHOLD: i64 = 95;

/// Tunable thresholds consumed by ranking, coverage and insights.
///
/// The readiness buckets and the critical-gap threshold are independent
/// constants and are not derived from each other.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    pub readiness: ReadinessThresholds,
    pub critical_gap_threshold: u32,
    pub skill_gap_level: u8,
    pub over_allocation_threshold: i64,
    pub retention_watch: Vec<RetentionRisk>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            readiness: ReadinessThresholds::default(),
            critical_gap_threshold: DEFAULT_CRITICAL_GAP_THRESHOLD,
            skill_gap_level: DEFAULT_SKILL_GAP_LEVEL,
            over_allocation_threshold: DEFAULT_OVER_ALLOCATION_THRESHOLD,
            retention_watch: vec![RetentionRisk::Medium],
        }
    }
}

impl ScoringConfig {
    /// Defaults overridden by `TF_*` environment variables. Unparseable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parse<T: std::str::FromStr>(raw: Option<String>) -> Option<T> {
            raw.and_then(|value| value.trim().parse::<T>().ok())
        }

        let defaults = Self::default();
        let readiness = ReadinessThresholds {
            ready: parse(lookup("TF_READY_THRESHOLD")).unwrap_or(defaults.readiness.ready),
            ready_with_support: parse(lookup("TF_READY_WITH_SUPPORT_THRESHOLD"))
                .unwrap_or(defaults.readiness.ready_with_support),
            near: parse(lookup("TF_NEAR_THRESHOLD")).unwrap_or(defaults.readiness.near),
            far: parse(lookup("TF_FAR_THRESHOLD")).unwrap_or(defaults.readiness.far),
        };

        let retention_watch = lookup("TF_RETENTION_WATCH")
            .map(|raw| {
                raw.split(',')
                    .filter_map(|level| level.trim().parse::<RetentionRisk>().ok())
                    .collect::<Vec<_>>()
            })
            .filter(|levels| !levels.is_empty())
            .unwrap_or(defaults.retention_watch);

        Self {
            readiness,
            critical_gap_threshold: parse(lookup("TF_CRITICAL_GAP_THRESHOLD"))
                .unwrap_or(defaults.critical_gap_threshold),
            skill_gap_level: parse(lookup("TF_SKILL_GAP_LEVEL"))
                .unwrap_or(defaults.skill_gap_level),
            over_allocation_threshold: parse(lookup("TF_OVER_ALLOCATION_THRESHOLD"))
                .unwrap_or(defaults.over_allocation_threshold),
            retention_watch,
        }
    }
}
