use serde::{Deserialize, Serialize};

const DEFAULT_TOLERANCE: i32 = 5;

/// Inclusive tolerance bands applied to the numeric role criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    pub age_tolerance: i32,
    pub weight_tolerance: f64,
    pub height_tolerance: f64,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            age_tolerance: DEFAULT_TOLERANCE,
            weight_tolerance: f64::from(DEFAULT_TOLERANCE),
            height_tolerance: f64::from(DEFAULT_TOLERANCE),
        }
    }
}
