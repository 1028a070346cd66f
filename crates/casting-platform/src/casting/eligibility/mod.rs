mod config;
mod policy;
mod rules;

pub use config::EligibilityConfig;
pub use policy::{EligibilityCriterion, EligibilityDecision, EligibilityRejection};

use super::domain::{RoleCriteria, TalentProfile};

/// Stateless matcher deciding whether a talent may apply to a role.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEngine {
    config: EligibilityConfig,
}

impl EligibilityEngine {
    pub fn new(config: EligibilityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    pub fn assess(&self, talent: &TalentProfile, role: &RoleCriteria) -> EligibilityDecision {
        EligibilityDecision::from_unmet(rules::unmet_criteria(talent, role, &self.config))
    }
}
