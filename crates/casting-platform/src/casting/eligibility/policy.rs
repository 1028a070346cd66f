use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Role criterion a talent can fail. Variants are declared in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityCriterion {
    Gender,
    Ethnicity,
    Age,
    Weight,
    Height,
}

impl EligibilityCriterion {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Gender,
            Self::Ethnicity,
            Self::Age,
            Self::Weight,
            Self::Height,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Gender => "gender",
            Self::Ethnicity => "ethnicity",
            Self::Age => "age",
            Self::Weight => "weight",
            Self::Height => "height",
        }
    }
}

/// Rejection carrying every criterion the talent failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityRejection {
    pub unmet: Vec<EligibilityCriterion>,
}

impl EligibilityRejection {
    pub fn contains(&self, criterion: EligibilityCriterion) -> bool {
        self.unmet.contains(&criterion)
    }
}

impl std::error::Error for EligibilityRejection {}

impl fmt::Display for EligibilityRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.unmet.iter().map(|criterion| criterion.label()).collect();
        write!(
            f,
            "Application declined. Unsatisfied criteria of the role: {}",
            labels.join(", ")
        )
    }
}

/// Outcome of matching a talent against a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EligibilityDecision {
    Eligible,
    Ineligible(EligibilityRejection),
}

impl EligibilityDecision {
    pub(crate) fn from_unmet(unmet: Vec<EligibilityCriterion>) -> Self {
        if unmet.is_empty() {
            Self::Eligible
        } else {
            Self::Ineligible(EligibilityRejection { unmet })
        }
    }

    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible)
    }

    pub fn summary(&self) -> String {
        match self {
            Self::Eligible => "talent meets every role criterion".to_string(),
            Self::Ineligible(rejection) => rejection.to_string(),
        }
    }

    pub fn into_result(self) -> Result<(), EligibilityRejection> {
        match self {
            Self::Eligible => Ok(()),
            Self::Ineligible(rejection) => Err(rejection),
        }
    }
}
