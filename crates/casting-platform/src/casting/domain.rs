use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Primary key of a registered talent.
    TalentId
);
entity_id!(
    /// Primary key of a company.
    CompanyId
);
entity_id!(
    /// Primary key of a project.
    ProjectId
);
entity_id!(
    /// Primary key of a role within a project.
    RoleId
);
entity_id!(
    /// Primary key of an application linking a talent to a role.
    ApplicationId
);

/// Validated talent attributes, as accepted by create and update requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TalentProfile {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub age: i32,
    pub gender: String,
    pub ethnicity: String,
    pub weight: f64,
    pub height: f64,
}

/// Stored talent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Talent {
    pub id: TalentId,
    #[serde(flatten)]
    pub profile: TalentProfile,
}

impl fmt::Display for Talent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.profile.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CompanyProfile {
    pub name: String,
    pub email: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Company {
    pub id: CompanyId,
    #[serde(flatten)]
    pub profile: CompanyProfile,
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.profile.name)
    }
}

/// Project attributes. The owning company is optional and never cascades.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProjectDetails {
    pub company: Option<CompanyId>,
    pub name: String,
    pub description: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Project {
    pub id: ProjectId,
    #[serde(flatten)]
    pub details: ProjectDetails,
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.details.name)
    }
}

/// Casting slot within a project together with the targeted talent criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RoleCriteria {
    pub name: String,
    pub project: ProjectId,
    pub talent_age: i32,
    pub talent_gender: String,
    pub talent_ethnicity: String,
    pub talent_weight: f64,
    pub talent_height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Role {
    pub id: RoleId,
    #[serde(flatten)]
    pub criteria: RoleCriteria,
}

impl Role {
    /// Human readable label, e.g. `officer - Eagle eye`.
    pub fn label(&self, project: &Project) -> String {
        format!("{} - {}", self.criteria.name, project.details.name)
    }
}

/// Request to apply a talent to a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApplicationRequest {
    pub talent: TalentId,
    pub role: RoleId,
}

/// Accepted application. `datetime_applied` is assigned on creation and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Application {
    pub id: ApplicationId,
    pub talent: TalentId,
    pub role: RoleId,
    pub datetime_applied: DateTime<Utc>,
}
