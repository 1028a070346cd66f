//! Casting catalogue: talents, companies, projects, roles and the applications
//! linking talents to roles.
//!
//! Requests flow through [`intake`] for field validation, the [`CastingService`]
//! for reference checks, duplicate guards and the eligibility decision, and a
//! [`CastingStore`] for persistence.

pub mod domain;
pub mod eligibility;
pub mod intake;
pub mod memory;
pub mod openapi;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationId, ApplicationRequest, Company, CompanyId, CompanyProfile, Project,
    ProjectDetails, ProjectId, Role, RoleCriteria, RoleId, Talent, TalentId, TalentProfile,
};
pub use eligibility::{
    EligibilityConfig, EligibilityCriterion, EligibilityDecision, EligibilityEngine,
    EligibilityRejection,
};
pub use intake::FieldErrors;
pub use memory::InMemoryCastingStore;
pub use openapi::ApiDoc;
pub use repository::{
    ApplicationRepository, CastingStore, CompanyRepository, ProjectRepository, RepositoryError,
    RoleRepository, TalentRepository,
};
pub use router::casting_router;
pub use service::{CastingService, CastingServiceError, UpdateMode};
