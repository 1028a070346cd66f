use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::domain::{
    Application, Company, Project, ProjectDetails, ProjectId, Role, RoleCriteria, RoleId, Talent,
    TalentId,
};
use super::eligibility::{
    EligibilityConfig, EligibilityDecision, EligibilityEngine, EligibilityRejection,
};
use super::intake::{self, FieldErrors, NON_FIELD_ERRORS};
use super::repository::{CastingStore, RepositoryError};

/// How a talent update treats fields missing from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Every field is required (`PUT`).
    Replace,
    /// Missing fields keep their stored value (`PATCH`).
    Partial,
}

/// Service composing intake validation, duplicate guards, the eligibility
/// engine and the backing store.
pub struct CastingService {
    store: Arc<dyn CastingStore>,
    engine: EligibilityEngine,
}

impl CastingService {
    pub fn new(store: Arc<dyn CastingStore>) -> Self {
        Self::with_config(store, EligibilityConfig::default())
    }

    pub fn with_config(store: Arc<dyn CastingStore>, config: EligibilityConfig) -> Self {
        Self {
            store,
            engine: EligibilityEngine::new(config),
        }
    }

    pub fn create_talent(&self, payload: &Value) -> Result<Talent, CastingServiceError> {
        let profile = intake::talent_profile(payload)?;
        let talent = self.store.talents().create(profile)?;
        info!(talent_id = %talent.id, "talent registered");
        Ok(talent)
    }

    pub fn talent(&self, id: TalentId) -> Result<Talent, CastingServiceError> {
        self.store
            .talents()
            .get_by_id(id)?
            .ok_or(CastingServiceError::NotFound {
                entity: "talent",
                id: id.0,
            })
    }

    /// Validates the payload against the stored talent; nothing is written
    /// unless every supplied field is valid.
    pub fn update_talent(
        &self,
        id: TalentId,
        payload: &Value,
        mode: UpdateMode,
    ) -> Result<Talent, CastingServiceError> {
        let current = self.talent(id)?;
        let profile = match mode {
            UpdateMode::Replace => intake::talent_profile(payload)?,
            UpdateMode::Partial => intake::talent_changes(payload, &current.profile)?,
        };

        let updated = self.store.talents().update(Talent { id, profile })?;
        info!(talent_id = %id, ?mode, "talent updated");
        Ok(updated)
    }

    pub fn create_company(&self, payload: &Value) -> Result<Company, CastingServiceError> {
        let profile = intake::company_profile(payload)?;
        let company = self.store.companies().create(profile)?;
        info!(company_id = %company.id, "company created");
        Ok(company)
    }

    pub fn create_project(&self, payload: &Value) -> Result<Project, CastingServiceError> {
        let details = intake::project_details(payload)?;

        if let Some(company) = details.company {
            if self.store.companies().get_by_id(company)?.is_none() {
                return Err(FieldErrors::invalid_reference("company", company).into());
            }
        }

        let clashing = self.clashing_projects(&details)?;
        if let Some(existing) = clashing.first() {
            warn!(
                candidate = %details.name,
                existing = %existing.details.name,
                "project rejected as duplicate"
            );
            return Err(CastingServiceError::DuplicateProject);
        }

        let project = self.store.projects().create(details)?;
        info!(project_id = %project.id, "project created");
        Ok(project)
    }

    /// Projects whose name overlaps the candidate as a case-insensitive substring,
    /// in either direction.
    fn clashing_projects(&self, details: &ProjectDetails) -> Result<Vec<Project>, RepositoryError> {
        let candidate = details.name.to_lowercase();
        self.store.projects().list_where(&|project| {
            let existing = project.details.name.to_lowercase();
            existing.contains(&candidate) || candidate.contains(&existing)
        })
    }

    pub fn create_role(&self, payload: &Value) -> Result<Role, CastingServiceError> {
        let criteria = intake::role_criteria(payload)?;

        if self.store.projects().get_by_id(criteria.project)?.is_none() {
            return Err(FieldErrors::invalid_reference("project", criteria.project).into());
        }

        let duplicates = self
            .store
            .roles()
            .list_where(&|role| role.criteria == criteria)?;
        if !duplicates.is_empty() {
            warn!(project_id = %criteria.project, role = %criteria.name, "role rejected as duplicate");
            return Err(CastingServiceError::DuplicateRole);
        }

        let role = self.store.roles().create(criteria)?;
        info!(role_id = %role.id, project_id = %role.criteria.project, "role created");
        Ok(role)
    }

    /// Records an application once the talent satisfies every role criterion.
    pub fn apply(&self, payload: &Value) -> Result<Application, CastingServiceError> {
        let request = intake::application_request(payload)?;

        let talent = self.store.talents().get_by_id(request.talent)?;
        let role = self.store.roles().get_by_id(request.role)?;
        let (talent, role) = match (talent, role) {
            (Some(talent), Some(role)) => (talent, role),
            (talent, role) => {
                let mut errors = FieldErrors::default();
                if talent.is_none() {
                    errors.merge(FieldErrors::invalid_reference("talent", request.talent));
                }
                if role.is_none() {
                    errors.merge(FieldErrors::invalid_reference("role", request.role));
                }
                return Err(errors.into());
            }
        };

        if let EligibilityDecision::Ineligible(rejection) = self.check(&talent, &role.criteria) {
            info!(
                talent_id = %talent.id,
                role_id = %role.id,
                unmet = ?rejection.unmet,
                "application declined"
            );
            return Err(rejection.into());
        }

        let application = self.store.applications().create(request, Utc::now())?;
        info!(
            application_id = %application.id,
            talent_id = %talent.id,
            role_id = %role.id,
            "application accepted"
        );
        Ok(application)
    }

    pub fn check(&self, talent: &Talent, role: &RoleCriteria) -> EligibilityDecision {
        self.engine.assess(&talent.profile, role)
    }

    /// Distinct talents that applied to the role, ordered by talent id.
    pub fn applicants(&self, role_id: RoleId) -> Result<Vec<Talent>, CastingServiceError> {
        self.role(role_id)?;

        let talent_ids: BTreeSet<TalentId> = self
            .store
            .applications()
            .list_where(&|application| application.role == role_id)?
            .into_iter()
            .map(|application| application.talent)
            .collect();
        debug!(role_id = %role_id, applicants = talent_ids.len(), "listing applicants");

        Ok(self
            .store
            .talents()
            .list_where(&|talent| talent_ids.contains(&talent.id))?)
    }

    pub fn role(&self, id: RoleId) -> Result<Role, CastingServiceError> {
        self.store
            .roles()
            .get_by_id(id)?
            .ok_or(CastingServiceError::NotFound {
                entity: "role",
                id: id.0,
            })
    }

    pub fn project(&self, id: ProjectId) -> Result<Project, CastingServiceError> {
        self.store
            .projects()
            .get_by_id(id)?
            .ok_or(CastingServiceError::NotFound {
                entity: "project",
                id: id.0,
            })
    }

    pub fn project_role_names(&self, id: ProjectId) -> Result<Vec<String>, CastingServiceError> {
        self.project(id)?;
        Ok(self
            .store
            .roles()
            .list_where(&|role| role.criteria.project == id)?
            .into_iter()
            .map(|role| role.criteria.name)
            .collect())
    }

    /// `<role name> - <project name>`.
    pub fn role_label(&self, id: RoleId) -> Result<String, CastingServiceError> {
        let role = self.role(id)?;
        let project = self.project(role.criteria.project)?;
        Ok(role.label(&project))
    }
}

/// Error raised by the casting service.
#[derive(Debug, thiserror::Error)]
pub enum CastingServiceError {
    #[error("invalid payload: {0}")]
    Validation(#[from] FieldErrors),
    #[error("A project with this name exists before")]
    DuplicateProject,
    #[error("This role already exists in this project")]
    DuplicateRole,
    #[error(transparent)]
    Ineligible(#[from] EligibilityRejection),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl CastingServiceError {
    /// Field-keyed view of the error for request validation responses.
    pub fn field_errors(&self) -> Option<FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors.clone()),
            Self::DuplicateProject | Self::DuplicateRole | Self::Ineligible(_) => {
                Some(FieldErrors::single(NON_FIELD_ERRORS, self.to_string()))
            }
            Self::NotFound { .. } | Self::Repository(_) => None,
        }
    }
}
