use chrono::{DateTime, Utc};

use super::domain::{
    Application, ApplicationId, ApplicationRequest, Company, CompanyId, CompanyProfile, Project,
    ProjectDetails, ProjectId, Role, RoleCriteria, RoleId, Talent, TalentId, TalentProfile,
};

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },
    #[error("{entity} {id} is still referenced by {referenced_by}")]
    Protected {
        entity: &'static str,
        id: u64,
        referenced_by: &'static str,
    },
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

pub trait TalentRepository: Send + Sync {
    fn create(&self, profile: TalentProfile) -> Result<Talent, RepositoryError>;
    fn get_by_id(&self, id: TalentId) -> Result<Option<Talent>, RepositoryError>;
    fn update(&self, talent: Talent) -> Result<Talent, RepositoryError>;
    fn list_where(&self, filter: &dyn Fn(&Talent) -> bool) -> Result<Vec<Talent>, RepositoryError>;
    /// Refused while any application references the talent.
    fn delete(&self, id: TalentId) -> Result<(), RepositoryError>;
}

pub trait CompanyRepository: Send + Sync {
    fn create(&self, profile: CompanyProfile) -> Result<Company, RepositoryError>;
    fn get_by_id(&self, id: CompanyId) -> Result<Option<Company>, RepositoryError>;
    fn update(&self, company: Company) -> Result<Company, RepositoryError>;
    fn list_where(&self, filter: &dyn Fn(&Company) -> bool)
        -> Result<Vec<Company>, RepositoryError>;
    /// Refused while any project references the company.
    fn delete(&self, id: CompanyId) -> Result<(), RepositoryError>;
}

pub trait ProjectRepository: Send + Sync {
    fn create(&self, details: ProjectDetails) -> Result<Project, RepositoryError>;
    fn get_by_id(&self, id: ProjectId) -> Result<Option<Project>, RepositoryError>;
    fn update(&self, project: Project) -> Result<Project, RepositoryError>;
    fn list_where(&self, filter: &dyn Fn(&Project) -> bool)
        -> Result<Vec<Project>, RepositoryError>;
    /// Refused while any role belongs to the project.
    fn delete(&self, id: ProjectId) -> Result<(), RepositoryError>;
}

pub trait RoleRepository: Send + Sync {
    fn create(&self, criteria: RoleCriteria) -> Result<Role, RepositoryError>;
    fn get_by_id(&self, id: RoleId) -> Result<Option<Role>, RepositoryError>;
    fn update(&self, role: Role) -> Result<Role, RepositoryError>;
    fn list_where(&self, filter: &dyn Fn(&Role) -> bool) -> Result<Vec<Role>, RepositoryError>;
    /// Refused while any application references the role.
    fn delete(&self, id: RoleId) -> Result<(), RepositoryError>;
}

/// Applications are append-only: there is no update or delete.
pub trait ApplicationRepository: Send + Sync {
    fn create(
        &self,
        request: ApplicationRequest,
        applied_at: DateTime<Utc>,
    ) -> Result<Application, RepositoryError>;
    fn get_by_id(&self, id: ApplicationId) -> Result<Option<Application>, RepositoryError>;
    fn list_where(
        &self,
        filter: &dyn Fn(&Application) -> bool,
    ) -> Result<Vec<Application>, RepositoryError>;
}

/// Storage abstraction handing out one repository per entity so the service
/// can be exercised against any backend.
pub trait CastingStore: Send + Sync {
    fn talents(&self) -> &dyn TalentRepository;
    fn companies(&self) -> &dyn CompanyRepository;
    fn projects(&self) -> &dyn ProjectRepository;
    fn roles(&self) -> &dyn RoleRepository;
    fn applications(&self) -> &dyn ApplicationRepository;
}
