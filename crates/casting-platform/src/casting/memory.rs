use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use super::domain::{
    Application, ApplicationId, ApplicationRequest, Company, CompanyId, CompanyProfile, Project,
    ProjectDetails, ProjectId, Role, RoleCriteria, RoleId, Talent, TalentId, TalentProfile,
};
use super::repository::{
    ApplicationRepository, CastingStore, CompanyRepository, ProjectRepository, RepositoryError,
    RoleRepository, TalentRepository,
};

#[derive(Debug, Default)]
struct Tables {
    talents: BTreeMap<TalentId, Talent>,
    companies: BTreeMap<CompanyId, Company>,
    projects: BTreeMap<ProjectId, Project>,
    roles: BTreeMap<RoleId, Role>,
    applications: BTreeMap<ApplicationId, Application>,
    sequences: Sequences,
}

/// Last issued id per table. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
struct Sequences {
    talent: u64,
    company: u64,
    project: u64,
    role: u64,
    application: u64,
}

fn next(counter: &mut u64) -> u64 {
    *counter += 1;
    *counter
}

type SharedTables = Arc<Mutex<Tables>>;

fn lock(tables: &SharedTables) -> Result<MutexGuard<'_, Tables>, RepositoryError> {
    tables
        .lock()
        .map_err(|_| RepositoryError::Unavailable("casting store lock poisoned".to_string()))
}

fn select<'a, V, I>(rows: I, filter: &dyn Fn(&V) -> bool) -> Vec<V>
where
    V: Clone + 'a,
    I: Iterator<Item = &'a V>,
{
    rows.filter(|row| filter(row)).cloned().collect()
}

fn protected(entity: &'static str, id: u64, referenced_by: &'static str) -> RepositoryError {
    RepositoryError::Protected {
        entity,
        id,
        referenced_by,
    }
}

/// Process-local store keeping every table behind a single mutex.
#[derive(Debug, Clone)]
pub struct InMemoryCastingStore {
    talents: MemoryTalents,
    companies: MemoryCompanies,
    projects: MemoryProjects,
    roles: MemoryRoles,
    applications: MemoryApplications,
}

impl InMemoryCastingStore {
    pub fn new() -> Self {
        let tables = SharedTables::default();
        Self {
            talents: MemoryTalents(tables.clone()),
            companies: MemoryCompanies(tables.clone()),
            projects: MemoryProjects(tables.clone()),
            roles: MemoryRoles(tables.clone()),
            applications: MemoryApplications(tables),
        }
    }
}

impl Default for InMemoryCastingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CastingStore for InMemoryCastingStore {
    fn talents(&self) -> &dyn TalentRepository {
        &self.talents
    }

    fn companies(&self) -> &dyn CompanyRepository {
        &self.companies
    }

    fn projects(&self) -> &dyn ProjectRepository {
        &self.projects
    }

    fn roles(&self) -> &dyn RoleRepository {
        &self.roles
    }

    fn applications(&self) -> &dyn ApplicationRepository {
        &self.applications
    }
}

#[derive(Debug, Clone)]
pub struct MemoryTalents(SharedTables);

impl TalentRepository for MemoryTalents {
    fn create(&self, profile: TalentProfile) -> Result<Talent, RepositoryError> {
        let mut tables = lock(&self.0)?;
        let id = TalentId(next(&mut tables.sequences.talent));
        let talent = Talent { id, profile };
        tables.talents.insert(id, talent.clone());
        Ok(talent)
    }

    fn get_by_id(&self, id: TalentId) -> Result<Option<Talent>, RepositoryError> {
        Ok(lock(&self.0)?.talents.get(&id).cloned())
    }

    fn update(&self, talent: Talent) -> Result<Talent, RepositoryError> {
        let mut tables = lock(&self.0)?;
        match tables.talents.get_mut(&talent.id) {
            Some(stored) => {
                *stored = talent.clone();
                Ok(talent)
            }
            None => Err(RepositoryError::NotFound {
                entity: "talent",
                id: talent.id.0,
            }),
        }
    }

    fn list_where(&self, filter: &dyn Fn(&Talent) -> bool) -> Result<Vec<Talent>, RepositoryError> {
        Ok(select(lock(&self.0)?.talents.values(), filter))
    }

    fn delete(&self, id: TalentId) -> Result<(), RepositoryError> {
        let mut tables = lock(&self.0)?;
        if tables.applications.values().any(|app| app.talent == id) {
            return Err(protected("talent", id.0, "application"));
        }
        tables
            .talents
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound {
                entity: "talent",
                id: id.0,
            })
    }
}

#[derive(Debug, Clone)]
pub struct MemoryCompanies(SharedTables);

impl CompanyRepository for MemoryCompanies {
    fn create(&self, profile: CompanyProfile) -> Result<Company, RepositoryError> {
        let mut tables = lock(&self.0)?;
        let id = CompanyId(next(&mut tables.sequences.company));
        let company = Company { id, profile };
        tables.companies.insert(id, company.clone());
        Ok(company)
    }

    fn get_by_id(&self, id: CompanyId) -> Result<Option<Company>, RepositoryError> {
        Ok(lock(&self.0)?.companies.get(&id).cloned())
    }

    fn update(&self, company: Company) -> Result<Company, RepositoryError> {
        let mut tables = lock(&self.0)?;
        match tables.companies.get_mut(&company.id) {
            Some(stored) => {
                *stored = company.clone();
                Ok(company)
            }
            None => Err(RepositoryError::NotFound {
                entity: "company",
                id: company.id.0,
            }),
        }
    }

    fn list_where(
        &self,
        filter: &dyn Fn(&Company) -> bool,
    ) -> Result<Vec<Company>, RepositoryError> {
        Ok(select(lock(&self.0)?.companies.values(), filter))
    }

    fn delete(&self, id: CompanyId) -> Result<(), RepositoryError> {
        let mut tables = lock(&self.0)?;
        if tables
            .projects
            .values()
            .any(|project| project.details.company == Some(id))
        {
            return Err(protected("company", id.0, "project"));
        }
        tables
            .companies
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound {
                entity: "company",
                id: id.0,
            })
    }
}

#[derive(Debug, Clone)]
pub struct MemoryProjects(SharedTables);

impl ProjectRepository for MemoryProjects {
    fn create(&self, details: ProjectDetails) -> Result<Project, RepositoryError> {
        let mut tables = lock(&self.0)?;
        if let Some(company) = details.company {
            if !tables.companies.contains_key(&company) {
                return Err(RepositoryError::NotFound {
                    entity: "company",
                    id: company.0,
                });
            }
        }
        let id = ProjectId(next(&mut tables.sequences.project));
        let project = Project { id, details };
        tables.projects.insert(id, project.clone());
        Ok(project)
    }

    fn get_by_id(&self, id: ProjectId) -> Result<Option<Project>, RepositoryError> {
        Ok(lock(&self.0)?.projects.get(&id).cloned())
    }

    fn update(&self, project: Project) -> Result<Project, RepositoryError> {
        let mut tables = lock(&self.0)?;
        match tables.projects.get_mut(&project.id) {
            Some(stored) => {
                *stored = project.clone();
                Ok(project)
            }
            None => Err(RepositoryError::NotFound {
                entity: "project",
                id: project.id.0,
            }),
        }
    }

    fn list_where(
        &self,
        filter: &dyn Fn(&Project) -> bool,
    ) -> Result<Vec<Project>, RepositoryError> {
        Ok(select(lock(&self.0)?.projects.values(), filter))
    }

    fn delete(&self, id: ProjectId) -> Result<(), RepositoryError> {
        let mut tables = lock(&self.0)?;
        if tables.roles.values().any(|role| role.criteria.project == id) {
            return Err(protected("project", id.0, "role"));
        }
        tables
            .projects
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound {
                entity: "project",
                id: id.0,
            })
    }
}

#[derive(Debug, Clone)]
pub struct MemoryRoles(SharedTables);

impl RoleRepository for MemoryRoles {
    fn create(&self, criteria: RoleCriteria) -> Result<Role, RepositoryError> {
        let mut tables = lock(&self.0)?;
        if !tables.projects.contains_key(&criteria.project) {
            return Err(RepositoryError::NotFound {
                entity: "project",
                id: criteria.project.0,
            });
        }
        let id = RoleId(next(&mut tables.sequences.role));
        let role = Role { id, criteria };
        tables.roles.insert(id, role.clone());
        Ok(role)
    }

    fn get_by_id(&self, id: RoleId) -> Result<Option<Role>, RepositoryError> {
        Ok(lock(&self.0)?.roles.get(&id).cloned())
    }

    fn update(&self, role: Role) -> Result<Role, RepositoryError> {
        let mut tables = lock(&self.0)?;
        match tables.roles.get_mut(&role.id) {
            Some(stored) => {
                *stored = role.clone();
                Ok(role)
            }
            None => Err(RepositoryError::NotFound {
                entity: "role",
                id: role.id.0,
            }),
        }
    }

    fn list_where(&self, filter: &dyn Fn(&Role) -> bool) -> Result<Vec<Role>, RepositoryError> {
        Ok(select(lock(&self.0)?.roles.values(), filter))
    }

    fn delete(&self, id: RoleId) -> Result<(), RepositoryError> {
        let mut tables = lock(&self.0)?;
        if tables.applications.values().any(|app| app.role == id) {
            return Err(protected("role", id.0, "application"));
        }
        tables
            .roles
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound {
                entity: "role",
                id: id.0,
            })
    }
}

#[derive(Debug, Clone)]
pub struct MemoryApplications(SharedTables);

impl ApplicationRepository for MemoryApplications {
    fn create(
        &self,
        request: ApplicationRequest,
        applied_at: DateTime<Utc>,
    ) -> Result<Application, RepositoryError> {
        let mut tables = lock(&self.0)?;
        if !tables.talents.contains_key(&request.talent) {
            return Err(RepositoryError::NotFound {
                entity: "talent",
                id: request.talent.0,
            });
        }
        if !tables.roles.contains_key(&request.role) {
            return Err(RepositoryError::NotFound {
                entity: "role",
                id: request.role.0,
            });
        }
        let id = ApplicationId(next(&mut tables.sequences.application));
        let application = Application {
            id,
            talent: request.talent,
            role: request.role,
            datetime_applied: applied_at,
        };
        tables.applications.insert(id, application.clone());
        Ok(application)
    }

    fn get_by_id(&self, id: ApplicationId) -> Result<Option<Application>, RepositoryError> {
        Ok(lock(&self.0)?.applications.get(&id).cloned())
    }

    fn list_where(
        &self,
        filter: &dyn Fn(&Application) -> bool,
    ) -> Result<Vec<Application>, RepositoryError> {
        Ok(select(lock(&self.0)?.applications.values(), filter))
    }
}
