use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::casting::domain::{
    Application, ApplicationId, ApplicationRequest, Company, CompanyId, CompanyProfile, Project,
    ProjectDetails, ProjectId, Role, RoleCriteria, RoleId, Talent, TalentId, TalentProfile,
};
use crate::casting::memory::InMemoryCastingStore;
use crate::casting::repository::{
    ApplicationRepository, CastingStore, CompanyRepository, ProjectRepository, RepositoryError,
    RoleRepository, TalentRepository,
};
use crate::casting::{casting_router, CastingService};

pub(super) fn build_service() -> (CastingService, Arc<InMemoryCastingStore>) {
    let store = Arc::new(InMemoryCastingStore::new());
    let service = CastingService::new(store.clone());
    (service, store)
}

pub(super) fn talent_payload() -> Value {
    json!({
        "name": "Mohamed Mousa",
        "age": 33,
        "email": "test@yahoo.com",
        "phone_number": "010021445221",
        "gender": "male",
        "ethnicity": "white",
        "weight": 88,
        "height": 170,
    })
}

pub(super) fn talent_payload_named(name: &str, age: i32, weight: f64, height: f64) -> Value {
    let mut payload = talent_payload();
    payload["name"] = json!(name);
    payload["age"] = json!(age);
    payload["weight"] = json!(weight);
    payload["height"] = json!(height);
    payload
}

pub(super) fn company_payload() -> Value {
    json!({
        "name": "Seedstars",
        "email": "test@seed.com",
        "description": "test",
    })
}

pub(super) fn project_payload(name: &str, company: Option<CompanyId>) -> Value {
    json!({
        "company": company.map(|id| id.0.to_string()),
        "name": name,
        "description": "test description",
        "location": "Cairo",
    })
}

pub(super) fn role_payload(project: ProjectId) -> Value {
    json!({
        "name": "pilot",
        "project": project.0.to_string(),
        "talent_age": 35,
        "talent_gender": "male",
        "talent_ethnicity": "white",
        "talent_weight": 85,
        "talent_height": 172,
    })
}

pub(super) fn application_payload(talent: TalentId, role: RoleId) -> Value {
    json!({
        "talent": talent.0.to_string(),
        "role": role.0.to_string(),
    })
}

/// Profile matching the role from [`role_criteria`] within every tolerance band.
pub(super) fn talent_profile() -> TalentProfile {
    TalentProfile {
        name: "Mohamed Mousa".to_string(),
        email: "test@yahoo.com".to_string(),
        phone_number: "01002145214".to_string(),
        age: 33,
        gender: "male".to_string(),
        ethnicity: "white".to_string(),
        weight: 88.0,
        height: 170.0,
    }
}

pub(super) fn role_criteria() -> RoleCriteria {
    RoleCriteria {
        name: "pilot".to_string(),
        project: ProjectId(1),
        talent_age: 35,
        talent_gender: "male".to_string(),
        talent_ethnicity: "white".to_string(),
        talent_weight: 85.0,
        talent_height: 172.0,
    }
}

/// Company, project and role created through the service.
pub(super) struct Seeded {
    pub(super) service: CastingService,
    pub(super) store: Arc<InMemoryCastingStore>,
    pub(super) project: Project,
    pub(super) role: Role,
}

pub(super) fn seeded() -> Seeded {
    let (service, store) = build_service();
    let company = service
        .create_company(&company_payload())
        .expect("company created");
    let project = service
        .create_project(&project_payload("Eagle eye", Some(company.id)))
        .expect("project created");
    let role = service
        .create_role(&role_payload(project.id))
        .expect("role created");
    Seeded {
        service,
        store,
        project,
        role,
    }
}

pub(super) fn router_for(service: CastingService) -> Router {
    casting_router(Arc::new(service))
}

pub(super) async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).expect("serialize body"))),
        None => request.body(Body::empty()),
    }
    .expect("request builds");

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("route executes");
    let status = response.status();
    (status, read_json_body(response).await)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Store whose every call fails as if the database were offline.
pub(super) struct UnavailableStore;

fn offline() -> RepositoryError {
    RepositoryError::Unavailable("database offline".to_string())
}

impl CastingStore for UnavailableStore {
    fn talents(&self) -> &dyn TalentRepository {
        self
    }

    fn companies(&self) -> &dyn CompanyRepository {
        self
    }

    fn projects(&self) -> &dyn ProjectRepository {
        self
    }

    fn roles(&self) -> &dyn RoleRepository {
        self
    }

    fn applications(&self) -> &dyn ApplicationRepository {
        self
    }
}

impl TalentRepository for UnavailableStore {
    fn create(&self, _profile: TalentProfile) -> Result<Talent, RepositoryError> {
        Err(offline())
    }

    fn get_by_id(&self, _id: TalentId) -> Result<Option<Talent>, RepositoryError> {
        Err(offline())
    }

    fn update(&self, _talent: Talent) -> Result<Talent, RepositoryError> {
        Err(offline())
    }

    fn list_where(&self, _filter: &dyn Fn(&Talent) -> bool) -> Result<Vec<Talent>, RepositoryError> {
        Err(offline())
    }

    fn delete(&self, _id: TalentId) -> Result<(), RepositoryError> {
        Err(offline())
    }
}

impl CompanyRepository for UnavailableStore {
    fn create(&self, _profile: CompanyProfile) -> Result<Company, RepositoryError> {
        Err(offline())
    }

    fn get_by_id(&self, _id: CompanyId) -> Result<Option<Company>, RepositoryError> {
        Err(offline())
    }

    fn update(&self, _company: Company) -> Result<Company, RepositoryError> {
        Err(offline())
    }

    fn list_where(
        &self,
        _filter: &dyn Fn(&Company) -> bool,
    ) -> Result<Vec<Company>, RepositoryError> {
        Err(offline())
    }

    fn delete(&self, _id: CompanyId) -> Result<(), RepositoryError> {
        Err(offline())
    }
}

impl ProjectRepository for UnavailableStore {
    fn create(&self, _details: ProjectDetails) -> Result<Project, RepositoryError> {
        Err(offline())
    }

    fn get_by_id(&self, _id: ProjectId) -> Result<Option<Project>, RepositoryError> {
        Err(offline())
    }

    fn update(&self, _project: Project) -> Result<Project, RepositoryError> {
        Err(offline())
    }

    fn list_where(
        &self,
        _filter: &dyn Fn(&Project) -> bool,
    ) -> Result<Vec<Project>, RepositoryError> {
        Err(offline())
    }

    fn delete(&self, _id: ProjectId) -> Result<(), RepositoryError> {
        Err(offline())
    }
}

impl RoleRepository for UnavailableStore {
    fn create(&self, _criteria: RoleCriteria) -> Result<Role, RepositoryError> {
        Err(offline())
    }

    fn get_by_id(&self, _id: RoleId) -> Result<Option<Role>, RepositoryError> {
        Err(offline())
    }

    fn update(&self, _role: Role) -> Result<Role, RepositoryError> {
        Err(offline())
    }

    fn list_where(&self, _filter: &dyn Fn(&Role) -> bool) -> Result<Vec<Role>, RepositoryError> {
        Err(offline())
    }

    fn delete(&self, _id: RoleId) -> Result<(), RepositoryError> {
        Err(offline())
    }
}

impl ApplicationRepository for UnavailableStore {
    fn create(
        &self,
        _request: ApplicationRequest,
        _applied_at: DateTime<Utc>,
    ) -> Result<Application, RepositoryError> {
        Err(offline())
    }

    fn get_by_id(&self, _id: ApplicationId) -> Result<Option<Application>, RepositoryError> {
        Err(offline())
    }

    fn list_where(
        &self,
        _filter: &dyn Fn(&Application) -> bool,
    ) -> Result<Vec<Application>, RepositoryError> {
        Err(offline())
    }
}
