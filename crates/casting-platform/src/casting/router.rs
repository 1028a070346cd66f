use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::error;
use utoipa::ToSchema;

use super::domain::{
    Application, ApplicationRequest, Company, CompanyProfile, Project, ProjectDetails, ProjectId,
    Role, RoleCriteria, RoleId, Talent, TalentId, TalentProfile,
};
use super::eligibility::EligibilityCriterion;
use super::intake::FieldErrors;
use super::service::{CastingService, CastingServiceError, UpdateMode};

/// Generic error payload for lookups and malformed bodies.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorDetail {
    pub detail: String,
}

/// Payload returned when a talent does not meet a role's criteria.
#[derive(Debug, Serialize, ToSchema)]
pub struct IneligibleApplication {
    pub non_field_errors: Vec<String>,
    pub failed_criteria: Vec<EligibilityCriterion>,
}

/// Router builder exposing the casting endpoints.
pub fn casting_router(service: Arc<CastingService>) -> Router {
    Router::new()
        .route("/api/talent/create/", post(create_talent))
        .route(
            "/api/talent/:id/",
            get(get_talent).put(replace_talent).patch(patch_talent),
        )
        .route("/api/company/create/", post(create_company))
        .route("/api/project/create/", post(create_project))
        .route("/api/project/:id/roles/", get(project_roles))
        .route("/api/role/create/", post(create_role))
        .route("/api/role/apply/", post(apply_to_role))
        .route("/api/role/:role_id/list/", get(list_applicants))
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/api/talent/create/",
    request_body = TalentProfile,
    responses(
        (status = 201, description = "Talent registered", body = Talent),
        (status = 400, description = "Field validation failed", body = FieldErrors)
    ),
    tag = "talent"
)]
pub(crate) async fn create_talent(
    State(service): State<Arc<CastingService>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let payload = match read_payload(payload) {
        Ok(payload) => payload,
        Err(response) => return response,
    };
    respond(StatusCode::CREATED, service.create_talent(&payload))
}

#[utoipa::path(
    get,
    path = "/api/talent/{id}/",
    params(("id" = u64, Path, description = "Talent id")),
    responses(
        (status = 200, description = "Talent record", body = Talent),
        (status = 404, description = "Unknown talent", body = ErrorDetail)
    ),
    tag = "talent"
)]
pub(crate) async fn get_talent(
    State(service): State<Arc<CastingService>>,
    Path(id): Path<String>,
) -> Response {
    let Some(id) = parse_id(&id) else {
        return not_found();
    };
    respond(StatusCode::OK, service.talent(TalentId(id)))
}

#[utoipa::path(
    put,
    path = "/api/talent/{id}/",
    params(("id" = u64, Path, description = "Talent id")),
    request_body = TalentProfile,
    responses(
        (status = 200, description = "Talent replaced", body = Talent),
        (status = 400, description = "Field validation failed; record unchanged", body = FieldErrors),
        (status = 404, description = "Unknown talent", body = ErrorDetail)
    ),
    tag = "talent"
)]
pub(crate) async fn replace_talent(
    State(service): State<Arc<CastingService>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    update_talent(&service, &id, payload, UpdateMode::Replace)
}

#[utoipa::path(
    patch,
    path = "/api/talent/{id}/",
    params(("id" = u64, Path, description = "Talent id")),
    request_body = TalentProfile,
    responses(
        (status = 200, description = "Talent partially updated", body = Talent),
        (status = 400, description = "Field validation failed; record unchanged", body = FieldErrors),
        (status = 404, description = "Unknown talent", body = ErrorDetail)
    ),
    tag = "talent"
)]
pub(crate) async fn patch_talent(
    State(service): State<Arc<CastingService>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    update_talent(&service, &id, payload, UpdateMode::Partial)
}

fn update_talent(
    service: &CastingService,
    raw_id: &str,
    payload: Result<Json<Value>, JsonRejection>,
    mode: UpdateMode,
) -> Response {
    let Some(id) = parse_id(raw_id) else {
        return not_found();
    };
    let payload = match read_payload(payload) {
        Ok(payload) => payload,
        Err(response) => return response,
    };
    respond(
        StatusCode::OK,
        service.update_talent(TalentId(id), &payload, mode),
    )
}

#[utoipa::path(
    post,
    path = "/api/company/create/",
    request_body = CompanyProfile,
    responses(
        (status = 201, description = "Company created", body = Company),
        (status = 400, description = "Field validation failed", body = FieldErrors)
    ),
    tag = "company"
)]
pub(crate) async fn create_company(
    State(service): State<Arc<CastingService>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let payload = match read_payload(payload) {
        Ok(payload) => payload,
        Err(response) => return response,
    };
    respond(StatusCode::CREATED, service.create_company(&payload))
}

#[utoipa::path(
    post,
    path = "/api/project/create/",
    request_body = ProjectDetails,
    responses(
        (status = 201, description = "Project created", body = Project),
        (status = 400, description = "Field validation failed or the name clashes with an existing project", body = FieldErrors)
    ),
    tag = "project"
)]
pub(crate) async fn create_project(
    State(service): State<Arc<CastingService>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let payload = match read_payload(payload) {
        Ok(payload) => payload,
        Err(response) => return response,
    };
    respond(StatusCode::CREATED, service.create_project(&payload))
}

#[utoipa::path(
    get,
    path = "/api/project/{id}/roles/",
    params(("id" = u64, Path, description = "Project id")),
    responses(
        (status = 200, description = "Names of the project's roles", body = Vec<String>),
        (status = 404, description = "Unknown project", body = ErrorDetail)
    ),
    tag = "project"
)]
pub(crate) async fn project_roles(
    State(service): State<Arc<CastingService>>,
    Path(id): Path<String>,
) -> Response {
    let Some(id) = parse_id(&id) else {
        return not_found();
    };
    respond(StatusCode::OK, service.project_role_names(ProjectId(id)))
}

#[utoipa::path(
    post,
    path = "/api/role/create/",
    request_body = RoleCriteria,
    responses(
        (status = 201, description = "Role created", body = Role),
        (status = 400, description = "Field validation failed or the role already exists in the project", body = FieldErrors)
    ),
    tag = "role"
)]
pub(crate) async fn create_role(
    State(service): State<Arc<CastingService>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let payload = match read_payload(payload) {
        Ok(payload) => payload,
        Err(response) => return response,
    };
    respond(StatusCode::CREATED, service.create_role(&payload))
}

#[utoipa::path(
    post,
    path = "/api/role/apply/",
    request_body = ApplicationRequest,
    responses(
        (status = 201, description = "Application accepted", body = Application),
        (status = 400, description = "Talent does not meet the role criteria, or the talent/role id is unknown", body = IneligibleApplication)
    ),
    tag = "role"
)]
pub(crate) async fn apply_to_role(
    State(service): State<Arc<CastingService>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let payload = match read_payload(payload) {
        Ok(payload) => payload,
        Err(response) => return response,
    };
    respond(StatusCode::CREATED, service.apply(&payload))
}

#[utoipa::path(
    get,
    path = "/api/role/{role_id}/list/",
    params(("role_id" = u64, Path, description = "Role id")),
    responses(
        (status = 200, description = "Talents who applied to the role", body = Vec<Talent>),
        (status = 404, description = "Unknown role", body = ErrorDetail)
    ),
    tag = "role"
)]
pub(crate) async fn list_applicants(
    State(service): State<Arc<CastingService>>,
    Path(role_id): Path<String>,
) -> Response {
    let Some(role_id) = parse_id(&role_id) else {
        return not_found();
    };
    respond(StatusCode::OK, service.applicants(RoleId(role_id)))
}

fn parse_id(raw: &str) -> Option<u64> {
    raw.parse().ok()
}

fn read_payload(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, Response> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            let status = match &rejection {
                JsonRejection::JsonSyntaxError(_) | JsonRejection::JsonDataError(_) => {
                    StatusCode::BAD_REQUEST
                }
                other => other.status(),
            };
            let body = ErrorDetail {
                detail: rejection.body_text(),
            };
            Err((status, Json(body)).into_response())
        }
    }
}

fn not_found() -> Response {
    let body = ErrorDetail {
        detail: "Not found.".to_string(),
    };
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

fn respond<T: Serialize>(status: StatusCode, result: Result<T, CastingServiceError>) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) fn error_response(err: CastingServiceError) -> Response {
    match err {
        CastingServiceError::Ineligible(rejection) => {
            let body = IneligibleApplication {
                non_field_errors: vec![rejection.to_string()],
                failed_criteria: rejection.unmet,
            };
            (StatusCode::BAD_REQUEST, Json(body)).into_response()
        }
        CastingServiceError::NotFound { .. } => not_found(),
        CastingServiceError::Repository(source) => {
            error!(error = %source, "casting store failure");
            let payload = json!({ "error": source.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
        other => {
            let errors = other.field_errors().unwrap_or_default();
            (StatusCode::BAD_REQUEST, Json(errors)).into_response()
        }
    }
}
