use utoipa::OpenApi;

use super::domain::{
    Application, ApplicationRequest, Company, CompanyProfile, Project, ProjectDetails, Role,
    RoleCriteria, Talent, TalentProfile,
};
use super::eligibility::EligibilityCriterion;
use super::intake::FieldErrors;
use super::router::{self, ErrorDetail, IneligibleApplication};

/// OpenAPI document for the casting endpoints.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Casting App API",
        version = "v1",
        description = "Casting platform: talents, companies, projects, roles and applications"
    ),
    paths(
        router::create_talent,
        router::get_talent,
        router::replace_talent,
        router::patch_talent,
        router::create_company,
        router::create_project,
        router::project_roles,
        router::create_role,
        router::apply_to_role,
        router::list_applicants,
    ),
    components(schemas(
        TalentProfile,
        Talent,
        CompanyProfile,
        Company,
        ProjectDetails,
        Project,
        RoleCriteria,
        Role,
        ApplicationRequest,
        Application,
        EligibilityCriterion,
        FieldErrors,
        ErrorDetail,
        IneligibleApplication,
    )),
    tags(
        (name = "talent", description = "Talent registration and profile updates"),
        (name = "company", description = "Companies posting projects"),
        (name = "project", description = "Projects grouping casting roles"),
        (name = "role", description = "Roles, applications and applicant listings")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    pub fn json() -> Result<String, serde_json::Error> {
        Self::openapi().to_pretty_json()
    }
}
