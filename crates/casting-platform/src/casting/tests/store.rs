use chrono::Utc;

use super::common::*;
use crate::casting::domain::{
    ApplicationRequest, CompanyProfile, ProjectDetails, ProjectId, RoleId, Talent, TalentId,
};
use crate::casting::repository::{CastingStore, RepositoryError};
use crate::casting::InMemoryCastingStore;

fn company_profile() -> CompanyProfile {
    CompanyProfile {
        name: "Seedstars".to_string(),
        email: "test@seed.com".to_string(),
        description: "test".to_string(),
    }
}

fn project_details(company: Option<crate::casting::CompanyId>) -> ProjectDetails {
    ProjectDetails {
        company,
        name: "Eagle eye".to_string(),
        description: "test description".to_string(),
        location: "Cairo".to_string(),
    }
}

#[test]
fn ids_are_sequential_per_table() {
    let store = InMemoryCastingStore::new();
    let first = store.talents().create(talent_profile()).expect("created");
    let second = store.talents().create(talent_profile()).expect("created");
    let company = store.companies().create(company_profile()).expect("created");

    assert_eq!(first.id, TalentId(1));
    assert_eq!(second.id, TalentId(2));
    assert_eq!(company.id.0, 1);
}

#[test]
fn ids_are_not_reused_after_delete() {
    let store = InMemoryCastingStore::new();
    let first = store.talents().create(talent_profile()).expect("created");
    store.talents().delete(first.id).expect("deleted");
    let second = store.talents().create(talent_profile()).expect("created");
    assert_eq!(second.id, TalentId(2));
    assert!(store.talents().get_by_id(first.id).expect("readable").is_none());
}

#[test]
fn update_of_missing_row_is_not_found() {
    let store = InMemoryCastingStore::new();
    let result = store.talents().update(Talent {
        id: TalentId(4),
        profile: talent_profile(),
    });
    assert!(matches!(
        result,
        Err(RepositoryError::NotFound {
            entity: "talent",
            id: 4
        })
    ));
}

#[test]
fn references_must_exist_on_create() {
    let store = InMemoryCastingStore::new();
    let result = store.roles().create(role_criteria());
    assert!(matches!(
        result,
        Err(RepositoryError::NotFound {
            entity: "project",
            ..
        })
    ));

    let result = store.applications().create(
        ApplicationRequest {
            talent: TalentId(1),
            role: RoleId(1),
        },
        Utc::now(),
    );
    assert!(matches!(
        result,
        Err(RepositoryError::NotFound {
            entity: "talent",
            ..
        })
    ));
}

#[test]
fn referenced_rows_are_protected_from_delete() {
    let store = InMemoryCastingStore::new();
    let company = store.companies().create(company_profile()).expect("created");
    let project = store
        .projects()
        .create(project_details(Some(company.id)))
        .expect("created");
    let mut criteria = role_criteria();
    criteria.project = project.id;
    let role = store.roles().create(criteria).expect("created");
    let talent = store.talents().create(talent_profile()).expect("created");
    store
        .applications()
        .create(
            ApplicationRequest {
                talent: talent.id,
                role: role.id,
            },
            Utc::now(),
        )
        .expect("created");

    assert!(matches!(
        store.companies().delete(company.id),
        Err(RepositoryError::Protected {
            referenced_by: "project",
            ..
        })
    ));
    assert!(matches!(
        store.projects().delete(project.id),
        Err(RepositoryError::Protected {
            referenced_by: "role",
            ..
        })
    ));
    assert!(matches!(
        store.roles().delete(role.id),
        Err(RepositoryError::Protected {
            referenced_by: "application",
            ..
        })
    ));
    assert!(matches!(
        store.talents().delete(talent.id),
        Err(RepositoryError::Protected {
            referenced_by: "application",
            ..
        })
    ));
}

#[test]
fn unreferenced_rows_can_be_deleted() {
    let store = InMemoryCastingStore::new();
    let project = store.projects().create(project_details(None)).expect("created");
    store.projects().delete(project.id).expect("deleted");
    assert!(matches!(
        store.projects().delete(project.id),
        Err(RepositoryError::NotFound { .. })
    ));
    assert!(store
        .projects()
        .get_by_id(ProjectId(1))
        .expect("readable")
        .is_none());
}

#[test]
fn list_where_filters_rows() {
    let store = InMemoryCastingStore::new();
    for age in [20, 30, 40] {
        let mut profile = talent_profile();
        profile.age = age;
        store.talents().create(profile).expect("created");
    }
    let older = store
        .talents()
        .list_where(&|talent| talent.profile.age >= 30)
        .expect("readable");
    assert_eq!(
        older.iter().map(|talent| talent.id).collect::<Vec<_>>(),
        vec![TalentId(2), TalentId(3)]
    );
}
