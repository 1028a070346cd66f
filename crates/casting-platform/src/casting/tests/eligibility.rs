use super::common::*;
use crate::casting::{
    EligibilityConfig, EligibilityCriterion, EligibilityDecision, EligibilityEngine,
};

fn unmet(decision: EligibilityDecision) -> Vec<EligibilityCriterion> {
    match decision {
        EligibilityDecision::Eligible => Vec::new(),
        EligibilityDecision::Ineligible(rejection) => rejection.unmet,
    }
}

#[test]
fn matching_talent_is_eligible() {
    let engine = EligibilityEngine::default();
    let decision = engine.assess(&talent_profile(), &role_criteria());
    assert!(decision.is_eligible());
    assert!(decision.into_result().is_ok());
}

#[test]
fn gender_mismatch_is_the_only_failure_reported() {
    let engine = EligibilityEngine::default();
    let mut talent = talent_profile();
    talent.gender = "female".to_string();

    let decision = engine.assess(&talent, &role_criteria());
    assert!(!decision.is_eligible());
    assert_eq!(unmet(decision), vec![EligibilityCriterion::Gender]);
}

#[test]
fn age_band_is_inclusive_at_five_years() {
    let engine = EligibilityEngine::default();
    let role = role_criteria();

    for age in [30, 40] {
        let mut talent = talent_profile();
        talent.age = age;
        assert!(engine.assess(&talent, &role).is_eligible(), "age {age}");
    }

    for age in [29, 41] {
        let mut talent = talent_profile();
        talent.age = age;
        assert_eq!(
            unmet(engine.assess(&talent, &role)),
            vec![EligibilityCriterion::Age],
            "age {age}"
        );
    }
}

#[test]
fn weight_and_height_bands_accept_fractional_edges() {
    let engine = EligibilityEngine::default();
    let role = role_criteria();

    let mut talent = talent_profile();
    talent.weight = 90.0;
    talent.height = 167.0;
    assert!(engine.assess(&talent, &role).is_eligible());

    talent.weight = 90.5;
    talent.height = 177.5;
    assert_eq!(
        unmet(engine.assess(&talent, &role)),
        vec![EligibilityCriterion::Weight, EligibilityCriterion::Height]
    );
}

#[test]
fn every_failed_criterion_is_reported_in_order() {
    let engine = EligibilityEngine::default();
    let talent = crate::casting::TalentProfile {
        gender: "female".to_string(),
        ethnicity: "asian".to_string(),
        age: 60,
        weight: 50.0,
        height: 150.0,
        ..talent_profile()
    };

    let decision = engine.assess(&talent, &role_criteria());
    assert_eq!(unmet(decision), EligibilityCriterion::ordered().to_vec());
}

#[test]
fn categorical_criteria_compare_exactly() {
    let engine = EligibilityEngine::default();
    let mut talent = talent_profile();
    talent.gender = "Male".to_string();
    talent.ethnicity = "White".to_string();

    assert_eq!(
        unmet(engine.assess(&talent, &role_criteria())),
        vec![EligibilityCriterion::Gender, EligibilityCriterion::Ethnicity]
    );
}

#[test]
fn custom_tolerances_tighten_the_bands() {
    let engine = EligibilityEngine::new(EligibilityConfig {
        age_tolerance: 0,
        weight_tolerance: 0.0,
        height_tolerance: 0.0,
    });

    let decision = engine.assess(&talent_profile(), &role_criteria());
    assert_eq!(
        unmet(decision),
        vec![
            EligibilityCriterion::Age,
            EligibilityCriterion::Weight,
            EligibilityCriterion::Height
        ]
    );
}

#[test]
fn rejection_message_lists_failed_criteria() {
    let engine = EligibilityEngine::default();
    let mut talent = talent_profile();
    talent.gender = "female".to_string();
    talent.age = 20;

    let decision = engine.assess(&talent, &role_criteria());
    assert_eq!(
        decision.summary(),
        "Application declined. Unsatisfied criteria of the role: gender, age"
    );
    let rejection = decision.into_result().expect_err("talent is ineligible");
    assert!(rejection.contains(EligibilityCriterion::Age));
    assert!(!rejection.contains(EligibilityCriterion::Height));
}
