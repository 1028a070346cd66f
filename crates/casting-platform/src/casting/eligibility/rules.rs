use super::super::domain::{RoleCriteria, TalentProfile};
use super::config::EligibilityConfig;
use super::policy::EligibilityCriterion;

pub(crate) fn unmet_criteria(
    talent: &TalentProfile,
    role: &RoleCriteria,
    config: &EligibilityConfig,
) -> Vec<EligibilityCriterion> {
    let mut unmet = Vec::new();

    // Categorical criteria compare the stored strings verbatim.
    if talent.gender != role.talent_gender {
        unmet.push(EligibilityCriterion::Gender);
    }
    if talent.ethnicity != role.talent_ethnicity {
        unmet.push(EligibilityCriterion::Ethnicity);
    }
    if !age_within(talent.age, role.talent_age, config.age_tolerance) {
        unmet.push(EligibilityCriterion::Age);
    }
    if !measure_within(talent.weight, role.talent_weight, config.weight_tolerance) {
        unmet.push(EligibilityCriterion::Weight);
    }
    if !measure_within(talent.height, role.talent_height, config.height_tolerance) {
        unmet.push(EligibilityCriterion::Height);
    }

    unmet
}

fn age_within(actual: i32, target: i32, tolerance: i32) -> bool {
    let (actual, target, tolerance) = (i64::from(actual), i64::from(target), i64::from(tolerance));
    target - tolerance <= actual && actual <= target + tolerance
}

fn measure_within(actual: f64, target: f64, tolerance: f64) -> bool {
    target - tolerance <= actual && actual <= target + tolerance
}
