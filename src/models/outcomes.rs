//! Peri-operative outcome models
//!
//! Terminal nodes of the causal graph. Baselines are fixed literature
//! incidences rather than band prevalences, and both the evaluated
//! probability and the sampled flag are recorded on the patient so
//! downstream analysis can work with either.

use super::ConditionModel;
use crate::risk::RiskFactor;

/// Post-operative delirium
#[must_use]
pub fn post_op_delirium() -> ConditionModel {
    ConditionModel::new(
        "pod",
        0.187,
        vec![
            RiskFactor::odds_ratio("history of delirium", 6.4),
            RiskFactor::odds_ratio("frailty", 4.1),
            RiskFactor::odds_ratio("ckd", 2.3),
            RiskFactor::odds_ratio("cognitive impairment", 2.7),
            RiskFactor::odds_ratio("depression", 2.2),
            RiskFactor::odds_ratio("badl impairment", 2.1),
            RiskFactor::odds_ratio("iadl impairment", 1.9),
            RiskFactor::odds_ratio("stroke", 2.1),
            RiskFactor::odds_ratio("tia", 1.8),
            RiskFactor::odds_ratio("current smoker", 1.8),
            RiskFactor::odds_ratio("visual impairment", 1.89),
        ],
    )
}

/// Any surgical complication
#[must_use]
pub fn all_surgical_complications() -> ConditionModel {
    ConditionModel::new(
        "all_surgical_comps",
        0.30,
        vec![
            RiskFactor::odds_ratio("frailty", 2.53),
            RiskFactor::odds_ratio("depression", 1.77),
            RiskFactor::odds_ratio("polypharmacy", 1.3),
            RiskFactor::relative_risk("current smoker", 1.52),
            RiskFactor::relative_risk("alcohol use disorder", 1.56),
        ],
    )
}

/// Clinically significant post-operative pain
#[must_use]
pub fn post_operative_pain() -> ConditionModel {
    ConditionModel::new(
        "post_op_pain",
        0.88,
        vec![
            RiskFactor::odds_ratio("depression", 1.71),
            RiskFactor::odds_ratio("current smoker", 1.33),
        ],
    )
}

/// Wound complications
#[must_use]
pub fn wound_complications() -> ConditionModel {
    ConditionModel::new(
        "wound_complications",
        0.051,
        vec![
            RiskFactor::odds_ratio("current smoker", 2.15),
            RiskFactor::odds_ratio("frailty", 2.85),
            RiskFactor::odds_ratio("alcohol use disorder", 1.23),
        ],
    )
}

/// Post-operative sepsis
#[must_use]
pub fn post_op_sepsis() -> ConditionModel {
    ConditionModel::new(
        "post_op_sepsis",
        1.84 / 100.0,
        vec![
            RiskFactor::odds_ratio("current smoker", 1.54),
            RiskFactor::odds_ratio("frailty", 3.84),
            RiskFactor::odds_ratio("alcohol use disorder", 1.72),
            RiskFactor::odds_ratio("heart failure", 2.53),
            RiskFactor::odds_ratio("diabetes", 1.53),
            RiskFactor::odds_ratio("ckd", 1.26),
        ],
    )
}

/// Post-operative pulmonary complications
#[must_use]
pub fn post_op_pulmonary_complications() -> ConditionModel {
    ConditionModel::new(
        "post_op_pulmonary_comps",
        14.4 / 100.0,
        vec![
            RiskFactor::odds_ratio("current smoker", 1.54),
            RiskFactor::odds_ratio("frailty", 3.84),
            RiskFactor::odds_ratio("alcohol use disorder", 1.72),
            RiskFactor::odds_ratio("heart failure", 2.53),
        ],
    )
}

/// Post-operative neurological complications
#[must_use]
pub fn post_op_neuro_complications() -> ConditionModel {
    ConditionModel::new(
        "post_op_neuro_comps",
        0.0032,
        vec![
            RiskFactor::odds_ratio("current smoker", 1.38),
            RiskFactor::odds_ratio("frailty", 3.41),
        ],
    )
}

/// Failure to survive in-hospital CPR.
///
/// The three age factors are mutually exclusive at evidence time even
/// though their names read as cumulative thresholds.
#[must_use]
pub fn cpr_failure() -> ConditionModel {
    ConditionModel::new(
        "cpr_failure",
        0.825,
        vec![
            RiskFactor::odds_ratio("age over 70", 1.5),
            RiskFactor::odds_ratio("age over 75", 2.8),
            RiskFactor::odds_ratio("age over 80", 2.7),
            RiskFactor::odds_ratio("badl impairment", 3.2),
            RiskFactor::odds_ratio("ckd", 1.9),
        ],
    )
}

/// Unplanned intensive care admission
#[must_use]
pub fn itu_admission() -> ConditionModel {
    ConditionModel::new(
        "post_op_itu_admission",
        0.0048,
        vec![
            RiskFactor::odds_ratio("current smoker", 1.6),
            RiskFactor::odds_ratio("alcohol use disorder", 1.29),
            RiskFactor::odds_ratio("anaemia", 1.588),
            RiskFactor::odds_ratio("frailty", 2.52),
            RiskFactor::odds_ratio("asa three", 5.199),
            RiskFactor::odds_ratio("asa four", 29.481),
        ],
    )
}

/// Potentially inappropriate medications
#[must_use]
pub fn potentially_inappropriate_medications() -> ConditionModel {
    ConditionModel::new(
        "pims",
        0.51,
        vec![
            RiskFactor::odds_ratio("diabetes", 1.57),
            RiskFactor::odds_ratio("polypharmacy", 3.0),
        ],
    )
}

/// Prolonged length of stay
#[must_use]
pub fn increased_length_of_stay() -> ConditionModel {
    ConditionModel::new(
        "increased_los",
        0.342,
        vec![
            RiskFactor::odds_ratio("frailty", 2.78),
            RiskFactor::odds_ratio("alcohol use disorder", 1.24),
            RiskFactor::odds_ratio("disability", 2.36),
            RiskFactor::odds_ratio("asa three", 1.7),
            RiskFactor::odds_ratio("asa four", 3.34),
        ],
    )
}

/// Post-operative functional decline
#[must_use]
pub fn functional_decline() -> ConditionModel {
    ConditionModel::new(
        "functional_decline",
        0.201,
        vec![RiskFactor::odds_ratio("iadl impairment", 2.87)],
    )
}

/// Neutropaenic events during chemotherapy
#[must_use]
pub fn neutropaenic_events() -> ConditionModel {
    ConditionModel::new(
        "neutropaenic_events",
        0.107,
        vec![
            RiskFactor::odds_ratio("comorbidity", 1.54),
            RiskFactor::odds_ratio("diabetes", 1.32),
        ],
    )
}

/// New nursing home admission
#[must_use]
pub fn nursing_home_admission() -> ConditionModel {
    ConditionModel::new(
        "nursing_home_admission",
        0.05,
        vec![
            RiskFactor::odds_ratio("current smoker", 1.9),
            RiskFactor::odds_ratio("frailty", 5.58),
            RiskFactor::odds_ratio("badl impairment", 3.25),
            RiskFactor::odds_ratio("difficulty walking outside", 3.6),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParentAssignment;
    use crate::population::sampler::SamplerRng;
    use crate::risk::round_to;
    use smallvec::SmallVec;

    fn baseline_of(model: &ConditionModel) -> f64 {
        let parents: ParentAssignment =
            SmallVec::from_elem(false, model.factors().len());
        let mut rng = SamplerRng::from_seed(0);
        model.evaluate(&parents, &mut rng).unwrap().probability
    }

    #[test]
    fn outcome_baselines_match_reference_values() {
        assert_eq!(round_to(baseline_of(&post_op_delirium()), 3), 0.187);
        assert_eq!(round_to(baseline_of(&all_surgical_complications()), 2), 0.30);
        assert_eq!(round_to(baseline_of(&post_operative_pain()), 2), 0.88);
        assert_eq!(round_to(baseline_of(&wound_complications()), 3), 0.051);
        assert_eq!(
            round_to(baseline_of(&post_op_pulmonary_complications()), 3),
            0.144
        );
        assert_eq!(round_to(baseline_of(&post_op_neuro_complications()), 3), 0.003);
        assert_eq!(round_to(baseline_of(&cpr_failure()), 3), 0.825);
        assert_eq!(round_to(baseline_of(&itu_admission()), 3), 0.005);
        assert_eq!(
            round_to(baseline_of(&potentially_inappropriate_medications()), 3),
            0.51
        );
        assert_eq!(round_to(baseline_of(&increased_length_of_stay()), 3), 0.342);
        assert_eq!(round_to(baseline_of(&functional_decline()), 3), 0.201);
        assert_eq!(round_to(baseline_of(&neutropaenic_events()), 3), 0.107);
        assert_eq!(round_to(baseline_of(&nursing_home_admission()), 3), 0.05);
    }
}
