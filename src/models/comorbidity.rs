//! Comorbidity condition models
//!
//! Constructors for the chronic-disease layer of the causal graph. Effect
//! sizes are published literature values; baselines come from the age-band
//! prevalence table. A handful of conditions subtract a fixed calibration
//! offset from the raw prevalence to correct for background risk already
//! implicit in the literature ratios — those offsets are per-condition
//! constants with no general derivation rule.

use super::ConditionModel;
use crate::epidemiology::{AgeBand, Gender};
use crate::error::Result;
use crate::risk::RiskFactor;

/// Anaemia, driven by chronic kidney disease
pub fn anaemia(band: &AgeBand, gender: Gender) -> Result<ConditionModel> {
    let baseline = band.prevalence_fraction("anaemia", gender)?;
    Ok(ConditionModel::new(
        "anaemia",
        baseline,
        vec![RiskFactor::relative_risk("chronic kidney disease", 1.5)],
    ))
}

/// Chronic kidney disease stage 3-5
pub fn chronic_kidney_disease(band: &AgeBand, gender: Gender) -> Result<ConditionModel> {
    let baseline = band.prevalence_fraction("ckd", gender)?;
    Ok(ConditionModel::new(
        "ckd",
        baseline,
        vec![
            RiskFactor::relative_risk("diabetes", 3.09),
            RiskFactor::odds_ratio("obesity", 1.81),
            RiskFactor::relative_risk("hypertension", 1.81),
        ],
    ))
}

/// Chronic obstructive pulmonary disease.
///
/// Past and current smoking enter as separate, mutually exclusive factors so
/// the three-level smoking status maps cleanly onto the evidence vector.
pub fn copd(band: &AgeBand, gender: Gender) -> Result<ConditionModel> {
    let baseline = band.prevalence_fraction("copd", gender)?;
    Ok(ConditionModel::new(
        "copd",
        baseline,
        vec![
            RiskFactor::relative_risk("past smoking", 2.89),
            RiskFactor::relative_risk("current smoking", 3.51),
            RiskFactor::odds_ratio("asthma", 2.23),
        ],
    ))
}

/// Dizziness; baseline reduced by a fixed 0.065 calibration offset
pub fn dizziness(band: &AgeBand, gender: Gender) -> Result<ConditionModel> {
    let baseline = band.prevalence_fraction("dizziness", gender)? - 0.065;
    Ok(ConditionModel::new(
        "dizziness",
        baseline,
        vec![
            RiskFactor::odds_ratio("female", 1.18),
            RiskFactor::odds_ratio("osteoporosis", 2.49),
        ],
    ))
}

/// Faecal incontinence
pub fn faecal_incontinence(band: &AgeBand, gender: Gender) -> Result<ConditionModel> {
    let baseline = band.prevalence_fraction("faecalIncontinence", gender)?;
    Ok(ConditionModel::new(
        "faecalIncontinence",
        baseline,
        vec![
            RiskFactor::odds_ratio("urinary incontinence", 3.7),
            RiskFactor::odds_ratio("diabetes", 2.3),
            RiskFactor::odds_ratio("hypertension", 2.53),
        ],
    ))
}

/// Foot problems
pub fn foot_problems(band: &AgeBand, gender: Gender) -> Result<ConditionModel> {
    let baseline = band.prevalence_fraction("footProblems", gender)?;
    Ok(ConditionModel::new(
        "footProblems",
        baseline,
        vec![RiskFactor::odds_ratio("female", 1.38)],
    ))
}

/// Chronic liver disease
pub fn liver_disease(band: &AgeBand, gender: Gender) -> Result<ConditionModel> {
    let baseline = band.prevalence_fraction("liverDisease", gender)?;
    Ok(ConditionModel::new(
        "liverDisease",
        baseline,
        vec![
            RiskFactor::odds_ratio("male", 1.599),
            RiskFactor::odds_ratio("obese", 2.526),
            RiskFactor::relative_risk("alcohol use disorder", 5.0),
        ],
    ))
}

/// Pressure ulcers
pub fn ulcers(band: &AgeBand, gender: Gender) -> Result<ConditionModel> {
    let baseline = band.prevalence_fraction("ulcers", gender)?;
    Ok(ConditionModel::new(
        "ulcers",
        baseline,
        vec![RiskFactor::odds_ratio("urinary incontinence", 1.92)],
    ))
}

/// Orthostatic hypotension
pub fn orthostatic_hypotension(band: &AgeBand, gender: Gender) -> Result<ConditionModel> {
    let baseline = band.prevalence_fraction("orthostaticHypotension", gender)?;
    Ok(ConditionModel::new(
        "orthostaticHypotension",
        baseline,
        vec![
            RiskFactor::relative_risk("diabetes", 1.081_081_081_081_081),
            RiskFactor::relative_risk("hypertension", 1.428_571_428_571_428_6),
            RiskFactor::relative_risk("parkinsons disease", 1.785_714_285_714_285_6),
            RiskFactor::relative_risk("dementia", 2.071_428_571_428_571),
        ],
    ))
}

/// Heart failure; all effects reported as hazard ratios
pub fn heart_failure(band: &AgeBand, gender: Gender) -> Result<ConditionModel> {
    let baseline = band.prevalence_fraction("heartFailure", gender)?;
    Ok(ConditionModel::new(
        "heartFailure",
        baseline,
        vec![
            RiskFactor::hazard_ratio("male", 1.65),
            RiskFactor::hazard_ratio("obesity", 1.32),
            RiskFactor::hazard_ratio("hypertension", 2.19),
            RiskFactor::hazard_ratio("diabetes", 1.98),
            RiskFactor::hazard_ratio("current smoker", 1.43),
            RiskFactor::hazard_ratio("myocardial infarction", 2.92),
            RiskFactor::hazard_ratio("atrial fibrillation", 2.62),
        ],
    ))
}

/// Chronic pain; baseline reduced by a fixed 0.138 calibration offset
pub fn chronic_pain(band: &AgeBand, gender: Gender) -> Result<ConditionModel> {
    let baseline = band.prevalence_fraction("chronicPain", gender)? - 0.138;
    Ok(ConditionModel::new(
        "chronicPain",
        baseline,
        vec![
            RiskFactor::odds_ratio("arthritis", 4.0),
            RiskFactor::odds_ratio("osteoporosis", 2.2),
            RiskFactor::odds_ratio("copd", 1.4),
            RiskFactor::odds_ratio("migraine", 1.6),
            RiskFactor::odds_ratio("heart disease", 1.6),
            RiskFactor::odds_ratio("peptic ulcer disease", 1.4),
            RiskFactor::odds_ratio("diabetes", 1.4),
        ],
    ))
}

/// History of delirium
pub fn history_of_delirium(band: &AgeBand, gender: Gender) -> Result<ConditionModel> {
    let baseline = band.prevalence_fraction("historyOfDelirium", gender)?;
    Ok(ConditionModel::new(
        "historyOfDelirium",
        baseline,
        vec![
            RiskFactor::odds_ratio("dementia", 6.62),
            RiskFactor::odds_ratio("visual impairment", 1.89),
        ],
    ))
}

/// Alcohol use disorder
pub fn alcohol_use_disorder(band: &AgeBand, gender: Gender) -> Result<ConditionModel> {
    let baseline = band.prevalence_fraction("aud", gender)?;
    Ok(ConditionModel::new(
        "aud",
        baseline,
        vec![RiskFactor::odds_ratio("depression", 1.75)],
    ))
}

/// Depression; baseline reduced by a fixed 0.10 calibration offset
pub fn depression(band: &AgeBand, gender: Gender) -> Result<ConditionModel> {
    let baseline = band.prevalence_fraction("depression", gender)? - 0.10;
    Ok(ConditionModel::new(
        "depression",
        baseline,
        vec![
            RiskFactor::odds_ratio("frailty", 2.64),
            RiskFactor::relative_risk("osteoarthritis", 1.17),
            RiskFactor::odds_ratio("badl dependency", 1.86),
            RiskFactor::relative_risk("parkinsons disease", 1.32),
            RiskFactor::relative_risk("heart failure", 1.676),
        ],
    ))
}

/// Sleep disturbance; baseline reduced by a fixed 0.20 calibration offset
/// against its very high raw prevalence
pub fn sleep_disturbance(band: &AgeBand, gender: Gender) -> Result<ConditionModel> {
    let baseline = band.prevalence_fraction("sleepDisturbance", gender)? - 0.2;
    Ok(ConditionModel::new(
        "sleepDisturbance",
        baseline,
        vec![
            RiskFactor::relative_risk("depression", 1.72),
            RiskFactor::odds_ratio("hypertension", 1.5),
            RiskFactor::odds_ratio("heart disease", 1.6),
            RiskFactor::odds_ratio("diabetes", 1.4),
            RiskFactor::odds_ratio("peptic ulcer", 2.1),
            RiskFactor::odds_ratio("asthma", 1.6),
            RiskFactor::odds_ratio("copd", 1.9),
        ],
    ))
}

/// Syncope
pub fn syncope(band: &AgeBand, gender: Gender) -> Result<ConditionModel> {
    let baseline = band.prevalence_fraction("syncope", gender)?;
    Ok(ConditionModel::new(
        "syncope",
        baseline,
        vec![
            RiskFactor::odds_ratio("stroke", 2.56),
            RiskFactor::odds_ratio("tia", 2.56),
            RiskFactor::odds_ratio("hypertension", 1.46),
        ],
    ))
}

/// Peripheral vascular disease
pub fn peripheral_vascular_disease(band: &AgeBand, gender: Gender) -> Result<ConditionModel> {
    let baseline = band.prevalence_fraction("pvd", gender)?;
    Ok(ConditionModel::new(
        "pvd",
        baseline,
        vec![
            RiskFactor::relative_risk("diabetes", 1.9),
            RiskFactor::odds_ratio("current smoker", 2.69),
            RiskFactor::odds_ratio("former smoker", 1.15),
            RiskFactor::odds_ratio("hypertension", 1.85),
            RiskFactor::relative_risk("myocardial infarction", 2.1),
            RiskFactor::relative_risk("angina", 1.7),
            RiskFactor::relative_risk("heart failure", 12.6),
            RiskFactor::relative_risk("stroke", 2.4),
            RiskFactor::relative_risk("tia", 2.1),
        ],
    ))
}

/// Fragility fracture.
///
/// Obesity carries a protective odds ratio below one; the transform handles
/// it like any other factor.
pub fn fragility_fracture(band: &AgeBand, gender: Gender) -> Result<ConditionModel> {
    let baseline = band.prevalence_fraction("fragilityFracture", gender)?;
    Ok(ConditionModel::new(
        "fragilityFracture",
        baseline,
        vec![
            RiskFactor::odds_ratio("weight below 58kg", 4.01),
            RiskFactor::odds_ratio("underweight", 2.83),
            RiskFactor::odds_ratio("obese", 0.58),
            RiskFactor::odds_ratio("weight loss", 1.88),
            RiskFactor::odds_ratio("current smoker", 1.5),
            RiskFactor::odds_ratio("rheumatoid arthritis", 1.61),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epidemiology::{CancerIncidence, GenderRate};
    use std::collections::HashMap;

    fn band(entries: &[(&str, f64, f64)]) -> AgeBand {
        let mut prevalence = HashMap::new();
        for (name, m, f) in entries {
            prevalence.insert((*name).to_string(), GenderRate { m: *m, f: *f });
        }
        AgeBand {
            label: "75_79".to_string(),
            lower: 75,
            upper: 80,
            cancer_incidence: CancerIncidence {
                all: 100.0,
                sites: HashMap::new(),
            },
            prevalence,
        }
    }

    #[test]
    fn ckd_model_uses_band_prevalence() {
        let band = band(&[("ckd", 14.0, 14.0)]);
        let model = chronic_kidney_disease(&band, Gender::Female).unwrap();
        assert_eq!(model.factors().len(), 3);
        let mut rng = crate::population::sampler::SamplerRng::from_seed(1);
        let parents = smallvec::smallvec![false, false, false];
        let eval = model.evaluate(&parents, &mut rng).unwrap();
        assert_eq!(eval.probability, 0.14);
    }

    #[test]
    fn missing_prevalence_is_a_configuration_error() {
        let band = band(&[("ckd", 14.0, 14.0)]);
        assert!(anaemia(&band, Gender::Male).is_err());
    }

    #[test]
    fn calibrated_baseline_can_floor_at_one_percent() {
        // Raw prevalence below the offset drives the baseline negative; the
        // synthesizer floors it at 0.01.
        let band = band(&[("dizziness", 5.0, 5.0)]);
        let model = dizziness(&band, Gender::Male).unwrap();
        let mut rng = crate::population::sampler::SamplerRng::from_seed(1);
        let parents = smallvec::smallvec![false, false];
        let eval = model.evaluate(&parents, &mut rng).unwrap();
        assert_eq!(eval.probability, 0.01);
    }
}
