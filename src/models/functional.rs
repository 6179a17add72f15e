//! Functional and geriatric-syndrome condition models
//!
//! The frailty/disability layer of the causal graph: these models consume
//! the comorbidity profile built earlier in the walk and feed the terminal
//! outcome models.

use super::ConditionModel;
use crate::epidemiology::{AgeBand, Gender};
use crate::error::Result;
use crate::risk::RiskFactor;

/// Frailty
pub fn frailty(band: &AgeBand, gender: Gender) -> Result<ConditionModel> {
    let baseline = band.prevalence_fraction("frailty", gender)?;
    Ok(ConditionModel::new(
        "frailty",
        baseline,
        vec![
            RiskFactor::relative_risk("hearing loss", 1.87),
            RiskFactor::odds_ratio("diabetes", 1.61),
            RiskFactor::odds_ratio("visual impairment", 2.75),
            RiskFactor::odds_ratio("three or more comorbidities", 1.97),
            RiskFactor::relative_risk("cardiovascular disease", 4.0),
            RiskFactor::odds_ratio("copd", 1.97),
        ],
    ))
}

/// Basic activities-of-daily-living impairment; baseline carries a fixed
/// 0.12 calibration offset against the raw prevalence
pub fn badl_impairment(band: &AgeBand, gender: Gender) -> Result<ConditionModel> {
    let baseline = band.prevalence_fraction("badlImpairment", gender)? - 0.12;
    Ok(ConditionModel::new(
        "badlImpairment",
        baseline,
        vec![
            RiskFactor::odds_ratio("diabetes", 1.82),
            RiskFactor::odds_ratio("bmi 30 to 35", 1.16),
            RiskFactor::odds_ratio("bmi 35 to 40", 1.16),
            RiskFactor::odds_ratio("frailty", 2.76),
        ],
    ))
}

/// Instrumental activities-of-daily-living impairment; 0.27 calibration
/// offset
pub fn iadl_impairment(band: &AgeBand, gender: Gender) -> Result<ConditionModel> {
    let baseline = band.prevalence_fraction("iadlImpairment", gender)? - 0.27;
    Ok(ConditionModel::new(
        "iadlImpairment",
        baseline,
        vec![
            RiskFactor::odds_ratio("frailty", 3.62),
            RiskFactor::odds_ratio("diabetes", 1.65),
            RiskFactor::odds_ratio("sleep disturbance", 1.36),
        ],
    ))
}

/// Falls in the last year; 0.16 calibration offset
pub fn falls(band: &AgeBand, gender: Gender) -> Result<ConditionModel> {
    let baseline = band.prevalence_fraction("falls", gender)? - 0.16;
    Ok(ConditionModel::new(
        "falls",
        baseline,
        vec![
            RiskFactor::odds_ratio("difficulty walking", 2.1),
            RiskFactor::odds_ratio("dizziness", 1.7),
            RiskFactor::odds_ratio("parkinsons disease", 2.7),
            RiskFactor::relative_risk("osteoarthritis", 1.33),
            RiskFactor::odds_ratio("urinary incontinence", 1.59),
            RiskFactor::odds_ratio("orthostatic hypotension", 1.73),
            RiskFactor::odds_ratio("atrial fibrillation", 1.19),
            RiskFactor::odds_ratio("depression", 4.0),
            RiskFactor::odds_ratio("foot problems", 1.84),
        ],
    ))
}

/// Malnutrition
pub fn malnutrition(band: &AgeBand, gender: Gender) -> Result<ConditionModel> {
    let baseline = band.prevalence_fraction("malnutrition", gender)?;
    Ok(ConditionModel::new(
        "malnutrition",
        baseline,
        vec![
            RiskFactor::odds_ratio("parkinsons disease", 2.45),
            RiskFactor::odds_ratio("badl dependency", 1.793),
            RiskFactor::odds_ratio("mild cognitive impairment", 1.844),
            RiskFactor::odds_ratio("dementia", 2.139),
        ],
    ))
}

/// Probability of anorexia given malnutrition state
#[must_use]
pub const fn anorexia_given_malnutrition(malnourished: bool) -> f64 {
    if malnourished { 0.63 } else { 0.25 }
}

/// Probability of weight loss given malnutrition state
#[must_use]
pub const fn weight_loss_given_malnutrition(malnourished: bool) -> f64 {
    if malnourished { 0.84 } else { 0.595 }
}

/// Social isolation
pub fn social_isolation(band: &AgeBand, gender: Gender) -> Result<ConditionModel> {
    let baseline = band.prevalence_fraction("decreasedSocialActivity", gender)?;
    Ok(ConditionModel::new(
        "socialIsolation",
        baseline,
        vec![
            RiskFactor::odds_ratio("hearing loss", 2.14),
            RiskFactor::relative_risk("falls", 1.44),
            RiskFactor::odds_ratio("difficulty walking outside", 1.59),
            RiskFactor::odds_ratio("badl dependency", 1.5),
        ],
    ))
}

/// Homebound status; all effects reported as hazard ratios
pub fn homebound(band: &AgeBand, gender: Gender) -> Result<ConditionModel> {
    let baseline = band.prevalence_fraction("homebound", gender)?;
    Ok(ConditionModel::new(
        "homebound",
        baseline,
        vec![
            RiskFactor::hazard_ratio("depression", 1.398),
            RiskFactor::hazard_ratio("social isolation", 1.147),
            RiskFactor::hazard_ratio("using walking aid", 1.968),
            RiskFactor::hazard_ratio("falls", 1.525),
            RiskFactor::hazard_ratio("fear of falling", 1.525),
            RiskFactor::hazard_ratio("chronic pain", 1.198),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epidemiology::{CancerIncidence, GenderRate};
    use crate::population::sampler::SamplerRng;
    use std::collections::HashMap;

    fn band(entries: &[(&str, f64)]) -> AgeBand {
        let mut prevalence = HashMap::new();
        for (name, pct) in entries {
            prevalence.insert((*name).to_string(), GenderRate { m: *pct, f: *pct });
        }
        AgeBand {
            label: "80_84".to_string(),
            lower: 80,
            upper: 85,
            cancer_incidence: CancerIncidence {
                all: 100.0,
                sites: HashMap::new(),
            },
            prevalence,
        }
    }

    #[test]
    fn iadl_offset_applies_before_synthesis() {
        let band = band(&[("iadlImpairment", 47.0)]);
        let model = iadl_impairment(&band, Gender::Female).unwrap();
        let mut rng = SamplerRng::from_seed(5);
        let parents = smallvec::smallvec![false, false, false];
        let eval = model.evaluate(&parents, &mut rng).unwrap();
        assert!((eval.probability - 0.2).abs() < 1e-9);
    }

    #[test]
    fn malnutrition_conditionals_are_fixed() {
        assert_eq!(anorexia_given_malnutrition(true), 0.63);
        assert_eq!(anorexia_given_malnutrition(false), 0.25);
        assert_eq!(weight_loss_given_malnutrition(true), 0.84);
        assert_eq!(weight_loss_given_malnutrition(false), 0.595);
    }
}
