//! Collaborator interfaces and their reference implementations
//!
//! The core consumes several services it deliberately does not own: the
//! continuous-attribute distributions, tumour-profile assignment,
//! cardiovascular risk scoring and the mobility/care scores. Each is a
//! trait with an explicit, named reference implementation so the crate runs
//! stand-alone; production deployments swap in their own.

use crate::config::{AttributeStats, GenerationConfig};
use crate::epidemiology::Gender;
use crate::error::Result;
use crate::population::patient::Patient;
use crate::population::sampler::{ContinuousAttribute, ContinuousSampler, SamplerRng};

/// The collaborator services a generation run draws on
pub struct Collaborators {
    /// Continuous-attribute distributions
    pub continuous: Box<dyn ContinuousSampler>,
    /// Tumour-profile assignment
    pub tumours: Box<dyn TumourRegistry>,
    /// Ten-year cardiovascular risk scoring
    pub cardio: Box<dyn CardioRiskModel>,
    /// Mobility and care-need scoring
    pub functional: Box<dyn FunctionalScorer>,
}

impl Collaborators {
    /// The reference implementations, configured from the run configuration
    #[must_use]
    pub fn reference(config: &GenerationConfig) -> Self {
        Self {
            continuous: Box::new(NormalAttributeSampler::from_config(config)),
            tumours: Box::new(ReferenceTumourRegistry),
            cardio: Box::new(HeuristicCardioModel),
            functional: Box::new(ContributorScorer),
        }
    }
}

/// Normal-distribution sampler backed by the configured per-band statistics
#[derive(Debug, Clone)]
pub struct NormalAttributeSampler {
    weight_m: Vec<AttributeStats>,
    weight_f: Vec<AttributeStats>,
    height_m: Vec<AttributeStats>,
    height_f: Vec<AttributeStats>,
    cr_m: Vec<AttributeStats>,
    cr_f: Vec<AttributeStats>,
    srh_m: Vec<AttributeStats>,
    srh_f: Vec<AttributeStats>,
    tug: Vec<AttributeStats>,
    date_m: Vec<AttributeStats>,
    date_f: Vec<AttributeStats>,
}

impl NormalAttributeSampler {
    /// Build from the generation configuration
    #[must_use]
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self {
            weight_m: config.weight_stats_m.clone(),
            weight_f: config.weight_stats_f.clone(),
            height_m: config.height_stats_m.clone(),
            height_f: config.height_stats_f.clone(),
            cr_m: config.cr_stats_m.clone(),
            cr_f: config.cr_stats_f.clone(),
            srh_m: config.srh_stats_m.clone(),
            srh_f: config.srh_stats_f.clone(),
            tug: config.tug_stats.clone(),
            date_m: config.date_report_stats_m.clone(),
            date_f: config.date_report_stats_f.clone(),
        }
    }

    fn stats(&self, attribute: ContinuousAttribute, gender: Gender) -> &[AttributeStats] {
        match (attribute, gender) {
            (ContinuousAttribute::Weight, Gender::Male) => &self.weight_m,
            (ContinuousAttribute::Weight, Gender::Female) => &self.weight_f,
            (ContinuousAttribute::Height, Gender::Male) => &self.height_m,
            (ContinuousAttribute::Height, Gender::Female) => &self.height_f,
            (ContinuousAttribute::Creatinine, Gender::Male) => &self.cr_m,
            (ContinuousAttribute::Creatinine, Gender::Female) => &self.cr_f,
            (ContinuousAttribute::SelfReportedHealth, Gender::Male) => &self.srh_m,
            (ContinuousAttribute::SelfReportedHealth, Gender::Female) => &self.srh_f,
            // Timed-up-and-go statistics are shared across genders
            (ContinuousAttribute::TimedUpAndGo, _) => &self.tug,
            (ContinuousAttribute::DateErrorRate, Gender::Male) => &self.date_m,
            (ContinuousAttribute::DateErrorRate, Gender::Female) => &self.date_f,
        }
    }
}

impl ContinuousSampler for NormalAttributeSampler {
    fn draw(
        &self,
        attribute: ContinuousAttribute,
        band_index: usize,
        gender: Gender,
        rng: &mut SamplerRng,
    ) -> f64 {
        let stats = self.stats(attribute, gender);
        // Bands beyond the configured statistics reuse the oldest entry
        let stat = stats[band_index.min(stats.len() - 1)];
        rng.normal(stat.mean, stat.sd)
    }
}

/// Tumour profile attached to one individual
#[derive(Debug, Clone)]
pub struct TumourProfile {
    /// Reported ethnicity
    pub ethnicity: String,
    /// Index of multiple deprivation quintile, 1 (most) to 5 (least)
    pub deprivation: i64,
    /// Multidisciplinary team the cancer site maps onto
    pub mdt: String,
    /// Stage at diagnosis, 1-4
    pub cancer_stage: String,
    /// Whether surgery is part of the treatment plan
    pub surgery: u8,
    /// Whether chemotherapy is part of the treatment plan
    pub chemotherapy: u8,
    /// Whether radiotherapy is part of the treatment plan
    pub radiotherapy: u8,
}

/// Source of tumour profiles for newly allocated cancers
pub trait TumourRegistry: Sync {
    /// Produce a profile for an individual's allocated cancer site
    fn profile(
        &self,
        age: i64,
        gender: Gender,
        cancer_site: &str,
        rng: &mut SamplerRng,
    ) -> Result<TumourProfile>;
}

/// Reference registry sampling from fixed population-level priors
#[derive(Debug, Clone, Default)]
pub struct ReferenceTumourRegistry;

impl ReferenceTumourRegistry {
    fn mdt_for(site: &str, rng: &mut SamplerRng) -> Result<String> {
        let mdt = match site {
            "breast" => "breast",
            "lung" => "lung",
            "colon" | "rectal" | "anal" => "lower_gi",
            "oesophageal" | "stomach" | "pancreatic" | "liver" => "upper_gi",
            "prostate" | "bladder" | "renal" | "testicular" => "urological",
            "ovarian" | "uterine" | "cervical" => "gynaecological",
            "head_and_neck" | "laryngeal" | "oral" => "head_and_neck",
            "melanoma" | "skin" => "skin",
            "brain" => "neurosurgical",
            _ => {
                // Rare sites are spread over the remaining specialties
                let other = [
                    "haematological",
                    "upper_gi",
                    "neurosurgical",
                    "bone",
                    "sarcoma",
                    "thyroid",
                    "ophthalmological",
                ];
                let weights = [1.0; 7];
                other[rng.weighted_index(&weights)?]
            }
        };
        Ok(mdt.to_string())
    }
}

impl TumourRegistry for ReferenceTumourRegistry {
    fn profile(
        &self,
        _age: i64,
        _gender: Gender,
        cancer_site: &str,
        rng: &mut SamplerRng,
    ) -> Result<TumourProfile> {
        let ethnicities = ["WHITE", "INDIAN", "BLACK AFRICAN", "CHINESE", "OTHER ETHNIC GROUP"];
        let ethnicity_weights = [0.9, 0.03, 0.03, 0.02, 0.02];
        let ethnicity = ethnicities[rng.weighted_index(&ethnicity_weights)?].to_string();

        let stage_weights = [0.25, 0.3, 0.25, 0.2];
        let stage = rng.weighted_index(&stage_weights)? + 1;

        // Later stages are less likely to be operated on and more likely to
        // receive systemic treatment.
        let surgery_p = [0.75, 0.65, 0.5, 0.2][stage - 1];
        let chemo_p = [0.2, 0.35, 0.55, 0.6][stage - 1];
        let radio_p = [0.15, 0.25, 0.35, 0.4][stage - 1];

        Ok(TumourProfile {
            ethnicity,
            deprivation: rng.integer_between(1, 6),
            mdt: Self::mdt_for(cancer_site, rng)?,
            cancer_stage: stage.to_string(),
            surgery: rng.bernoulli(surgery_p),
            chemotherapy: rng.bernoulli(chemo_p),
            radiotherapy: rng.bernoulli(radio_p),
        })
    }
}

/// Ten-year cardiovascular risk scorer
pub trait CardioRiskModel: Sync {
    /// Ten-year cardiovascular event risk as a percentage
    fn ten_year_risk_percent(&self, patient: &Patient, gender: Gender) -> Result<f64>;
}

/// Named fallback scorer: multiplicative loadings over the established
/// cardiovascular risk factors already on the record.
///
/// Deployments with access to a full QRISK-style oracle should substitute
/// it through this trait; the fallback keeps relative ordering sensible
/// without claiming calibration.
#[derive(Debug, Clone, Default)]
pub struct HeuristicCardioModel;

impl CardioRiskModel for HeuristicCardioModel {
    fn ten_year_risk_percent(&self, patient: &Patient, gender: Gender) -> Result<f64> {
        let mut risk: f64 = match gender {
            Gender::Male => 12.0,
            Gender::Female => 9.0,
        };

        let age = patient.int("age")?;
        risk += (age - 65).max(0) as f64 * 0.4;

        let loadings: [(&str, f64); 10] = [
            ("af", 1.5),
            ("hypertension", 1.4),
            ("t1dm", 2.5),
            ("t2dm", 1.8),
            ("ra", 1.2),
            ("migraine", 1.2),
            ("sle", 1.4),
            ("antipsychotics", 1.1),
            ("corticosteroids", 1.2),
            ("antihypertensives", 1.1),
        ];
        for (field, multiplier) in loadings {
            if patient.is_present(field)? {
                risk *= multiplier;
            }
        }
        if patient.is_present("schizophrenia")? || patient.is_present("bad")? {
            risk *= 1.15;
        }
        if patient.int("smoking")? == 0 {
            risk *= 1.6;
        }
        if patient.float("bmi")? >= 30.0 {
            risk *= 1.3;
        }

        Ok(risk.min(95.0))
    }
}

/// Inputs to the walking-difficulty score
#[derive(Debug, Clone, Copy)]
pub struct WalkingInputs {
    /// Count of distinct cardiovascular contributors
    pub cardiovascular_count: u8,
    /// Respiratory disease present
    pub respiratory: bool,
    /// Cognitive impairment present
    pub cognitive: bool,
    /// Musculoskeletal disease present
    pub musculoskeletal: bool,
}

/// Mobility and care-need scorer
pub trait FunctionalScorer: Sync {
    /// Difficulty walking, 0 or 1
    fn difficulty_walking(&self, inputs: &WalkingInputs, rng: &mut SamplerRng) -> u8;
    /// Needs formal or informal care, 0 or 1
    fn needs_care(
        &self,
        age: i64,
        badl: bool,
        iadl: bool,
        lives_alone: bool,
        rng: &mut SamplerRng,
    ) -> u8;
}

/// Named fallback scorer mapping contributor counts onto the three
/// mobility strata (good 30%, average 50%, poor 93%) reported for
/// community-dwelling older adults
#[derive(Debug, Clone, Default)]
pub struct ContributorScorer;

impl FunctionalScorer for ContributorScorer {
    fn difficulty_walking(&self, inputs: &WalkingInputs, rng: &mut SamplerRng) -> u8 {
        let domains = u8::from(inputs.respiratory)
            + u8::from(inputs.cognitive)
            + u8::from(inputs.musculoskeletal);

        let probability = if inputs.cardiovascular_count >= 2
            || domains >= 2
            || (inputs.cardiovascular_count >= 1 && domains >= 1)
        {
            0.93
        } else if inputs.cardiovascular_count == 1 || domains == 1 {
            0.50
        } else {
            0.30
        };

        rng.bernoulli(probability)
    }

    fn needs_care(
        &self,
        age: i64,
        badl: bool,
        iadl: bool,
        lives_alone: bool,
        rng: &mut SamplerRng,
    ) -> u8 {
        let mut score: f64 = 0.0;
        if badl {
            score += 10.0;
        } else if iadl {
            score += 5.0;
        }
        if lives_alone {
            score += 10.0;
        }
        if age >= 85 {
            score += 5.0;
        } else if age >= 75 {
            score += 3.0;
        }
        rng.bernoulli((score / 30.0).clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walking_probability_strata() {
        let mut rng = SamplerRng::from_seed(11);
        let none = WalkingInputs {
            cardiovascular_count: 0,
            respiratory: false,
            cognitive: false,
            musculoskeletal: false,
        };
        let heavy = WalkingInputs {
            cardiovascular_count: 2,
            respiratory: true,
            cognitive: true,
            musculoskeletal: true,
        };
        let scorer = ContributorScorer;
        let mut none_hits = 0u32;
        let mut heavy_hits = 0u32;
        for _ in 0..2000 {
            none_hits += u32::from(scorer.difficulty_walking(&none, &mut rng));
            heavy_hits += u32::from(scorer.difficulty_walking(&heavy, &mut rng));
        }
        assert!(none_hits < heavy_hits);
        assert!(heavy_hits > 1700);
    }

    #[test]
    fn reference_registry_maps_sites_to_mdts() {
        let registry = ReferenceTumourRegistry;
        let mut rng = SamplerRng::from_seed(2);
        let profile = registry
            .profile(72, Gender::Female, "colon", &mut rng)
            .unwrap();
        assert_eq!(profile.mdt, "lower_gi");
        assert!(profile.deprivation >= 1 && profile.deprivation <= 5);
    }
}
