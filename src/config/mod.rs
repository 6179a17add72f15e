//! Generation configuration
//!
//! Tuning knobs and reference lists for a population run: demographic
//! weighting, the root-node comorbidity lists, composite endpoint
//! definitions and the per-band statistics backing the continuous attribute
//! sampler. A `Default` implementation carries the reference configuration;
//! a JSON file can override it wholesale.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Mean and spread for one continuous attribute in one age band
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AttributeStats {
    /// Distribution mean
    pub mean: f64,
    /// Distribution standard deviation
    pub sd: f64,
}

impl AttributeStats {
    const fn new(mean: f64, sd: f64) -> Self {
        Self { mean, sd }
    }
}

/// Configuration for one population generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Probability a synthetic individual is male
    pub chance_of_being_male: f64,
    /// Reference size of the older population the band weights are scaled by
    pub total_older_population: f64,
    /// Conditions sampled directly from band prevalence, no activity uplift
    pub root_nodes_minor: Vec<String>,
    /// Chronic conditions restricted to aerobically inactive individuals,
    /// sampled at an uplifted prevalence to compensate
    pub root_nodes_major: Vec<String>,
    /// Conditions counted towards the multimorbidity flag
    pub multimorbidity_conditions: Vec<String>,
    /// Conditions and medications counted towards the polypharmacy flag
    pub polypharmacy_conditions: Vec<String>,
    /// Count of polypharmacy conditions at which the flag switches on
    pub polypharmacy_threshold: usize,
    /// Fields feeding the adverse surgical composite endpoint
    pub surgery_endpoints: Vec<String>,
    /// Fields feeding the adverse chemotherapy composite endpoint
    pub chemotherapy_endpoints: Vec<String>,
    /// Fields feeding the general adverse composite endpoint
    pub general_endpoints: Vec<String>,
    /// Fields marking individuals likely to benefit from oncogeriatric input
    pub oncogeriatric_endpoints: Vec<String>,
    /// Per-band male weight statistics (kg)
    pub weight_stats_m: Vec<AttributeStats>,
    /// Per-band female weight statistics (kg)
    pub weight_stats_f: Vec<AttributeStats>,
    /// Per-band male height statistics (cm)
    pub height_stats_m: Vec<AttributeStats>,
    /// Per-band female height statistics (cm)
    pub height_stats_f: Vec<AttributeStats>,
    /// Per-band male serum creatinine statistics (umol/L)
    pub cr_stats_m: Vec<AttributeStats>,
    /// Per-band female serum creatinine statistics (umol/L)
    pub cr_stats_f: Vec<AttributeStats>,
    /// Per-band male self-reported health statistics (1-5 scale)
    pub srh_stats_m: Vec<AttributeStats>,
    /// Per-band female self-reported health statistics (1-5 scale)
    pub srh_stats_f: Vec<AttributeStats>,
    /// Per-band timed-up-and-go statistics (seconds), shared across genders
    pub tug_stats: Vec<AttributeStats>,
    /// Per-band male probability of misreporting the date
    pub date_report_stats_m: Vec<AttributeStats>,
    /// Per-band female probability of misreporting the date
    pub date_report_stats_f: Vec<AttributeStats>,
    /// Male smoking status weights: current, former, never
    pub smoking_stats_m: [f64; 3],
    /// Female smoking status weights: current, former, never
    pub smoking_stats_f: [f64; 3],
}

impl GenerationConfig {
    /// Load a configuration file, falling back to defaults for absent keys
    pub fn load(path: &Path) -> Result<Self> {
        log::info!("Loading generation configuration from {}", path.display());
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            chance_of_being_male: 0.5,
            total_older_population: 458_500.0,
            root_nodes_minor: names(&[
                "asthma",
                "migraine",
                "pepticUlcer",
                "thyroidDisease",
                "luts",
                "ed",
                "schizophrenia",
                "bad",
                "sle",
                "ra",
                "hearingLoss",
                "visualImpairment",
                "urinaryIncontinence",
                "livesAlone",
                "drinksAlcohol",
                "mci",
            ]),
            root_nodes_major: names(&[
                "diabetes",
                "hypertension",
                "af",
                "heartValveDisease",
                "parkinsonsDisease",
                "dementia",
                "osteoporosis",
                "arthritis",
            ]),
            multimorbidity_conditions: names(&[
                "t1dm",
                "t2dm",
                "hypertension",
                "af",
                "heartValveDisease",
                "parkinsonsDisease",
                "dementia",
                "osteoporosis",
                "arthritis",
                "copd",
                "ckd",
                "heartFailure",
                "liverDisease",
                "pvd",
                "stroke",
                "mi",
                "angina",
                "depression",
            ]),
            polypharmacy_conditions: names(&[
                "antihypertensives",
                "antipsychotics",
                "corticosteroids",
                "t1dm",
                "t2dm",
                "copd",
                "asthma",
                "heartFailure",
                "depression",
                "chronicPain",
                "af",
                "ckd",
            ]),
            polypharmacy_threshold: 4,
            surgery_endpoints: names(&[
                "pod_present",
                "all_surgical_comps_present",
                "post_op_pain_present",
                "wound_complications_present",
                "post_op_sepsis_present",
                "post_op_pulmonary_comps_present",
                "post_op_neuro_comps_present",
                "post_op_itu_admission_present",
                "increased_los_present",
                "post_op_mace_present",
                "post_op_30_day_major_mortality_present",
                "post_op_30_day_minor_mortality_present",
            ]),
            chemotherapy_endpoints: names(&[
                "neutropaenic_events_present",
                "chemotherapy_toxicity_present",
            ]),
            general_endpoints: names(&[
                "functional_decline_present",
                "nursing_home_admission_present",
                "cpr_failure_present",
                "10_year_mortality_excess_present",
            ]),
            oncogeriatric_endpoints: names(&[
                "pims_present",
                "polypharmacy",
                "falls",
                "malnutrition",
                "frailty",
                "depression",
            ]),
            weight_stats_m: vec![
                AttributeStats::new(83.0, 14.0),
                AttributeStats::new(82.0, 14.0),
                AttributeStats::new(80.0, 13.5),
                AttributeStats::new(78.0, 13.0),
                AttributeStats::new(75.0, 12.5),
                AttributeStats::new(72.0, 12.0),
                AttributeStats::new(69.0, 11.5),
                AttributeStats::new(66.0, 11.0),
            ],
            weight_stats_f: vec![
                AttributeStats::new(70.0, 13.0),
                AttributeStats::new(69.0, 13.0),
                AttributeStats::new(67.0, 12.5),
                AttributeStats::new(65.0, 12.0),
                AttributeStats::new(62.0, 11.5),
                AttributeStats::new(59.0, 11.0),
                AttributeStats::new(56.0, 10.5),
                AttributeStats::new(54.0, 10.0),
            ],
            height_stats_m: vec![
                AttributeStats::new(175.0, 7.0),
                AttributeStats::new(174.0, 7.0),
                AttributeStats::new(173.0, 7.0),
                AttributeStats::new(171.0, 6.8),
                AttributeStats::new(170.0, 6.8),
                AttributeStats::new(168.0, 6.5),
                AttributeStats::new(166.0, 6.5),
                AttributeStats::new(165.0, 6.2),
            ],
            height_stats_f: vec![
                AttributeStats::new(161.0, 6.5),
                AttributeStats::new(160.0, 6.5),
                AttributeStats::new(159.0, 6.3),
                AttributeStats::new(158.0, 6.3),
                AttributeStats::new(156.0, 6.0),
                AttributeStats::new(155.0, 6.0),
                AttributeStats::new(153.0, 5.8),
                AttributeStats::new(152.0, 5.8),
            ],
            cr_stats_m: vec![
                AttributeStats::new(85.0, 18.0),
                AttributeStats::new(88.0, 18.0),
                AttributeStats::new(91.0, 19.0),
                AttributeStats::new(94.0, 19.0),
                AttributeStats::new(97.0, 20.0),
                AttributeStats::new(100.0, 20.0),
                AttributeStats::new(103.0, 21.0),
                AttributeStats::new(105.0, 21.0),
            ],
            cr_stats_f: vec![
                AttributeStats::new(70.0, 15.0),
                AttributeStats::new(72.0, 15.0),
                AttributeStats::new(75.0, 16.0),
                AttributeStats::new(78.0, 16.0),
                AttributeStats::new(81.0, 17.0),
                AttributeStats::new(84.0, 17.0),
                AttributeStats::new(87.0, 18.0),
                AttributeStats::new(90.0, 18.0),
            ],
            srh_stats_m: vec![
                AttributeStats::new(3.2, 0.9),
                AttributeStats::new(3.1, 0.9),
                AttributeStats::new(3.0, 0.9),
                AttributeStats::new(2.9, 0.9),
                AttributeStats::new(2.8, 0.9),
                AttributeStats::new(2.7, 0.9),
                AttributeStats::new(2.6, 0.9),
                AttributeStats::new(2.6, 0.9),
            ],
            srh_stats_f: vec![
                AttributeStats::new(3.2, 0.9),
                AttributeStats::new(3.1, 0.9),
                AttributeStats::new(3.0, 0.9),
                AttributeStats::new(2.9, 0.9),
                AttributeStats::new(2.8, 0.9),
                AttributeStats::new(2.7, 0.9),
                AttributeStats::new(2.6, 0.9),
                AttributeStats::new(2.5, 0.9),
            ],
            tug_stats: vec![
                AttributeStats::new(9.5, 2.8),
                AttributeStats::new(10.2, 2.8),
                AttributeStats::new(11.0, 2.8),
                AttributeStats::new(12.1, 2.8),
                AttributeStats::new(13.5, 2.8),
                AttributeStats::new(15.2, 2.8),
                AttributeStats::new(17.4, 2.8),
                AttributeStats::new(19.8, 2.8),
            ],
            date_report_stats_m: vec![
                AttributeStats::new(0.03, 0.02),
                AttributeStats::new(0.05, 0.02),
                AttributeStats::new(0.08, 0.03),
                AttributeStats::new(0.11, 0.03),
                AttributeStats::new(0.15, 0.04),
                AttributeStats::new(0.18, 0.04),
                AttributeStats::new(0.22, 0.05),
                AttributeStats::new(0.25, 0.05),
            ],
            date_report_stats_f: vec![
                AttributeStats::new(0.03, 0.02),
                AttributeStats::new(0.05, 0.02),
                AttributeStats::new(0.07, 0.03),
                AttributeStats::new(0.10, 0.03),
                AttributeStats::new(0.14, 0.04),
                AttributeStats::new(0.17, 0.04),
                AttributeStats::new(0.21, 0.05),
                AttributeStats::new(0.24, 0.05),
            ],
            smoking_stats_m: [0.11, 0.38, 0.51],
            smoking_stats_f: [0.09, 0.28, 0.63],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_band_statistics_cover_eight_bands() {
        let config = GenerationConfig::default();
        assert_eq!(config.weight_stats_m.len(), 8);
        assert_eq!(config.tug_stats.len(), 8);
        assert_eq!(config.date_report_stats_f.len(), 8);
    }

    #[test]
    fn smoking_weights_are_a_distribution() {
        let config = GenerationConfig::default();
        let m: f64 = config.smoking_stats_m.iter().sum();
        let f: f64 = config.smoking_stats_f.iter().sum();
        assert!((m - 1.0).abs() < 1e-9);
        assert!((f - 1.0).abs() < 1e-9);
    }
}
