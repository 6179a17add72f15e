//! Age-band epidemiology reference tables
//!
//! Static reference data describing each age/gender stratum: cancer
//! incidence weights and per-condition baseline prevalences. Loaded once
//! and shared read-only for the lifetime of a generation run.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SynthesisError};

/// Gender of a synthetic individual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Male
    #[serde(rename = "m")]
    Male,
    /// Female
    #[serde(rename = "f")]
    Female,
}

impl Gender {
    /// Short key used in data files and persisted records
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Male => "m",
            Self::Female => "f",
        }
    }
}

/// A rate reported separately per gender, as a percentage
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GenderRate {
    /// Male percentage
    pub m: f64,
    /// Female percentage
    pub f: f64,
}

impl GenderRate {
    /// The percentage for one gender
    #[must_use]
    pub const fn get(&self, gender: Gender) -> f64 {
        match gender {
            Gender::Male => self.m,
            Gender::Female => self.f,
        }
    }
}

/// Cancer incidence weights for one age band
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancerIncidence {
    /// Combined incidence weight across all sites, used for band sizing
    pub all: f64,
    /// Per-site incidence weights by gender
    pub sites: HashMap<String, GenderRate>,
}

/// One age/gender stratum of the epidemiology reference table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgeBand {
    /// Label such as `65_69`
    pub label: String,
    /// Inclusive lower age bound
    pub lower: u32,
    /// Exclusive upper age bound
    pub upper: u32,
    /// Cancer incidence weights for this band
    pub cancer_incidence: CancerIncidence,
    /// Baseline prevalence (percent) per condition and gender
    pub prevalence: HashMap<String, GenderRate>,
}

impl AgeBand {
    /// Baseline prevalence for a condition as a fraction in [0, 1].
    ///
    /// A missing entry is a configuration error and fails the run
    /// immediately; there is no implicit zero.
    pub fn prevalence_fraction(&self, condition: &str, gender: Gender) -> Result<f64> {
        self.prevalence
            .get(condition)
            .map(|rate| rate.get(gender) / 100.0)
            .ok_or_else(|| SynthesisError::missing_prevalence(&self.label, gender.key(), condition))
    }

    /// Cancer sites and their incidence weights for one gender
    #[must_use]
    pub fn cancer_site_weights(&self, gender: Gender) -> Vec<(&str, f64)> {
        let mut sites: Vec<(&str, f64)> = self
            .cancer_incidence
            .sites
            .iter()
            .map(|(site, rate)| (site.as_str(), rate.get(gender)))
            .collect();
        // Deterministic ordering regardless of map iteration order
        sites.sort_by(|a, b| a.0.cmp(b.0));
        sites
    }
}

/// Load the age-band reference table from a JSON file
pub fn load_age_bands(path: &Path) -> Result<Vec<AgeBand>> {
    log::info!("Loading epidemiology reference table from {}", path.display());
    let raw = fs::read_to_string(path)?;
    let bands: Vec<AgeBand> = serde_json::from_str(&raw)?;
    if bands.is_empty() {
        return Err(SynthesisError::configuration(format!(
            "epidemiology table {} contains no age bands",
            path.display()
        )));
    }
    log::info!("Loaded {} age bands", bands.len());
    Ok(bands)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band_with(condition: &str, m: f64, f: f64) -> AgeBand {
        let mut prevalence = HashMap::new();
        prevalence.insert(condition.to_string(), GenderRate { m, f });
        AgeBand {
            label: "65_69".to_string(),
            lower: 65,
            upper: 70,
            cancer_incidence: CancerIncidence {
                all: 100.0,
                sites: HashMap::new(),
            },
            prevalence,
        }
    }

    #[test]
    fn prevalence_is_a_fraction() {
        let band = band_with("anaemia", 4.1, 3.8);
        assert_eq!(band.prevalence_fraction("anaemia", Gender::Male).unwrap(), 0.041);
        assert_eq!(
            band.prevalence_fraction("anaemia", Gender::Female).unwrap(),
            0.038
        );
    }

    #[test]
    fn missing_condition_fails_fast() {
        let band = band_with("anaemia", 4.1, 3.8);
        assert!(band.prevalence_fraction("ckd", Gender::Male).is_err());
    }
}
