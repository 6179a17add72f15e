//! Risk factor representation and effect-measure transforms
//!
//! This module contains the building blocks of risk synthesis: a named
//! epidemiological effect measure (relative risk, odds ratio or hazard ratio)
//! and its conversion onto a common multiplicative risk-ratio scale at a
//! given baseline prevalence.

pub mod cpd;

pub use cpd::{CpdRow, CpdTable, synthesize};

/// Epidemiological effect-size measure carried by a risk factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectType {
    /// Relative risk; already on the multiplicative scale
    RelativeRisk,
    /// Odds ratio; converted at the baseline prevalence
    OddsRatio,
    /// Hazard ratio; converted via cumulative incidence
    HazardRatio,
}

/// A named effect measure used as input to CPD synthesis
#[derive(Debug, Clone)]
pub struct RiskFactor {
    /// Name of the parent attribute this factor represents
    pub name: &'static str,
    /// Kind of effect measure reported by the source literature
    pub effect: EffectType,
    /// Magnitude of the effect, always > 0
    pub magnitude: f64,
}

impl RiskFactor {
    /// A factor reported as a relative risk
    #[must_use]
    pub const fn relative_risk(name: &'static str, magnitude: f64) -> Self {
        Self {
            name,
            effect: EffectType::RelativeRisk,
            magnitude,
        }
    }

    /// A factor reported as an odds ratio
    #[must_use]
    pub const fn odds_ratio(name: &'static str, magnitude: f64) -> Self {
        Self {
            name,
            effect: EffectType::OddsRatio,
            magnitude,
        }
    }

    /// A factor reported as a hazard ratio
    #[must_use]
    pub const fn hazard_ratio(name: &'static str, magnitude: f64) -> Self {
        Self {
            name,
            effect: EffectType::HazardRatio,
            magnitude,
        }
    }

    /// Convert the effect measure to an effective risk ratio at `baseline`.
    ///
    /// Relative risks pass through unchanged. Odds ratios use the standard
    /// OR-to-RR conversion at the given baseline prevalence; hazard ratios
    /// use the cumulative-incidence conversion. Converted values are rounded
    /// to two decimals, matching the precision of the source literature.
    #[must_use]
    pub fn transform(&self, baseline: f64) -> f64 {
        match self.effect {
            EffectType::RelativeRisk => self.magnitude,
            EffectType::OddsRatio => {
                let rr = self.magnitude / ((1.0 - baseline) + (baseline * self.magnitude));
                round_to(rr, 2)
            }
            EffectType::HazardRatio => {
                let rr = (1.0 - (self.magnitude * (1.0 - baseline).ln()).exp()) / baseline;
                round_to(rr, 2)
            }
        }
    }
}

/// How multiple present risk factors are combined into one row probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CombinationPolicy {
    /// Weighted-contribution approach; the default throughout the system
    #[default]
    Weighted,
    /// Take the single highest per-factor risk among present factors
    MaxRisk,
}

/// Round to a fixed number of decimal places
#[must_use]
pub fn round_to(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_risk_passes_through() {
        let f = RiskFactor::relative_risk("diabetes", 3.09);
        assert_eq!(f.transform(0.14), 3.09);
    }

    #[test]
    fn odds_ratio_converts_at_baseline() {
        // 1.81 / ((1 - 0.14) + 0.14 * 1.81) rounded to 2 dp
        let f = RiskFactor::odds_ratio("obesity", 1.81);
        assert_eq!(f.transform(0.14), 1.63);
    }

    #[test]
    fn hazard_ratio_converts_via_cumulative_incidence() {
        let f = RiskFactor::hazard_ratio("male", 1.65);
        let expected = round_to((1.0 - (1.65f64 * 0.94f64.ln()).exp()) / 0.06, 2);
        assert_eq!(f.transform(0.06), expected);
    }
}
