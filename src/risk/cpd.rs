//! Conditional probability table synthesis
//!
//! Turns a baseline risk plus a list of heterogeneous effect measures into
//! the full joint probability table over every boolean combination of the
//! risk factors. The first listed factor is the most significant bit, so
//! rows are enumerated in binary-counting order from all-absent to
//! all-present.

use itertools::Itertools;

use super::{CombinationPolicy, RiskFactor, round_to};
use crate::error::{Result, SynthesisError};

/// One row of a synthesized table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpdRow {
    /// Probability the condition is present for this combination
    pub p_yes: f64,
    /// Complement, rounded to three decimals
    pub p_no: f64,
}

/// Full joint conditional probability table for one condition
#[derive(Debug, Clone)]
pub struct CpdTable {
    factor_count: usize,
    rows: Vec<CpdRow>,
}

impl CpdTable {
    /// Number of risk factors the table was built over
    #[must_use]
    pub fn factor_count(&self) -> usize {
        self.factor_count
    }

    /// All rows in binary-counting order
    #[must_use]
    pub fn rows(&self) -> &[CpdRow] {
        &self.rows
    }

    /// Look up the row matching a fully observed parent assignment.
    ///
    /// Every parent is always a known boolean at call time, so lookup is a
    /// direct index: the first factor is the most significant bit.
    #[must_use]
    pub fn row(&self, assignment: &[bool]) -> CpdRow {
        debug_assert_eq!(assignment.len(), self.factor_count);
        let mut index = 0usize;
        for &bit in assignment {
            index = (index << 1) | usize::from(bit);
        }
        self.rows[index]
    }
}

/// Synthesize the full table for `baseline` and `factors` under `policy`.
///
/// A negative baseline is the signature of a calibration offset overshooting
/// the raw prevalence and is floored at 0.01. A baseline of exactly zero or
/// of one or more can only come from a broken configuration and is rejected.
pub fn synthesize(
    condition: &str,
    baseline: f64,
    factors: &[RiskFactor],
    policy: CombinationPolicy,
) -> Result<CpdTable> {
    let baseline = if baseline < 0.0 { 0.01 } else { baseline };

    if baseline == 0.0 || baseline >= 1.0 {
        return Err(SynthesisError::NumericDomain {
            condition: condition.to_string(),
            baseline,
        });
    }

    let transforms: Vec<f64> = factors.iter().map(|f| f.transform(baseline)).collect();
    let weights = normalised_weights(&transforms);

    let mut rows = Vec::with_capacity(1 << factors.len());

    for combination in (0..factors.len())
        .map(|_| [false, true])
        .multi_cartesian_product()
    {
        let p_yes = if combination.iter().all(|&present| !present) {
            baseline
        } else {
            match policy {
                CombinationPolicy::MaxRisk => combination
                    .iter()
                    .enumerate()
                    .filter(|(_, present)| **present)
                    .map(|(i, _)| round_to(baseline * transforms[i], 3))
                    .fold(0.0, f64::max),
                CombinationPolicy::Weighted => {
                    let mut risk = baseline;
                    for (i, present) in combination.iter().enumerate() {
                        if *present {
                            if weights[i] < 1.0 {
                                risk += baseline * (weights[i] * transforms[i]);
                            } else {
                                // A weight of one or more only occurs with a
                                // single risk factor; the contribution then
                                // replaces the accumulator outright.
                                risk = round_to(baseline * transforms[i], 2);
                            }
                        }
                    }
                    let clamped = if risk > 1.0 { 0.999 } else { risk };
                    round_to(clamped, 3).min(0.999)
                }
            }
        };

        rows.push(CpdRow {
            p_yes,
            p_no: round_to(1.0 - p_yes, 3),
        });
    }

    // Degenerate case with no factors: a single baseline row.
    if rows.is_empty() {
        rows.push(CpdRow {
            p_yes: baseline,
            p_no: round_to(1.0 - baseline, 3),
        });
    }

    Ok(CpdTable {
        factor_count: factors.len(),
        rows,
    })
}

/// Sum-normalised weights over the transformed risk ratios.
///
/// The min-max rescaling is computed and discarded; only the sum-normalised
/// weights ever feed the table, and swapping one for the other changes
/// every downstream probability.
fn normalised_weights(transforms: &[f64]) -> Vec<f64> {
    let min = transforms.iter().copied().fold(f64::INFINITY, f64::min);
    let max = transforms.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let _rescaled: Vec<f64> = transforms.iter().map(|t| (t - min) / (max - min)).collect();

    let sum: f64 = transforms.iter().sum();
    transforms.iter().map(|t| t / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ckd_factors() -> Vec<RiskFactor> {
        vec![
            RiskFactor::relative_risk("diabetes", 3.09),
            RiskFactor::odds_ratio("obesity", 1.81),
            RiskFactor::relative_risk("hypertension", 1.81),
        ]
    }

    #[test]
    fn table_has_one_row_per_combination() {
        let table = synthesize("ckd", 0.14, &ckd_factors(), CombinationPolicy::Weighted).unwrap();
        assert_eq!(table.rows().len(), 8);
    }

    #[test]
    fn all_absent_row_is_the_baseline_exactly() {
        let table = synthesize("ckd", 0.14, &ckd_factors(), CombinationPolicy::Weighted).unwrap();
        assert_eq!(table.row(&[false, false, false]).p_yes, 0.14);
    }

    #[test]
    fn rows_sum_to_one_within_tolerance() {
        let table = synthesize("ckd", 0.14, &ckd_factors(), CombinationPolicy::Weighted).unwrap();
        for row in table.rows() {
            assert!((row.p_yes + row.p_no - 1.0).abs() < 0.001);
        }
    }

    #[test]
    fn ckd_reference_row_reproduces() {
        // Diabetes alone: 0.14 + 0.14 * (w1 * 3.09) with w1 = 3.09 / 6.53
        let table = synthesize("ckd", 0.14, &ckd_factors(), CombinationPolicy::Weighted).unwrap();
        assert_eq!(table.row(&[true, false, false]).p_yes, 0.345);
    }

    #[test]
    fn single_factor_weight_overwrites() {
        let factors = vec![RiskFactor::relative_risk("ckd", 1.5)];
        let table = synthesize("anaemia", 0.04, &factors, CombinationPolicy::Weighted).unwrap();
        // round(0.04 * 1.5, 2), not 0.04 + 0.04 * 1.5
        assert_eq!(table.row(&[true]).p_yes, 0.06);
    }

    #[test]
    fn accumulated_risk_clamps_at_point_nine_nine_nine() {
        let factors = vec![
            RiskFactor::relative_risk("a", 9.0),
            RiskFactor::relative_risk("b", 9.0),
        ];
        let table = synthesize("x", 0.4, &factors, CombinationPolicy::Weighted).unwrap();
        assert_eq!(table.row(&[true, true]).p_yes, 0.999);
    }

    #[test]
    fn max_risk_takes_the_largest_present_contribution() {
        let factors = vec![
            RiskFactor::relative_risk("a", 2.0),
            RiskFactor::relative_risk("b", 3.0),
        ];
        let table = synthesize("x", 0.1, &factors, CombinationPolicy::MaxRisk).unwrap();
        assert_eq!(table.row(&[true, true]).p_yes, 0.3);
        assert_eq!(table.row(&[true, false]).p_yes, 0.2);
    }

    #[test]
    fn zero_baseline_is_rejected() {
        let factors = ckd_factors();
        assert!(synthesize("ckd", 0.0, &factors, CombinationPolicy::Weighted).is_err());
        assert!(synthesize("ckd", 1.0, &factors, CombinationPolicy::Weighted).is_err());
    }

    #[test]
    fn negative_baseline_floors_at_one_percent() {
        let factors = vec![RiskFactor::relative_risk("a", 2.0)];
        let table = synthesize("x", -0.05, &factors, CombinationPolicy::Weighted).unwrap();
        assert_eq!(table.row(&[false]).p_yes, 0.01);
    }
}
