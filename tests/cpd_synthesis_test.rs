//! Synthesis invariants for the conditional probability tables

use geripop::risk::{CombinationPolicy, RiskFactor, synthesize};

fn ckd_factors() -> Vec<RiskFactor> {
    vec![
        RiskFactor::relative_risk("diabetes", 3.09),
        RiskFactor::odds_ratio("obesity", 1.81),
        RiskFactor::relative_risk("hypertension", 1.81),
    ]
}

#[test]
fn every_row_pair_sums_to_one() {
    for baseline in [0.01, 0.05, 0.14, 0.3, 0.5, 0.7, 0.9] {
        let table = synthesize("ckd", baseline, &ckd_factors(), CombinationPolicy::Weighted)
            .expect("valid baseline");
        assert_eq!(table.rows().len(), 8);
        for row in table.rows() {
            assert!(
                (row.p_yes + row.p_no - 1.0).abs() < 0.001,
                "row {row:?} violates the pair invariant at baseline {baseline}"
            );
            assert!(row.p_yes <= 0.999);
        }
    }
}

#[test]
fn baseline_row_is_exact_for_any_factor_count() {
    let mut factors = Vec::new();
    for i in 0..5 {
        factors.push(RiskFactor::odds_ratio(["a", "b", "c", "d", "e"][i], 1.5 + i as f64));
        let table =
            synthesize("x", 0.23, &factors, CombinationPolicy::Weighted).expect("valid baseline");
        assert_eq!(table.rows().len(), 1 << factors.len());
        let all_absent = vec![false; factors.len()];
        assert_eq!(table.row(&all_absent).p_yes, 0.23);
    }
}

#[test]
fn odds_ratio_transform_reference_value() {
    let factor = RiskFactor::odds_ratio("obesity", 1.81);
    assert_eq!(factor.transform(0.14), 1.63);
}

#[test]
fn ckd_reference_table_first_factor_row() {
    let table =
        synthesize("ckd", 0.14, &ckd_factors(), CombinationPolicy::Weighted).expect("valid");
    assert_eq!(table.row(&[true, false, false]).p_yes, 0.345);
}

#[test]
fn single_factor_present_row_is_rounded_product() {
    let factors = vec![RiskFactor::relative_risk("ckd", 1.5)];
    for baseline in [0.02, 0.038, 0.1, 0.2] {
        let table =
            synthesize("anaemia", baseline, &factors, CombinationPolicy::Weighted).expect("valid");
        let expected = (baseline * 1.5 * 100.0).round() / 100.0;
        assert_eq!(table.row(&[true]).p_yes, expected);
    }
}

#[test]
fn saturating_combinations_report_exactly_the_ceiling() {
    let factors = vec![
        RiskFactor::relative_risk("a", 6.0),
        RiskFactor::relative_risk("b", 6.0),
        RiskFactor::relative_risk("c", 6.0),
    ];
    let table = synthesize("x", 0.5, &factors, CombinationPolicy::Weighted).expect("valid");
    assert_eq!(table.row(&[true, true, true]).p_yes, 0.999);
}
