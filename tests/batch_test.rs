//! Scatter/gather batch driver properties

use std::path::Path;

use geripop::{GenerationConfig, GenerationContext, load_age_bands, run_batch};

fn reference_context() -> GenerationContext {
    let bands = load_age_bands(Path::new(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/data/epidemiology.json"
    )))
    .expect("reference epidemiology table loads");
    GenerationContext::new(GenerationConfig::default(), bands)
}

#[test]
fn batches_are_deterministic_for_a_fixed_worker_count() {
    let ctx = reference_context();
    let first = run_batch(&ctx, 160, 77, 4).expect("batch succeeds");
    let second = run_batch(&ctx, 160, 77, 4).expect("batch succeeds");
    assert!(!first.is_empty());
    assert_eq!(first.len(), second.len());
    for (a, b) in first.patients().iter().zip(second.patients()) {
        let left: Vec<String> = a.fields().iter().map(|(_, v)| v.render()).collect();
        let right: Vec<String> = b.fields().iter().map(|(_, v)| v.render()).collect();
        assert_eq!(left, right);
    }
}

#[test]
fn worker_identifier_ranges_are_disjoint() {
    let ctx = reference_context();
    let population = run_batch(&ctx, 160, 9, 4).expect("batch succeeds");
    let mut ids: Vec<i64> = population
        .patients()
        .iter()
        .map(|p| p.int("id").expect("id assigned"))
        .collect();
    let total = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), total, "identifiers must not repeat across workers");
}

#[test]
fn single_worker_matches_the_plain_generator() {
    let ctx = reference_context();
    let batched = run_batch(&ctx, 120, 31, 1).expect("batch succeeds");
    let plain = geripop::generate_population(&ctx, 120, 31).expect("generation succeeds");
    assert_eq!(batched.len(), plain.len());
    for (a, b) in batched.patients().iter().zip(plain.patients()) {
        let left: Vec<String> = a.fields().iter().map(|(_, v)| v.render()).collect();
        let right: Vec<String> = b.fields().iter().map(|(_, v)| v.render()).collect();
        assert_eq!(left, right);
    }
}
