//! Batch scatter/gather driver
//!
//! Whole-population generation is embarrassingly parallel: each worker owns
//! a private RNG stream derived from the base seed and generates its share
//! of the target independently, with no shared mutable state. Results come
//! back over a channel as (worker index, sub-population) pairs and the
//! aggregator concatenates them in worker order, so the output is
//! independent of thread scheduling. A failed worker is fatal to the whole
//! batch; there is no partial recovery or retry.

use std::sync::mpsc;

use crate::error::{Result, SynthesisError};
use crate::population::generator::{GenerationContext, generate_population_from};
use crate::population::Population;

/// Split the target across workers and gather the merged population.
///
/// Worker `k` seeds its RNG with `base_seed.wrapping_add(k)` and starts its
/// identifier range after the expected counts of the workers before it, so
/// a fixed seed yields the same population at any worker count of equal
/// share split.
pub fn run_batch(
    ctx: &GenerationContext,
    target_sample_size: usize,
    base_seed: u64,
    workers: usize,
) -> Result<Population> {
    let workers = workers.clamp(1, target_sample_size.max(1));
    let shares = split_target(target_sample_size, workers);

    // Identifier ranges are sized from each worker's expected quota total.
    let mut id_starts = Vec::with_capacity(workers);
    let mut next_id: i64 = 1;
    for share in &shares {
        id_starts.push(next_id);
        let expected: usize = ctx
            .bands
            .iter()
            .map(|band| ctx.band_quota(band, *share))
            .sum();
        next_id += expected as i64;
    }

    log::info!(
        "Dispatching {target_sample_size} individuals across {workers} workers"
    );

    let (tx, rx) = mpsc::channel();
    rayon::scope(|scope| {
        for (worker, (share, id_start)) in shares.iter().zip(&id_starts).enumerate() {
            let tx = tx.clone();
            let seed = base_seed.wrapping_add(worker as u64);
            scope.spawn(move |_| {
                let result = generate_population_from(ctx, *share, seed, *id_start);
                // A closed channel means the aggregator already bailed out.
                let _ = tx.send((worker, result));
            });
        }
    });
    drop(tx);

    let mut results: Vec<(usize, Result<Population>)> = rx.iter().collect();
    if results.len() != workers {
        return Err(SynthesisError::BatchWorker {
            worker: results.len(),
            reason: "worker terminated without reporting a result".to_string(),
        });
    }
    results.sort_by_key(|(worker, _)| *worker);

    let mut population = Population::new();
    for (worker, result) in results {
        match result {
            Ok(sub) => {
                log::info!("Worker {worker} contributed {} individuals", sub.len());
                population.merge(sub);
            }
            Err(e) => {
                return Err(SynthesisError::BatchWorker {
                    worker,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(population)
}

/// Even split of the target, remainder spread over the first workers
fn split_target(target: usize, workers: usize) -> Vec<usize> {
    let base = target / workers;
    let remainder = target % workers;
    (0..workers)
        .map(|w| base + usize::from(w < remainder))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_covers_the_target() {
        let shares = split_target(1001, 4);
        assert_eq!(shares.iter().sum::<usize>(), 1001);
        assert_eq!(shares.len(), 4);
        assert_eq!(shares[0], 251);
        assert_eq!(shares[3], 250);
    }

    #[test]
    fn single_worker_takes_everything() {
        assert_eq!(split_target(10, 1), vec![10]);
    }
}
