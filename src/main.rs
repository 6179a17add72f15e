use std::env;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use log::{info, warn};

use geripop::population::Population;
use geripop::utils::progress;
use geripop::{GenerationConfig, GenerationContext, load_age_bands, run_batch};

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let target_sample_size: usize = arg_value(&args, "--size")
        .map(|v| v.parse())
        .transpose()
        .context("--size must be an integer")?
        .unwrap_or(1000);
    let seed: u64 = arg_value(&args, "--seed")
        .map(|v| v.parse())
        .transpose()
        .context("--seed must be an integer")?
        .unwrap_or(42);
    let workers: usize = arg_value(&args, "--workers")
        .map(|v| v.parse())
        .transpose()
        .context("--workers must be an integer")?
        .unwrap_or_else(num_cpus::get);

    let config = match arg_value(&args, "--config") {
        Some(path) => GenerationConfig::load(Path::new(&path))?,
        None => GenerationConfig::default(),
    };

    let epidemiology_path = arg_value(&args, "--epidemiology")
        .map_or_else(|| PathBuf::from("data/epidemiology.json"), PathBuf::from);
    let bands = load_age_bands(&epidemiology_path)?;

    let ctx = GenerationContext::new(config, bands);

    info!(
        "Generating {target_sample_size} synthetic individuals (seed {seed}, {workers} workers)"
    );
    let pb = progress::create_spinner(Some("Generating population"));
    let start = Instant::now();
    let population = run_batch(&ctx, target_sample_size, seed, workers)?;
    progress::finish_progress_bar(&pb, Some("Generation complete"));
    info!(
        "Generated {} individuals in {:?}",
        population.len(),
        start.elapsed()
    );

    if population.is_empty() {
        warn!("No individuals generated; check band weights against the target size");
        return Ok(());
    }

    let out_dir = Path::new("results/data");
    fs::create_dir_all(out_dir)?;
    let stamp = chrono::Local::now().format("%d-%m-%Y-%H-%M-%S");
    let out_path = out_dir.join(format!("{stamp}.csv"));
    write_csv(&population, &out_path)?;
    info!("Wrote {}", out_path.display());

    Ok(())
}

fn arg_value(args: &[String], name: &str) -> Option<String> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1).cloned())
}

/// Persist one row per patient, one column per field, in the order the
/// fields were computed
fn write_csv(population: &Population, path: &Path) -> anyhow::Result<()> {
    let first = population
        .patients()
        .first()
        .context("cannot persist an empty population")?;

    let mut out = fs::File::create(path)?;
    let header: Vec<&str> = first.fields().iter().map(|(name, _)| *name).collect();
    writeln!(out, "{}", header.join(","))?;

    for patient in population.patients() {
        let row: Vec<String> = patient
            .fields()
            .iter()
            .map(|(_, value)| value.render())
            .collect();
        writeln!(out, "{}", row.join(","))?;
    }
    Ok(())
}
