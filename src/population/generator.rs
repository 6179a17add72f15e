//! Core population generation loop
//!
//! Builds one synthetic individual at a time: root attributes first, then
//! every causal-graph node in validated topological order, consuming the
//! previously assigned fields as parent evidence. Band sizes follow the
//! cancer incidence weights scaled against the reference population.

use crate::config::GenerationConfig;
use crate::epidemiology::{AgeBand, Gender};
use crate::error::{Result, SynthesisError};
use crate::graph::CausalGraph;
use crate::population::Population;
use crate::population::collaborators::Collaborators;
use crate::population::nodes::{
    self, EvalScope, LATE_ROOT_FIELDS, MAJOR_ROOT_FIELDS, ROOT_FIELDS,
};
use crate::population::patient::{FieldValue, Patient};
use crate::population::sampler::{ContinuousAttribute, SamplerRng};
use crate::population::scores;

/// Everything a generation run needs, threaded explicitly through every
/// call; there are no configuration or RNG globals
pub struct GenerationContext {
    /// Run configuration
    pub config: GenerationConfig,
    /// Age-band epidemiology reference table
    pub bands: Vec<AgeBand>,
    /// Collaborator services
    pub collaborators: Collaborators,
}

impl GenerationContext {
    /// A context over the reference collaborator implementations
    #[must_use]
    pub fn new(config: GenerationConfig, bands: Vec<AgeBand>) -> Self {
        let collaborators = Collaborators::reference(&config);
        Self {
            config,
            bands,
            collaborators,
        }
    }

    /// Build and validate the causal graph for this configuration
    pub fn validated_graph(&self) -> Result<CausalGraph> {
        let mut roots: Vec<&str> = ROOT_FIELDS.to_vec();
        roots.extend(MAJOR_ROOT_FIELDS);
        roots.extend(LATE_ROOT_FIELDS);
        CausalGraph::new(nodes::all_nodes(), &roots)
    }

    /// Per-band individual count for a target sample size.
    ///
    /// Fractional quotas round up: generation continues while the running
    /// count is below the band's weighted share.
    #[must_use]
    pub fn band_quota(&self, band: &AgeBand, target_sample_size: usize) -> usize {
        ((band.cancer_incidence.all / self.config.total_older_population)
            * target_sample_size as f64)
            .ceil() as usize
    }
}

/// Generate a full population with one RNG stream.
///
/// Two runs with the same context, target size and seed produce identical
/// populations.
pub fn generate_population(
    ctx: &GenerationContext,
    target_sample_size: usize,
    rng_seed: u64,
) -> Result<Population> {
    generate_population_from(ctx, target_sample_size, rng_seed, 1)
}

/// Generate a population with identifiers starting at `first_id`.
///
/// Batch workers use this to keep identifiers disjoint across their
/// sub-populations.
pub fn generate_population_from(
    ctx: &GenerationContext,
    target_sample_size: usize,
    rng_seed: u64,
    first_id: i64,
) -> Result<Population> {
    let graph = ctx.validated_graph()?;
    let mut rng = SamplerRng::from_seed(rng_seed);
    let mut population = Population::new();
    let mut id: i64 = first_id;

    for (band_index, band) in ctx.bands.iter().enumerate() {
        let quota = ctx.band_quota(band, target_sample_size);
        log::info!(
            "Generating {quota} individuals for band {} ({}-{})",
            band.label,
            band.lower,
            band.upper
        );
        for _ in 0..quota {
            let patient = generate_individual(ctx, &graph, band, band_index, id, &mut rng)?;
            population.push(patient);
            id += 1;
        }
    }

    log::info!("Generated {} individuals", population.len());
    Ok(population)
}

/// Build one individual: root sampling, then the causal cascade
pub fn generate_individual(
    ctx: &GenerationContext,
    graph: &CausalGraph,
    band: &AgeBand,
    band_index: usize,
    id: i64,
    rng: &mut SamplerRng,
) -> Result<Patient> {
    let mut patient = Patient::new();
    sample_roots(ctx, band, band_index, id, &mut patient, rng)?;

    let mut scope = EvalScope {
        band,
        band_index,
        gender: gender_of(&patient)?,
        config: &ctx.config,
        collaborators: &ctx.collaborators,
        patient: &mut patient,
        rng,
    };

    for node in graph.ordered() {
        // Dependency-order invariant: every declared parent must already be
        // on the record before the node runs.
        for parent in node.parents {
            if !scope.patient.contains(parent) {
                return Err(SynthesisError::configuration(format!(
                    "node '{}' evaluated before parent '{parent}' was assigned",
                    node.name
                )));
            }
        }
        (node.eval)(&mut scope)?;
    }

    Ok(patient)
}

fn gender_of(patient: &Patient) -> Result<Gender> {
    match patient.get("gender")? {
        FieldValue::Text(g) if g == "m" => Ok(Gender::Male),
        FieldValue::Text(g) if g == "f" => Ok(Gender::Female),
        other => Err(SynthesisError::configuration(format!(
            "unrecognised gender value {other:?}"
        ))),
    }
}

/// Root sampling: attributes with no modelled parents
fn sample_roots(
    ctx: &GenerationContext,
    band: &AgeBand,
    band_index: usize,
    id: i64,
    patient: &mut Patient,
    rng: &mut SamplerRng,
) -> Result<()> {
    let config = &ctx.config;

    patient.set("id", FieldValue::Int(id));
    patient.set(
        "age",
        FieldValue::Int(rng.integer_between(i64::from(band.lower), i64::from(band.upper))),
    );

    let gender = if rng.uniform() > config.chance_of_being_male {
        Gender::Female
    } else {
        Gender::Male
    };
    patient.set("gender", FieldValue::Text(gender.key().to_string()));

    // Cancer site allocation by band incidence weights
    let sites = band.cancer_site_weights(gender);
    if sites.is_empty() {
        return Err(SynthesisError::configuration(format!(
            "band {} carries no cancer incidence weights",
            band.label
        )));
    }
    let weights: Vec<f64> = sites.iter().map(|(_, w)| *w).collect();
    let site = sites[rng.weighted_index(&weights)?].0;
    patient.set("cancer", FieldValue::Text(site.to_string()));

    let profile =
        ctx.collaborators
            .tumours
            .profile(patient.int("age")?, gender, site, rng)?;
    patient.set("ethnicity", FieldValue::Text(profile.ethnicity));
    patient.set("deprivation", FieldValue::Int(profile.deprivation));
    patient.set("mdt", FieldValue::Text(profile.mdt));
    patient.set("cancer_stage", FieldValue::Text(profile.cancer_stage));
    patient.set_flag("surgery", profile.surgery);
    patient.set_flag("chemotherapy", profile.chemotherapy);
    patient.set_flag("radiotherapy", profile.radiotherapy);

    let active_fraction = band.prevalence_fraction("aerobicallyActive", gender)?;
    let active = rng.bernoulli(active_fraction);
    patient.set_flag("aerobicallyActive", active);

    patient.set("comorbidity_count", FieldValue::Int(0));
    patient.set_flag("comorbidity", 0);
    patient.set_flag("t1dm", 0);
    patient.set_flag("t2dm", 0);

    let mut comorbidity_count: i64 = 0;

    // Minor root comorbidities: straight band prevalence
    for node in &config.root_nodes_minor {
        let p = band.prevalence_fraction(node, gender)?;
        let state = rng.bernoulli(p);
        patient.set_flag(root_field_name(node)?, state);
        if state == 1 {
            comorbidity_count += 1;
        }
    }

    // Major root comorbidities: confined to the aerobically inactive, with
    // prevalence scaled up to keep population totals right
    let mut any_major = false;
    for node in &config.root_nodes_major {
        if node != "diabetes" {
            patient.set_flag(root_field_name(node)?, 0);
        }
        if active == 0 {
            let uplift = active_fraction * 1.6;
            let p = band.prevalence_fraction(node, gender)? / uplift;
            let state = rng.bernoulli(p);
            if node == "diabetes" {
                if state == 1 {
                    // One in ten diabetic older adults has type 1 disease
                    if rng.uniform() < 0.10 {
                        patient.set_flag("t1dm", 1);
                    } else {
                        patient.set_flag("t2dm", 1);
                    }
                    comorbidity_count += 1;
                    any_major = true;
                }
            } else {
                patient.set_flag(root_field_name(node)?, state);
                if state == 1 {
                    comorbidity_count += 1;
                    any_major = true;
                }
            }
        }
    }

    patient.set("comorbidity_count", FieldValue::Int(comorbidity_count));
    patient.set_flag("comorbidity", u8::from(any_major));

    // Height and weight, resampled until the BMI matches the activity stratum
    let draw_pair = |rng: &mut SamplerRng| {
        let weight = ctx
            .collaborators
            .continuous
            .draw(ContinuousAttribute::Weight, band_index, gender, rng)
            .round();
        let height = ctx
            .collaborators
            .continuous
            .draw(ContinuousAttribute::Height, band_index, gender, rng)
            .round();
        (height, weight)
    };

    let (mut height, mut weight) = draw_pair(rng);
    let mut bmi = scores::bmi(height, weight);
    if active == 0 {
        if rng.uniform() > 0.13 {
            while bmi < 25.0 {
                (height, weight) = draw_pair(rng);
                bmi = scores::bmi(height, weight);
            }
        }
    } else if rng.uniform() > 0.26 {
        while bmi > 25.0 {
            (height, weight) = draw_pair(rng);
            bmi = scores::bmi(height, weight);
        }
    }
    patient.set("height", FieldValue::Float(height));
    patient.set("weight", FieldValue::Float(weight));
    patient.set("bmi", FieldValue::Float(bmi));

    let date_error_rate = ctx
        .collaborators
        .continuous
        .draw(ContinuousAttribute::DateErrorRate, band_index, gender, rng)
        .clamp(0.0, 1.0);
    patient.set_flag("incorrectDateReported", rng.bernoulli(date_error_rate));

    let smoking_weights = match gender {
        Gender::Male => &config.smoking_stats_m,
        Gender::Female => &config.smoking_stats_f,
    };
    let smoking = rng.weighted_index(smoking_weights)? as i64;
    patient.set("smoking", FieldValue::Int(smoking));

    // Mild cognitive impairment and dementia are mutually exclusive
    if patient.is_present("dementia")? {
        patient.set_flag("mci", 0);
    }

    Ok(())
}

/// Map a configured root-node name onto its static field name.
///
/// Patient field names are `&'static str`; the known root names cover every
/// supported configuration, and an unknown name is a configuration error
/// rather than a silent default.
fn root_field_name(name: &str) -> Result<&'static str> {
    const KNOWN: [&str; 24] = [
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
        "diabetes",
        "hypertension",
        "af",
        "heartValveDisease",
        "parkinsonsDisease",
        "dementia",
        "osteoporosis",
        "arthritis",
    ];
    KNOWN
        .iter()
        .find(|known| **known == name)
        .copied()
        .ok_or_else(|| {
            SynthesisError::configuration(format!("unknown root node '{name}' in configuration"))
        })
}
