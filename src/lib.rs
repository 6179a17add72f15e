//! A Rust library for synthesising older-adult cancer patient populations
//! with epidemiologically consistent comorbidity and peri-operative risk
//! profiles.

pub mod batch;
pub mod config;
pub mod epidemiology;
pub mod error;
pub mod graph;
pub mod models;
pub mod population;
pub mod risk;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::GenerationConfig;
pub use epidemiology::{AgeBand, Gender, load_age_bands};
pub use error::{Result, SynthesisError};
pub use models::{ConditionModel, Evaluation};
pub use population::{GenerationContext, Patient, Population, generate_population};
pub use risk::{CombinationPolicy, CpdTable, EffectType, RiskFactor, synthesize};

// Batch driver
pub use batch::run_batch;
