pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::http::{router, AppState};
pub use config::AppConfig;
pub use core::{loader::ModelLoader, pipeline::FittedPipeline, predictor::PredictionService};
pub use domain::model::{FeatureRow, PatientRecord, PredictionResponse, RiskLabel, FEATURE_NAMES};
pub use domain::ports::Scorer;
pub use utils::error::{CardioError, Result};
