pub mod batch;
pub mod estimator;
pub mod loader;
pub mod pipeline;
pub mod predictor;

pub use crate::domain::model::{FeatureRow, PatientRecord, PredictionResponse, RiskLabel};
pub use crate::domain::ports::{ConfigProvider, Scorer};
pub use crate::utils::error::Result;
