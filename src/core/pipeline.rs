use crate::core::estimator::{check_len, invalid, Estimator};
use crate::domain::model::{FeatureRow, RiskLabel, FEATURE_COUNT, FEATURE_NAMES};
use crate::domain::ports::Scorer;
use crate::utils::error::{CardioError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SUPPORTED_FORMAT_VERSION: u32 = 1;

/// 訓練工具鏈輸出的模型檔
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub trained_at: Option<DateTime<Utc>>,
    pub features: Vec<String>,
    #[serde(default)]
    pub preprocessing: Vec<Preprocessor>,
    pub estimator: Estimator,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Preprocessor {
    StandardScaler { mean: Vec<f64>, scale: Vec<f64> },
}

impl Preprocessor {
    fn apply(&self, x: &mut [f64; FEATURE_COUNT]) {
        match self {
            Preprocessor::StandardScaler { mean, scale } => {
                for (i, v) in x.iter_mut().enumerate() {
                    *v = (*v - mean[i]) / scale[i];
                }
            }
        }
    }

    fn validate(&self, context: &str) -> Result<()> {
        match self {
            Preprocessor::StandardScaler { mean, scale } => {
                check_len(context, "mean", mean.len())?;
                check_len(context, "scale", scale.len())?;
                if mean.iter().any(|m| !m.is_finite()) {
                    return Err(invalid(format!("{}: mean has non-finite entries", context)));
                }
                if scale.iter().any(|s| !s.is_finite() || *s == 0.0) {
                    return Err(invalid(format!(
                        "{}: scale entries must be finite and non-zero",
                        context
                    )));
                }
                Ok(())
            }
        }
    }
}

/// Metadata served by `GET /model`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub version: String,
    pub trained_at: Option<DateTime<Utc>>,
    pub estimator: String,
    pub features: Vec<String>,
    pub loaded_at: DateTime<Utc>,
}

/// A validated, immutable pipeline ready to score rows.
#[derive(Debug, Clone)]
pub struct FittedPipeline {
    info: ModelInfo,
    preprocessing: Vec<Preprocessor>,
    estimator: Estimator,
}

impl FittedPipeline {
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        if artifact.format_version != SUPPORTED_FORMAT_VERSION {
            return Err(invalid(format!(
                "unsupported format_version {} (expected {})",
                artifact.format_version, SUPPORTED_FORMAT_VERSION
            )));
        }

        if artifact.features.iter().map(String::as_str).ne(FEATURE_NAMES.iter().copied()) {
            return Err(invalid(format!(
                "feature columns {:?} do not match expected order {:?}",
                artifact.features, FEATURE_NAMES
            )));
        }

        for (i, step) in artifact.preprocessing.iter().enumerate() {
            step.validate(&format!("preprocessing[{}]", i))?;
        }
        artifact.estimator.validate("estimator")?;

        Ok(Self {
            info: ModelInfo {
                name: artifact.name,
                version: artifact.version,
                trained_at: artifact.trained_at,
                estimator: artifact.estimator.kind().to_string(),
                features: artifact.features,
                loaded_at: Utc::now(),
            },
            preprocessing: artifact.preprocessing,
            estimator: artifact.estimator,
        })
    }

    pub fn info(&self) -> &ModelInfo {
        &self.info
    }

    pub fn predict_proba(&self, row: &FeatureRow) -> f64 {
        let mut x = *row.values();
        for step in &self.preprocessing {
            step.apply(&mut x);
        }
        self.estimator.predict_proba(&x)
    }
}

impl Scorer for FittedPipeline {
    fn score(&self, row: &FeatureRow) -> Result<RiskLabel> {
        let p = self.predict_proba(row);
        if !p.is_finite() {
            return Err(CardioError::ScoringError {
                message: format!("{} produced a non-finite probability", self.info.estimator),
            });
        }
        Ok(RiskLabel::from_probability(p))
    }
}
