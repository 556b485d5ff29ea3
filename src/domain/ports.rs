use crate::domain::model::{FeatureRow, RiskLabel};
use crate::utils::error::Result;

/// Maps an ordered feature row to a risk label.
///
/// Implementations are immutable after construction and shared across
/// request handlers, so `score` takes `&self`.
pub trait Scorer: Send + Sync {
    fn score(&self, row: &FeatureRow) -> Result<RiskLabel>;
}

pub trait ConfigProvider: Send + Sync {
    fn host(&self) -> &str;
    fn port(&self) -> u16;
    fn model_path(&self) -> &str;
    fn allow_credentials(&self) -> bool;

    fn bind_address(&self) -> String {
        format!("{}:{}", self.host(), self.port())
    }
}
