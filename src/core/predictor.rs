use crate::domain::model::{PatientRecord, PredictionResponse};
use crate::domain::ports::Scorer;
use crate::utils::error::Result;
use std::sync::Arc;

/// One record in, one scorer call, one label out.
#[derive(Clone)]
pub struct PredictionService {
    scorer: Arc<dyn Scorer>,
}

impl PredictionService {
    pub fn new(scorer: Arc<dyn Scorer>) -> Self {
        Self { scorer }
    }

    pub fn predict(&self, record: &PatientRecord) -> Result<PredictionResponse> {
        // 病患資料不寫入日誌
        let row = record.to_feature_row();
        let label = self.scorer.score(&row)?;
        Ok(PredictionResponse::from(label))
    }
}
