use crate::core::predictor::PredictionService;
use crate::domain::model::{PatientRecord, PredictionResponse};
use crate::utils::error::Result;
use serde::Serialize;
use std::io::{Read, Write};

/// Output row: the 12 columns in training order, then the label.
#[derive(Debug, Serialize)]
struct ScoredRecord {
    age: i64,
    gender: i64,
    height: i64,
    weight: f64,
    ap_hi: i64,
    ap_lo: i64,
    cholesterol: i64,
    gluc: i64,
    smoke: i64,
    alco: i64,
    active: i64,
    bmi: f64,
    risk: i64,
}

impl ScoredRecord {
    fn new(record: PatientRecord, response: PredictionResponse) -> Self {
        Self {
            age: record.age,
            gender: record.gender,
            height: record.height,
            weight: record.weight,
            ap_hi: record.ap_hi,
            ap_lo: record.ap_lo,
            cholesterol: record.cholesterol,
            gluc: record.gluc,
            smoke: record.smoke,
            alco: record.alco,
            active: record.active,
            bmi: record.bmi,
            risk: response.risk,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub scored: usize,
    pub at_risk: usize,
}

/// 逐列評分 CSV；遇到格式錯誤的列即中止
pub fn score_csv<R: Read, W: Write>(
    service: &PredictionService,
    input: R,
    output: W,
) -> Result<BatchSummary> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);
    let mut writer = csv::Writer::from_writer(output);
    let mut summary = BatchSummary::default();

    for result in reader.deserialize::<PatientRecord>() {
        let record = result?;
        let response = service.predict(&record)?;

        summary.scored += 1;
        if response.risk == 1 {
            summary.at_risk += 1;
        }

        writer.serialize(ScoredRecord::new(record, response))?;
    }

    writer.flush()?;
    tracing::debug!(
        "Scored {} records ({} at risk)",
        summary.scored,
        summary.at_risk
    );

    Ok(summary)
}
