use serde::{Deserialize, Serialize};

/// Column order the scorer was trained on.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "gender",
    "height",
    "weight",
    "ap_hi",
    "ap_lo",
    "cholesterol",
    "gluc",
    "smoke",
    "alco",
    "active",
    "bmi",
];

pub const FEATURE_COUNT: usize = 12;

/// One patient's clinical measurements, as sent to `POST /predict`.
///
/// Every field is required; unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub age: i64,
    pub gender: i64,      // 1=female, 2=male
    pub height: i64,      // cm
    pub weight: f64,      // kg
    pub ap_hi: i64,       // 收縮壓
    pub ap_lo: i64,       // 舒張壓
    pub cholesterol: i64, // 1=normal, 2=above normal, 3=well above normal
    pub gluc: i64,        // 1=normal, 2=above normal, 3=well above normal
    pub smoke: i64,       // 0 or 1
    pub alco: i64,        // 0 or 1
    pub active: i64,      // 0 or 1
    pub bmi: f64,
}

impl PatientRecord {
    /// 依訓練時的欄位順序組成單列特徵
    pub fn to_feature_row(&self) -> FeatureRow {
        FeatureRow([
            self.age as f64,
            self.gender as f64,
            self.height as f64,
            self.weight,
            self.ap_hi as f64,
            self.ap_lo as f64,
            self.cholesterol as f64,
            self.gluc as f64,
            self.smoke as f64,
            self.alco as f64,
            self.active as f64,
            self.bmi,
        ])
    }
}

/// A single ordered feature row, indexed by position in [`FEATURE_NAMES`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow(pub [f64; FEATURE_COUNT]);

impl FeatureRow {
    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }
}

/// Binary class label produced by a scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskLabel {
    NoRisk,
    Risk,
}

impl RiskLabel {
    pub fn from_probability(p: f64) -> Self {
        if p > 0.5 {
            RiskLabel::Risk
        } else {
            RiskLabel::NoRisk
        }
    }
}

impl From<RiskLabel> for i64 {
    fn from(label: RiskLabel) -> Self {
        match label {
            RiskLabel::NoRisk => 0,
            RiskLabel::Risk => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub risk: i64,
}

impl From<RiskLabel> for PredictionResponse {
    fn from(label: RiskLabel) -> Self {
        Self { risk: label.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> PatientRecord {
        PatientRecord {
            age: 50,
            gender: 1,
            height: 170,
            weight: 70.0,
            ap_hi: 120,
            ap_lo: 80,
            cholesterol: 1,
            gluc: 1,
            smoke: 0,
            alco: 0,
            active: 1,
            bmi: 24.2,
        }
    }

    #[test]
    fn test_feature_row_order() {
        let row = sample_record().to_feature_row();
        assert_eq!(
            row.values(),
            &[50.0, 1.0, 170.0, 70.0, 120.0, 80.0, 1.0, 1.0, 0.0, 0.0, 1.0, 24.2]
        );
    }

    #[test]
    fn test_record_ignores_key_order() {
        let json = r#"{"bmi": 24.2, "active": 1, "alco": 0, "smoke": 0, "gluc": 1,
            "cholesterol": 1, "ap_lo": 80, "ap_hi": 120, "weight": 70, "height": 170,
            "gender": 1, "age": 50}"#;
        let record: PatientRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record, sample_record());
    }

    #[test]
    fn test_record_rejects_missing_and_mistyped_fields() {
        let missing = r#"{"age": 50, "gender": 1}"#;
        assert!(serde_json::from_str::<PatientRecord>(missing).is_err());

        let mistyped = serde_json::json!({
            "age": "fifty", "gender": 1, "height": 170, "weight": 70.0, "ap_hi": 120,
            "ap_lo": 80, "cholesterol": 1, "gluc": 1, "smoke": 0, "alco": 0,
            "active": 1, "bmi": 24.2
        });
        assert!(serde_json::from_value::<PatientRecord>(mistyped).is_err());
    }

    #[test]
    fn test_label_threshold() {
        assert_eq!(RiskLabel::from_probability(0.5), RiskLabel::NoRisk);
        assert_eq!(RiskLabel::from_probability(0.51), RiskLabel::Risk);
        assert_eq!(PredictionResponse::from(RiskLabel::Risk).risk, 1);
        assert_eq!(
            serde_json::to_string(&PredictionResponse::from(RiskLabel::NoRisk)).unwrap(),
            r#"{"risk":0}"#
        );
    }
}
