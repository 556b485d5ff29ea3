use anyhow::Result;
use cardio_risk_api::core::batch::score_csv;
use cardio_risk_api::{ModelLoader, PredictionService};
use std::sync::Arc;
use tempfile::TempDir;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/cardio_ensemble_model.json");

/// 用同一個模型檔離線評分 CSV
#[test]
fn test_score_csv_file_with_fixture_model() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input_path = temp_dir.path().join("patients.csv");
    let output_path = temp_dir.path().join("scored.csv");

    std::fs::write(
        &input_path,
        "\
age,gender,height,weight,ap_hi,ap_lo,cholesterol,gluc,smoke,alco,active,bmi
50,1,170,70.0,120,80,1,1,0,0,1,24.2
62,2,172,98.0,160,100,3,1,1,0,0,33.1
39,1,165,60.0,110,70,1,1,0,0,1,22.0
",
    )?;

    let service = PredictionService::new(Arc::new(ModelLoader::load(FIXTURE)?));
    let summary = score_csv(
        &service,
        std::fs::File::open(&input_path)?,
        std::fs::File::create(&output_path)?,
    )?;

    assert_eq!(summary.scored, 3);
    assert_eq!(summary.at_risk, 1);

    let mut reader = csv::Reader::from_path(&output_path)?;
    let headers = reader.headers()?.clone();
    assert_eq!(headers.get(12), Some("risk"));

    let risks: Vec<String> = reader
        .records()
        .map(|r| r.map(|rec| rec[12].to_string()))
        .collect::<std::result::Result<_, _>>()?;
    assert_eq!(risks, vec!["0", "1", "0"]);

    Ok(())
}
