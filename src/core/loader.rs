use crate::core::pipeline::{FittedPipeline, ModelArtifact};
use crate::utils::error::{CardioError, Result};
use std::path::Path;

/// 啟動時載入模型；任何失敗都應讓程序停止
pub struct ModelLoader;

impl ModelLoader {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<FittedPipeline> {
        let path = path.as_ref();
        let path_display = path.display().to_string();

        tracing::info!("📦 Loading model artifact from: {}", path_display);

        let bytes = std::fs::read(path).map_err(|e| CardioError::ModelLoadError {
            path: path_display.clone(),
            message: e.to_string(),
        })?;

        let pipeline = Self::from_slice(&bytes).map_err(|e| match e {
            CardioError::SerializationError(err) => CardioError::ModelLoadError {
                path: path_display.clone(),
                message: format!("corrupt artifact: {}", err),
            },
            other => other,
        })?;

        let info = pipeline.info();
        tracing::info!(
            "✅ Loaded model '{}' v{} ({})",
            info.name,
            info.version,
            info.estimator
        );

        Ok(pipeline)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<FittedPipeline> {
        let artifact: ModelArtifact = serde_json::from_slice(bytes)?;
        FittedPipeline::from_artifact(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const ARTIFACT: &str = r#"{
        "format_version": 1,
        "name": "cardio_ensemble",
        "version": "2.1.0",
        "trained_at": "2025-06-01T00:00:00Z",
        "features": ["age", "gender", "height", "weight", "ap_hi", "ap_lo",
                     "cholesterol", "gluc", "smoke", "alco", "active", "bmi"],
        "estimator": {"type": "decision_tree", "nodes": [{"leaf": {"value": 0.1}}]}
    }"#;

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(ARTIFACT.as_bytes()).unwrap();

        let pipeline = ModelLoader::load(temp_file.path()).unwrap();
        assert_eq!(pipeline.info().name, "cardio_ensemble");
        assert_eq!(pipeline.info().version, "2.1.0");
        assert!(pipeline.info().trained_at.is_some());
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = ModelLoader::load("does/not/exist.json").unwrap_err();
        assert!(matches!(err, CardioError::ModelLoadError { .. }));
    }

    #[test]
    fn test_corrupt_file_is_load_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"\x80\x04\x95 not json").unwrap();

        let err = ModelLoader::load(temp_file.path()).unwrap_err();
        match err {
            CardioError::ModelLoadError { message, .. } => assert!(message.contains("corrupt")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_model_keeps_its_error() {
        let broken = ARTIFACT.replace("\"age\", \"gender\"", "\"gender\", \"age\"");
        let err = ModelLoader::from_slice(broken.as_bytes()).unwrap_err();
        assert!(matches!(err, CardioError::InvalidModelError { .. }));
    }
}
