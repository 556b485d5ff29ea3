use crate::core::loader::ModelLoader;
use crate::core::pipeline::{FittedPipeline, ModelInfo};
use crate::core::predictor::PredictionService;
use crate::domain::model::{PatientRecord, PredictionResponse};
use crate::domain::ports::{ConfigProvider, Scorer};
use crate::utils::error::{CardioError, Result};
use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub const HEALTH_MESSAGE: &str = "Cardio Prediction API is running";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Shared, read-only handler state built once at startup.
#[derive(Clone)]
pub struct AppState {
    service: PredictionService,
    model_info: Arc<ModelInfo>,
}

impl AppState {
    pub fn new(scorer: Arc<dyn Scorer>, model_info: ModelInfo) -> Self {
        Self {
            service: PredictionService::new(scorer),
            model_info: Arc::new(model_info),
        }
    }

    pub fn from_pipeline(pipeline: FittedPipeline) -> Self {
        let info = pipeline.info().clone();
        Self::new(Arc::new(pipeline), info)
    }
}

pub fn router(state: AppState, allow_credentials: bool) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/predict", post(predict))
        .route("/model", get(model_info))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allow_credentials))
        .with_state(state)
}

/// 載入模型並組出路由；模型無法載入時回傳錯誤，服務不應啟動
pub fn app_from_config<C: ConfigProvider>(config: &C) -> Result<Router> {
    let pipeline = ModelLoader::load(config.model_path())?;
    Ok(router(
        AppState::from_pipeline(pipeline),
        config.allow_credentials(),
    ))
}

/// Any origin, method and header. A wildcard cannot be combined with
/// credentials, so with credentials on the request values are echoed back.
pub fn cors_layer(allow_credentials: bool) -> CorsLayer {
    if allow_credentials {
        CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true)
    } else {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CardioError::ServerError {
            message: e.to_string(),
        })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("🛑 Shutdown signal received");
}

async fn home() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: HEALTH_MESSAGE.to_string(),
    })
}

async fn predict(
    State(state): State<AppState>,
    payload: std::result::Result<Json<PatientRecord>, JsonRejection>,
) -> std::result::Result<Json<PredictionResponse>, CardioError> {
    let Json(record) = payload?;
    state.service.predict(&record).map(Json)
}

async fn model_info(State(state): State<AppState>) -> Json<ModelInfo> {
    Json(state.model_info.as_ref().clone())
}

/// 語法錯誤、缺少 content-type、欄位缺漏或型別不符一律視為驗證失敗
impl From<JsonRejection> for CardioError {
    fn from(rejection: JsonRejection) -> Self {
        CardioError::ValidationError {
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for CardioError {
    fn into_response(self) -> Response {
        let status = match &self {
            CardioError::ValidationError { .. } => {
                // 不記錄內容，訊息可能含有病患數值
                tracing::debug!("Rejected invalid patient record");
                StatusCode::UNPROCESSABLE_ENTITY
            }
            _ => {
                tracing::error!(
                    "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
                    self,
                    self.category(),
                    self.severity()
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorResponse {
            detail: self.user_friendly_message(),
        };
        (status, Json(body)).into_response()
    }
}
