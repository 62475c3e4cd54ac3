use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use crate::errors::AnalysisError;
use crate::models::{AnalysisOption, AnalysisOptions};
use crate::services::ResultView;
use crate::state::{HistoryEntry, HistoryId, SessionSnapshot, TextStats};
use crate::AppState;

#[derive(Deserialize)]
pub struct TextUpdate {
    pub text: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub version: String,
}

fn internal_error(e: AnalysisError) -> StatusCode {
    tracing::error!("Внутренняя ошибка сессии: {}", e);
    StatusCode::INTERNAL_SERVER_ERROR
}

fn result_error(e: AnalysisError) -> StatusCode {
    match e {
        AnalysisError::NoResult => StatusCode::NOT_FOUND,
        other => internal_error(other),
    }
}

// Проверка здоровья сервиса
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "Verifika analysis session is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn get_state(State(state): State<AppState>) -> Result<Json<SessionSnapshot>, StatusCode> {
    state.analysis.snapshot().await.map(Json).map_err(internal_error)
}

pub async fn update_text(
    State(state): State<AppState>,
    Json(req): Json<TextUpdate>,
) -> Result<Json<TextStats>, StatusCode> {
    state.analysis.set_text(req.text).await.map(Json).map_err(internal_error)
}

pub async fn toggle_option(
    State(state): State<AppState>,
    Path(option): Path<String>,
) -> Result<Json<AnalysisOptions>, StatusCode> {
    let option: AnalysisOption = option.parse().map_err(|e| {
        tracing::warn!("{}", e);
        StatusCode::BAD_REQUEST
    })?;
    state.analysis.toggle_option(option).await.map(Json).map_err(internal_error)
}

pub async fn clear_input(State(state): State<AppState>) -> Result<StatusCode, StatusCode> {
    state.analysis.clear_input().await.map_err(internal_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// Основной обработчик анализа текста
pub async fn analyze(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    match state.analysis.submit().await {
        Ok(result) => Ok(Json(json!({
            "status": "success",
            "result": result,
        }))),
        Err(AnalysisError::EmptyText) => {
            tracing::warn!("Попытка анализа пустого текста");
            Err(StatusCode::BAD_REQUEST)
        }
        Err(AnalysisError::RequestInFlight) => Err(StatusCode::CONFLICT),
        Err(AnalysisError::Superseded) => Ok(Json(json!({
            "status": "superseded",
            "message": AnalysisError::Superseded.to_string(),
        }))),
        Err(e) => match e.failure_kind() {
            Some(kind) => Ok(Json(json!({
                "status": "error",
                "message": e.user_message(),
                "error_type": kind,
            }))),
            None => Err(internal_error(e)),
        },
    }
}

pub async fn result_view(State(state): State<AppState>) -> Result<Json<ResultView>, StatusCode> {
    state.analysis.result_view().await.map(Json).map_err(result_error)
}

pub async fn copy_result(State(state): State<AppState>) -> Result<Response, StatusCode> {
    let text = state.analysis.copy_result().await.map_err(result_error)?;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text).into_response())
}

pub async fn list_history(State(state): State<AppState>) -> Result<Json<Vec<HistoryEntry>>, StatusCode> {
    state.analysis.history().await.map(Json).map_err(internal_error)
}

pub async fn get_history_entry(
    State(state): State<AppState>,
    Path(id): Path<HistoryId>,
) -> Result<Json<HistoryEntry>, StatusCode> {
    state
        .analysis
        .history_entry(id)
        .await
        .map_err(internal_error)?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn delete_history_entry(
    State(state): State<AppState>,
    Path(id): Path<HistoryId>,
) -> Result<StatusCode, StatusCode> {
    // Удаление отсутствующей записи ничего не меняет
    state.analysis.delete_entry(id).await.map_err(internal_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear_history(State(state): State<AppState>) -> Result<StatusCode, StatusCode> {
    state.analysis.clear_history().await.map_err(internal_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// Создание маршрутов
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/api/state", get(get_state))
        .route("/api/text", put(update_text))
        .route("/api/options/:option/toggle", post(toggle_option))
        .route("/api/clear", post(clear_input))
        .route("/api/analyze", post(analyze))
        .route("/api/result/view", get(result_view))
        .route("/api/result/copy", get(copy_result))
        .route("/api/history", get(list_history).delete(clear_history))
        .route(
            "/api/history/:id",
            get(get_history_entry).delete(delete_history_entry),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
