// writing-backend/src/api/handlers/writing_handler.rs

use crate::api::dto::common::ApiResponse;
use crate::api::dto::writing_dto::{
    ActivityLogResponse, EndWritingSessionRequest, LogActivityRequest, StartWritingSessionRequest,
    WritingSessionResponse,
};
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::utils::error_helper::convert_validation_errors;
use axum::{
    extract::{Json, Path, State},
    routing::post,
    Router,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// 執筆セッションを開始
pub async fn start_writing_session_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(project_id): Path<Uuid>,
    Json(payload): Json<StartWritingSessionRequest>,
) -> AppResult<Json<ApiResponse<WritingSessionResponse>>> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "writing_handler::start_session"))?;

    let session = app_state
        .writing_session_service
        .start_session(project_id, user.user_id(), payload.document_id)
        .await?;

    Ok(Json(ApiResponse::success(
        "Writing session started",
        session.into(),
    )))
}

/// 執筆セッションを終了して結果を確定
pub async fn end_writing_session_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<EndWritingSessionRequest>,
) -> AppResult<Json<ApiResponse<WritingSessionResponse>>> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "writing_handler::end_session"))?;

    let session = app_state
        .writing_session_service
        .end_session(
            session_id,
            user.user_id(),
            payload.words_written,
            payload.duration_minutes,
        )
        .await?;

    info!(
        session_id = %session_id,
        user_id = %user.user_id(),
        words_written = payload.words_written,
        "Writing session finalized"
    );

    Ok(Json(ApiResponse::success(
        "Writing session ended",
        session.into(),
    )))
}

/// アクティビティを記録
pub async fn log_activity_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(project_id): Path<Uuid>,
    Json(payload): Json<LogActivityRequest>,
) -> AppResult<Json<ApiResponse<ActivityLogResponse>>> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "writing_handler::log_activity"))?;

    let log = app_state
        .activity_log_service
        .log_activity(
            project_id,
            user.user_id(),
            payload.action,
            payload.entity_type,
            payload.entity_id,
            payload.details,
        )
        .await?;

    Ok(Json(ApiResponse::success("Activity logged", log.into())))
}

// --- ルーター ---

/// 執筆セッション・アクティビティのルーターを作成
pub fn writing_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/projects/{project_id}/sessions",
            post(start_writing_session_handler),
        )
        .route("/sessions/{session_id}/end", post(end_writing_session_handler))
        .route("/projects/{project_id}/activity", post(log_activity_handler))
        .with_state(app_state)
}
