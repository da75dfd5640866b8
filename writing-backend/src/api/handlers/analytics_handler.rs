// writing-backend/src/api/handlers/analytics_handler.rs

use crate::api::dto::analytics_dto::ProjectAnalyticsResponse;
use crate::api::dto::common::ApiResponse;
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use axum::{
    extract::{Json, Path, State},
    routing::get,
    Router,
};
use tracing::info;
use uuid::Uuid;

/// プロジェクトのアナリティクススナップショットを取得
pub async fn get_project_analytics_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(project_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ProjectAnalyticsResponse>>> {
    info!(
        project_id = %project_id,
        user_id = %user.user_id(),
        "Project analytics requested"
    );

    let snapshot = app_state
        .analytics_service
        .get_project_analytics(project_id, user.user_id())
        .await?;

    Ok(Json(ApiResponse::success(
        "Project analytics retrieved successfully",
        snapshot,
    )))
}

// --- ルーター ---

/// アナリティクスルーターを作成
pub fn analytics_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/projects/{project_id}/analytics",
            get(get_project_analytics_handler),
        )
        .with_state(app_state)
}
