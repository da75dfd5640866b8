// writing-backend/src/service/mod.rs

pub mod activity_log_service;
pub mod analytics_service;
pub mod publishing;
pub mod writing_session_service;
pub mod writing_stats;

use crate::error::{AppError, AppResult};
use crate::repository::project_collaborator_repository::ProjectCollaboratorRepository;
use crate::repository::project_repository::ProjectRepository;
use tracing::warn;
use uuid::Uuid;

/// オーナーまたはコラボレーターであることを確認する共通ガード。
/// プロジェクトの存在有無は漏らさない。
pub(crate) async fn ensure_project_access(
    projects: &ProjectRepository,
    collaborators: &ProjectCollaboratorRepository,
    project_id: Uuid,
    user_id: Uuid,
) -> AppResult<()> {
    if projects.find_owned(project_id, user_id).await?.is_some() {
        return Ok(());
    }

    if collaborators.membership_exists(project_id, user_id).await? {
        return Ok(());
    }

    warn!(
        project_id = %project_id,
        user_id = %user_id,
        "Access denied: project operation requested by non-member"
    );
    Err(AppError::Forbidden("Access denied to project".to_string()))
}
