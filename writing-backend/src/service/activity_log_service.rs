// writing-backend/src/service/activity_log_service.rs

use crate::db::DbPool;
use crate::domain::activity_log_model;
use crate::error::AppResult;
use crate::repository::activity_log_repository::ActivityLogRepository;
use crate::repository::project_collaborator_repository::ProjectCollaboratorRepository;
use crate::repository::project_repository::ProjectRepository;
use tracing::info;
use uuid::Uuid;

pub struct ActivityLogService {
    activity_logs: ActivityLogRepository,
    projects: ProjectRepository,
    collaborators: ProjectCollaboratorRepository,
}

impl ActivityLogService {
    pub fn new(db: DbPool) -> Self {
        Self {
            activity_logs: ActivityLogRepository::new(db.clone()),
            projects: ProjectRepository::new(db.clone()),
            collaborators: ProjectCollaboratorRepository::new(db),
        }
    }

    /// プロジェクトへのアクティビティを記録する
    pub async fn log_activity(
        &self,
        project_id: Uuid,
        user_id: Uuid,
        action: String,
        entity_type: String,
        entity_id: Option<Uuid>,
        details: Option<serde_json::Value>,
    ) -> AppResult<activity_log_model::Model> {
        super::ensure_project_access(&self.projects, &self.collaborators, project_id, user_id)
            .await?;

        let log = activity_log_model::Model::new(
            project_id,
            user_id,
            action,
            entity_type,
            entity_id,
            details,
        );
        let created = self.activity_logs.create(&log).await?;

        info!(
            project_id = %project_id,
            user_id = %user_id,
            action = %created.action,
            entity_type = %created.entity_type,
            "Activity logged"
        );

        Ok(created)
    }
}
