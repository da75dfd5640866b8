// writing-backend/src/repository/project_collaborator_repository.rs

use crate::db::DbPool;
use crate::domain::project_collaborator_model::{Column, Entity};
use crate::error::AppResult;
use sea_orm::*;
use uuid::Uuid;

#[derive(Clone)]
pub struct ProjectCollaboratorRepository {
    db: DbPool,
}

impl ProjectCollaboratorRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// メンバーシップが存在するか
    pub async fn membership_exists(&self, project_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let count = Entity::find()
            .filter(Column::ProjectId.eq(project_id))
            .filter(Column::UserId.eq(user_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    pub async fn count_for_project(&self, project_id: Uuid) -> AppResult<u64> {
        let count = Entity::find()
            .filter(Column::ProjectId.eq(project_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}
