// writing-backend/src/repository/activity_log_repository.rs

use crate::db::DbPool;
use crate::domain::activity_log_model::{ActiveModel, Column, Entity, Model};
use crate::error::AppResult;
use chrono::{DateTime, Utc};
use sea_orm::*;
use uuid::Uuid;

#[derive(Clone)]
pub struct ActivityLogRepository {
    db: DbPool,
}

impl ActivityLogRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// アクティビティログを作成
    pub async fn create(&self, log: &Model) -> AppResult<Model> {
        let active_model = ActiveModel {
            id: Set(log.id),
            project_id: Set(log.project_id),
            user_id: Set(log.user_id),
            action: Set(log.action.clone()),
            entity_type: Set(log.entity_type.clone()),
            entity_id: Set(log.entity_id),
            details: Set(log.details.clone()),
            created_at: Set(log.created_at),
        };

        let result = active_model.insert(&self.db).await?;
        Ok(result)
    }

    /// プロジェクトの直近のアクティビティログ
    pub async fn find_recent(&self, project_id: Uuid, limit: u64) -> AppResult<Vec<Model>> {
        let logs = Entity::find()
            .filter(Column::ProjectId.eq(project_id))
            .order_by_desc(Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(logs)
    }

    /// 指定日時以降にログを残したユニークユーザー数
    pub async fn count_distinct_users_since(
        &self,
        project_id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> AppResult<u64> {
        let count = Entity::find()
            .filter(Column::ProjectId.eq(project_id))
            .filter(Column::CreatedAt.gte(cutoff))
            .select_only()
            .column(Column::UserId)
            .distinct()
            .count(&self.db)
            .await?;
        Ok(count)
    }
}
