// writing-backend/src/repository/writing_session_repository.rs

use crate::db::DbPool;
use crate::domain::writing_session_model::{ActiveModel, Column, Entity, Model};
use crate::error::AppResult;
use chrono::{DateTime, Utc};
use sea_orm::*;
use uuid::Uuid;

#[derive(Clone)]
pub struct WritingSessionRepository {
    db: DbPool,
}

impl WritingSessionRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// セッション開始レコードを作成
    pub async fn create(&self, session: &Model) -> AppResult<Model> {
        let active_model = ActiveModel {
            id: Set(session.id),
            project_id: Set(session.project_id),
            user_id: Set(session.user_id),
            document_id: Set(session.document_id),
            words_written: Set(session.words_written),
            duration_minutes: Set(session.duration_minutes),
            start_time: Set(session.start_time),
            end_time: Set(session.end_time),
            created_at: Set(session.created_at),
        };

        let result = active_model.insert(&self.db).await?;
        Ok(result)
    }

    pub async fn find_by_id(&self, session_id: Uuid) -> AppResult<Option<Model>> {
        let session = Entity::find_by_id(session_id).one(&self.db).await?;
        Ok(session)
    }

    /// セッションを確定する（一度だけ呼ばれる想定）
    pub async fn finalize(
        &self,
        session: Model,
        words_written: i32,
        duration_minutes: i32,
        end_time: DateTime<Utc>,
    ) -> AppResult<Model> {
        let mut active_model = session.into_active_model();
        active_model.words_written = Set(words_written);
        active_model.duration_minutes = Set(duration_minutes);
        active_model.end_time = Set(Some(end_time));

        let result = active_model.update(&self.db).await?;
        Ok(result)
    }

    pub async fn find_for_project(&self, project_id: Uuid) -> AppResult<Vec<Model>> {
        let sessions = Entity::find()
            .filter(Column::ProjectId.eq(project_id))
            .all(&self.db)
            .await?;
        Ok(sessions)
    }

    pub async fn find_created_since(
        &self,
        project_id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> AppResult<Vec<Model>> {
        let sessions = Entity::find()
            .filter(Column::ProjectId.eq(project_id))
            .filter(Column::CreatedAt.gte(cutoff))
            .all(&self.db)
            .await?;
        Ok(sessions)
    }
}
