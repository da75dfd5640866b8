// writing-backend/src/repository/document_version_repository.rs

use crate::db::DbPool;
use crate::domain::document_version_model::{Column, Entity};
use crate::error::AppResult;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::*;
use uuid::Uuid;

#[derive(Clone)]
pub struct DocumentVersionRepository {
    db: DbPool,
}

impl DocumentVersionRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// バージョンが保存されたカレンダー日付（UTC）を返す
    pub async fn created_dates(&self, project_id: Uuid) -> AppResult<Vec<NaiveDate>> {
        #[derive(Debug, FromQueryResult)]
        struct CreatedAt {
            created_at: DateTime<Utc>,
        }

        let rows = Entity::find()
            .select_only()
            .column(Column::CreatedAt)
            .filter(Column::ProjectId.eq(project_id))
            .into_model::<CreatedAt>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(|r| r.created_at.date_naive()).collect())
    }
}
