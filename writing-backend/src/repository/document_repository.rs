// writing-backend/src/repository/document_repository.rs

use crate::db::DbPool;
use crate::domain::document_model::{Column, Entity, Model};
use crate::error::AppResult;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::*;
use uuid::Uuid;

#[derive(Clone)]
pub struct DocumentRepository {
    db: DbPool,
}

impl DocumentRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, document_id: Uuid) -> AppResult<Option<Model>> {
        let document = Entity::find_by_id(document_id).one(&self.db).await?;
        Ok(document)
    }

    pub async fn count_for_project(&self, project_id: Uuid) -> AppResult<u64> {
        let count = Entity::find()
            .filter(Column::ProjectId.eq(project_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    /// プロジェクト全体の語数合計。ドキュメントが無ければ0。
    pub async fn sum_word_count(&self, project_id: Uuid) -> AppResult<i64> {
        #[derive(Debug, FromQueryResult)]
        struct WordTotal {
            total: Option<i64>,
        }

        let result = Entity::find()
            .select_only()
            .column_as(Expr::col(Column::WordCount).sum(), "total")
            .filter(Column::ProjectId.eq(project_id))
            .into_model::<WordTotal>()
            .one(&self.db)
            .await?;

        Ok(result.and_then(|r| r.total).unwrap_or(0))
    }

    /// ドキュメントが更新されたカレンダー日付（UTC）を返す
    pub async fn updated_dates(&self, project_id: Uuid) -> AppResult<Vec<NaiveDate>> {
        #[derive(Debug, FromQueryResult)]
        struct UpdatedAt {
            updated_at: DateTime<Utc>,
        }

        let rows = Entity::find()
            .select_only()
            .column(Column::UpdatedAt)
            .filter(Column::ProjectId.eq(project_id))
            .into_model::<UpdatedAt>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(|r| r.updated_at.date_naive()).collect())
    }
}
