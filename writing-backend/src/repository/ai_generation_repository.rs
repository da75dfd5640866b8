// writing-backend/src/repository/ai_generation_repository.rs

use crate::db::DbPool;
use crate::domain::ai_generation_model::{Column, Entity, Model};
use crate::error::AppResult;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::*;
use uuid::Uuid;

#[derive(Clone)]
pub struct AiGenerationRepository {
    db: DbPool,
}

impl AiGenerationRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn count_for_project(&self, project_id: Uuid) -> AppResult<u64> {
        let count = Entity::find()
            .filter(Column::ProjectId.eq(project_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    /// ペルソナ別の生成回数
    pub async fn persona_counts(&self, project_id: Uuid) -> AppResult<Vec<(String, i64)>> {
        #[derive(Debug, FromQueryResult)]
        struct PersonaCount {
            persona: String,
            count: i64,
        }

        let results = Entity::find()
            .select_only()
            .column(Column::Persona)
            .column_as(Expr::col(Column::Id).count(), "count")
            .filter(Column::ProjectId.eq(project_id))
            .group_by(Column::Persona)
            .into_model::<PersonaCount>()
            .all(&self.db)
            .await?;

        Ok(results.into_iter().map(|r| (r.persona, r.count)).collect())
    }

    pub async fn find_recent(&self, project_id: Uuid, limit: u64) -> AppResult<Vec<Model>> {
        let generations = Entity::find()
            .filter(Column::ProjectId.eq(project_id))
            .order_by_desc(Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(generations)
    }

    pub async fn find_created_since(
        &self,
        project_id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> AppResult<Vec<Model>> {
        let generations = Entity::find()
            .filter(Column::ProjectId.eq(project_id))
            .filter(Column::CreatedAt.gte(cutoff))
            .all(&self.db)
            .await?;
        Ok(generations)
    }
}
