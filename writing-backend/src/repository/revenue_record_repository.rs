// writing-backend/src/repository/revenue_record_repository.rs

use crate::db::DbPool;
use crate::domain::revenue_record_model::{Column, Entity, Model};
use crate::error::AppResult;
use sea_orm::*;
use uuid::Uuid;

#[derive(Clone)]
pub struct RevenueRecordRepository {
    db: DbPool,
}

impl RevenueRecordRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn find_for_project(&self, project_id: Uuid) -> AppResult<Vec<Model>> {
        let records = Entity::find()
            .filter(Column::ProjectId.eq(project_id))
            .order_by_asc(Column::TransactionDate)
            .all(&self.db)
            .await?;
        Ok(records)
    }
}
