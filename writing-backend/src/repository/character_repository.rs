// writing-backend/src/repository/character_repository.rs

use crate::db::DbPool;
use crate::domain::character_model::{Column, Entity};
use crate::error::AppResult;
use sea_orm::*;
use uuid::Uuid;

#[derive(Clone)]
pub struct CharacterRepository {
    db: DbPool,
}

impl CharacterRepository {
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
}
