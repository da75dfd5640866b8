// writing-backend/src/repository/project_repository.rs

use crate::db::DbPool;
use crate::domain::project_model::{Column, Entity, Model};
use crate::error::AppResult;
use sea_orm::*;
use uuid::Uuid;

#[derive(Clone)]
pub struct ProjectRepository {
    db: DbPool,
}

impl ProjectRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, project_id: Uuid) -> AppResult<Option<Model>> {
        let project = Entity::find_by_id(project_id).one(&self.db).await?;
        Ok(project)
    }

    /// 指定ユーザーがオーナーであるプロジェクトとして取得
    pub async fn find_owned(&self, project_id: Uuid, owner_id: Uuid) -> AppResult<Option<Model>> {
        let project = Entity::find_by_id(project_id)
            .filter(Column::OwnerId.eq(owner_id))
            .one(&self.db)
            .await?;
        Ok(project)
    }
}
