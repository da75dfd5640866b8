// writing-backend/src/repository/user_repository.rs

use crate::db::DbPool;
use crate::domain::user_model::{Column, Entity, Model};
use crate::error::AppResult;
use sea_orm::*;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Clone)]
pub struct UserRepository {
    db: DbPool,
}

impl UserRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// 表示名解決用にユーザーをまとめて取得
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<HashMap<Uuid, Model>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let users = Entity::find()
            .filter(Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await?;

        Ok(users.into_iter().map(|u| (u.id, u)).collect())
    }
}
