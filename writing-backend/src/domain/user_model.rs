// writing-backend/src/domain/user_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, Set};
use serde::{Deserialize, Serialize};

/// ユーザーディレクトリ（表示名の解決にのみ使用）
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(nullable)]
    pub display_name: Option<String>,
    #[sea_orm(unique)]
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            created_at: Set(Utc::now()),
            ..ActiveModelTrait::default()
        }
    }
}

impl Model {
    /// アクティビティフィードに表示する名前
    ///
    /// display_nameが空文字のレコードが実在するため、空はusernameへフォールバックする。
    pub fn visible_name(&self) -> Option<&str> {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => Some(name),
            _ if !self.username.trim().is_empty() => Some(&self.username),
            _ => None,
        }
    }
}
