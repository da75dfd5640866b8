// writing-backend/src/domain/ai_generation_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, Set};
use serde::{Deserialize, Serialize};

/// AI生成履歴
///
/// `metadata` はプロバイダー側が書き込む自由形式のJSONで、`tokens_in` /
/// `tokens_out` が入っていることも、欠落していることもある。
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ai_generations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub persona: String,
    #[sea_orm(column_type = "Text")]
    pub prompt: String,
    #[sea_orm(nullable)]
    pub metadata: Option<Json>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::project_model::Entity",
        from = "Column::ProjectId",
        to = "crate::domain::project_model::Column::Id"
    )]
    Project,
}

impl Related<crate::domain::project_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

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
    /// metadataからトークン数を読む。欠落・型違いは0として扱う。
    pub fn token_count(&self, key: &str) -> i64 {
        self.metadata
            .as_ref()
            .and_then(|m| m.get(key))
            .and_then(|v| v.as_i64())
            .unwrap_or(0)
    }

    pub fn total_tokens(&self) -> i64 {
        self.token_count("tokens_in") + self.token_count("tokens_out")
    }
}
