// writing-backend/src/domain/project_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, Set};
use serde::{Deserialize, Serialize};

/// 執筆プロジェクト
///
/// `kdp_keywords` / `kdp_categories` はKDP出版パイプラインが書き込むJSON配列で、
/// 本クレートからは読み取り専用。
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub word_count_target: i32,
    pub word_count_current: i32,
    pub publication_status: String,
    #[sea_orm(nullable)]
    pub cover_asset_id: Option<Uuid>,
    #[sea_orm(column_type = "Text", nullable)]
    pub active_blurb: Option<String>,
    #[sea_orm(nullable)]
    pub kdp_keywords: Option<Json>,
    #[sea_orm(nullable)]
    pub kdp_categories: Option<Json>,
    #[sea_orm(nullable)]
    pub list_price_cents: Option<i32>,
    #[sea_orm(nullable)]
    pub launch_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::user_model::Entity",
        from = "Column::OwnerId",
        to = "crate::domain::user_model::Column::Id"
    )]
    Owner,
}

impl Related<crate::domain::user_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
            ..ActiveModelTrait::default()
        }
    }
}

impl Model {
    pub fn is_published(&self) -> bool {
        self.publication_status == "published"
    }
}
