//! User database entity for SeaORM.

use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use domain::User;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique, indexed)]
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTimeUtc,
    pub last_updated_at: DateTimeUtc,
    /// Disable timestamp (NULL = active, set = disabled)
    pub disabled_at: Option<DateTimeUtc>,
    /// Not unique; only the primary key and email are constrained
    pub api_key: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// Fresh identifiers and creation-time timestamps for a new row.
    fn new() -> Self {
        let now = chrono::Utc::now();
        Self {
            id: Set(Uuid::new_v4()),
            email: NotSet,
            password: NotSet,
            first_name: NotSet,
            last_name: NotSet,
            created_at: Set(now),
            last_updated_at: Set(now),
            disabled_at: Set(None),
            api_key: Set(Uuid::new_v4()),
        }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            self.last_updated_at = Set(chrono::Utc::now());
        }
        Ok(self)
    }
}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            email: model.email,
            password: model.password,
            first_name: model.first_name,
            last_name: model.last_name,
            created_at: model.created_at,
            last_updated_at: model.last_updated_at,
            disabled_at: model.disabled_at,
            api_key: model.api_key,
        }
    }
}
