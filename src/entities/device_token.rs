//! `SeaORM` Entity for device_token table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::DeviceUserType;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "device_token"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub device_id: Uuid,
    pub token: String,
    pub principal_id: Option<Uuid>,
    pub user_type: DeviceUserType,
    pub is_active: bool,
    /// Tokens with a recognised non-deliverable prefix; counted, never sent.
    pub is_fallback: bool,
    pub last_active: DateTime,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    DeviceId,
    Token,
    PrincipalId,
    UserType,
    IsActive,
    IsFallback,
    LastActive,
    CreatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    DeviceId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Principal,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::DeviceId => ColumnType::Uuid.def(),
            Self::Token => ColumnType::Text.def().unique(),
            Self::PrincipalId => ColumnType::Uuid.def().null(),
            Self::UserType => DeviceUserType::db_type(),
            Self::IsActive => ColumnType::Boolean.def(),
            Self::IsFallback => ColumnType::Boolean.def(),
            Self::LastActive => ColumnType::DateTime.def(),
            Self::CreatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Principal => Entity::belongs_to(super::principal::Entity)
                .from(Column::PrincipalId)
                .to(super::principal::Column::PrincipalId)
                .into(),
        }
    }
}

impl Related<super::principal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Principal.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
