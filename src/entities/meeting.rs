//! `SeaORM` Entity for meeting table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::MeetingStatus;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "meeting"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub meeting_id: Uuid,
    pub meeting_date: Date,
    pub meeting_time: Time,
    pub duration_minutes: i32,
    pub status: MeetingStatus,
    pub agenda: String,
    pub notes: String,
    pub is_online: bool,
    pub meeting_link: Option<String>,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    MeetingId,
    MeetingDate,
    MeetingTime,
    DurationMinutes,
    Status,
    Agenda,
    Notes,
    IsOnline,
    MeetingLink,
    CancellationReason,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    MeetingId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::MeetingId => ColumnType::Uuid.def(),
            Self::MeetingDate => ColumnType::Date.def(),
            Self::MeetingTime => ColumnType::Time.def(),
            Self::DurationMinutes => ColumnType::Integer.def(),
            Self::Status => MeetingStatus::db_type(),
            Self::Agenda => ColumnType::Text.def(),
            Self::Notes => ColumnType::Text.def(),
            Self::IsOnline => ColumnType::Boolean.def(),
            Self::MeetingLink => ColumnType::String(StringLen::None).def().null(),
            Self::CancellationReason => ColumnType::Text.def().null(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("No RelationDef")
    }
}

impl ActiveModelBehavior for ActiveModel {}
