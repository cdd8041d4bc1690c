//! `SeaORM` Entity for attendance_session table
//!
//! One row per (routine, date), created lazily on the first submission.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "attendance_session"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub session_id: Uuid,
    pub routine_id: Uuid,
    pub date: Date,
    pub teacher_id: Uuid,
    pub teacher_attended: bool,
    pub class_held: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    SessionId,
    RoutineId,
    Date,
    TeacherId,
    TeacherAttended,
    ClassHeld,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    SessionId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Routine,
    Teacher,
    AttendanceRecord,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::SessionId => ColumnType::Uuid.def(),
            Self::RoutineId => ColumnType::Uuid.def(),
            Self::Date => ColumnType::Date.def(),
            Self::TeacherId => ColumnType::Uuid.def(),
            Self::TeacherAttended => ColumnType::Boolean.def(),
            Self::ClassHeld => ColumnType::Boolean.def(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Routine => Entity::belongs_to(super::routine::Entity)
                .from(Column::RoutineId)
                .to(super::routine::Column::RoutineId)
                .into(),
            Self::Teacher => Entity::belongs_to(super::staff_profile::Entity)
                .from(Column::TeacherId)
                .to(super::staff_profile::Column::StaffId)
                .into(),
            Self::AttendanceRecord => Entity::has_many(super::attendance_record::Entity).into(),
        }
    }
}

impl Related<super::routine::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Routine.def()
    }
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
