//! `SeaORM` Entity for course table
//!
//! `max_period` is `duration` for year-based courses and `2 * duration` for
//! semester-based ones; the helper lives on the model so callers never
//! re-derive it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::DurationUnit;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "course"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub course_id: Uuid,
    pub name: String,
    pub code: Option<String>,
    pub duration: i32,
    pub duration_unit: DurationUnit,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Model {
    pub fn max_period(&self) -> i32 {
        match self.duration_unit {
            DurationUnit::Year => self.duration,
            DurationUnit::Semester => self.duration * 2,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    CourseId,
    Name,
    Code,
    Duration,
    DurationUnit,
    Description,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    CourseId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Subject,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::CourseId => ColumnType::Uuid.def(),
            Self::Name => ColumnType::String(StringLen::None).def().unique(),
            Self::Code => ColumnType::String(StringLen::None).def().null(),
            Self::Duration => ColumnType::Integer.def(),
            Self::DurationUnit => DurationUnit::db_type(),
            Self::Description => ColumnType::Text.def().null(),
            Self::IsActive => ColumnType::Boolean.def(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Subject => Entity::has_many(super::subject::Entity).into(),
        }
    }
}

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
