//! `SeaORM` Entity for student_profile table
//!
//! 1:1 extension of principal for the student role. `current_period` is kept
//! in lockstep with the active course tracking row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::StudentStatus;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "student_profile"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub student_id: Uuid,
    pub course_id: Option<Uuid>,
    pub current_period: i32,
    pub status: StudentStatus,
    pub joining_date: Option<Date>,
    pub gender: Option<String>,
    pub birth_date: Option<Date>,
    pub temporary_address: Option<String>,
    pub permanent_address: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub image_path: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    StudentId,
    CourseId,
    CurrentPeriod,
    Status,
    JoiningDate,
    Gender,
    BirthDate,
    TemporaryAddress,
    PermanentAddress,
    ParentName,
    ParentPhone,
    ImagePath,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    StudentId,
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
    Course,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::StudentId => ColumnType::Uuid.def(),
            Self::CourseId => ColumnType::Uuid.def().null(),
            Self::CurrentPeriod => ColumnType::Integer.def(),
            Self::Status => StudentStatus::db_type(),
            Self::JoiningDate => ColumnType::Date.def().null(),
            Self::Gender => ColumnType::String(StringLen::None).def().null(),
            Self::BirthDate => ColumnType::Date.def().null(),
            Self::TemporaryAddress => ColumnType::String(StringLen::None).def().null(),
            Self::PermanentAddress => ColumnType::String(StringLen::None).def().null(),
            Self::ParentName => ColumnType::String(StringLen::None).def().null(),
            Self::ParentPhone => ColumnType::String(StringLen::None).def().null(),
            Self::ImagePath => ColumnType::String(StringLen::None).def().null(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Principal => Entity::belongs_to(super::principal::Entity)
                .from(Column::StudentId)
                .to(super::principal::Column::PrincipalId)
                .into(),
            Self::Course => Entity::belongs_to(super::course::Entity)
                .from(Column::CourseId)
                .to(super::course::Column::CourseId)
                .into(),
        }
    }
}

impl Related<super::principal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Principal.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
