//! `SeaORM` Entity for staff_profile table
//!
//! A staff member with a non-null `hod_course_id` is the HOD of that course.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "staff_profile"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub staff_id: Uuid,
    pub designation: Option<String>,
    pub joining_date: Option<Date>,
    pub hod_course_id: Option<Uuid>,
    pub gender: Option<String>,
    pub birth_date: Option<Date>,
    pub temporary_address: Option<String>,
    pub permanent_address: Option<String>,
    pub image_path: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    StaffId,
    Designation,
    JoiningDate,
    HodCourseId,
    Gender,
    BirthDate,
    TemporaryAddress,
    PermanentAddress,
    ImagePath,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    StaffId,
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
    HodCourse,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::StaffId => ColumnType::Uuid.def(),
            Self::Designation => ColumnType::String(StringLen::None).def().null(),
            Self::JoiningDate => ColumnType::Date.def().null(),
            Self::HodCourseId => ColumnType::Uuid.def().null(),
            Self::Gender => ColumnType::String(StringLen::None).def().null(),
            Self::BirthDate => ColumnType::Date.def().null(),
            Self::TemporaryAddress => ColumnType::String(StringLen::None).def().null(),
            Self::PermanentAddress => ColumnType::String(StringLen::None).def().null(),
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
                .from(Column::StaffId)
                .to(super::principal::Column::PrincipalId)
                .into(),
            Self::HodCourse => Entity::belongs_to(super::course::Entity)
                .from(Column::HodCourseId)
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
        Relation::HodCourse.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
