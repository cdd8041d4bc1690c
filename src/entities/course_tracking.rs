//! `SeaORM` Entity for course_tracking table
//!
//! Per-(student, course) progress record. `current_period` mirrors
//! `student_profile.current_period` while the tracking is In Progress.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ProgressStatus;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "course_tracking"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub tracking_id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub enrollment_date: Date,
    pub start_date: Date,
    pub expected_end_date: Date,
    pub actual_end_date: Option<Date>,
    pub current_period: i32,
    pub period_start_date: Date,
    pub period_end_date: Date,
    pub completion_percentage: i32,
    pub progress_status: ProgressStatus,
    pub notes: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    TrackingId,
    StudentId,
    CourseId,
    EnrollmentDate,
    StartDate,
    ExpectedEndDate,
    ActualEndDate,
    CurrentPeriod,
    PeriodStartDate,
    PeriodEndDate,
    CompletionPercentage,
    ProgressStatus,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    TrackingId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Student,
    Course,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::TrackingId => ColumnType::Uuid.def(),
            Self::StudentId => ColumnType::Uuid.def(),
            Self::CourseId => ColumnType::Uuid.def(),
            Self::EnrollmentDate => ColumnType::Date.def(),
            Self::StartDate => ColumnType::Date.def(),
            Self::ExpectedEndDate => ColumnType::Date.def(),
            Self::ActualEndDate => ColumnType::Date.def().null(),
            Self::CurrentPeriod => ColumnType::Integer.def(),
            Self::PeriodStartDate => ColumnType::Date.def(),
            Self::PeriodEndDate => ColumnType::Date.def(),
            Self::CompletionPercentage => ColumnType::Integer.def(),
            Self::ProgressStatus => ProgressStatus::db_type(),
            Self::Notes => ColumnType::Text.def().null(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Student => Entity::belongs_to(super::student_profile::Entity)
                .from(Column::StudentId)
                .to(super::student_profile::Column::StudentId)
                .into(),
            Self::Course => Entity::belongs_to(super::course::Entity)
                .from(Column::CourseId)
                .to(super::course::Column::CourseId)
                .into(),
        }
    }
}

impl Related<super::student_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
