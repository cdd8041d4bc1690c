//! `SeaORM` Entity for feedback table
//!
//! One table for all feedback shapes: student→teacher, parent→teacher (with
//! student context) and any role→institute. The anonymity flag only affects
//! display; the actor foreign key is always kept.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{FeedbackTarget, FeedbackType};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "feedback"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub feedback_id: Uuid,
    pub actor_id: Uuid,
    pub target_kind: FeedbackTarget,
    pub teacher_id: Option<Uuid>,
    pub institute_id: Option<Uuid>,
    pub student_id: Option<Uuid>,
    pub feedback_type: FeedbackType,
    /// Stored in half-star steps: 1..=10 maps to 0.5..=5.0.
    pub rating_half_steps: i32,
    pub feedback_text: String,
    pub is_anonymous: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Model {
    pub fn rating(&self) -> f64 {
        f64::from(self.rating_half_steps) / 2.0
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    FeedbackId,
    ActorId,
    TargetKind,
    TeacherId,
    InstituteId,
    StudentId,
    FeedbackType,
    RatingHalfSteps,
    FeedbackText,
    IsAnonymous,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    FeedbackId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Actor,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::FeedbackId => ColumnType::Uuid.def(),
            Self::ActorId => ColumnType::Uuid.def(),
            Self::TargetKind => FeedbackTarget::db_type(),
            Self::TeacherId => ColumnType::Uuid.def().null(),
            Self::InstituteId => ColumnType::Uuid.def().null(),
            Self::StudentId => ColumnType::Uuid.def().null(),
            Self::FeedbackType => FeedbackType::db_type(),
            Self::RatingHalfSteps => ColumnType::Integer.def(),
            Self::FeedbackText => ColumnType::Text.def(),
            Self::IsAnonymous => ColumnType::Boolean.def(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Actor => Entity::belongs_to(super::principal::Entity)
                .from(Column::ActorId)
                .to(super::principal::Column::PrincipalId)
                .into(),
        }
    }
}

impl Related<super::principal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Actor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
