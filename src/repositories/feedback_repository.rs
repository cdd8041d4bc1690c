use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::feedback;
use crate::entities::sea_orm_active_enums::{FeedbackTarget, FeedbackType};
use crate::error::ServiceError;
use crate::repositories::StudentRepository;
use crate::static_service::DATABASE_CONNECTION;

/// Ratings live on the half-star grid 0.5..=5.0. Anything else is rejected.
pub fn rating_to_half_steps(rating: f64) -> Result<i32, ServiceError> {
    let doubled = rating * 2.0;
    if doubled.fract() != 0.0 {
        return Err(ServiceError::InvalidRating);
    }
    let steps = doubled as i32;
    if !(1..=10).contains(&steps) {
        return Err(ServiceError::InvalidRating);
    }
    Ok(steps)
}

pub struct FeedbackRepository;

impl FeedbackRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    /// Student -> teacher, upsert keyed by (student, teacher).
    pub async fn upsert_teacher_feedback(
        &self,
        student_id: Uuid,
        teacher_id: Uuid,
        rating: f64,
        feedback_text: String,
        is_anonymous: bool,
    ) -> Result<feedback::Model, ServiceError> {
        let half_steps = rating_to_half_steps(rating)?;
        let db = self.get_connection();

        let existing = feedback::Entity::find()
            .filter(feedback::Column::ActorId.eq(student_id))
            .filter(feedback::Column::TargetKind.eq(FeedbackTarget::Teacher))
            .filter(feedback::Column::TeacherId.eq(teacher_id))
            .filter(feedback::Column::StudentId.is_null())
            .one(db)
            .await?;

        self.write(
            existing,
            student_id,
            FeedbackTarget::Teacher,
            Some(teacher_id),
            None,
            None,
            FeedbackType::Teaching,
            half_steps,
            feedback_text,
            is_anonymous,
        )
        .await
    }

    /// Parent -> teacher about a linked student, upsert keyed by
    /// (parent, teacher, student). The parent-student link is the
    /// authorization boundary.
    pub async fn upsert_parent_feedback(
        &self,
        parent_id: Uuid,
        teacher_id: Uuid,
        student_id: Uuid,
        rating: f64,
        feedback_text: String,
        is_anonymous: bool,
    ) -> Result<feedback::Model, ServiceError> {
        let half_steps = rating_to_half_steps(rating)?;

        let linked = StudentRepository::new()
            .is_parent_of(parent_id, student_id)
            .await?;
        if !linked {
            return Err(ServiceError::PermissionDenied);
        }

        let db = self.get_connection();
        let existing = feedback::Entity::find()
            .filter(feedback::Column::ActorId.eq(parent_id))
            .filter(feedback::Column::TargetKind.eq(FeedbackTarget::Teacher))
            .filter(feedback::Column::TeacherId.eq(teacher_id))
            .filter(feedback::Column::StudentId.eq(student_id))
            .one(db)
            .await?;

        self.write(
            existing,
            parent_id,
            FeedbackTarget::Teacher,
            Some(teacher_id),
            None,
            Some(student_id),
            FeedbackType::Teaching,
            half_steps,
            feedback_text,
            is_anonymous,
        )
        .await
    }

    /// Any role -> institute, upsert keyed by (actor, institute, type).
    pub async fn upsert_institute_feedback(
        &self,
        actor_id: Uuid,
        institute_id: Uuid,
        feedback_type: FeedbackType,
        rating: f64,
        feedback_text: String,
        is_anonymous: bool,
    ) -> Result<feedback::Model, ServiceError> {
        let half_steps = rating_to_half_steps(rating)?;
        let db = self.get_connection();

        let existing = feedback::Entity::find()
            .filter(feedback::Column::ActorId.eq(actor_id))
            .filter(feedback::Column::TargetKind.eq(FeedbackTarget::Institute))
            .filter(feedback::Column::InstituteId.eq(institute_id))
            .filter(feedback::Column::FeedbackType.eq(feedback_type))
            .one(db)
            .await?;

        self.write(
            existing,
            actor_id,
            FeedbackTarget::Institute,
            None,
            Some(institute_id),
            None,
            feedback_type,
            half_steps,
            feedback_text,
            is_anonymous,
        )
        .await
    }

    #[allow(clippy::too_many_arguments)]
    async fn write(
        &self,
        existing: Option<feedback::Model>,
        actor_id: Uuid,
        target_kind: FeedbackTarget,
        teacher_id: Option<Uuid>,
        institute_id: Option<Uuid>,
        student_id: Option<Uuid>,
        feedback_type: FeedbackType,
        rating_half_steps: i32,
        feedback_text: String,
        is_anonymous: bool,
    ) -> Result<feedback::Model, ServiceError> {
        let db = self.get_connection();
        let now = Utc::now().naive_utc();

        let result = match existing {
            // Updates overwrite rating, text and anonymity atomically.
            Some(row) => {
                let mut model: feedback::ActiveModel = row.into();
                model.rating_half_steps = Set(rating_half_steps);
                model.feedback_text = Set(feedback_text);
                model.is_anonymous = Set(is_anonymous);
                model.updated_at = Set(now);
                model.update(db).await?
            }
            None => {
                let model = feedback::ActiveModel {
                    feedback_id: Set(Uuid::new_v4()),
                    actor_id: Set(actor_id),
                    target_kind: Set(target_kind),
                    teacher_id: Set(teacher_id),
                    institute_id: Set(institute_id),
                    student_id: Set(student_id),
                    feedback_type: Set(feedback_type),
                    rating_half_steps: Set(rating_half_steps),
                    feedback_text: Set(feedback_text),
                    is_anonymous: Set(is_anonymous),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                model.insert(db).await?
            }
        };

        Ok(result)
    }

    pub async fn find_for_teacher(&self, teacher_id: Uuid) -> Result<Vec<feedback::Model>> {
        let db = self.get_connection();
        let rows = feedback::Entity::find()
            .filter(feedback::Column::TargetKind.eq(FeedbackTarget::Teacher))
            .filter(feedback::Column::TeacherId.eq(teacher_id))
            .order_by_desc(feedback::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(rows)
    }

    pub async fn find_for_institute(&self, institute_id: Uuid) -> Result<Vec<feedback::Model>> {
        let db = self.get_connection();
        let rows = feedback::Entity::find()
            .filter(feedback::Column::TargetKind.eq(FeedbackTarget::Institute))
            .filter(feedback::Column::InstituteId.eq(institute_id))
            .order_by_desc(feedback::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_star_grid_is_enforced() {
        assert_eq!(rating_to_half_steps(0.5).unwrap(), 1);
        assert_eq!(rating_to_half_steps(4.0).unwrap(), 8);
        assert_eq!(rating_to_half_steps(5.0).unwrap(), 10);

        assert!(rating_to_half_steps(3.7).is_err());
        assert!(rating_to_half_steps(0.0).is_err());
        assert!(rating_to_half_steps(5.5).is_err());
        assert!(rating_to_half_steps(-1.0).is_err());
    }
}
