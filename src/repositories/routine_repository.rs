use anyhow::Result;
use chrono::{NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{attendance_session, routine, staff_profile, subject};
use crate::error::ServiceError;
use crate::static_service::DATABASE_CONNECTION;

pub struct RoutineRepository;

impl RoutineRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_by_id(&self, routine_id: Uuid) -> Result<Option<routine::Model>> {
        let db = self.get_connection();
        let routine = routine::Entity::find_by_id(routine_id).one(db).await?;
        Ok(routine)
    }

    pub async fn find_active_by_teacher(&self, teacher_id: Uuid) -> Result<Vec<routine::Model>> {
        let db = self.get_connection();
        let routines = routine::Entity::find()
            .filter(routine::Column::TeacherId.eq(teacher_id))
            .filter(routine::Column::IsActive.eq(true))
            .order_by_asc(routine::Column::StartTime)
            .all(db)
            .await?;
        Ok(routines)
    }

    pub async fn find_by_course_and_period(
        &self,
        course_id: Uuid,
        period_index: i32,
    ) -> Result<Vec<routine::Model>> {
        let db = self.get_connection();
        let routines = routine::Entity::find()
            .filter(routine::Column::CourseId.eq(course_id))
            .filter(routine::Column::PeriodIndex.eq(period_index))
            .filter(routine::Column::IsActive.eq(true))
            .order_by_asc(routine::Column::StartTime)
            .all(db)
            .await?;
        Ok(routines)
    }

    pub async fn create(
        &self,
        course_id: Uuid,
        subject_id: Uuid,
        teacher_id: Uuid,
        start_time: NaiveTime,
        end_time: NaiveTime,
        period_index: i32,
        is_active: bool,
    ) -> Result<routine::Model, ServiceError> {
        let db = self.get_connection();

        if end_time <= start_time {
            return Err(ServiceError::TimeWindowInvalid);
        }

        let subject = subject::Entity::find_by_id(subject_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("subject"))?;
        if subject.course_id != course_id {
            return Err(ServiceError::SubjectNotInCourse);
        }
        if subject.period_index != period_index {
            return Err(ServiceError::PeriodMismatch);
        }

        staff_profile::Entity::find_by_id(teacher_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("teacher"))?;

        let now = Utc::now().naive_utc();
        let model = routine::ActiveModel {
            routine_id: Set(Uuid::new_v4()),
            course_id: Set(course_id),
            subject_id: Set(subject_id),
            teacher_id: Set(teacher_id),
            start_time: Set(start_time),
            end_time: Set(end_time),
            period_index: Set(period_index),
            is_active: Set(is_active),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(db).await.map_err(ServiceError::from)?;
        Ok(result)
    }

    pub async fn set_active(
        &self,
        routine_id: Uuid,
        is_active: bool,
    ) -> Result<routine::Model, ServiceError> {
        let db = self.get_connection();
        let routine = routine::Entity::find_by_id(routine_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("routine"))?;

        let mut model: routine::ActiveModel = routine.into();
        model.is_active = Set(is_active);
        model.updated_at = Set(Utc::now().naive_utc());

        let result = model.update(db).await.map_err(ServiceError::from)?;
        Ok(result)
    }

    /// Routines with attendance sessions are soft-state: deactivate instead.
    pub async fn delete(&self, routine_id: Uuid) -> Result<(), ServiceError> {
        let db = self.get_connection();
        let routine = routine::Entity::find_by_id(routine_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("routine"))?;

        let session_count = attendance_session::Entity::find()
            .filter(attendance_session::Column::RoutineId.eq(routine_id))
            .count(db)
            .await?;
        if session_count > 0 {
            return Err(ServiceError::Validation(
                "routine has attendance sessions; deactivate it instead of deleting".to_string(),
            ));
        }

        routine.delete(db).await.map_err(ServiceError::from)?;
        Ok(())
    }
}
