use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{routine, subject};
use crate::error::ServiceError;
use crate::repositories::CourseRepository;
use crate::static_service::DATABASE_CONNECTION;
use crate::utils::timeline;

pub struct SubjectRepository;

impl SubjectRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_by_id(&self, subject_id: Uuid) -> Result<Option<subject::Model>> {
        let db = self.get_connection();
        let subject = subject::Entity::find_by_id(subject_id).one(db).await?;
        Ok(subject)
    }

    pub async fn find_by_course(
        &self,
        course_id: Uuid,
        period_index: Option<i32>,
    ) -> Result<Vec<subject::Model>> {
        let db = self.get_connection();
        let mut query = subject::Entity::find().filter(subject::Column::CourseId.eq(course_id));
        if let Some(period) = period_index {
            query = query.filter(subject::Column::PeriodIndex.eq(period));
        }
        let subjects = query
            .order_by_asc(subject::Column::PeriodIndex)
            .order_by_asc(subject::Column::Name)
            .all(db)
            .await?;
        Ok(subjects)
    }

    pub async fn create(
        &self,
        course_id: Uuid,
        name: String,
        code: Option<String>,
        period_index: i32,
        syllabus_path: Option<String>,
    ) -> Result<subject::Model, ServiceError> {
        let db = self.get_connection();

        let course = CourseRepository::new()
            .find_by_id(course_id)
            .await?
            .ok_or(ServiceError::NotFound("course"))?;

        let max_period = timeline::max_period(course.duration, course.duration_unit);
        if period_index < 1 || period_index > max_period {
            return Err(ServiceError::PeriodOutOfRange(period_index));
        }

        let existing = subject::Entity::find()
            .filter(subject::Column::CourseId.eq(course_id))
            .filter(subject::Column::Name.eq(&name))
            .filter(subject::Column::PeriodIndex.eq(period_index))
            .one(db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Duplicate("subject"));
        }

        let now = Utc::now().naive_utc();
        let model = subject::ActiveModel {
            subject_id: Set(Uuid::new_v4()),
            course_id: Set(course_id),
            name: Set(name),
            code: Set(code),
            period_index: Set(period_index),
            syllabus_path: Set(syllabus_path),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(db).await.map_err(ServiceError::from)?;
        Ok(result)
    }

    pub async fn set_syllabus(
        &self,
        subject_id: Uuid,
        syllabus_path: Option<String>,
    ) -> Result<subject::Model, ServiceError> {
        let db = self.get_connection();
        let subject = subject::Entity::find_by_id(subject_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("subject"))?;

        let mut model: subject::ActiveModel = subject.into();
        model.syllabus_path = Set(syllabus_path);
        model.updated_at = Set(Utc::now().naive_utc());

        let result = model.update(db).await.map_err(ServiceError::from)?;
        Ok(result)
    }

    /// Subjects referenced by any routine cannot be deleted; this keeps the
    /// attendance history chain intact.
    pub async fn delete(&self, subject_id: Uuid) -> Result<(), ServiceError> {
        let db = self.get_connection();
        let subject = subject::Entity::find_by_id(subject_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("subject"))?;

        let routine_count = routine::Entity::find()
            .filter(routine::Column::SubjectId.eq(subject_id))
            .count(db)
            .await?;
        if routine_count > 0 {
            return Err(ServiceError::Validation(
                "subject is referenced by routines and cannot be deleted".to_string(),
            ));
        }

        subject.delete(db).await.map_err(ServiceError::from)?;
        Ok(())
    }
}
