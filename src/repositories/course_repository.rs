use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::course;
use crate::entities::sea_orm_active_enums::DurationUnit;
use crate::error::ServiceError;
use crate::static_service::DATABASE_CONNECTION;

pub struct CourseRepository;

impl CourseRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_by_id(&self, course_id: Uuid) -> Result<Option<course::Model>> {
        let db = self.get_connection();
        let course = course::Entity::find_by_id(course_id).one(db).await?;
        Ok(course)
    }

    pub async fn find_all(&self) -> Result<Vec<course::Model>> {
        let db = self.get_connection();
        let courses = course::Entity::find()
            .order_by_asc(course::Column::Name)
            .all(db)
            .await?;
        Ok(courses)
    }

    pub async fn create(
        &self,
        name: String,
        code: Option<String>,
        duration: i32,
        duration_unit: DurationUnit,
        description: Option<String>,
        is_active: bool,
    ) -> Result<course::Model, ServiceError> {
        let db = self.get_connection();

        if duration <= 0 {
            return Err(ServiceError::InvalidDuration);
        }

        // Case-sensitive match on the exact name.
        let existing = course::Entity::find()
            .filter(course::Column::Name.eq(&name))
            .one(db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Duplicate("course name"));
        }

        let now = Utc::now().naive_utc();
        let model = course::ActiveModel {
            course_id: Set(Uuid::new_v4()),
            name: Set(name),
            code: Set(code),
            duration: Set(duration),
            duration_unit: Set(duration_unit),
            description: Set(description),
            is_active: Set(is_active),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(db).await.map_err(ServiceError::from)?;
        Ok(result)
    }

    pub async fn update(
        &self,
        course_id: Uuid,
        name: Option<String>,
        code: Option<Option<String>>,
        description: Option<Option<String>>,
        is_active: Option<bool>,
    ) -> Result<course::Model, ServiceError> {
        let db = self.get_connection();
        let course = course::Entity::find_by_id(course_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("course"))?;

        if let Some(new_name) = &name {
            if *new_name != course.name {
                let clash = course::Entity::find()
                    .filter(course::Column::Name.eq(new_name))
                    .one(db)
                    .await?;
                if clash.is_some() {
                    return Err(ServiceError::Duplicate("course name"));
                }
            }
        }

        let mut model: course::ActiveModel = course.into();
        if let Some(new_name) = name {
            model.name = Set(new_name);
        }
        if let Some(new_code) = code {
            model.code = Set(new_code);
        }
        if let Some(new_description) = description {
            model.description = Set(new_description);
        }
        if let Some(active) = is_active {
            model.is_active = Set(active);
        }
        model.updated_at = Set(Utc::now().naive_utc());

        let result = model.update(db).await.map_err(ServiceError::from)?;
        Ok(result)
    }
}
