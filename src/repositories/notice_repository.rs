use anyhow::Result;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::entities::notice;
use crate::error::ServiceError;
use crate::static_service::DATABASE_CONNECTION;

pub struct NoticeRepository;

impl NoticeRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_by_id(&self, notice_id: Uuid) -> Result<Option<notice::Model>> {
        let db = self.get_connection();
        let notice = notice::Entity::find_by_id(notice_id).one(db).await?;
        Ok(notice)
    }

    pub async fn find_all(&self) -> Result<Vec<notice::Model>> {
        let db = self.get_connection();
        let notices = notice::Entity::find()
            .order_by_desc(notice::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(notices)
    }

    pub async fn create(
        &self,
        title: String,
        message: Option<String>,
        image_path: Option<String>,
        attachment_path: Option<String>,
    ) -> Result<notice::Model, ServiceError> {
        if title.trim().is_empty() {
            return Err(ServiceError::Validation("notice title is required".to_string()));
        }

        let db = self.get_connection();
        let model = notice::ActiveModel {
            notice_id: Set(Uuid::new_v4()),
            title: Set(title),
            message: Set(message),
            image_path: Set(image_path),
            attachment_path: Set(attachment_path),
            created_at: Set(Utc::now().naive_utc()),
        };

        let result = model.insert(db).await.map_err(ServiceError::from)?;
        Ok(result)
    }

    pub async fn update(
        &self,
        notice_id: Uuid,
        title: Option<String>,
        message: Option<Option<String>>,
    ) -> Result<notice::Model, ServiceError> {
        let db = self.get_connection();
        let notice = notice::Entity::find_by_id(notice_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("notice"))?;

        let mut model: notice::ActiveModel = notice.into();
        if let Some(title) = title {
            model.title = Set(title);
        }
        if let Some(message) = message {
            model.message = Set(message);
        }

        let result = model.update(db).await.map_err(ServiceError::from)?;
        Ok(result)
    }

    /// Attach an uploaded file; images and documents land in separate
    /// columns.
    pub async fn set_attachment(
        &self,
        notice_id: Uuid,
        image_path: Option<String>,
        attachment_path: Option<String>,
    ) -> Result<notice::Model, ServiceError> {
        let db = self.get_connection();
        let notice = notice::Entity::find_by_id(notice_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("notice"))?;

        let mut model: notice::ActiveModel = notice.into();
        if let Some(path) = image_path {
            model.image_path = Set(Some(path));
        }
        if let Some(path) = attachment_path {
            model.attachment_path = Set(Some(path));
        }

        let result = model.update(db).await.map_err(ServiceError::from)?;
        Ok(result)
    }

    pub async fn delete(&self, notice_id: Uuid) -> Result<(), ServiceError> {
        let db = self.get_connection();
        let notice = notice::Entity::find_by_id(notice_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("notice"))?;
        notice.delete(db).await.map_err(ServiceError::from)?;
        Ok(())
    }
}
