use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{batch, student_batch, student_profile};
use crate::error::ServiceError;
use crate::static_service::DATABASE_CONNECTION;

pub struct BatchRepository;

impl BatchRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_by_id(&self, batch_id: Uuid) -> Result<Option<batch::Model>> {
        let db = self.get_connection();
        let batch = batch::Entity::find_by_id(batch_id).one(db).await?;
        Ok(batch)
    }

    pub async fn find_all(&self) -> Result<Vec<batch::Model>> {
        let db = self.get_connection();
        let batches = batch::Entity::find()
            .order_by_desc(batch::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(batches)
    }

    pub async fn create(
        &self,
        name: String,
        year: Option<NaiveDate>,
        is_active: bool,
    ) -> Result<batch::Model, ServiceError> {
        let db = self.get_connection();
        let model = batch::ActiveModel {
            batch_id: Set(Uuid::new_v4()),
            name: Set(name),
            year: Set(year),
            is_active: Set(is_active),
            created_at: Set(Utc::now().naive_utc()),
        };
        let result = model.insert(db).await.map_err(ServiceError::from)?;
        Ok(result)
    }

    /// Enroll a student into a batch. A missing joining date on the student
    /// is backfilled from the batch year in the same transaction.
    pub async fn assign_student(
        &self,
        batch_id: Uuid,
        student_id: Uuid,
    ) -> Result<(), ServiceError> {
        let db = self.get_connection();

        let batch = batch::Entity::find_by_id(batch_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("batch"))?;
        let student = student_profile::Entity::find_by_id(student_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("student"))?;

        let already_linked = student_batch::Entity::find()
            .filter(student_batch::Column::BatchId.eq(batch_id))
            .filter(student_batch::Column::StudentId.eq(student_id))
            .one(db)
            .await?
            .is_some();

        let txn = db.begin().await?;

        if !already_linked {
            let link = student_batch::ActiveModel {
                id: Set(Uuid::new_v4()),
                student_id: Set(student_id),
                batch_id: Set(batch_id),
                created_at: Set(Utc::now().naive_utc()),
            };
            link.insert(&txn).await?;
        }

        if student.joining_date.is_none() {
            if let Some(year) = batch.year {
                let mut model: student_profile::ActiveModel = student.into();
                model.joining_date = Set(Some(year));
                model.updated_at = Set(Utc::now().naive_utc());
                model.update(&txn).await?;
            }
        }

        txn.commit().await?;
        Ok(())
    }

    pub async fn batches_for_student(&self, student_id: Uuid) -> Result<Vec<batch::Model>> {
        let db = self.get_connection();
        let links = student_batch::Entity::find()
            .filter(student_batch::Column::StudentId.eq(student_id))
            .all(db)
            .await?;

        let batch_ids: Vec<Uuid> = links.into_iter().map(|link| link.batch_id).collect();
        if batch_ids.is_empty() {
            return Ok(Vec::new());
        }

        let batches = batch::Entity::find()
            .filter(batch::Column::BatchId.is_in(batch_ids))
            .order_by_asc(batch::Column::Name)
            .all(db)
            .await?;
        Ok(batches)
    }
}
