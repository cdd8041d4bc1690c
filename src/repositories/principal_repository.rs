use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::config::APP_CONFIG;
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::{principal, staff_profile};
use crate::error::ServiceError;
use crate::static_service::DATABASE_CONNECTION;

pub struct PrincipalRepository;

impl PrincipalRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_by_id(&self, principal_id: Uuid) -> Result<Option<principal::Model>> {
        let db = self.get_connection();
        let principal = principal::Entity::find_by_id(principal_id).one(db).await?;
        Ok(principal)
    }

    /// Phone is the login identifier and unique across all roles.
    pub async fn find_by_phone(&self, phone: &str) -> Result<Option<principal::Model>> {
        let db = self.get_connection();
        let principal = principal::Entity::find()
            .filter(principal::Column::Phone.eq(phone))
            .one(db)
            .await?;
        Ok(principal)
    }

    /// Looks up by phone first, then email; used by the password-reset flow
    /// where the identifier may be either.
    pub async fn find_by_identifier(&self, identifier: &str) -> Result<Option<principal::Model>> {
        let db = self.get_connection();
        if let Some(principal) = self.find_by_phone(identifier).await? {
            return Ok(Some(principal));
        }
        let principal = principal::Entity::find()
            .filter(principal::Column::Email.eq(identifier))
            .one(db)
            .await?;
        Ok(principal)
    }

    pub async fn create(
        &self,
        principal_id: Uuid,
        role: RoleEnum,
        name: String,
        phone: String,
        email: Option<String>,
        raw_password: Option<String>,
        is_active: bool,
    ) -> Result<principal::Model, ServiceError> {
        let db = self.get_connection();

        if self.find_by_phone(&phone).await?.is_some() {
            return Err(ServiceError::Duplicate("phone number"));
        }

        let password = match raw_password {
            Some(raw) => Some(
                bcrypt::hash(&raw, APP_CONFIG.bcrypt_cost)
                    .map_err(|err| ServiceError::Internal(err.into()))?,
            ),
            None => None,
        };

        let now = Utc::now().naive_utc();
        let model = principal::ActiveModel {
            principal_id: Set(principal_id),
            role: Set(role),
            name: Set(name),
            phone: Set(phone),
            email: Set(email),
            password: Set(password),
            is_active: Set(is_active),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(db).await.map_err(ServiceError::from)?;
        Ok(result)
    }

    /// Create a staff principal together with its profile row. A non-null
    /// `hod_course_id` makes the staff member HOD of that course.
    pub async fn create_staff(
        &self,
        name: String,
        phone: String,
        email: Option<String>,
        raw_password: Option<String>,
        role: RoleEnum,
        designation: Option<String>,
        joining_date: Option<chrono::NaiveDate>,
        hod_course_id: Option<Uuid>,
    ) -> Result<(principal::Model, staff_profile::Model), ServiceError> {
        let db = self.get_connection();

        if self.find_by_phone(&phone).await?.is_some() {
            return Err(ServiceError::Duplicate("phone number"));
        }
        if !matches!(
            role,
            RoleEnum::Teacher | RoleEnum::Hod | RoleEnum::AdmissionOfficer | RoleEnum::Admin
        ) {
            return Err(ServiceError::Validation(
                "staff role must be teacher, hod, admission_officer or admin".to_string(),
            ));
        }

        let password = match raw_password {
            Some(raw) => Some(
                bcrypt::hash(&raw, APP_CONFIG.bcrypt_cost)
                    .map_err(|err| ServiceError::Internal(err.into()))?,
            ),
            None => None,
        };

        let principal_id = Uuid::new_v4();
        let now = Utc::now().naive_utc();

        let txn = db.begin().await?;

        let principal_model = principal::ActiveModel {
            principal_id: Set(principal_id),
            role: Set(role),
            name: Set(name),
            phone: Set(phone),
            email: Set(email),
            password: Set(password),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created = principal_model.insert(&txn).await?;

        let profile_model = staff_profile::ActiveModel {
            staff_id: Set(principal_id),
            designation: Set(designation),
            joining_date: Set(joining_date),
            hod_course_id: Set(hod_course_id),
            gender: Set(None),
            birth_date: Set(None),
            temporary_address: Set(None),
            permanent_address: Set(None),
            image_path: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let profile = profile_model.insert(&txn).await?;

        txn.commit().await?;
        Ok((created, profile))
    }

    pub async fn set_password(&self, principal_id: Uuid, raw_password: &str) -> Result<()> {
        let db = self.get_connection();
        let principal = principal::Entity::find_by_id(principal_id)
            .one(db)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Principal not found"))?;

        let hashed = bcrypt::hash(raw_password, APP_CONFIG.bcrypt_cost)?;
        let mut model: principal::ActiveModel = principal.into();
        model.password = Set(Some(hashed));
        model.updated_at = Set(Utc::now().naive_utc());
        model.update(db).await?;
        Ok(())
    }

    pub async fn find_staff_profile(&self, staff_id: Uuid) -> Result<Option<staff_profile::Model>> {
        let db = self.get_connection();
        let profile = staff_profile::Entity::find_by_id(staff_id).one(db).await?;
        Ok(profile)
    }

    /// HOD lookup: the staff profile holding this course.
    pub async fn find_hod_for_course(&self, course_id: Uuid) -> Result<Option<staff_profile::Model>> {
        let db = self.get_connection();
        let profile = staff_profile::Entity::find()
            .filter(staff_profile::Column::HodCourseId.eq(course_id))
            .one(db)
            .await?;
        Ok(profile)
    }

    pub async fn find_all_with_pagination(
        &self,
        page: u32,
        page_size: u32,
        role_filter: Option<RoleEnum>,
        search: Option<String>,
    ) -> Result<(Vec<principal::Model>, u64)> {
        let db = self.get_connection();
        let mut query = principal::Entity::find();

        if let Some(role) = role_filter {
            query = query.filter(principal::Column::Role.eq(role));
        }

        if let Some(search_term) = search {
            let pattern = format!("%{}%", search_term);
            query = query.filter(
                principal::Column::Name
                    .like(&pattern)
                    .or(principal::Column::Phone.like(&pattern))
                    .or(principal::Column::Email.like(&pattern)),
            );
        }

        let total = query.clone().count(db).await?;

        let offset = (page.max(1) - 1) * page_size;
        let principals = query
            .order_by_desc(principal::Column::CreatedAt)
            .limit(page_size as u64)
            .offset(offset as u64)
            .all(db)
            .await?;

        Ok((principals, total))
    }
}
