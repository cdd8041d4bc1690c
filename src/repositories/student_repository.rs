use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::config::APP_CONFIG;
use crate::entities::sea_orm_active_enums::{RoleEnum, StudentStatus};
use crate::entities::{parent_profile, parent_student, principal, student_profile};
use crate::error::ServiceError;
use crate::repositories::{AttendanceRepository, CourseTrackingRepository};
use crate::static_service::DATABASE_CONNECTION;

/// Parents auto-created from student contact details get this password until
/// they reset it.
const DEFAULT_PARENT_PASSWORD: &str = "123";

pub struct NewStudent {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub password: Option<String>,
    pub course_id: Option<Uuid>,
    pub current_period: Option<i32>,
    pub status: Option<StudentStatus>,
    pub joining_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub temporary_address: Option<String>,
    pub permanent_address: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
}

pub struct StudentUpdate {
    pub name: Option<String>,
    pub email: Option<Option<String>>,
    pub course_id: Option<Option<Uuid>>,
    pub current_period: Option<i32>,
    pub status: Option<StudentStatus>,
    pub joining_date: Option<Option<NaiveDate>>,
}

pub struct StudentRepository;

impl StudentRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_with_profile(
        &self,
        student_id: Uuid,
    ) -> Result<Option<(principal::Model, student_profile::Model)>> {
        let db = self.get_connection();
        let row = student_profile::Entity::find_by_id(student_id)
            .find_also_related(principal::Entity)
            .one(db)
            .await?;
        Ok(row.and_then(|(profile, principal)| principal.map(|p| (p, profile))))
    }

    /// Create the principal, the profile, and the parent link in one
    /// transaction. The course tracking trigger runs after commit and is
    /// best-effort: a tracking failure is logged and never blocks the
    /// student.
    pub async fn create(
        &self,
        new_student: NewStudent,
    ) -> Result<(principal::Model, student_profile::Model), ServiceError> {
        let db = self.get_connection();

        let clash = principal::Entity::find()
            .filter(principal::Column::Phone.eq(&new_student.phone))
            .one(db)
            .await?;
        if clash.is_some() {
            return Err(ServiceError::Duplicate("phone number"));
        }

        let password = match &new_student.password {
            Some(raw) => Some(
                bcrypt::hash(raw, APP_CONFIG.bcrypt_cost)
                    .map_err(|err| ServiceError::Internal(err.into()))?,
            ),
            None => None,
        };

        let student_id = Uuid::new_v4();
        let now = Utc::now().naive_utc();
        let course_id = new_student.course_id;

        let txn = db.begin().await?;

        let principal_model = principal::ActiveModel {
            principal_id: Set(student_id),
            role: Set(RoleEnum::Student),
            name: Set(new_student.name.clone()),
            phone: Set(new_student.phone.clone()),
            email: Set(new_student.email.clone()),
            password: Set(password),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created_principal = principal_model.insert(&txn).await?;

        let profile_model = student_profile::ActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
            current_period: Set(new_student.current_period.unwrap_or(1).max(1)),
            status: Set(new_student.status.unwrap_or(StudentStatus::Active)),
            joining_date: Set(new_student.joining_date),
            gender: Set(new_student.gender.clone()),
            birth_date: Set(new_student.birth_date),
            temporary_address: Set(new_student.temporary_address.clone()),
            permanent_address: Set(new_student.permanent_address.clone()),
            parent_name: Set(new_student.parent_name.clone()),
            parent_phone: Set(new_student.parent_phone.clone()),
            image_path: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created_profile = profile_model.insert(&txn).await?;

        if let (Some(parent_name), Some(parent_phone)) =
            (&new_student.parent_name, &new_student.parent_phone)
        {
            Self::link_parent(&txn, student_id, parent_name, parent_phone).await?;
        }

        txn.commit().await?;

        if let Some(course_id) = course_id {
            let tracking_repo = CourseTrackingRepository::new();
            if let Err(err) = tracking_repo.get_or_create(student_id, course_id).await {
                tracing::warn!(
                    "Failed to create course tracking for student {}: {}",
                    student_id,
                    err
                );
            }
        }

        Ok((created_principal, created_profile))
    }

    async fn link_parent(
        txn: &sea_orm::DatabaseTransaction,
        student_id: Uuid,
        parent_name: &str,
        parent_phone: &str,
    ) -> Result<(), ServiceError> {
        let now = Utc::now().naive_utc();

        let existing_parent = principal::Entity::find()
            .filter(principal::Column::Phone.eq(parent_phone))
            .one(txn)
            .await?;

        let parent_id = match existing_parent {
            Some(parent) if parent.role == RoleEnum::Parent => parent.principal_id,
            // A principal with this phone but a different role cannot double
            // as the parent account; skip linking rather than fail the
            // student.
            Some(other) => {
                tracing::warn!(
                    "parent phone {} already belongs to a {:?} principal; skipping link",
                    parent_phone,
                    other.role
                );
                return Ok(());
            }
            None => {
                let parent_id = Uuid::new_v4();
                let hashed = bcrypt::hash(DEFAULT_PARENT_PASSWORD, APP_CONFIG.bcrypt_cost)
                    .map_err(|err| ServiceError::Internal(err.into()))?;

                let parent_principal = principal::ActiveModel {
                    principal_id: Set(parent_id),
                    role: Set(RoleEnum::Parent),
                    name: Set(parent_name.to_string()),
                    phone: Set(parent_phone.to_string()),
                    email: Set(None),
                    password: Set(Some(hashed)),
                    is_active: Set(true),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                parent_principal.insert(txn).await?;

                let parent_profile_model = parent_profile::ActiveModel {
                    parent_id: Set(parent_id),
                    address: Set(None),
                    image_path: Set(None),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                parent_profile_model.insert(txn).await?;
                parent_id
            }
        };

        let linked = parent_student::Entity::find()
            .filter(parent_student::Column::ParentId.eq(parent_id))
            .filter(parent_student::Column::StudentId.eq(student_id))
            .one(txn)
            .await?
            .is_some();
        if !linked {
            let link = parent_student::ActiveModel {
                id: Set(Uuid::new_v4()),
                parent_id: Set(parent_id),
                student_id: Set(student_id),
                created_at: Set(now),
            };
            link.insert(txn).await?;
        }

        Ok(())
    }

    pub async fn update(
        &self,
        student_id: Uuid,
        update: StudentUpdate,
    ) -> Result<(principal::Model, student_profile::Model), ServiceError> {
        let db = self.get_connection();
        let (existing_principal, existing_profile) = self
            .find_with_profile(student_id)
            .await?
            .ok_or(ServiceError::NotFound("student"))?;

        let course_changed = matches!(
            &update.course_id,
            Some(new_course) if *new_course != existing_profile.course_id
        );
        let now = Utc::now().naive_utc();

        if let Some(name) = update.name {
            let mut model: principal::ActiveModel = existing_principal.clone().into();
            model.name = Set(name);
            model.updated_at = Set(now);
            model.update(db).await?;
        }
        if let Some(email) = update.email {
            let mut model: principal::ActiveModel = existing_principal.clone().into();
            model.email = Set(email);
            model.updated_at = Set(now);
            model.update(db).await?;
        }

        let mut profile_model: student_profile::ActiveModel = existing_profile.into();
        if let Some(course_id) = update.course_id {
            profile_model.course_id = Set(course_id);
        }
        if let Some(status) = update.status {
            profile_model.status = Set(status);
        }
        if let Some(joining_date) = update.joining_date {
            profile_model.joining_date = Set(joining_date);
        }
        profile_model.updated_at = Set(now);
        profile_model.update(db).await?;

        let tracking_repo = CourseTrackingRepository::new();

        // Explicit trigger replacing the legacy post-save signal: a newly
        // acquired course gets its tracking, best-effort.
        if course_changed {
            if let Some(Some(course_id)) = update.course_id {
                if let Err(err) = tracking_repo.get_or_create(student_id, course_id).await {
                    tracing::warn!(
                        "Failed to create course tracking for student {}: {}",
                        student_id,
                        err
                    );
                }
            }
        }

        // Period writes go through the sync path so both rows stay equal.
        if let Some(period) = update.current_period {
            tracking_repo.set_period_for_student(student_id, period).await?;
        }

        let refreshed = self
            .find_with_profile(student_id)
            .await?
            .ok_or(ServiceError::NotFound("student"))?;
        Ok(refreshed)
    }

    /// Deletion is denied while any attendance record references the student.
    pub async fn delete(&self, student_id: Uuid) -> Result<(), ServiceError> {
        let db = self.get_connection();
        let (existing_principal, existing_profile) = self
            .find_with_profile(student_id)
            .await?
            .ok_or(ServiceError::NotFound("student"))?;

        if AttendanceRepository::new()
            .has_records_for_student(student_id)
            .await?
        {
            return Err(ServiceError::Validation(
                "student has attendance records and cannot be deleted".to_string(),
            ));
        }

        let txn = db.begin().await?;
        parent_student::Entity::delete_many()
            .filter(parent_student::Column::StudentId.eq(student_id))
            .exec(&txn)
            .await?;
        existing_profile.delete(&txn).await?;
        existing_principal.delete(&txn).await?;
        txn.commit().await?;
        Ok(())
    }

    pub async fn find_all_with_pagination(
        &self,
        page: u32,
        page_size: u32,
        course_filter: Option<Uuid>,
        status_filter: Option<StudentStatus>,
        search: Option<String>,
    ) -> Result<(Vec<(student_profile::Model, principal::Model)>, u64)> {
        let db = self.get_connection();
        let mut query = student_profile::Entity::find();

        if let Some(course_id) = course_filter {
            query = query.filter(student_profile::Column::CourseId.eq(course_id));
        }
        if let Some(status) = status_filter {
            query = query.filter(student_profile::Column::Status.eq(status));
        }

        let mut query = query.find_also_related(principal::Entity);
        if let Some(search_term) = search {
            let pattern = format!("%{}%", search_term);
            query = query.filter(
                principal::Column::Name
                    .like(&pattern)
                    .or(principal::Column::Phone.like(&pattern)),
            );
        }

        let total = query.clone().count(db).await?;

        let offset = (page.max(1) - 1) * page_size;
        let rows = query
            .order_by_asc(principal::Column::Name)
            .limit(page_size as u64)
            .offset(offset as u64)
            .all(db)
            .await?;

        let students = rows
            .into_iter()
            .filter_map(|(profile, principal)| principal.map(|p| (profile, p)))
            .collect();
        Ok((students, total))
    }

    /// Students linked to a parent account, for parent dashboards and the
    /// parent-feedback permission check.
    pub async fn students_of_parent(
        &self,
        parent_id: Uuid,
    ) -> Result<Vec<(student_profile::Model, principal::Model)>> {
        let db = self.get_connection();
        let links = parent_student::Entity::find()
            .filter(parent_student::Column::ParentId.eq(parent_id))
            .all(db)
            .await?;
        let student_ids: Vec<Uuid> = links.into_iter().map(|link| link.student_id).collect();
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = student_profile::Entity::find()
            .filter(student_profile::Column::StudentId.is_in(student_ids))
            .find_also_related(principal::Entity)
            .order_by_asc(principal::Column::Name)
            .all(db)
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(|(profile, principal)| principal.map(|p| (profile, p)))
            .collect())
    }

    pub async fn is_parent_of(&self, parent_id: Uuid, student_id: Uuid) -> Result<bool> {
        let db = self.get_connection();
        let linked = parent_student::Entity::find()
            .filter(parent_student::Column::ParentId.eq(parent_id))
            .filter(parent_student::Column::StudentId.eq(student_id))
            .one(db)
            .await?
            .is_some();
        Ok(linked)
    }
}
