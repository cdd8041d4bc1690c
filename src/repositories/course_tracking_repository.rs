use anyhow::Result;
use chrono::{Local, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::ProgressStatus;
use crate::entities::{course, course_tracking, student_profile};
use crate::error::ServiceError;
use crate::redis_service::CompletionCache;
use crate::static_service::DATABASE_CONNECTION;
use crate::utils::timeline;

pub struct CourseTrackingRepository;

impl CourseTrackingRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_by_id(&self, tracking_id: Uuid) -> Result<Option<course_tracking::Model>> {
        let db = self.get_connection();
        let tracking = course_tracking::Entity::find_by_id(tracking_id).one(db).await?;
        Ok(tracking)
    }

    pub async fn find_by_student_and_course(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<course_tracking::Model>> {
        let db = self.get_connection();
        let tracking = course_tracking::Entity::find()
            .filter(course_tracking::Column::StudentId.eq(student_id))
            .filter(course_tracking::Column::CourseId.eq(course_id))
            .one(db)
            .await?;
        Ok(tracking)
    }

    /// The single In-Progress tracking for a student, if any.
    pub async fn find_active_by_student(
        &self,
        student_id: Uuid,
    ) -> Result<Option<course_tracking::Model>> {
        let db = self.get_connection();
        let tracking = course_tracking::Entity::find()
            .filter(course_tracking::Column::StudentId.eq(student_id))
            .filter(course_tracking::Column::ProgressStatus.eq(ProgressStatus::InProgress))
            .order_by_desc(course_tracking::Column::CreatedAt)
            .one(db)
            .await?;
        Ok(tracking)
    }

    pub async fn find_all_by_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<course_tracking::Model>> {
        let db = self.get_connection();
        let trackings = course_tracking::Entity::find()
            .filter(course_tracking::Column::StudentId.eq(student_id))
            .order_by_desc(course_tracking::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(trackings)
    }

    /// Creation trigger: called whenever a student acquires a course. Returns
    /// the existing tracking (reconciled) or creates one. Any other
    /// In-Progress tracking is demoted to Dropped first so at most one stays
    /// active per student; prior trackings are retained for history.
    pub async fn get_or_create(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<course_tracking::Model, ServiceError> {
        let db = self.get_connection();

        if let Some(existing) = self.find_by_student_and_course(student_id, course_id).await? {
            let reconciled = self.reconcile_period(existing).await?;
            return Ok(reconciled);
        }

        let student = student_profile::Entity::find_by_id(student_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("student"))?;
        let course = course::Entity::find_by_id(course_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("course"))?;

        let max_period = timeline::max_period(course.duration, course.duration_unit);
        let current_period = student.current_period.max(1);
        if current_period > max_period {
            return Err(ServiceError::PeriodOutOfRange(current_period));
        }

        let today = Local::now().date_naive();
        let start_date = student.joining_date.unwrap_or(today);
        let derived = timeline::derive(start_date, current_period, course.duration, course.duration_unit);
        let completion = timeline::completion_percentage(start_date, derived.expected_end, today);

        let now = Utc::now().naive_utc();
        let txn = db.begin().await?;

        // Demote any other active tracking so only one stays In Progress.
        let other_active = course_tracking::Entity::find()
            .filter(course_tracking::Column::StudentId.eq(student_id))
            .filter(course_tracking::Column::ProgressStatus.eq(ProgressStatus::InProgress))
            .all(&txn)
            .await?;
        for tracking in other_active {
            let mut model: course_tracking::ActiveModel = tracking.into();
            model.progress_status = Set(ProgressStatus::Dropped);
            model.actual_end_date = Set(Some(today));
            model.notes = Set(Some("Superseded by enrollment in another course".to_string()));
            model.updated_at = Set(now);
            model.update(&txn).await?;
        }

        let tracking_id = Uuid::new_v4();
        let model = course_tracking::ActiveModel {
            tracking_id: Set(tracking_id),
            student_id: Set(student_id),
            course_id: Set(course_id),
            enrollment_date: Set(today),
            start_date: Set(start_date),
            expected_end_date: Set(derived.expected_end),
            actual_end_date: Set(None),
            current_period: Set(current_period),
            period_start_date: Set(derived.period_start),
            period_end_date: Set(derived.period_end),
            completion_percentage: Set(completion),
            progress_status: Set(ProgressStatus::InProgress),
            notes: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created = model.insert(&txn).await?;

        // Keep the student's period in lockstep from the start.
        if student.current_period != current_period {
            let mut student_model: student_profile::ActiveModel = student.into();
            student_model.current_period = Set(current_period);
            student_model.updated_at = Set(now);
            student_model.update(&txn).await?;
        }

        txn.commit().await?;

        if let Err(err) = CompletionCache::set(tracking_id, completion).await {
            tracing::warn!("Failed to cache completion percentage: {}", err);
        }

        Ok(created)
    }

    /// Write `period` to the tracking and propagate to the student in one
    /// transaction that locks the student row.
    pub async fn set_current_period(
        &self,
        tracking_id: Uuid,
        period: i32,
    ) -> Result<course_tracking::Model, ServiceError> {
        let db = self.get_connection();

        let tracking = course_tracking::Entity::find_by_id(tracking_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("tracking"))?;
        if tracking.progress_status != ProgressStatus::InProgress {
            return Err(ServiceError::InvalidTransition(
                "tracking is no longer in progress",
            ));
        }

        let course = course::Entity::find_by_id(tracking.course_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("course"))?;
        let max_period = timeline::max_period(course.duration, course.duration_unit);
        if period < 1 || period > max_period {
            return Err(ServiceError::PeriodOutOfRange(period));
        }

        let txn = db.begin().await?;
        let updated = Self::write_period(&txn, tracking, &course, period).await?;
        txn.commit().await?;

        Ok(updated)
    }

    /// Original-system supplement: bump to the next period, shifting the
    /// period window forward.
    pub async fn advance_period(
        &self,
        tracking_id: Uuid,
    ) -> Result<course_tracking::Model, ServiceError> {
        let db = self.get_connection();
        let tracking = course_tracking::Entity::find_by_id(tracking_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("tracking"))?;

        self.set_current_period(tracking_id, tracking.current_period + 1)
            .await
    }

    async fn write_period(
        txn: &DatabaseTransaction,
        tracking: course_tracking::Model,
        course: &course::Model,
        period: i32,
    ) -> Result<course_tracking::Model, ServiceError> {
        // Lock the student row for the duration of the sync.
        let student = student_profile::Entity::find_by_id(tracking.student_id)
            .lock_exclusive()
            .one(txn)
            .await?
            .ok_or(ServiceError::NotFound("student"))?;

        let derived =
            timeline::derive(tracking.start_date, period, course.duration, course.duration_unit);
        let now = Utc::now().naive_utc();

        let mut tracking_model: course_tracking::ActiveModel = tracking.into();
        tracking_model.current_period = Set(period);
        tracking_model.period_start_date = Set(derived.period_start);
        tracking_model.period_end_date = Set(derived.period_end);
        tracking_model.updated_at = Set(now);
        let updated = tracking_model.update(txn).await?;

        if student.current_period != period {
            let mut student_model: student_profile::ActiveModel = student.into();
            student_model.current_period = Set(period);
            student_model.updated_at = Set(now);
            student_model.update(txn).await?;
        }

        Ok(updated)
    }

    /// Idempotent reconcile pass: after conflicting concurrent writes the
    /// most recently written side wins and both rows end up equal.
    pub async fn reconcile_period(
        &self,
        tracking: course_tracking::Model,
    ) -> Result<course_tracking::Model, ServiceError> {
        if tracking.progress_status != ProgressStatus::InProgress {
            return Ok(tracking);
        }

        let db = self.get_connection();
        let student = student_profile::Entity::find_by_id(tracking.student_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("student"))?;

        if student.current_period == tracking.current_period {
            return Ok(tracking);
        }

        let course = course::Entity::find_by_id(tracking.course_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("course"))?;
        let max_period = timeline::max_period(course.duration, course.duration_unit);

        // Last writer wins, bounded to the course's period range.
        let winner = if student.updated_at > tracking.updated_at {
            student.current_period
        } else {
            tracking.current_period
        };
        let winner = winner.clamp(1, max_period);

        let txn = db.begin().await?;
        let updated = Self::write_period(&txn, tracking, &course, winner).await?;
        txn.commit().await?;

        tracing::info!(
            "reconciled current_period to {} for tracking {}",
            winner,
            updated.tracking_id
        );
        Ok(updated)
    }

    /// Pure function of (today, start, expected end); safe for readers and
    /// schedulers to call repeatedly.
    pub async fn recompute_completion(
        &self,
        tracking_id: Uuid,
    ) -> Result<course_tracking::Model, ServiceError> {
        let db = self.get_connection();
        let tracking = course_tracking::Entity::find_by_id(tracking_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("tracking"))?;

        let completion = match tracking.progress_status {
            ProgressStatus::Completed => 100,
            ProgressStatus::Dropped => tracking.completion_percentage,
            ProgressStatus::InProgress => timeline::completion_percentage(
                tracking.start_date,
                tracking.expected_end_date,
                Local::now().date_naive(),
            ),
        };

        let updated = if completion != tracking.completion_percentage {
            let mut model: course_tracking::ActiveModel = tracking.into();
            model.completion_percentage = Set(completion);
            model.updated_at = Set(Utc::now().naive_utc());
            model.update(db).await?
        } else {
            tracking
        };

        if let Err(err) = CompletionCache::set(updated.tracking_id, completion).await {
            tracing::warn!("Failed to cache completion percentage: {}", err);
        }

        Ok(updated)
    }

    pub async fn complete(
        &self,
        tracking_id: Uuid,
        actual_end: Option<NaiveDate>,
        admin_override: bool,
    ) -> Result<course_tracking::Model, ServiceError> {
        self.finish(tracking_id, ProgressStatus::Completed, actual_end, admin_override)
            .await
    }

    pub async fn drop_tracking(
        &self,
        tracking_id: Uuid,
        admin_override: bool,
    ) -> Result<course_tracking::Model, ServiceError> {
        self.finish(tracking_id, ProgressStatus::Dropped, None, admin_override)
            .await
    }

    async fn finish(
        &self,
        tracking_id: Uuid,
        target: ProgressStatus,
        actual_end: Option<NaiveDate>,
        admin_override: bool,
    ) -> Result<course_tracking::Model, ServiceError> {
        let db = self.get_connection();
        let tracking = course_tracking::Entity::find_by_id(tracking_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("tracking"))?;

        // Terminal states are immutable except by admin override.
        if tracking.progress_status != ProgressStatus::InProgress && !admin_override {
            return Err(ServiceError::InvalidTransition(
                "tracking has already been completed or dropped",
            ));
        }

        let today = Local::now().date_naive();
        let completion = match target {
            ProgressStatus::Completed => 100,
            _ => 0,
        };

        let mut model: course_tracking::ActiveModel = tracking.into();
        model.progress_status = Set(target);
        model.actual_end_date = Set(Some(actual_end.unwrap_or(today)));
        model.completion_percentage = Set(completion);
        model.updated_at = Set(Utc::now().naive_utc());

        let updated = model.update(db).await?;
        if let Err(err) = CompletionCache::set(updated.tracking_id, completion).await {
            tracing::warn!("Failed to cache completion percentage: {}", err);
        }
        Ok(updated)
    }

    /// Propagate a student-side period write to the active tracking. Students
    /// without an active tracking just get the profile update.
    pub async fn set_period_for_student(
        &self,
        student_id: Uuid,
        period: i32,
    ) -> Result<(), ServiceError> {
        if let Some(tracking) = self.find_active_by_student(student_id).await? {
            self.set_current_period(tracking.tracking_id, period).await?;
            return Ok(());
        }

        let db = self.get_connection();
        let student = student_profile::Entity::find_by_id(student_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("student"))?;
        if period < 1 {
            return Err(ServiceError::PeriodOutOfRange(period));
        }

        let mut model: student_profile::ActiveModel = student.into();
        model.current_period = Set(period);
        model.updated_at = Set(Utc::now().naive_utc());
        model.update(db).await?;
        Ok(())
    }
}
