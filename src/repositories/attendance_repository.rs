use std::collections::HashMap;

use anyhow::Result;
use chrono::{Local, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::StudentStatus;
use crate::entities::{attendance_record, attendance_session, principal, routine, student_profile};
use crate::error::ServiceError;
use crate::static_service::DATABASE_CONNECTION;

pub struct AttendanceRepository;

impl AttendanceRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    /// Active students of the routine's course at the routine's period,
    /// ordered by name. An empty set falls back to the whole course so stale
    /// period data never blocks attendance-taking; the fallback is logged,
    /// never surfaced.
    pub async fn eligible_students(
        &self,
        routine: &routine::Model,
    ) -> Result<Vec<(student_profile::Model, principal::Model)>> {
        let db = self.get_connection();

        let strict = student_profile::Entity::find()
            .filter(student_profile::Column::CourseId.eq(routine.course_id))
            .filter(student_profile::Column::CurrentPeriod.eq(routine.period_index))
            .filter(student_profile::Column::Status.eq(StudentStatus::Active))
            .find_also_related(principal::Entity)
            .order_by_asc(principal::Column::Name)
            .all(db)
            .await?;

        let rows = if strict.is_empty() {
            tracing::info!(
                "attendance eligibility fallback for routine {}: no active students at period {}",
                routine.routine_id,
                routine.period_index
            );
            student_profile::Entity::find()
                .filter(student_profile::Column::CourseId.eq(routine.course_id))
                .filter(student_profile::Column::Status.eq(StudentStatus::Active))
                .find_also_related(principal::Entity)
                .order_by_asc(principal::Column::Name)
                .all(db)
                .await?
        } else {
            strict
        };

        Ok(rows
            .into_iter()
            .filter_map(|(profile, principal)| principal.map(|p| (profile, p)))
            .collect())
    }

    pub async fn find_session_by_id(
        &self,
        session_id: Uuid,
    ) -> Result<Option<attendance_session::Model>> {
        let db = self.get_connection();
        let session = attendance_session::Entity::find_by_id(session_id).one(db).await?;
        Ok(session)
    }

    pub async fn find_session(
        &self,
        routine_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<attendance_session::Model>> {
        let db = self.get_connection();
        let session = attendance_session::Entity::find()
            .filter(attendance_session::Column::RoutineId.eq(routine_id))
            .filter(attendance_session::Column::Date.eq(date))
            .one(db)
            .await?;
        Ok(session)
    }

    /// Idempotent attendance submission for one (routine, date).
    ///
    /// The session row is created on first call and its two flags overwritten
    /// on later calls; student flags are upserted per record, and records not
    /// mentioned are left untouched. Unknown student ids are dropped
    /// silently. Everything runs in a single transaction.
    pub async fn submit(
        &self,
        routine_id: Uuid,
        submitting_teacher: Uuid,
        date: NaiveDate,
        teacher_attended: bool,
        class_held: bool,
        student_flags: &HashMap<Uuid, bool>,
    ) -> Result<attendance_session::Model, ServiceError> {
        let db = self.get_connection();

        // Only the assigned teacher of an active routine may submit.
        let routine = routine::Entity::find_by_id(routine_id)
            .one(db)
            .await?
            .filter(|r| r.teacher_id == submitting_teacher && r.is_active)
            .ok_or(ServiceError::PermissionDenied)?;

        let today = Local::now().date_naive();
        if date > today {
            return Err(ServiceError::Validation(
                "attendance date cannot be in the future".to_string(),
            ));
        }

        let eligible: Vec<Uuid> = self
            .eligible_students(&routine)
            .await?
            .into_iter()
            .map(|(profile, _)| profile.student_id)
            .collect();

        let now = Utc::now().naive_utc();
        let txn = db.begin().await?;

        let existing = attendance_session::Entity::find()
            .filter(attendance_session::Column::RoutineId.eq(routine_id))
            .filter(attendance_session::Column::Date.eq(date))
            .one(&txn)
            .await?;

        let session = match existing {
            Some(session) => {
                let mut model: attendance_session::ActiveModel = session.into();
                model.teacher_attended = Set(teacher_attended);
                model.class_held = Set(class_held);
                model.updated_at = Set(now);
                model.update(&txn).await?
            }
            None => {
                let model = attendance_session::ActiveModel {
                    session_id: Set(Uuid::new_v4()),
                    routine_id: Set(routine_id),
                    date: Set(date),
                    teacher_id: Set(routine.teacher_id),
                    teacher_attended: Set(teacher_attended),
                    class_held: Set(class_held),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                model.insert(&txn).await?
            }
        };

        for (student_id, present) in student_flags {
            if !eligible.contains(student_id) {
                continue;
            }

            let record = attendance_record::Entity::find()
                .filter(attendance_record::Column::SessionId.eq(session.session_id))
                .filter(attendance_record::Column::StudentId.eq(*student_id))
                .one(&txn)
                .await?;

            match record {
                Some(record) => {
                    if record.present != *present {
                        let mut model: attendance_record::ActiveModel = record.into();
                        model.present = Set(*present);
                        model.updated_at = Set(now);
                        model.update(&txn).await?;
                    }
                }
                None => {
                    let model = attendance_record::ActiveModel {
                        record_id: Set(Uuid::new_v4()),
                        session_id: Set(session.session_id),
                        student_id: Set(*student_id),
                        present: Set(*present),
                        created_at: Set(now),
                        updated_at: Set(now),
                    };
                    model.insert(&txn).await?;
                }
            }
        }

        txn.commit().await?;
        Ok(session)
    }

    pub async fn records_for_session(
        &self,
        session_id: Uuid,
    ) -> Result<Vec<attendance_record::Model>> {
        let db = self.get_connection();
        let records = attendance_record::Entity::find()
            .filter(attendance_record::Column::SessionId.eq(session_id))
            .all(db)
            .await?;
        Ok(records)
    }

    /// (present, total) for one session.
    pub async fn session_rollup(&self, session_id: Uuid) -> Result<(u64, u64)> {
        let db = self.get_connection();
        let total = attendance_record::Entity::find()
            .filter(attendance_record::Column::SessionId.eq(session_id))
            .count(db)
            .await?;
        let present = attendance_record::Entity::find()
            .filter(attendance_record::Column::SessionId.eq(session_id))
            .filter(attendance_record::Column::Present.eq(true))
            .count(db)
            .await?;
        Ok((present, total))
    }

    /// (present, total) for a student over an inclusive date window.
    pub async fn student_rollup(
        &self,
        student_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<(u64, u64)> {
        let db = self.get_connection();
        let base = attendance_record::Entity::find()
            .filter(attendance_record::Column::StudentId.eq(student_id))
            .inner_join(attendance_session::Entity)
            .filter(attendance_session::Column::Date.between(from, to));

        let total = base.clone().count(db).await?;
        let present = base
            .filter(attendance_record::Column::Present.eq(true))
            .count(db)
            .await?;
        Ok((present, total))
    }

    /// Dashboard figure: students marked present today across the teacher's
    /// sessions.
    pub async fn teacher_present_count_for(
        &self,
        teacher_id: Uuid,
        date: NaiveDate,
    ) -> Result<u64> {
        let db = self.get_connection();
        let count = attendance_record::Entity::find()
            .filter(attendance_record::Column::Present.eq(true))
            .inner_join(attendance_session::Entity)
            .filter(attendance_session::Column::Date.eq(date))
            .filter(attendance_session::Column::TeacherId.eq(teacher_id))
            .count(db)
            .await?;
        Ok(count)
    }

    pub async fn sessions_for_teacher_on(
        &self,
        teacher_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<attendance_session::Model>> {
        let db = self.get_connection();
        let sessions = attendance_session::Entity::find()
            .filter(attendance_session::Column::TeacherId.eq(teacher_id))
            .filter(attendance_session::Column::Date.eq(date))
            .all(db)
            .await?;
        Ok(sessions)
    }

    /// Date-ordered (date, present) history for streak derivation.
    pub async fn student_record_history(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<(NaiveDate, bool)>> {
        let db = self.get_connection();
        let rows = attendance_record::Entity::find()
            .filter(attendance_record::Column::StudentId.eq(student_id))
            .find_also_related(attendance_session::Entity)
            .order_by_asc(attendance_session::Column::Date)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(record, session)| session.map(|s| (s.date, record.present)))
            .collect())
    }

    /// Students referenced by attendance records cannot be deleted.
    pub async fn has_records_for_student(&self, student_id: Uuid) -> Result<bool> {
        let db = self.get_connection();
        let count = attendance_record::Entity::find()
            .filter(attendance_record::Column::StudentId.eq(student_id))
            .count(db)
            .await?;
        Ok(count > 0)
    }
}
