use anyhow::Result;
use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::meeting;
use crate::entities::sea_orm_active_enums::MeetingStatus;
use crate::error::ServiceError;
use crate::static_service::DATABASE_CONNECTION;

/// scheduled -> {rescheduled, completed, cancelled};
/// rescheduled -> {completed, cancelled}; terminal states are final.
pub fn can_transition(from: MeetingStatus, to: MeetingStatus) -> bool {
    match from {
        MeetingStatus::Scheduled => matches!(
            to,
            MeetingStatus::Rescheduled | MeetingStatus::Completed | MeetingStatus::Cancelled
        ),
        MeetingStatus::Rescheduled => {
            matches!(to, MeetingStatus::Completed | MeetingStatus::Cancelled)
        }
        MeetingStatus::Completed | MeetingStatus::Cancelled => false,
    }
}

fn overlaps(
    date: NaiveDate,
    time: NaiveTime,
    duration_minutes: i32,
    other: &meeting::Model,
) -> bool {
    if other.meeting_date != date {
        return false;
    }
    let start = NaiveDateTime::new(date, time);
    let end = start + Duration::minutes(duration_minutes as i64);
    let other_start = NaiveDateTime::new(other.meeting_date, other.meeting_time);
    let other_end = other_start + Duration::minutes(other.duration_minutes as i64);
    start < other_end && end > other_start
}

pub struct MeetingRepository;

impl MeetingRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_by_id(&self, meeting_id: Uuid) -> Result<Option<meeting::Model>> {
        let db = self.get_connection();
        let meeting = meeting::Entity::find_by_id(meeting_id).one(db).await?;
        Ok(meeting)
    }

    pub async fn find_all(&self) -> Result<Vec<meeting::Model>> {
        let db = self.get_connection();
        let meetings = meeting::Entity::find()
            .order_by_desc(meeting::Column::MeetingDate)
            .order_by_desc(meeting::Column::MeetingTime)
            .all(db)
            .await?;
        Ok(meetings)
    }

    async fn assert_no_overlap(
        &self,
        date: NaiveDate,
        time: NaiveTime,
        duration_minutes: i32,
        exclude: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let db = self.get_connection();
        let scheduled = meeting::Entity::find()
            .filter(meeting::Column::MeetingDate.eq(date))
            .filter(meeting::Column::Status.eq(MeetingStatus::Scheduled))
            .all(db)
            .await?;

        let conflict = scheduled
            .iter()
            .filter(|other| Some(other.meeting_id) != exclude)
            .any(|other| overlaps(date, time, duration_minutes, other));
        if conflict {
            return Err(ServiceError::Validation(
                "this time slot overlaps with another meeting".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn schedule(
        &self,
        meeting_date: NaiveDate,
        meeting_time: NaiveTime,
        duration_minutes: i32,
        agenda: String,
        is_online: bool,
        meeting_link: Option<String>,
    ) -> Result<meeting::Model, ServiceError> {
        if duration_minutes <= 0 {
            return Err(ServiceError::Validation(
                "meeting duration must be positive".to_string(),
            ));
        }
        self.assert_no_overlap(meeting_date, meeting_time, duration_minutes, None)
            .await?;

        let db = self.get_connection();
        let now = Utc::now().naive_utc();
        let model = meeting::ActiveModel {
            meeting_id: Set(Uuid::new_v4()),
            meeting_date: Set(meeting_date),
            meeting_time: Set(meeting_time),
            duration_minutes: Set(duration_minutes),
            status: Set(MeetingStatus::Scheduled),
            agenda: Set(agenda),
            notes: Set(String::new()),
            is_online: Set(is_online),
            meeting_link: Set(meeting_link),
            cancellation_reason: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(db).await.map_err(ServiceError::from)?;
        Ok(result)
    }

    /// Rescheduling needs a strictly-future (date, time) pair.
    pub async fn reschedule(
        &self,
        meeting_id: Uuid,
        new_date: NaiveDate,
        new_time: NaiveTime,
    ) -> Result<meeting::Model, ServiceError> {
        let db = self.get_connection();
        let meeting = meeting::Entity::find_by_id(meeting_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("meeting"))?;

        if !can_transition(meeting.status, MeetingStatus::Rescheduled) {
            return Err(ServiceError::InvalidTransition(
                "meeting can no longer be rescheduled",
            ));
        }

        let new_start = NaiveDateTime::new(new_date, new_time);
        if new_start <= Local::now().naive_local() {
            return Err(ServiceError::Validation(
                "rescheduled meetings must be in the future".to_string(),
            ));
        }
        self.assert_no_overlap(new_date, new_time, meeting.duration_minutes, Some(meeting_id))
            .await?;

        let mut model: meeting::ActiveModel = meeting.into();
        model.meeting_date = Set(new_date);
        model.meeting_time = Set(new_time);
        model.status = Set(MeetingStatus::Rescheduled);
        model.updated_at = Set(Utc::now().naive_utc());

        let result = model.update(db).await.map_err(ServiceError::from)?;
        Ok(result)
    }

    pub async fn complete(
        &self,
        meeting_id: Uuid,
        notes: Option<String>,
    ) -> Result<meeting::Model, ServiceError> {
        let db = self.get_connection();
        let meeting = meeting::Entity::find_by_id(meeting_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("meeting"))?;

        if !can_transition(meeting.status, MeetingStatus::Completed) {
            return Err(ServiceError::InvalidTransition(
                "meeting can no longer be completed",
            ));
        }

        let mut model: meeting::ActiveModel = meeting.into();
        model.status = Set(MeetingStatus::Completed);
        if let Some(notes) = notes {
            model.notes = Set(notes);
        }
        model.updated_at = Set(Utc::now().naive_utc());

        let result = model.update(db).await.map_err(ServiceError::from)?;
        Ok(result)
    }

    /// Cancellation requires a reason.
    pub async fn cancel(
        &self,
        meeting_id: Uuid,
        reason: String,
    ) -> Result<meeting::Model, ServiceError> {
        if reason.trim().is_empty() {
            return Err(ServiceError::Validation(
                "a cancellation reason is required".to_string(),
            ));
        }

        let db = self.get_connection();
        let meeting = meeting::Entity::find_by_id(meeting_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("meeting"))?;

        if !can_transition(meeting.status, MeetingStatus::Cancelled) {
            return Err(ServiceError::InvalidTransition(
                "meeting can no longer be cancelled",
            ));
        }

        let mut model: meeting::ActiveModel = meeting.into();
        model.status = Set(MeetingStatus::Cancelled);
        model.cancellation_reason = Set(Some(reason));
        model.updated_at = Set(Utc::now().naive_utc());

        let result = model.update(db).await.map_err(ServiceError::from)?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_table_matches_the_state_machine() {
        use MeetingStatus::*;

        assert!(can_transition(Scheduled, Rescheduled));
        assert!(can_transition(Scheduled, Completed));
        assert!(can_transition(Scheduled, Cancelled));
        assert!(can_transition(Rescheduled, Completed));
        assert!(can_transition(Rescheduled, Cancelled));

        assert!(!can_transition(Rescheduled, Rescheduled));
        assert!(!can_transition(Completed, Cancelled));
        assert!(!can_transition(Cancelled, Completed));
        assert!(!can_transition(Completed, Rescheduled));
    }

    #[test]
    fn overlap_detection_uses_duration_windows() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let stamp = NaiveDateTime::new(date, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        let existing = meeting::Model {
            meeting_id: Uuid::new_v4(),
            meeting_date: date,
            meeting_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            duration_minutes: 30,
            status: MeetingStatus::Scheduled,
            agenda: String::new(),
            notes: String::new(),
            is_online: false,
            meeting_link: None,
            cancellation_reason: None,
            created_at: stamp,
            updated_at: stamp,
        };

        let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        assert!(overlaps(date, t(10, 15), 30, &existing));
        assert!(overlaps(date, t(9, 45), 30, &existing));
        assert!(!overlaps(date, t(10, 30), 30, &existing));
        assert!(!overlaps(date, t(9, 0), 60, &existing));

        let other_day = NaiveDate::from_ymd_opt(2026, 1, 16).unwrap();
        assert!(!overlaps(other_day, t(10, 0), 30, &existing));
    }
}
