use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::meeting;
use crate::entities::sea_orm_active_enums::MeetingStatus;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScheduleMeetingRequest {
    pub meeting_date: NaiveDate,
    pub meeting_time: NaiveTime,
    #[serde(default = "default_duration")]
    pub duration_minutes: i32,
    #[serde(default)]
    pub agenda: String,
    #[serde(default)]
    pub is_online: bool,
    pub meeting_link: Option<String>,
}

fn default_duration() -> i32 {
    30
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RescheduleMeetingRequest {
    pub meeting_date: NaiveDate,
    pub meeting_time: NaiveTime,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompleteMeetingRequest {
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CancelMeetingRequest {
    pub reason: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeetingResponse {
    pub meeting_id: String,
    pub meeting_date: NaiveDate,
    pub meeting_time: NaiveTime,
    pub duration_minutes: i32,
    pub status: MeetingStatus,
    pub agenda: String,
    pub notes: String,
    pub is_online: bool,
    pub meeting_link: Option<String>,
    pub cancellation_reason: Option<String>,
}

impl From<meeting::Model> for MeetingResponse {
    fn from(model: meeting::Model) -> Self {
        Self {
            meeting_id: model.meeting_id.to_string(),
            meeting_date: model.meeting_date,
            meeting_time: model.meeting_time,
            duration_minutes: model.duration_minutes,
            status: model.status,
            agenda: model.agenda,
            notes: model.notes,
            is_online: model.is_online,
            meeting_link: model.meeting_link,
            cancellation_reason: model.cancellation_reason,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeetingListResponse {
    pub total: usize,
    pub meetings: Vec<MeetingResponse>,
}
