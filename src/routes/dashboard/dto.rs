use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::routes::attendance::dto::SessionResponse;
use crate::routes::tracking::dto::TrackingResponse;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentDashboardResponse {
    pub tracking: Option<TrackingResponse>,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Present/total over the last 30 days.
    pub attendance_present: u64,
    pub attendance_total: u64,
    pub attendance_rate: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TeacherDashboardResponse {
    pub date: NaiveDate,
    pub sessions: Vec<SessionResponse>,
    /// Students marked present today across the teacher's sessions.
    pub present_today: u64,
}
