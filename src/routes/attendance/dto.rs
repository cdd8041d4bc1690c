use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::attendance_session;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitAttendanceRequest {
    pub routine_id: Uuid,
    pub date: NaiveDate,
    #[serde(default = "default_true")]
    pub teacher_attended: bool,
    #[serde(default = "default_true")]
    pub class_held: bool,
    /// student id -> present flag. Unknown ids are dropped silently; omitted
    /// students keep their existing records.
    #[serde(default)]
    pub student_flags: HashMap<Uuid, bool>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub session_id: String,
    pub routine_id: String,
    pub date: NaiveDate,
    pub teacher_attended: bool,
    pub class_held: bool,
    pub present: u64,
    pub total: u64,
}

impl SessionResponse {
    pub fn from_session(session: attendance_session::Model, present: u64, total: u64) -> Self {
        Self {
            session_id: session.session_id.to_string(),
            routine_id: session.routine_id.to_string(),
            date: session.date,
            teacher_attended: session.teacher_attended,
            class_held: session.class_held,
            present,
            total,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitAttendanceResponse {
    pub success: bool,
    pub message: String,
    pub session: SessionResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EligibleStudent {
    pub student_id: String,
    pub name: String,
    pub current_period: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EligibleStudentsResponse {
    pub total: usize,
    pub students: Vec<EligibleStudent>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentRollupResponse {
    pub student_id: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub present: u64,
    pub total: u64,
    pub rate: f64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RollupWindowParams {
    pub from: NaiveDate,
    pub to: NaiveDate,
}
