use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::routine;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateRoutineRequest {
    pub course_id: Uuid,
    pub subject_id: Uuid,
    pub teacher_id: Uuid,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub period_index: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoutineResponse {
    pub routine_id: String,
    pub course_id: String,
    pub subject_id: String,
    pub teacher_id: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub period_index: i32,
    pub is_active: bool,
}

impl From<routine::Model> for RoutineResponse {
    fn from(model: routine::Model) -> Self {
        Self {
            routine_id: model.routine_id.to_string(),
            course_id: model.course_id.to_string(),
            subject_id: model.subject_id.to_string(),
            teacher_id: model.teacher_id.to_string(),
            start_time: model.start_time,
            end_time: model.end_time,
            period_index: model.period_index,
            is_active: model.is_active,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoutineListResponse {
    pub total: usize,
    pub routines: Vec<RoutineResponse>,
}
