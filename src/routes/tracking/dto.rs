use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::course_tracking;
use crate::entities::sea_orm_active_enums::ProgressStatus;
use crate::utils::timeline;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GetOrCreateTrackingRequest {
    pub student_id: Uuid,
    pub course_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SetPeriodRequest {
    pub period: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompleteTrackingRequest {
    pub actual_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub admin_override: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DropTrackingRequest {
    #[serde(default)]
    pub admin_override: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TrackingResponse {
    pub tracking_id: String,
    pub student_id: String,
    pub course_id: String,
    pub start_date: NaiveDate,
    pub expected_end_date: NaiveDate,
    pub actual_end_date: Option<NaiveDate>,
    pub current_period: i32,
    pub period_start_date: NaiveDate,
    pub period_end_date: NaiveDate,
    pub completion_percentage: i32,
    pub remaining_days: i64,
    pub progress_status: ProgressStatus,
    pub notes: Option<String>,
}

impl From<course_tracking::Model> for TrackingResponse {
    fn from(model: course_tracking::Model) -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            tracking_id: model.tracking_id.to_string(),
            student_id: model.student_id.to_string(),
            course_id: model.course_id.to_string(),
            start_date: model.start_date,
            expected_end_date: model.expected_end_date,
            actual_end_date: model.actual_end_date,
            current_period: model.current_period,
            period_start_date: model.period_start_date,
            period_end_date: model.period_end_date,
            completion_percentage: model.completion_percentage,
            remaining_days: timeline::remaining_days(model.expected_end_date, today),
            progress_status: model.progress_status,
            notes: model.notes,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TrackingListResponse {
    pub total: usize,
    pub trackings: Vec<TrackingResponse>,
}
