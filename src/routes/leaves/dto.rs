use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::leave_request;
use crate::entities::sea_orm_active_enums::{LeaveKind, LeaveStatus};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitLeaveRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LeaveResponse {
    pub leave_id: String,
    pub kind: LeaveKind,
    pub principal_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub message: String,
    pub status: LeaveStatus,
}

impl From<leave_request::Model> for LeaveResponse {
    fn from(model: leave_request::Model) -> Self {
        Self {
            leave_id: model.leave_id.to_string(),
            kind: model.kind,
            principal_id: model.principal_id.to_string(),
            start_date: model.start_date,
            end_date: model.end_date,
            message: model.message,
            status: model.status,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LeaveListResponse {
    pub total: usize,
    pub leaves: Vec<LeaveResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PendingLeaveParams {
    pub kind: LeaveKind,
}
