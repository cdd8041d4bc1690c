use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use super::dto::{LeaveListResponse, LeaveResponse, PendingLeaveParams, SubmitLeaveRequest};
use crate::entities::sea_orm_active_enums::{LeaveKind, RoleEnum};
use crate::error::ServiceError;
use crate::extractor::AuthClaims;
use crate::repositories::LeaveRepository;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/leaves", post(submit_leave))
        .route("/api/v1/leaves/mine", get(get_my_leaves))
        .route("/api/v1/leaves/pending", get(get_pending_leaves))
        .route("/api/v1/leaves/{leave_id}/approve", post(approve_leave))
        .route("/api/v1/leaves/{leave_id}/reject", post(reject_leave))
}

fn leave_kind_for(role: RoleEnum) -> Option<LeaveKind> {
    match role {
        RoleEnum::Student => Some(LeaveKind::Student),
        RoleEnum::Teacher | RoleEnum::Hod | RoleEnum::AdmissionOfficer => Some(LeaveKind::Staff),
        RoleEnum::Parent | RoleEnum::Admin => None,
    }
}

/// Submit a leave request; the kind follows the caller's role.
#[utoipa::path(
    post,
    path = "/api/v1/leaves",
    request_body = SubmitLeaveRequest,
    responses(
        (status = 201, description = "Leave submitted", body = LeaveResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Leaves"
)]
pub async fn submit_leave(
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<SubmitLeaveRequest>,
) -> Result<(StatusCode, Json<LeaveResponse>), ServiceError> {
    let kind = leave_kind_for(claims.role).ok_or(ServiceError::PermissionDenied)?;

    let leave = LeaveRepository::new()
        .submit(
            kind,
            claims.sub,
            payload.start_date,
            payload.end_date,
            payload.message,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(leave.into())))
}

/// The caller's leave history.
#[utoipa::path(
    get,
    path = "/api/v1/leaves/mine",
    responses(
        (status = 200, description = "Leaves retrieved", body = LeaveListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Leaves"
)]
pub async fn get_my_leaves(
    AuthClaims(claims): AuthClaims,
) -> Result<(StatusCode, Json<LeaveListResponse>), ServiceError> {
    let leaves = LeaveRepository::new()
        .find_by_principal(claims.sub)
        .await
        .map_err(ServiceError::Internal)?;

    let response = LeaveListResponse {
        total: leaves.len(),
        leaves: leaves.into_iter().map(LeaveResponse::from).collect(),
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Pending leave requests awaiting a decision (HOD: student, admin: staff).
#[utoipa::path(
    get,
    path = "/api/v1/leaves/pending",
    params(("kind" = LeaveKind, Query, description = "Leave kind")),
    responses(
        (status = 200, description = "Pending leaves", body = LeaveListResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Leaves"
)]
pub async fn get_pending_leaves(
    AuthClaims(claims): AuthClaims,
    Query(params): Query<PendingLeaveParams>,
) -> Result<(StatusCode, Json<LeaveListResponse>), ServiceError> {
    if !crate::repositories::leave_repository::can_decide(params.kind, claims.role) {
        return Err(ServiceError::PermissionDenied);
    }

    let leaves = LeaveRepository::new()
        .find_pending(params.kind)
        .await
        .map_err(ServiceError::Internal)?;

    let response = LeaveListResponse {
        total: leaves.len(),
        leaves: leaves.into_iter().map(LeaveResponse::from).collect(),
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Approve a pending leave.
#[utoipa::path(
    post,
    path = "/api/v1/leaves/{leave_id}/approve",
    params(("leave_id" = Uuid, Path, description = "Leave ID")),
    responses(
        (status = 200, description = "Leave approved", body = LeaveResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Leaves"
)]
pub async fn approve_leave(
    AuthClaims(claims): AuthClaims,
    Path(leave_id): Path<Uuid>,
) -> Result<(StatusCode, Json<LeaveResponse>), ServiceError> {
    let leave = LeaveRepository::new()
        .decide(leave_id, claims.role, true)
        .await?;
    Ok((StatusCode::OK, Json(leave.into())))
}

/// Reject a pending leave; no reason is required.
#[utoipa::path(
    post,
    path = "/api/v1/leaves/{leave_id}/reject",
    params(("leave_id" = Uuid, Path, description = "Leave ID")),
    responses(
        (status = 200, description = "Leave rejected", body = LeaveResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Leaves"
)]
pub async fn reject_leave(
    AuthClaims(claims): AuthClaims,
    Path(leave_id): Path<Uuid>,
) -> Result<(StatusCode, Json<LeaveResponse>), ServiceError> {
    let leave = LeaveRepository::new()
        .decide(leave_id, claims.role, false)
        .await?;
    Ok((StatusCode::OK, Json(leave.into())))
}
