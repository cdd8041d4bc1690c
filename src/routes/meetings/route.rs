use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use super::dto::{
    CancelMeetingRequest, CompleteMeetingRequest, MeetingListResponse, MeetingResponse,
    RescheduleMeetingRequest, ScheduleMeetingRequest,
};
use crate::entities::meeting;
use crate::entities::sea_orm_active_enums::{DeviceUserType, RoleEnum};
use crate::error::ServiceError;
use crate::extractor::AuthClaims;
use crate::notifications;
use crate::repositories::{DeviceTokenRepository, MeetingRepository};

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/meetings", post(schedule_meeting))
        .route("/api/v1/meetings", get(get_all_meetings))
        .route("/api/v1/meetings/{meeting_id}/reschedule", post(reschedule_meeting))
        .route("/api/v1/meetings/{meeting_id}/complete", post(complete_meeting))
        .route("/api/v1/meetings/{meeting_id}/cancel", post(cancel_meeting))
}

fn can_manage_meetings(role: RoleEnum) -> bool {
    matches!(role, RoleEnum::Admin | RoleEnum::Hod)
}

/// Fan out a meeting notification to parent and teacher devices. Fired after
/// the transition has committed; failures never propagate.
fn notify_meeting(title: String, body: String) {
    tokio::spawn(async move {
        let tokens = match DeviceTokenRepository::new()
            .active_tokens_for_user_types(&[DeviceUserType::Parent, DeviceUserType::Teacher])
            .await
        {
            Ok(tokens) => tokens,
            Err(err) => {
                tracing::error!("Failed to load meeting notification tokens: {}", err);
                return;
            }
        };
        notifications::send_push_notification(&title, &body, tokens).await;
    });
}

fn when(meeting: &meeting::Model) -> String {
    format!("{} at {}", meeting.meeting_date, meeting.meeting_time)
}

/// Schedule a parent-teacher meeting (HOD or admin).
#[utoipa::path(
    post,
    path = "/api/v1/meetings",
    request_body = ScheduleMeetingRequest,
    responses(
        (status = 201, description = "Meeting scheduled", body = MeetingResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Meetings"
)]
pub async fn schedule_meeting(
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<ScheduleMeetingRequest>,
) -> Result<(StatusCode, Json<MeetingResponse>), ServiceError> {
    if !can_manage_meetings(claims.role) {
        return Err(ServiceError::PermissionDenied);
    }

    let meeting = MeetingRepository::new()
        .schedule(
            payload.meeting_date,
            payload.meeting_time,
            payload.duration_minutes,
            payload.agenda,
            payload.is_online,
            payload.meeting_link,
        )
        .await?;

    let mut body = format!(
        "A parent-teacher meeting has been scheduled for {}.",
        when(&meeting)
    );
    if meeting.is_online {
        body.push_str(" This is an online meeting.");
    }
    notify_meeting("New Parent-Teacher Meeting Scheduled".to_string(), body);

    Ok((StatusCode::CREATED, Json(meeting.into())))
}

/// List all meetings, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/meetings",
    responses(
        (status = 200, description = "Meetings retrieved", body = MeetingListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Meetings"
)]
pub async fn get_all_meetings(
    AuthClaims(_claims): AuthClaims,
) -> Result<(StatusCode, Json<MeetingListResponse>), ServiceError> {
    let meetings = MeetingRepository::new()
        .find_all()
        .await
        .map_err(ServiceError::Internal)?;

    let response = MeetingListResponse {
        total: meetings.len(),
        meetings: meetings.into_iter().map(MeetingResponse::from).collect(),
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Move a meeting to a strictly-future slot.
#[utoipa::path(
    post,
    path = "/api/v1/meetings/{meeting_id}/reschedule",
    params(("meeting_id" = Uuid, Path, description = "Meeting ID")),
    request_body = RescheduleMeetingRequest,
    responses(
        (status = 200, description = "Meeting rescheduled", body = MeetingResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Meetings"
)]
pub async fn reschedule_meeting(
    AuthClaims(claims): AuthClaims,
    Path(meeting_id): Path<Uuid>,
    Json(payload): Json<RescheduleMeetingRequest>,
) -> Result<(StatusCode, Json<MeetingResponse>), ServiceError> {
    if !can_manage_meetings(claims.role) {
        return Err(ServiceError::PermissionDenied);
    }

    let meeting = MeetingRepository::new()
        .reschedule(meeting_id, payload.meeting_date, payload.meeting_time)
        .await?;

    notify_meeting(
        "Parent-Teacher Meeting Rescheduled".to_string(),
        format!(
            "The parent-teacher meeting has been rescheduled to {}.",
            when(&meeting)
        ),
    );

    Ok((StatusCode::OK, Json(meeting.into())))
}

/// Mark a meeting completed.
#[utoipa::path(
    post,
    path = "/api/v1/meetings/{meeting_id}/complete",
    params(("meeting_id" = Uuid, Path, description = "Meeting ID")),
    request_body = CompleteMeetingRequest,
    responses(
        (status = 200, description = "Meeting completed", body = MeetingResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Meetings"
)]
pub async fn complete_meeting(
    AuthClaims(claims): AuthClaims,
    Path(meeting_id): Path<Uuid>,
    Json(payload): Json<CompleteMeetingRequest>,
) -> Result<(StatusCode, Json<MeetingResponse>), ServiceError> {
    if !can_manage_meetings(claims.role) {
        return Err(ServiceError::PermissionDenied);
    }

    let meeting = MeetingRepository::new()
        .complete(meeting_id, payload.notes)
        .await?;

    notify_meeting(
        "Parent-Teacher Meeting Completed".to_string(),
        format!(
            "The parent-teacher meeting scheduled for {} has been marked as completed.",
            when(&meeting)
        ),
    );

    Ok((StatusCode::OK, Json(meeting.into())))
}

/// Cancel a meeting; a reason is required.
#[utoipa::path(
    post,
    path = "/api/v1/meetings/{meeting_id}/cancel",
    params(("meeting_id" = Uuid, Path, description = "Meeting ID")),
    request_body = CancelMeetingRequest,
    responses(
        (status = 200, description = "Meeting cancelled", body = MeetingResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Meetings"
)]
pub async fn cancel_meeting(
    AuthClaims(claims): AuthClaims,
    Path(meeting_id): Path<Uuid>,
    Json(payload): Json<CancelMeetingRequest>,
) -> Result<(StatusCode, Json<MeetingResponse>), ServiceError> {
    if !can_manage_meetings(claims.role) {
        return Err(ServiceError::PermissionDenied);
    }

    let meeting = MeetingRepository::new()
        .cancel(meeting_id, payload.reason)
        .await?;

    let mut body = format!("The meeting for {} has been cancelled.", when(&meeting));
    if let Some(reason) = &meeting.cancellation_reason {
        body.push_str(&format!(" Reason: {}", reason));
    }
    notify_meeting("Parent-Teacher Meeting Cancelled".to_string(), body);

    Ok((StatusCode::OK, Json(meeting.into())))
}
