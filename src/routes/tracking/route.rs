use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{get, post, put},
};
use uuid::Uuid;

use super::dto::{
    CompleteTrackingRequest, DropTrackingRequest, GetOrCreateTrackingRequest, SetPeriodRequest,
    TrackingListResponse, TrackingResponse,
};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::ServiceError;
use crate::extractor::AuthClaims;
use crate::repositories::{CourseTrackingRepository, StudentRepository};

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/tracking", post(get_or_create_tracking))
        .route("/api/v1/tracking/students/{student_id}", get(get_student_trackings))
        .route("/api/v1/tracking/{tracking_id}/period", put(set_period))
        .route("/api/v1/tracking/{tracking_id}/advance", post(advance_period))
        .route("/api/v1/tracking/{tracking_id}/recompute", post(recompute))
        .route("/api/v1/tracking/{tracking_id}/complete", post(complete))
        .route("/api/v1/tracking/{tracking_id}/drop", post(drop_tracking))
}

/// Fetch or create the tracking for (student, course).
#[utoipa::path(
    post,
    path = "/api/v1/tracking",
    request_body = GetOrCreateTrackingRequest,
    responses(
        (status = 200, description = "Tracking", body = TrackingResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Course Tracking"
)]
pub async fn get_or_create_tracking(
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<GetOrCreateTrackingRequest>,
) -> Result<(StatusCode, Json<TrackingResponse>), ServiceError> {
    if !matches!(
        claims.role,
        RoleEnum::Admin | RoleEnum::AdmissionOfficer | RoleEnum::Hod
    ) {
        return Err(ServiceError::PermissionDenied);
    }

    let tracking = CourseTrackingRepository::new()
        .get_or_create(payload.student_id, payload.course_id)
        .await?;
    Ok((StatusCode::OK, Json(tracking.into())))
}

/// All trackings of a student, newest first. Students see their own history,
/// parents their children's.
#[utoipa::path(
    get,
    path = "/api/v1/tracking/students/{student_id}",
    params(("student_id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Trackings", body = TrackingListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Course Tracking"
)]
pub async fn get_student_trackings(
    AuthClaims(claims): AuthClaims,
    Path(student_id): Path<Uuid>,
) -> Result<(StatusCode, Json<TrackingListResponse>), ServiceError> {
    let self_access = claims.role == RoleEnum::Student && claims.sub == student_id;
    let parent_access = claims.role == RoleEnum::Parent
        && StudentRepository::new()
            .is_parent_of(claims.sub, student_id)
            .await?;
    let staff_access = matches!(
        claims.role,
        RoleEnum::Admin | RoleEnum::AdmissionOfficer | RoleEnum::Teacher | RoleEnum::Hod
    );
    if !(self_access || parent_access || staff_access) {
        return Err(ServiceError::PermissionDenied);
    }

    let trackings = CourseTrackingRepository::new()
        .find_all_by_student(student_id)
        .await
        .map_err(ServiceError::Internal)?;

    let response = TrackingListResponse {
        total: trackings.len(),
        trackings: trackings.into_iter().map(TrackingResponse::from).collect(),
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Set the current period; the student row is updated in the same
/// transaction.
#[utoipa::path(
    put,
    path = "/api/v1/tracking/{tracking_id}/period",
    params(("tracking_id" = Uuid, Path, description = "Tracking ID")),
    request_body = SetPeriodRequest,
    responses(
        (status = 200, description = "Tracking updated", body = TrackingResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Course Tracking"
)]
pub async fn set_period(
    AuthClaims(claims): AuthClaims,
    Path(tracking_id): Path<Uuid>,
    Json(payload): Json<SetPeriodRequest>,
) -> Result<(StatusCode, Json<TrackingResponse>), ServiceError> {
    if !matches!(claims.role, RoleEnum::Admin | RoleEnum::Hod) {
        return Err(ServiceError::PermissionDenied);
    }

    let tracking = CourseTrackingRepository::new()
        .set_current_period(tracking_id, payload.period)
        .await?;
    Ok((StatusCode::OK, Json(tracking.into())))
}

/// Advance to the next period.
#[utoipa::path(
    post,
    path = "/api/v1/tracking/{tracking_id}/advance",
    params(("tracking_id" = Uuid, Path, description = "Tracking ID")),
    responses(
        (status = 200, description = "Tracking updated", body = TrackingResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Course Tracking"
)]
pub async fn advance_period(
    AuthClaims(claims): AuthClaims,
    Path(tracking_id): Path<Uuid>,
) -> Result<(StatusCode, Json<TrackingResponse>), ServiceError> {
    if !matches!(claims.role, RoleEnum::Admin | RoleEnum::Hod) {
        return Err(ServiceError::PermissionDenied);
    }

    let tracking = CourseTrackingRepository::new().advance_period(tracking_id).await?;
    Ok((StatusCode::OK, Json(tracking.into())))
}

/// Recompute the completion percentage from today's date.
#[utoipa::path(
    post,
    path = "/api/v1/tracking/{tracking_id}/recompute",
    params(("tracking_id" = Uuid, Path, description = "Tracking ID")),
    responses(
        (status = 200, description = "Tracking updated", body = TrackingResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Course Tracking"
)]
pub async fn recompute(
    AuthClaims(_claims): AuthClaims,
    Path(tracking_id): Path<Uuid>,
) -> Result<(StatusCode, Json<TrackingResponse>), ServiceError> {
    let tracking = CourseTrackingRepository::new()
        .recompute_completion(tracking_id)
        .await?;
    Ok((StatusCode::OK, Json(tracking.into())))
}

/// Mark the tracking completed (admin only).
#[utoipa::path(
    post,
    path = "/api/v1/tracking/{tracking_id}/complete",
    params(("tracking_id" = Uuid, Path, description = "Tracking ID")),
    request_body = CompleteTrackingRequest,
    responses(
        (status = 200, description = "Tracking completed", body = TrackingResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Course Tracking"
)]
pub async fn complete(
    AuthClaims(claims): AuthClaims,
    Path(tracking_id): Path<Uuid>,
    Json(payload): Json<CompleteTrackingRequest>,
) -> Result<(StatusCode, Json<TrackingResponse>), ServiceError> {
    if claims.role != RoleEnum::Admin {
        return Err(ServiceError::PermissionDenied);
    }

    let tracking = CourseTrackingRepository::new()
        .complete(tracking_id, payload.actual_end_date, payload.admin_override)
        .await?;
    Ok((StatusCode::OK, Json(tracking.into())))
}

/// Mark the tracking dropped (admin only).
#[utoipa::path(
    post,
    path = "/api/v1/tracking/{tracking_id}/drop",
    params(("tracking_id" = Uuid, Path, description = "Tracking ID")),
    request_body = DropTrackingRequest,
    responses(
        (status = 200, description = "Tracking dropped", body = TrackingResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Course Tracking"
)]
pub async fn drop_tracking(
    AuthClaims(claims): AuthClaims,
    Path(tracking_id): Path<Uuid>,
    Json(payload): Json<DropTrackingRequest>,
) -> Result<(StatusCode, Json<TrackingResponse>), ServiceError> {
    if claims.role != RoleEnum::Admin {
        return Err(ServiceError::PermissionDenied);
    }

    let tracking = CourseTrackingRepository::new()
        .drop_tracking(tracking_id, payload.admin_override)
        .await?;
    Ok((StatusCode::OK, Json(tracking.into())))
}
