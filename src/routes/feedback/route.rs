use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use super::dto::{
    FeedbackListResponse, FeedbackResponse, InstituteFeedbackRequest,
    ParentTeacherFeedbackRequest, TeacherFeedbackRequest,
};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::ServiceError;
use crate::extractor::AuthClaims;
use crate::repositories::{FeedbackRepository, InstituteRepository, PrincipalRepository};

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/feedback/teacher", post(submit_teacher_feedback))
        .route("/api/v1/feedback/parent-teacher", post(submit_parent_feedback))
        .route("/api/v1/feedback/institute", post(submit_institute_feedback))
        .route("/api/v1/feedback/teacher/{teacher_id}", get(get_teacher_feedback))
}

/// Student feedback about a teacher; one row per (student, teacher),
/// re-submission overwrites it.
#[utoipa::path(
    post,
    path = "/api/v1/feedback/teacher",
    request_body = TeacherFeedbackRequest,
    responses(
        (status = 200, description = "Feedback stored", body = FeedbackResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Feedback"
)]
pub async fn submit_teacher_feedback(
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<TeacherFeedbackRequest>,
) -> Result<(StatusCode, Json<FeedbackResponse>), ServiceError> {
    if claims.role != RoleEnum::Student {
        return Err(ServiceError::PermissionDenied);
    }

    PrincipalRepository::new()
        .find_staff_profile(payload.teacher_id)
        .await?
        .ok_or(ServiceError::NotFound("teacher"))?;

    let feedback = FeedbackRepository::new()
        .upsert_teacher_feedback(
            claims.sub,
            payload.teacher_id,
            payload.rating,
            payload.feedback_text,
            payload.is_anonymous,
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(FeedbackResponse::from_model(feedback, &claims.name)),
    ))
}

/// Parent feedback about a teacher regarding a linked student.
#[utoipa::path(
    post,
    path = "/api/v1/feedback/parent-teacher",
    request_body = ParentTeacherFeedbackRequest,
    responses(
        (status = 200, description = "Feedback stored", body = FeedbackResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Feedback"
)]
pub async fn submit_parent_feedback(
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<ParentTeacherFeedbackRequest>,
) -> Result<(StatusCode, Json<FeedbackResponse>), ServiceError> {
    if claims.role != RoleEnum::Parent {
        return Err(ServiceError::PermissionDenied);
    }

    let feedback = FeedbackRepository::new()
        .upsert_parent_feedback(
            claims.sub,
            payload.teacher_id,
            payload.student_id,
            payload.rating,
            payload.feedback_text,
            payload.is_anonymous,
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(FeedbackResponse::from_model(feedback, &claims.name)),
    ))
}

/// Feedback about the institute from any authenticated role, keyed by
/// (actor, institute, type).
#[utoipa::path(
    post,
    path = "/api/v1/feedback/institute",
    request_body = InstituteFeedbackRequest,
    responses(
        (status = 200, description = "Feedback stored", body = FeedbackResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Feedback"
)]
pub async fn submit_institute_feedback(
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<InstituteFeedbackRequest>,
) -> Result<(StatusCode, Json<FeedbackResponse>), ServiceError> {
    let institute = InstituteRepository::new()
        .get_default()
        .await
        .map_err(ServiceError::Internal)?
        .ok_or(ServiceError::NotFound("institute"))?;

    let feedback = FeedbackRepository::new()
        .upsert_institute_feedback(
            claims.sub,
            institute.institute_id,
            payload.feedback_type,
            payload.rating,
            payload.feedback_text,
            payload.is_anonymous,
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(FeedbackResponse::from_model(feedback, &claims.name)),
    ))
}

/// Feedback received by a teacher (staff and admin only). Anonymous entries
/// are displayed as such.
#[utoipa::path(
    get,
    path = "/api/v1/feedback/teacher/{teacher_id}",
    params(("teacher_id" = Uuid, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Feedback retrieved", body = FeedbackListResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Feedback"
)]
pub async fn get_teacher_feedback(
    AuthClaims(claims): AuthClaims,
    Path(teacher_id): Path<Uuid>,
) -> Result<(StatusCode, Json<FeedbackListResponse>), ServiceError> {
    let self_access = claims.sub == teacher_id;
    if !(self_access || matches!(claims.role, RoleEnum::Admin | RoleEnum::Hod)) {
        return Err(ServiceError::PermissionDenied);
    }

    let rows = FeedbackRepository::new()
        .find_for_teacher(teacher_id)
        .await
        .map_err(ServiceError::Internal)?;

    let principal_repo = PrincipalRepository::new();
    let mut feedback = Vec::with_capacity(rows.len());
    for row in rows {
        let actor_name = match principal_repo.find_by_id(row.actor_id).await? {
            Some(actor) => actor.name,
            None => "Unknown".to_string(),
        };
        feedback.push(FeedbackResponse::from_model(row, &actor_name));
    }

    let response = FeedbackListResponse {
        total: feedback.len(),
        feedback,
    };
    Ok((StatusCode::OK, Json(response)))
}
