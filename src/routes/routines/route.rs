use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{delete, get, patch, post},
};
use uuid::Uuid;

use super::dto::{
    CreateRoutineRequest, RoutineListResponse, RoutineResponse, SetActiveRequest,
};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::ServiceError;
use crate::extractor::AuthClaims;
use crate::repositories::RoutineRepository;
use crate::routes::auth::dto::MessageResponse;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/routines", post(create_routine))
        .route("/api/v1/routines/mine", get(get_my_routines))
        .route("/api/v1/routines/{routine_id}", delete(delete_routine))
        .route("/api/v1/routines/{routine_id}/active", patch(set_active))
        .route(
            "/api/v1/courses/{course_id}/periods/{period_index}/routines",
            get(get_course_routines),
        )
}

/// Create a routine (admin or HOD).
#[utoipa::path(
    post,
    path = "/api/v1/routines",
    request_body = CreateRoutineRequest,
    responses(
        (status = 201, description = "Routine created", body = RoutineResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Routines"
)]
pub async fn create_routine(
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<CreateRoutineRequest>,
) -> Result<(StatusCode, Json<RoutineResponse>), ServiceError> {
    if !matches!(claims.role, RoleEnum::Admin | RoleEnum::Hod) {
        return Err(ServiceError::PermissionDenied);
    }

    let routine = RoutineRepository::new()
        .create(
            payload.course_id,
            payload.subject_id,
            payload.teacher_id,
            payload.start_time,
            payload.end_time,
            payload.period_index,
            payload.is_active,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(routine.into())))
}

/// The calling teacher's active routines.
#[utoipa::path(
    get,
    path = "/api/v1/routines/mine",
    responses(
        (status = 200, description = "Routines retrieved", body = RoutineListResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Routines"
)]
pub async fn get_my_routines(
    AuthClaims(claims): AuthClaims,
) -> Result<(StatusCode, Json<RoutineListResponse>), ServiceError> {
    if !matches!(claims.role, RoleEnum::Teacher | RoleEnum::Hod) {
        return Err(ServiceError::PermissionDenied);
    }

    let routines = RoutineRepository::new()
        .find_active_by_teacher(claims.sub)
        .await?;

    let response = RoutineListResponse {
        total: routines.len(),
        routines: routines.into_iter().map(RoutineResponse::from).collect(),
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Active routines of a course period.
#[utoipa::path(
    get,
    path = "/api/v1/courses/{course_id}/periods/{period_index}/routines",
    params(
        ("course_id" = Uuid, Path, description = "Course ID"),
        ("period_index" = i32, Path, description = "Period index")
    ),
    responses(
        (status = 200, description = "Routines retrieved", body = RoutineListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Routines"
)]
pub async fn get_course_routines(
    AuthClaims(_claims): AuthClaims,
    Path((course_id, period_index)): Path<(Uuid, i32)>,
) -> Result<(StatusCode, Json<RoutineListResponse>), ServiceError> {
    let routines = RoutineRepository::new()
        .find_by_course_and_period(course_id, period_index)
        .await?;

    let response = RoutineListResponse {
        total: routines.len(),
        routines: routines.into_iter().map(RoutineResponse::from).collect(),
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Activate or deactivate a routine (admin or HOD).
#[utoipa::path(
    patch,
    path = "/api/v1/routines/{routine_id}/active",
    params(("routine_id" = Uuid, Path, description = "Routine ID")),
    request_body = SetActiveRequest,
    responses(
        (status = 200, description = "Routine updated", body = RoutineResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Routines"
)]
pub async fn set_active(
    AuthClaims(claims): AuthClaims,
    Path(routine_id): Path<Uuid>,
    Json(payload): Json<SetActiveRequest>,
) -> Result<(StatusCode, Json<RoutineResponse>), ServiceError> {
    if !matches!(claims.role, RoleEnum::Admin | RoleEnum::Hod) {
        return Err(ServiceError::PermissionDenied);
    }

    let routine = RoutineRepository::new()
        .set_active(routine_id, payload.is_active)
        .await?;
    Ok((StatusCode::OK, Json(routine.into())))
}

/// Delete a routine (admin only); denied once sessions reference it.
#[utoipa::path(
    delete,
    path = "/api/v1/routines/{routine_id}",
    params(("routine_id" = Uuid, Path, description = "Routine ID")),
    responses(
        (status = 200, description = "Routine deleted", body = MessageResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Routines"
)]
pub async fn delete_routine(
    AuthClaims(claims): AuthClaims,
    Path(routine_id): Path<Uuid>,
) -> Result<(StatusCode, Json<MessageResponse>), ServiceError> {
    if claims.role != RoleEnum::Admin {
        return Err(ServiceError::PermissionDenied);
    }

    RoutineRepository::new().delete(routine_id).await?;
    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            success: true,
            message: "Routine deleted".to_string(),
        }),
    ))
}
