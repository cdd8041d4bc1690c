use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{get, post, put},
};
use uuid::Uuid;

use super::dto::{CourseListResponse, CourseResponse, CreateCourseRequest, UpdateCourseRequest};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::ServiceError;
use crate::extractor::AuthClaims;
use crate::repositories::CourseRepository;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/courses", post(create_course))
        .route("/api/v1/courses", get(get_all_courses))
        .route("/api/v1/courses/{course_id}", get(get_course))
        .route("/api/v1/courses/{course_id}", put(update_course))
}

/// Create a new course (admin only).
#[utoipa::path(
    post,
    path = "/api/v1/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn create_course(
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), ServiceError> {
    if claims.role != RoleEnum::Admin {
        return Err(ServiceError::PermissionDenied);
    }

    let course = CourseRepository::new()
        .create(
            payload.name,
            payload.code,
            payload.duration,
            payload.duration_unit,
            payload.description,
            payload.is_active,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(course.into())))
}

/// List courses (authenticated users).
#[utoipa::path(
    get,
    path = "/api/v1/courses",
    responses(
        (status = 200, description = "Courses retrieved", body = CourseListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn get_all_courses(
    AuthClaims(_claims): AuthClaims,
) -> Result<(StatusCode, Json<CourseListResponse>), ServiceError> {
    let courses = CourseRepository::new().find_all().await?;

    let response = CourseListResponse {
        total: courses.len(),
        courses: courses.into_iter().map(CourseResponse::from).collect(),
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Get one course by id.
#[utoipa::path(
    get,
    path = "/api/v1/courses/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course retrieved", body = CourseResponse),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn get_course(
    AuthClaims(_claims): AuthClaims,
    Path(course_id): Path<Uuid>,
) -> Result<(StatusCode, Json<CourseResponse>), ServiceError> {
    let course = CourseRepository::new()
        .find_by_id(course_id)
        .await?
        .ok_or(ServiceError::NotFound("course"))?;

    Ok((StatusCode::OK, Json(course.into())))
}

/// Update a course (admin only).
#[utoipa::path(
    put,
    path = "/api/v1/courses/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated", body = CourseResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn update_course(
    AuthClaims(claims): AuthClaims,
    Path(course_id): Path<Uuid>,
    Json(payload): Json<UpdateCourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), ServiceError> {
    if claims.role != RoleEnum::Admin {
        return Err(ServiceError::PermissionDenied);
    }

    let course = CourseRepository::new()
        .update(
            course_id,
            payload.name,
            payload.code,
            payload.description,
            payload.is_active,
        )
        .await?;

    Ok((StatusCode::OK, Json(course.into())))
}
