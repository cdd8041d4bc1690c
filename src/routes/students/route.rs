use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use uuid::Uuid;

use super::dto::{
    CreateStudentRequest, StudentListResponse, StudentQueryParams, StudentResponse,
    UpdateStudentRequest,
};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::ServiceError;
use crate::extractor::AuthClaims;
use crate::repositories::{NewStudent, StudentRepository, StudentUpdate};
use crate::routes::auth::dto::MessageResponse;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/students", post(create_student))
        .route("/api/v1/students", get(get_all_students))
        .route("/api/v1/students/{student_id}", get(get_student))
        .route("/api/v1/students/{student_id}", put(update_student))
        .route("/api/v1/students/{student_id}", delete(delete_student))
}

fn can_manage_students(role: RoleEnum) -> bool {
    matches!(role, RoleEnum::Admin | RoleEnum::AdmissionOfficer)
}

/// Enroll a student (admin or admission officer). Course tracking is created
/// automatically when a course is assigned.
#[utoipa::path(
    post,
    path = "/api/v1/students",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn create_student(
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<StudentResponse>), ServiceError> {
    if !can_manage_students(claims.role) {
        return Err(ServiceError::PermissionDenied);
    }

    let (principal, profile) = StudentRepository::new()
        .create(NewStudent {
            name: payload.name,
            phone: payload.phone,
            email: payload.email,
            password: payload.password,
            course_id: payload.course_id,
            current_period: payload.current_period,
            status: payload.status,
            joining_date: payload.joining_date,
            gender: payload.gender,
            birth_date: payload.birth_date,
            temporary_address: payload.temporary_address,
            permanent_address: payload.permanent_address,
            parent_name: payload.parent_name,
            parent_phone: payload.parent_phone,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(StudentResponse::from_parts(principal, profile)),
    ))
}

/// Paginated student listing with course/status/search filters.
#[utoipa::path(
    get,
    path = "/api/v1/students",
    responses(
        (status = 200, description = "Students retrieved", body = StudentListResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn get_all_students(
    AuthClaims(claims): AuthClaims,
    Query(params): Query<StudentQueryParams>,
) -> Result<(StatusCode, Json<StudentListResponse>), ServiceError> {
    if !matches!(
        claims.role,
        RoleEnum::Admin | RoleEnum::AdmissionOfficer | RoleEnum::Teacher | RoleEnum::Hod
    ) {
        return Err(ServiceError::PermissionDenied);
    }

    let (rows, total) = StudentRepository::new()
        .find_all_with_pagination(
            params.page,
            params.page_size,
            params.course_id,
            params.status,
            params.search,
        )
        .await?;

    let response = StudentListResponse {
        students: rows
            .into_iter()
            .map(|(profile, principal)| StudentResponse::from_parts(principal, profile))
            .collect(),
        total,
        page: params.page,
        page_size: params.page_size,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// One student; students may fetch themselves, staff may fetch anyone.
#[utoipa::path(
    get,
    path = "/api/v1/students/{student_id}",
    params(("student_id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student retrieved", body = StudentResponse),
        (status = 404, description = "Student not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn get_student(
    AuthClaims(claims): AuthClaims,
    Path(student_id): Path<Uuid>,
) -> Result<(StatusCode, Json<StudentResponse>), ServiceError> {
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

    let (principal, profile) = StudentRepository::new()
        .find_with_profile(student_id)
        .await?
        .ok_or(ServiceError::NotFound("student"))?;

    Ok((
        StatusCode::OK,
        Json(StudentResponse::from_parts(principal, profile)),
    ))
}

/// Update a student; period writes go through the sync path.
#[utoipa::path(
    put,
    path = "/api/v1/students/{student_id}",
    params(("student_id" = Uuid, Path, description = "Student ID")),
    request_body = UpdateStudentRequest,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Student not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn update_student(
    AuthClaims(claims): AuthClaims,
    Path(student_id): Path<Uuid>,
    Json(payload): Json<UpdateStudentRequest>,
) -> Result<(StatusCode, Json<StudentResponse>), ServiceError> {
    if !can_manage_students(claims.role) {
        return Err(ServiceError::PermissionDenied);
    }

    let (principal, profile) = StudentRepository::new()
        .update(
            student_id,
            StudentUpdate {
                name: payload.name,
                email: payload.email,
                course_id: payload.course_id,
                current_period: payload.current_period,
                status: payload.status,
                joining_date: payload.joining_date,
            },
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(StudentResponse::from_parts(principal, profile)),
    ))
}

/// Delete a student (admin only). Denied while attendance records exist.
#[utoipa::path(
    delete,
    path = "/api/v1/students/{student_id}",
    params(("student_id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student deleted", body = MessageResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn delete_student(
    AuthClaims(claims): AuthClaims,
    Path(student_id): Path<Uuid>,
) -> Result<(StatusCode, Json<MessageResponse>), ServiceError> {
    if claims.role != RoleEnum::Admin {
        return Err(ServiceError::PermissionDenied);
    }

    StudentRepository::new().delete(student_id).await?;
    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            success: true,
            message: "Student deleted".to_string(),
        }),
    ))
}
