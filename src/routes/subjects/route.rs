use axum::{
    Json, Router,
    extract::{Multipart, Path, Query},
    http::StatusCode,
    routing::{delete, get, post},
};
use uuid::Uuid;

use super::dto::{
    CreateSubjectRequest, SubjectListResponse, SubjectQueryParams, SubjectResponse,
};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::ServiceError;
use crate::extractor::AuthClaims;
use crate::repositories::SubjectRepository;
use crate::routes::auth::dto::MessageResponse;
use crate::utils::upload;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/subjects", post(create_subject))
        .route("/api/v1/subjects/{subject_id}", get(get_subject))
        .route("/api/v1/subjects/{subject_id}", delete(delete_subject))
        .route("/api/v1/subjects/{subject_id}/syllabus", post(upload_syllabus))
        .route("/api/v1/courses/{course_id}/subjects", get(get_course_subjects))
}

/// Create a subject inside a course (admin or HOD).
#[utoipa::path(
    post,
    path = "/api/v1/subjects",
    request_body = CreateSubjectRequest,
    responses(
        (status = 201, description = "Subject created", body = SubjectResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
pub async fn create_subject(
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<CreateSubjectRequest>,
) -> Result<(StatusCode, Json<SubjectResponse>), ServiceError> {
    if !matches!(claims.role, RoleEnum::Admin | RoleEnum::Hod) {
        return Err(ServiceError::PermissionDenied);
    }

    let subject = SubjectRepository::new()
        .create(
            payload.course_id,
            payload.name,
            payload.code,
            payload.period_index,
            None,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(subject.into())))
}

/// Get one subject.
#[utoipa::path(
    get,
    path = "/api/v1/subjects/{subject_id}",
    params(("subject_id" = Uuid, Path, description = "Subject ID")),
    responses(
        (status = 200, description = "Subject retrieved", body = SubjectResponse),
        (status = 404, description = "Subject not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
pub async fn get_subject(
    AuthClaims(_claims): AuthClaims,
    Path(subject_id): Path<Uuid>,
) -> Result<(StatusCode, Json<SubjectResponse>), ServiceError> {
    let subject = SubjectRepository::new()
        .find_by_id(subject_id)
        .await?
        .ok_or(ServiceError::NotFound("subject"))?;
    Ok((StatusCode::OK, Json(subject.into())))
}

/// Subjects of a course, optionally narrowed to one period.
#[utoipa::path(
    get,
    path = "/api/v1/courses/{course_id}/subjects",
    params(
        ("course_id" = Uuid, Path, description = "Course ID"),
        ("period_index" = Option<i32>, Query, description = "Filter by period")
    ),
    responses(
        (status = 200, description = "Subjects retrieved", body = SubjectListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
pub async fn get_course_subjects(
    AuthClaims(_claims): AuthClaims,
    Path(course_id): Path<Uuid>,
    Query(params): Query<SubjectQueryParams>,
) -> Result<(StatusCode, Json<SubjectListResponse>), ServiceError> {
    let subjects = SubjectRepository::new()
        .find_by_course(course_id, params.period_index)
        .await?;

    let response = SubjectListResponse {
        total: subjects.len(),
        subjects: subjects.into_iter().map(SubjectResponse::from).collect(),
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Upload a syllabus PDF for a subject (teacher, HOD or admin). The stored
/// file is released again if the subject row update fails.
#[utoipa::path(
    post,
    path = "/api/v1/subjects/{subject_id}/syllabus",
    params(("subject_id" = Uuid, Path, description = "Subject ID")),
    responses(
        (status = 200, description = "Syllabus uploaded", body = SubjectResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
pub async fn upload_syllabus(
    AuthClaims(claims): AuthClaims,
    Path(subject_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<SubjectResponse>), ServiceError> {
    if !matches!(claims.role, RoleEnum::Teacher | RoleEnum::Hod | RoleEnum::Admin) {
        return Err(ServiceError::PermissionDenied);
    }

    let mut file_name = String::new();
    let mut file_bytes: Vec<u8> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ServiceError::Validation(format!("invalid multipart body: {err}")))?
    {
        if field.name() == Some("file") {
            file_name = field.file_name().unwrap_or("syllabus.pdf").to_string();
            file_bytes = field
                .bytes()
                .await
                .map_err(|err| ServiceError::Validation(format!("failed to read file: {err}")))?
                .to_vec();
        }
    }

    if file_bytes.is_empty() {
        return Err(ServiceError::Validation("file field is required".to_string()));
    }

    let stored_path = upload::store(
        "subject_syllabus",
        &file_name,
        &file_bytes,
        upload::ALLOWED_DOCUMENT_TYPES,
        upload::MAX_DOCUMENT_SIZE,
    )
    .await?;

    let updated = SubjectRepository::new()
        .set_syllabus(subject_id, Some(stored_path.clone()))
        .await;

    match updated {
        Ok(subject) => Ok((StatusCode::OK, Json(subject.into()))),
        Err(err) => {
            upload::cleanup(&stored_path).await;
            Err(err)
        }
    }
}

/// Delete a subject (admin only); denied while routines reference it.
#[utoipa::path(
    delete,
    path = "/api/v1/subjects/{subject_id}",
    params(("subject_id" = Uuid, Path, description = "Subject ID")),
    responses(
        (status = 200, description = "Subject deleted", body = MessageResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
pub async fn delete_subject(
    AuthClaims(claims): AuthClaims,
    Path(subject_id): Path<Uuid>,
) -> Result<(StatusCode, Json<MessageResponse>), ServiceError> {
    if claims.role != RoleEnum::Admin {
        return Err(ServiceError::PermissionDenied);
    }

    SubjectRepository::new().delete(subject_id).await?;
    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            success: true,
            message: "Subject deleted".to_string(),
        }),
    ))
}
