use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use super::dto::{BatchListResponse, BatchResponse, CreateBatchRequest};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::ServiceError;
use crate::extractor::AuthClaims;
use crate::repositories::BatchRepository;
use crate::routes::auth::dto::MessageResponse;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/batches", post(create_batch))
        .route("/api/v1/batches", get(get_all_batches))
        .route(
            "/api/v1/batches/{batch_id}/students/{student_id}",
            post(assign_student),
        )
}

/// Create a batch (admin or admission officer).
#[utoipa::path(
    post,
    path = "/api/v1/batches",
    request_body = CreateBatchRequest,
    responses(
        (status = 201, description = "Batch created", body = BatchResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Batches"
)]
pub async fn create_batch(
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<CreateBatchRequest>,
) -> Result<(StatusCode, Json<BatchResponse>), ServiceError> {
    if !matches!(claims.role, RoleEnum::Admin | RoleEnum::AdmissionOfficer) {
        return Err(ServiceError::PermissionDenied);
    }

    let batch = BatchRepository::new()
        .create(payload.name, payload.year, payload.is_active)
        .await?;
    Ok((StatusCode::CREATED, Json(batch.into())))
}

/// List batches.
#[utoipa::path(
    get,
    path = "/api/v1/batches",
    responses(
        (status = 200, description = "Batches retrieved", body = BatchListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Batches"
)]
pub async fn get_all_batches(
    AuthClaims(_claims): AuthClaims,
) -> Result<(StatusCode, Json<BatchListResponse>), ServiceError> {
    let batches = BatchRepository::new().find_all().await?;
    let response = BatchListResponse {
        total: batches.len(),
        batches: batches.into_iter().map(BatchResponse::from).collect(),
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Enroll a student into a batch; backfills a missing joining date from the
/// batch year.
#[utoipa::path(
    post,
    path = "/api/v1/batches/{batch_id}/students/{student_id}",
    params(
        ("batch_id" = Uuid, Path, description = "Batch ID"),
        ("student_id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student assigned", body = MessageResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Batches"
)]
pub async fn assign_student(
    AuthClaims(claims): AuthClaims,
    Path((batch_id, student_id)): Path<(Uuid, Uuid)>,
) -> Result<(StatusCode, Json<MessageResponse>), ServiceError> {
    if !matches!(claims.role, RoleEnum::Admin | RoleEnum::AdmissionOfficer) {
        return Err(ServiceError::PermissionDenied);
    }

    BatchRepository::new().assign_student(batch_id, student_id).await?;
    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            success: true,
            message: "Student assigned to batch".to_string(),
        }),
    ))
}
