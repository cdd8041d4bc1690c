use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use super::dto::{CreateStaffRequest, StaffListResponse, StaffQueryParams, StaffResponse};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::ServiceError;
use crate::extractor::AuthClaims;
use crate::repositories::PrincipalRepository;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/staff", post(create_staff))
        .route("/api/v1/staff", get(get_all_staff))
        .route("/api/v1/staff/{staff_id}", get(get_staff))
}

/// Create a staff member (admin only).
#[utoipa::path(
    post,
    path = "/api/v1/staff",
    request_body = CreateStaffRequest,
    responses(
        (status = 201, description = "Staff created", body = StaffResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
pub async fn create_staff(
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<CreateStaffRequest>,
) -> Result<(StatusCode, Json<StaffResponse>), ServiceError> {
    if claims.role != RoleEnum::Admin {
        return Err(ServiceError::PermissionDenied);
    }

    let (principal, profile) = PrincipalRepository::new()
        .create_staff(
            payload.name,
            payload.phone,
            payload.email,
            payload.password,
            payload.role,
            payload.designation,
            payload.joining_date,
            payload.hod_course_id,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(StaffResponse::from_parts(principal, profile)),
    ))
}

/// Paginated staff listing.
#[utoipa::path(
    get,
    path = "/api/v1/staff",
    responses(
        (status = 200, description = "Staff retrieved", body = StaffListResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
pub async fn get_all_staff(
    AuthClaims(claims): AuthClaims,
    Query(params): Query<StaffQueryParams>,
) -> Result<(StatusCode, Json<StaffListResponse>), ServiceError> {
    if !matches!(claims.role, RoleEnum::Admin | RoleEnum::Hod) {
        return Err(ServiceError::PermissionDenied);
    }

    let principal_repo = PrincipalRepository::new();
    let (principals, total) = principal_repo
        .find_all_with_pagination(params.page, params.page_size, params.role, params.search)
        .await?;

    let mut staff = Vec::new();
    for principal in principals {
        if let Some(profile) = principal_repo
            .find_staff_profile(principal.principal_id)
            .await?
        {
            staff.push(StaffResponse::from_parts(principal, profile));
        }
    }

    let response = StaffListResponse {
        staff,
        total,
        page: params.page,
        page_size: params.page_size,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// One staff member; staff may fetch themselves, admin anyone.
#[utoipa::path(
    get,
    path = "/api/v1/staff/{staff_id}",
    params(("staff_id" = Uuid, Path, description = "Staff ID")),
    responses(
        (status = 200, description = "Staff retrieved", body = StaffResponse),
        (status = 404, description = "Staff not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
pub async fn get_staff(
    AuthClaims(claims): AuthClaims,
    Path(staff_id): Path<Uuid>,
) -> Result<(StatusCode, Json<StaffResponse>), ServiceError> {
    let self_access = claims.sub == staff_id;
    if !(self_access || claims.role == RoleEnum::Admin) {
        return Err(ServiceError::PermissionDenied);
    }

    let principal_repo = PrincipalRepository::new();
    let principal = principal_repo
        .find_by_id(staff_id)
        .await?
        .ok_or(ServiceError::NotFound("staff"))?;
    let profile = principal_repo
        .find_staff_profile(staff_id)
        .await?
        .ok_or(ServiceError::NotFound("staff"))?;

    Ok((
        StatusCode::OK,
        Json(StaffResponse::from_parts(principal, profile)),
    ))
}
