use axum::{
    Json, Router,
    extract::{Multipart, Path},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use uuid::Uuid;

use super::dto::{
    CreateNoticeRequest, NoticeListResponse, NoticeResponse, UpdateNoticeRequest,
};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::ServiceError;
use crate::extractor::AuthClaims;
use crate::notifications;
use crate::repositories::{DeviceTokenRepository, NoticeRepository};
use crate::routes::auth::dto::MessageResponse;
use crate::utils::upload;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/notices", post(create_notice))
        .route("/api/v1/notices", get(get_all_notices))
        .route("/api/v1/notices/{notice_id}", put(update_notice))
        .route("/api/v1/notices/{notice_id}", delete(delete_notice))
        .route("/api/v1/notices/{notice_id}/attachment", post(upload_attachment))
}

fn can_post_notices(role: RoleEnum) -> bool {
    matches!(role, RoleEnum::Admin | RoleEnum::Hod | RoleEnum::Teacher)
}

/// Create a notice and fan it out to every active device.
#[utoipa::path(
    post,
    path = "/api/v1/notices",
    request_body = CreateNoticeRequest,
    responses(
        (status = 201, description = "Notice created", body = NoticeResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Notices"
)]
pub async fn create_notice(
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<CreateNoticeRequest>,
) -> Result<(StatusCode, Json<NoticeResponse>), ServiceError> {
    if !can_post_notices(claims.role) {
        return Err(ServiceError::PermissionDenied);
    }

    let notice = NoticeRepository::new()
        .create(payload.title, payload.message, None, None)
        .await?;

    // Dispatch happens after the row is committed and stays best-effort.
    let title = notice.title.clone();
    let body = notice.message.clone().unwrap_or_default();
    tokio::spawn(async move {
        let tokens = match DeviceTokenRepository::new().all_active_tokens().await {
            Ok(tokens) => tokens,
            Err(err) => {
                tracing::error!("Failed to load notice notification tokens: {}", err);
                return;
            }
        };
        notifications::send_push_notification(&title, &body, tokens).await;
    });

    Ok((StatusCode::CREATED, Json(notice.into())))
}

/// List notices, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/notices",
    responses(
        (status = 200, description = "Notices retrieved", body = NoticeListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Notices"
)]
pub async fn get_all_notices(
    AuthClaims(_claims): AuthClaims,
) -> Result<(StatusCode, Json<NoticeListResponse>), ServiceError> {
    let notices = NoticeRepository::new()
        .find_all()
        .await
        .map_err(ServiceError::Internal)?;

    let response = NoticeListResponse {
        total: notices.len(),
        notices: notices.into_iter().map(NoticeResponse::from).collect(),
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Attach an image or document to a notice. Images fill the image slot,
/// documents the attachment slot; the stored file is released if the row
/// update fails.
#[utoipa::path(
    post,
    path = "/api/v1/notices/{notice_id}/attachment",
    params(("notice_id" = Uuid, Path, description = "Notice ID")),
    responses(
        (status = 200, description = "File attached", body = NoticeResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Notices"
)]
pub async fn upload_attachment(
    AuthClaims(claims): AuthClaims,
    Path(notice_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<NoticeResponse>), ServiceError> {
    if !can_post_notices(claims.role) {
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
            file_name = field.file_name().unwrap_or("attachment").to_string();
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

    let is_image = upload::store(
        "notice",
        &file_name,
        &file_bytes,
        upload::ALLOWED_IMAGE_TYPES,
        upload::MAX_IMAGE_SIZE,
    )
    .await;

    let (stored_path, image) = match is_image {
        Ok(path) => (path, true),
        Err(ServiceError::UnsupportedType) => {
            let path = upload::store(
                "notice",
                &file_name,
                &file_bytes,
                upload::ALLOWED_DOCUMENT_TYPES,
                upload::MAX_DOCUMENT_SIZE,
            )
            .await?;
            (path, false)
        }
        Err(err) => return Err(err),
    };

    let updated = NoticeRepository::new()
        .set_attachment(
            notice_id,
            image.then(|| stored_path.clone()),
            (!image).then(|| stored_path.clone()),
        )
        .await;

    match updated {
        Ok(notice) => Ok((StatusCode::OK, Json(notice.into()))),
        Err(err) => {
            upload::cleanup(&stored_path).await;
            Err(err)
        }
    }
}

/// Update a notice (admin only).
#[utoipa::path(
    put,
    path = "/api/v1/notices/{notice_id}",
    params(("notice_id" = Uuid, Path, description = "Notice ID")),
    request_body = UpdateNoticeRequest,
    responses(
        (status = 200, description = "Notice updated", body = NoticeResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Notices"
)]
pub async fn update_notice(
    AuthClaims(claims): AuthClaims,
    Path(notice_id): Path<Uuid>,
    Json(payload): Json<UpdateNoticeRequest>,
) -> Result<(StatusCode, Json<NoticeResponse>), ServiceError> {
    if claims.role != RoleEnum::Admin {
        return Err(ServiceError::PermissionDenied);
    }

    let notice = NoticeRepository::new()
        .update(notice_id, payload.title, payload.message)
        .await?;
    Ok((StatusCode::OK, Json(notice.into())))
}

/// Delete a notice (admin only).
#[utoipa::path(
    delete,
    path = "/api/v1/notices/{notice_id}",
    params(("notice_id" = Uuid, Path, description = "Notice ID")),
    responses(
        (status = 200, description = "Notice deleted", body = MessageResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Notices"
)]
pub async fn delete_notice(
    AuthClaims(claims): AuthClaims,
    Path(notice_id): Path<Uuid>,
) -> Result<(StatusCode, Json<MessageResponse>), ServiceError> {
    if claims.role != RoleEnum::Admin {
        return Err(ServiceError::PermissionDenied);
    }

    NoticeRepository::new().delete(notice_id).await?;
    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            success: true,
            message: "Notice deleted".to_string(),
        }),
    ))
}
