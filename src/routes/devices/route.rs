use axum::{Json, Router, http::StatusCode, routing::post};

use super::dto::{RegisterDeviceRequest, RegisterDeviceResponse};
use crate::error::ServiceError;
use crate::extractor::AuthClaims;
use crate::repositories::DeviceTokenRepository;

pub fn create_route() -> Router {
    Router::new().route("/api/v1/devices/register", post(register_device))
}

/// Register or refresh a push token for the calling principal.
#[utoipa::path(
    post,
    path = "/api/v1/devices/register",
    request_body = RegisterDeviceRequest,
    responses(
        (status = 200, description = "Token registered", body = RegisterDeviceResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Devices"
)]
pub async fn register_device(
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<RegisterDeviceRequest>,
) -> Result<(StatusCode, Json<RegisterDeviceResponse>), ServiceError> {
    let token = payload.token.trim();
    if token.is_empty() {
        return Err(ServiceError::Validation("token is required".to_string()));
    }

    let device = DeviceTokenRepository::new()
        .register(token, Some(claims.sub), claims.role.into())
        .await
        .map_err(ServiceError::Internal)?;

    Ok((
        StatusCode::OK,
        Json(RegisterDeviceResponse {
            success: true,
            device_id: device.device_id.to_string(),
            is_fallback: device.is_fallback,
        }),
    ))
}
