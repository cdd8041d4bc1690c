//! Bearer-token extractor used by every authenticated handler.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};

use crate::config::APP_CONFIG;
use crate::error::ServiceError;
use crate::redis_service::JwtBlacklist;
use crate::utils::jwt::{TokenClaims, verify_token};

pub struct AuthClaims(pub TokenClaims);

impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ServiceError::Unauthorized)?;

        // Logged-out tokens are refused until they expire on their own.
        let blacklisted = JwtBlacklist::contains(bearer.token()).await.unwrap_or(false);
        if blacklisted {
            return Err(ServiceError::Unauthorized);
        }

        let claims = verify_token(bearer.token(), &APP_CONFIG.secret_key)
            .map_err(|_| ServiceError::Unauthorized)?;

        Ok(AuthClaims(claims))
    }
}
