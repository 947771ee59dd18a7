use actix_web::{
    Error, HttpMessage,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web::Data,
};

use crate::auth::auth::AuthAdmin;
use crate::auth::jwt::verify_token;
use crate::config::Config;
use crate::error::ApiError;

/// Guards a scope: rejects requests without a valid bearer token and leaves
/// the authenticated admin in the request extensions. Rejections render as
/// the standard envelope through `ApiError`.
pub async fn auth_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let config = req
        .app_data::<Data<Config>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("App config missing"))?;

    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(ApiError::MissingToken)?;

    let claims = verify_token(token, &config.jwt_secret).map_err(|_| ApiError::InvalidToken)?;

    req.extensions_mut().insert(AuthAdmin {
        admin_id: claims.admin_id,
        username: claims.sub,
    });

    next.call(req).await
}
