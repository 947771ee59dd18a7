use actix_web::{FromRequest, HttpRequest, dev::Payload, web::Data};
use futures::future::{Ready, ready};

use crate::auth::jwt::verify_token;
use crate::config::Config;
use crate::error::ApiError;

/// The authenticated admin, extracted from the bearer token.
pub struct AuthAdmin {
    pub admin_id: u64,
    pub username: String,
}

impl AuthAdmin {
    /// Account management is gated on the fixed superadmin account.
    pub fn require_superadmin(&self) -> Result<(), ApiError> {
        if self.username == "superadmin" {
            Ok(())
        } else {
            Err(ApiError::SuperadminOnly)
        }
    }
}

impl FromRequest for AuthAdmin {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = match req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
        {
            Some(t) => t,
            None => return ready(Err(ApiError::MissingToken.into())),
        };

        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => {
                return ready(Err(actix_web::error::ErrorInternalServerError(
                    "Config missing",
                )));
            }
        };

        let claims = match verify_token(token, &config.jwt_secret) {
            Ok(c) => c,
            Err(_) => return ready(Err(ApiError::InvalidToken.into())),
        };

        ready(Ok(AuthAdmin {
            admin_id: claims.admin_id,
            username: claims.sub,
        }))
    }
}
