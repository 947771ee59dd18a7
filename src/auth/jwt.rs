use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub admin_id: u64,
    /// Admin username; `superadmin` unlocks admin-account writes.
    pub sub: String,
    pub exp: usize,
}

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

pub fn generate_token(admin_id: u64, username: String, secret: &str, ttl: usize) -> String {
    let claims = Claims {
        admin_id,
        sub: username,
        exp: now() + ttl,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips() {
        let token = generate_token(3, "superadmin".into(), "secret", 3600);
        let claims = verify_token(&token, "secret").unwrap();
        assert_eq!(claims.admin_id, 3);
        assert_eq!(claims.sub, "superadmin");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_token(3, "admin".into(), "secret", 3600);
        assert!(verify_token(&token, "other-secret").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        // Default validation allows 60s leeway; go well past it.
        let claims = Claims {
            admin_id: 1,
            sub: "admin".into(),
            exp: now() - 600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();
        assert!(verify_token(&token, "secret").is_err());
    }
}
