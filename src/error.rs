use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use crate::response::ApiResponse;

/// Everything a handler can fail with. Converted to the response envelope at
/// the boundary by the `ResponseError` impl; nothing propagates past it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input, message verbatim from the schema check.
    #[error("{0}")]
    Validation(String),

    #[error("Anda sudah melakukan absen masuk")]
    AlreadyClockedIn,

    #[error("Anda sudah melakukan absen keluar")]
    AlreadyClockedOut,

    #[error("Absensi masuk tidak ditemukan")]
    NoClockInFound,

    /// Admin CRUD insert/update hitting the one-record-per-day constraint.
    #[error("Absensi untuk tanggal tersebut sudah ada")]
    DuplicateAttendance,

    #[error("{what} tidak ditemukan")]
    NotFound { what: &'static str },

    #[error("Kata sandi salah")]
    WrongPassword,

    #[error("Kata sandi lama salah")]
    WrongOldPassword,

    #[error("Authorization header missing")]
    MissingToken,

    #[error("Token tidak valid")]
    InvalidToken,

    /// Destructive admin-account routes are limited to the superadmin.
    #[error("Unauthorized")]
    SuperadminOnly,

    /// Error text is returned to the caller; acceptable for internal
    /// deployments only.
    #[error("{0}")]
    Store(#[from] sqlx::Error),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn not_found(what: &'static str) -> Self {
        Self::NotFound { what }
    }
}

/// MySQL files foreign-key failures under the same SQLSTATE (23000) as
/// duplicate keys, so go by the driver's error kind, not the code.
pub fn is_duplicate_key(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::AlreadyClockedIn
            | ApiError::AlreadyClockedOut
            | ApiError::DuplicateAttendance
            | ApiError::WrongPassword
            | ApiError::WrongOldPassword => StatusCode::BAD_REQUEST,
            ApiError::NoClockInFound | ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::MissingToken => StatusCode::UNAUTHORIZED,
            ApiError::InvalidToken | ApiError::SuperadminOnly => StatusCode::FORBIDDEN,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Store(e) = self {
            tracing::error!(error = %e, "store error");
        }
        HttpResponse::build(self.status_code()).json(ApiResponse::error(self.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    use sqlx::error::{DatabaseError, ErrorKind};

    use super::*;

    /// Constraint violation as the MySQL driver reports it: both duplicate
    /// keys and foreign-key failures carry SQLSTATE 23000.
    #[derive(Debug)]
    struct ConstraintViolation {
        unique: bool,
    }

    impl fmt::Display for ConstraintViolation {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("constraint violation")
        }
    }

    impl StdError for ConstraintViolation {}

    impl DatabaseError for ConstraintViolation {
        fn message(&self) -> &str {
            "constraint violation"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some("23000".into())
        }

        fn kind(&self) -> ErrorKind {
            if self.unique {
                ErrorKind::UniqueViolation
            } else {
                ErrorKind::ForeignKeyViolation
            }
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }
    }

    fn violation(unique: bool) -> sqlx::Error {
        sqlx::Error::Database(Box::new(ConstraintViolation { unique }))
    }

    #[test]
    fn only_unique_violations_count_as_duplicate_keys() {
        assert!(is_duplicate_key(&violation(true)));
        // FK failure (e.g. clock-in for a nonexistent employee) shares the
        // SQLSTATE but must not read as "already clocked in".
        assert!(!is_duplicate_key(&violation(false)));
    }

    #[test]
    fn foreign_key_failures_stay_store_errors() {
        assert_eq!(
            ApiError::Store(violation(false)).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn conflict_errors_are_client_errors() {
        assert_eq!(
            ApiError::AlreadyClockedIn.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::AlreadyClockedOut.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NoClockInFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn messages_match_the_api_contract() {
        assert_eq!(
            ApiError::AlreadyClockedIn.to_string(),
            "Anda sudah melakukan absen masuk"
        );
        assert_eq!(
            ApiError::NoClockInFound.to_string(),
            "Absensi masuk tidak ditemukan"
        );
        assert_eq!(
            ApiError::not_found("Karyawan").to_string(),
            "Karyawan tidak ditemukan"
        );
    }
}
