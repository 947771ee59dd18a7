use sqlx::FromRow;

/// Raw row; the password hash never leaves this struct. Handlers respond
/// with `api::admin::AdminResponse` instead.
#[derive(Debug, FromRow)]
pub struct Admin {
    pub id: u64,
    pub username: String,
    pub password: String,
    pub employee_id: u64,
}
