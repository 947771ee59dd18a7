use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use tracing::info;
use utoipa::ToSchema;

use crate::auth::auth::AuthAdmin;
use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::config::Config;
use crate::error::ApiError;
use crate::model::admin::Admin;
use crate::response::ApiResponse;

#[derive(Deserialize, ToSchema)]
pub struct LoginPayload {
    #[schema(example = "superadmin")]
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct AdminPayload {
    pub username: String,
    pub password: String,
    #[schema(example = 7)]
    pub employee_id: u64,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateMePayload {
    pub username: String,
    pub old_password: String,
    pub new_password: String,
}

/// Admin account without the password hash, plus the linked employee name.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct AdminResponse {
    pub id: u64,
    pub username: String,
    pub employee_id: u64,
    #[schema(example = "Budi Santoso")]
    pub employee_name: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginData {
    pub id: u64,
    pub username: String,
    pub employee_id: u64,
    pub token: String,
}

const RESPONSE_SELECT: &str = "SELECT a.id, a.username, a.employee_id, \
     e.full_name AS employee_name \
     FROM admins a JOIN employees e ON e.id = a.employee_id";

async fn fetch_response(
    pool: &MySqlPool,
    id: u64,
    missing: &'static str,
) -> Result<AdminResponse, ApiError> {
    let sql = format!("{RESPONSE_SELECT} WHERE a.id = ?");
    sqlx::query_as::<_, AdminResponse>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(ApiError::not_found(missing))
}

async fn fetch_account(pool: &MySqlPool, id: u64) -> Result<Admin, ApiError> {
    sqlx::query_as::<_, Admin>(
        "SELECT id, username, password, employee_id FROM admins WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(ApiError::not_found("Akun"))
}

fn hash(password: &str) -> Result<String, ApiError> {
    hash_password(password).map_err(|e| ApiError::Internal(e.to_string()))
}

/// Log in and receive a bearer token
#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login berhasil", body = LoginData),
        (status = 400, description = "Kata sandi salah"),
        (status = 404, description = "Akun tidak ditemukan")
    ),
    tag = "Admin"
)]
pub async fn login(
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    payload: web::Json<LoginPayload>,
) -> Result<HttpResponse, ApiError> {
    let admin = sqlx::query_as::<_, Admin>(
        "SELECT id, username, password, employee_id FROM admins WHERE username = ?",
    )
    .bind(&payload.username)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or(ApiError::not_found("Akun"))?;

    verify_password(&payload.password, &admin.password).map_err(|_| ApiError::WrongPassword)?;

    let token = generate_token(
        admin.id,
        admin.username.clone(),
        &config.jwt_secret,
        config.token_ttl,
    );

    info!(admin_id = admin.id, "admin logged in");

    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        "Login berhasil",
        LoginData {
            id: admin.id,
            username: admin.username,
            employee_id: admin.employee_id,
            token,
        },
    )))
}

/// Create an admin account (superadmin only)
#[utoipa::path(
    post,
    path = "/api/admin",
    request_body = AdminPayload,
    responses(
        (status = 200, description = "Admin dibuat", body = AdminResponse),
        (status = 401),
        (status = 403, description = "Superadmin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create(
    auth: AuthAdmin,
    pool: web::Data<MySqlPool>,
    payload: web::Json<AdminPayload>,
) -> Result<HttpResponse, ApiError> {
    auth.require_superadmin()?;

    let hashed = hash(&payload.password)?;
    let result =
        sqlx::query("INSERT INTO admins (username, password, employee_id) VALUES (?, ?, ?)")
            .bind(&payload.username)
            .bind(&hashed)
            .bind(payload.employee_id)
            .execute(pool.get_ref())
            .await?;

    let admin = fetch_response(pool.get_ref(), result.last_insert_id(), "Admin").await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Admin dibuat", admin)))
}

/// List all admin accounts
#[utoipa::path(
    get,
    path = "/api/admin",
    responses((status = 200, body = [AdminResponse]), (status = 401)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list(pool: web::Data<MySqlPool>) -> Result<HttpResponse, ApiError> {
    let sql = format!("{RESPONSE_SELECT} ORDER BY a.id ASC");
    let admins = sqlx::query_as::<_, AdminResponse>(&sql)
        .fetch_all(pool.get_ref())
        .await?;

    let message = if admins.is_empty() {
        "Belum ada admin"
    } else {
        "Admin ditemukan"
    };
    Ok(HttpResponse::Ok().json(ApiResponse::ok(message, admins)))
}

/// The authenticated admin's own account
#[utoipa::path(
    get,
    path = "/api/admin/me",
    responses((status = 200, body = AdminResponse), (status = 401)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_me(auth: AuthAdmin, pool: web::Data<MySqlPool>) -> Result<HttpResponse, ApiError> {
    let admin = fetch_response(pool.get_ref(), auth.admin_id, "Akun").await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Admin ditemukan", admin)))
}

/// Change own username/password; requires the current password
#[utoipa::path(
    put,
    path = "/api/admin/me",
    request_body = UpdateMePayload,
    responses(
        (status = 200, description = "Admin diperbarui", body = AdminResponse),
        (status = 400, description = "Kata sandi lama salah"),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_me(
    auth: AuthAdmin,
    pool: web::Data<MySqlPool>,
    payload: web::Json<UpdateMePayload>,
) -> Result<HttpResponse, ApiError> {
    let account = fetch_account(pool.get_ref(), auth.admin_id).await?;

    verify_password(&payload.old_password, &account.password)
        .map_err(|_| ApiError::WrongOldPassword)?;

    let hashed = hash(&payload.new_password)?;
    sqlx::query("UPDATE admins SET username = ?, password = ? WHERE id = ?")
        .bind(&payload.username)
        .bind(&hashed)
        .bind(account.id)
        .execute(pool.get_ref())
        .await?;

    let admin = fetch_response(pool.get_ref(), account.id, "Akun").await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Admin diperbarui", admin)))
}

/// Get one admin account
#[utoipa::path(
    get,
    path = "/api/admin/{id}",
    params(("id", description = "Admin ID")),
    responses(
        (status = 200, body = AdminResponse),
        (status = 404, description = "Admin tidak ditemukan"),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let admin = fetch_response(pool.get_ref(), path.into_inner(), "Admin").await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Admin ditemukan", admin)))
}

/// Replace an admin account (superadmin only)
#[utoipa::path(
    put,
    path = "/api/admin/{id}",
    params(("id", description = "Admin ID")),
    request_body = AdminPayload,
    responses(
        (status = 200, description = "Admin diperbarui", body = AdminResponse),
        (status = 404, description = "Akun tidak ditemukan"),
        (status = 401),
        (status = 403, description = "Superadmin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update(
    auth: AuthAdmin,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<AdminPayload>,
) -> Result<HttpResponse, ApiError> {
    auth.require_superadmin()?;

    let id = path.into_inner();
    fetch_account(pool.get_ref(), id).await?;

    let hashed = hash(&payload.password)?;
    sqlx::query("UPDATE admins SET username = ?, password = ?, employee_id = ? WHERE id = ?")
        .bind(&payload.username)
        .bind(&hashed)
        .bind(payload.employee_id)
        .bind(id)
        .execute(pool.get_ref())
        .await?;

    let admin = fetch_response(pool.get_ref(), id, "Akun").await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Admin diperbarui", admin)))
}

/// Delete an admin account (superadmin only)
#[utoipa::path(
    delete,
    path = "/api/admin/{id}",
    params(("id", description = "Admin ID")),
    responses(
        (status = 200, description = "Admin dihapus"),
        (status = 404, description = "Admin tidak ditemukan"),
        (status = 401),
        (status = 403, description = "Superadmin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn remove(
    auth: AuthAdmin,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    auth.require_superadmin()?;

    let result = sqlx::query("DELETE FROM admins WHERE id = ?")
        .bind(path.into_inner())
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Admin"));
    }
    Ok(HttpResponse::Ok().json(ApiResponse::ok_empty("Admin dihapus")))
}
