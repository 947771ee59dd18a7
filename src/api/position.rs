use actix_web::{HttpResponse, web};
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::ToSchema;

use crate::auth::auth::AuthAdmin;
use crate::error::ApiError;
use crate::model::position::Position;
use crate::response::ApiResponse;

#[derive(Deserialize, ToSchema)]
pub struct PositionPayload {
    #[schema(example = "Software Engineer")]
    pub name: String,
}

/// Create a position
#[utoipa::path(
    post,
    path = "/api/position",
    request_body = PositionPayload,
    responses((status = 200, description = "Jabatan dibuat", body = Position), (status = 401)),
    security(("bearer_auth" = [])),
    tag = "Position"
)]
pub async fn create(
    _auth: AuthAdmin,
    pool: web::Data<MySqlPool>,
    payload: web::Json<PositionPayload>,
) -> Result<HttpResponse, ApiError> {
    let result = sqlx::query("INSERT INTO positions (name) VALUES (?)")
        .bind(&payload.name)
        .execute(pool.get_ref())
        .await?;

    let position = Position {
        id: result.last_insert_id(),
        name: payload.name.clone(),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Jabatan dibuat", position)))
}

/// List all positions
#[utoipa::path(
    get,
    path = "/api/position",
    responses((status = 200, body = [Position])),
    tag = "Position"
)]
pub async fn list(pool: web::Data<MySqlPool>) -> Result<HttpResponse, ApiError> {
    let positions = sqlx::query_as::<_, Position>("SELECT id, name FROM positions ORDER BY id ASC")
        .fetch_all(pool.get_ref())
        .await?;

    let message = if positions.is_empty() {
        "Belum ada jabatan"
    } else {
        "Jabatan ditemukan"
    };
    Ok(HttpResponse::Ok().json(ApiResponse::ok(message, positions)))
}

/// Get one position
#[utoipa::path(
    get,
    path = "/api/position/{id}",
    params(("id", description = "Position ID")),
    responses((status = 200, body = Position), (status = 404, description = "Jabatan tidak ditemukan")),
    tag = "Position"
)]
pub async fn get(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let position = sqlx::query_as::<_, Position>("SELECT id, name FROM positions WHERE id = ?")
        .bind(path.into_inner())
        .fetch_optional(pool.get_ref())
        .await?
        .ok_or(ApiError::not_found("Jabatan"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok("Jabatan ditemukan", position)))
}

/// Rename a position
#[utoipa::path(
    put,
    path = "/api/position/{id}",
    params(("id", description = "Position ID")),
    request_body = PositionPayload,
    responses(
        (status = 200, description = "Jabatan diperbarui", body = Position),
        (status = 404, description = "Jabatan tidak ditemukan"),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Position"
)]
pub async fn update(
    _auth: AuthAdmin,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<PositionPayload>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    sqlx::query_scalar::<_, u64>("SELECT id FROM positions WHERE id = ?")
        .bind(id)
        .fetch_optional(pool.get_ref())
        .await?
        .ok_or(ApiError::not_found("Jabatan"))?;

    sqlx::query("UPDATE positions SET name = ? WHERE id = ?")
        .bind(&payload.name)
        .bind(id)
        .execute(pool.get_ref())
        .await?;

    let position = Position {
        id,
        name: payload.name.clone(),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Jabatan diperbarui", position)))
}

/// Delete a position
#[utoipa::path(
    delete,
    path = "/api/position/{id}",
    params(("id", description = "Position ID")),
    responses(
        (status = 200, description = "Jabatan dihapus"),
        (status = 404, description = "Jabatan tidak ditemukan"),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Position"
)]
pub async fn remove(
    _auth: AuthAdmin,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let result = sqlx::query("DELETE FROM positions WHERE id = ?")
        .bind(path.into_inner())
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Jabatan"));
    }
    Ok(HttpResponse::Ok().json(ApiResponse::ok_empty("Jabatan dihapus")))
}
