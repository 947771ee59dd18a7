use actix_web::{HttpResponse, web};
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::ToSchema;

use crate::auth::auth::AuthAdmin;
use crate::error::ApiError;
use crate::model::department::Department;
use crate::response::ApiResponse;

#[derive(Deserialize, ToSchema)]
pub struct DepartmentPayload {
    #[schema(example = "Human Resources")]
    pub name: String,
}

/// Create a department
#[utoipa::path(
    post,
    path = "/api/department",
    request_body = DepartmentPayload,
    responses((status = 200, description = "Departemen dibuat", body = Department), (status = 401)),
    security(("bearer_auth" = [])),
    tag = "Department"
)]
pub async fn create(
    _auth: AuthAdmin,
    pool: web::Data<MySqlPool>,
    payload: web::Json<DepartmentPayload>,
) -> Result<HttpResponse, ApiError> {
    let result = sqlx::query("INSERT INTO departments (name) VALUES (?)")
        .bind(&payload.name)
        .execute(pool.get_ref())
        .await?;

    let department = Department {
        id: result.last_insert_id(),
        name: payload.name.clone(),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Departemen dibuat", department)))
}

/// List all departments
#[utoipa::path(
    get,
    path = "/api/department",
    responses((status = 200, body = [Department])),
    tag = "Department"
)]
pub async fn list(pool: web::Data<MySqlPool>) -> Result<HttpResponse, ApiError> {
    let departments =
        sqlx::query_as::<_, Department>("SELECT id, name FROM departments ORDER BY id ASC")
            .fetch_all(pool.get_ref())
            .await?;

    let message = if departments.is_empty() {
        "Belum ada departemen"
    } else {
        "Departemen ditemukan"
    };
    Ok(HttpResponse::Ok().json(ApiResponse::ok(message, departments)))
}

/// Get one department
#[utoipa::path(
    get,
    path = "/api/department/{id}",
    params(("id", description = "Department ID")),
    responses((status = 200, body = Department), (status = 404, description = "Departemen tidak ditemukan")),
    tag = "Department"
)]
pub async fn get(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let department =
        sqlx::query_as::<_, Department>("SELECT id, name FROM departments WHERE id = ?")
            .bind(path.into_inner())
            .fetch_optional(pool.get_ref())
            .await?
            .ok_or(ApiError::not_found("Departemen"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok("Departemen ditemukan", department)))
}

/// Rename a department
#[utoipa::path(
    put,
    path = "/api/department/{id}",
    params(("id", description = "Department ID")),
    request_body = DepartmentPayload,
    responses(
        (status = 200, description = "Departemen diperbarui", body = Department),
        (status = 404, description = "Departemen tidak ditemukan"),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Department"
)]
pub async fn update(
    _auth: AuthAdmin,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<DepartmentPayload>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    sqlx::query_scalar::<_, u64>("SELECT id FROM departments WHERE id = ?")
        .bind(id)
        .fetch_optional(pool.get_ref())
        .await?
        .ok_or(ApiError::not_found("Departemen"))?;

    sqlx::query("UPDATE departments SET name = ? WHERE id = ?")
        .bind(&payload.name)
        .bind(id)
        .execute(pool.get_ref())
        .await?;

    let department = Department {
        id,
        name: payload.name.clone(),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Departemen diperbarui", department)))
}

/// Delete a department
#[utoipa::path(
    delete,
    path = "/api/department/{id}",
    params(("id", description = "Department ID")),
    responses(
        (status = 200, description = "Departemen dihapus"),
        (status = 404, description = "Departemen tidak ditemukan"),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Department"
)]
pub async fn remove(
    _auth: AuthAdmin,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let result = sqlx::query("DELETE FROM departments WHERE id = ?")
        .bind(path.into_inner())
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Departemen"));
    }
    Ok(HttpResponse::Ok().json(ApiResponse::ok_empty("Departemen dihapus")))
}
