use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::model::employee::EmployeeStatus;
use crate::response::ApiResponse;

#[derive(Deserialize, ToSchema)]
pub struct EmployeePayload {
    #[schema(example = "Budi Santoso")]
    pub full_name: String,
    #[schema(example = "budi@company.com", format = "email")]
    pub email: String,
    pub phone: Option<String>,
    #[schema(example = "1990-05-01", value_type = Option<String>, format = "date")]
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub hire_date: NaiveDate,
    #[schema(example = 2)]
    pub department_id: u64,
    #[schema(example = 3)]
    pub position_id: u64,
    pub status: EmployeeStatus,
}

/// Compact row for listings.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct EmployeeSummary {
    pub id: u64,
    pub full_name: String,
    pub email: String,
    #[schema(example = "Human Resources")]
    pub department_name: String,
    #[schema(example = "Software Engineer")]
    pub position_name: String,
}

/// Full row plus the joined department/position names.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct EmployeeDetail {
    pub id: u64,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    #[schema(value_type = Option<String>, format = "date")]
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    #[schema(value_type = String, format = "date")]
    pub hire_date: NaiveDate,
    pub department_id: u64,
    pub position_id: u64,
    pub status: EmployeeStatus,
    pub department_name: String,
    pub position_name: String,
}

const DETAIL_SELECT: &str = "SELECT e.id, e.full_name, e.email, e.phone, e.birth_date, e.address, \
     e.hire_date, e.department_id, e.position_id, e.status, \
     d.name AS department_name, p.name AS position_name \
     FROM employees e \
     JOIN departments d ON d.id = e.department_id \
     JOIN positions p ON p.id = e.position_id";

async fn fetch_detail(pool: &MySqlPool, id: u64) -> Result<EmployeeDetail, ApiError> {
    let sql = format!("{DETAIL_SELECT} WHERE e.id = ?");
    sqlx::query_as::<_, EmployeeDetail>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(ApiError::not_found("Karyawan"))
}

/// Create an employee
#[utoipa::path(
    post,
    path = "/api/employee",
    request_body = EmployeePayload,
    responses((status = 200, description = "Karyawan dibuat", body = EmployeeDetail), (status = 401)),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn create(
    pool: web::Data<MySqlPool>,
    payload: web::Json<EmployeePayload>,
) -> Result<HttpResponse, ApiError> {
    let result = sqlx::query(
        "INSERT INTO employees \
         (full_name, email, phone, birth_date, address, hire_date, department_id, position_id, status) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&payload.full_name)
    .bind(&payload.email)
    .bind(&payload.phone)
    .bind(payload.birth_date)
    .bind(&payload.address)
    .bind(payload.hire_date)
    .bind(payload.department_id)
    .bind(payload.position_id)
    .bind(payload.status)
    .execute(pool.get_ref())
    .await?;

    let employee = fetch_detail(pool.get_ref(), result.last_insert_id()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Karyawan dibuat", employee)))
}

/// List all employees
#[utoipa::path(
    get,
    path = "/api/employee",
    responses((status = 200, body = [EmployeeSummary]), (status = 401)),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn list(pool: web::Data<MySqlPool>) -> Result<HttpResponse, ApiError> {
    let employees = sqlx::query_as::<_, EmployeeSummary>(
        "SELECT e.id, e.full_name, e.email, \
         d.name AS department_name, p.name AS position_name \
         FROM employees e \
         JOIN departments d ON d.id = e.department_id \
         JOIN positions p ON p.id = e.position_id \
         ORDER BY e.id ASC",
    )
    .fetch_all(pool.get_ref())
    .await?;

    let message = if employees.is_empty() {
        "Belum ada karyawan"
    } else {
        "Karyawan ditemukan"
    };
    Ok(HttpResponse::Ok().json(ApiResponse::ok(message, employees)))
}

/// Get one employee
#[utoipa::path(
    get,
    path = "/api/employee/{id}",
    params(("id", description = "Employee ID")),
    responses(
        (status = 200, body = EmployeeDetail),
        (status = 404, description = "Karyawan tidak ditemukan"),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn get(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let employee = fetch_detail(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Karyawan ditemukan", employee)))
}

/// Replace an employee record
#[utoipa::path(
    put,
    path = "/api/employee/{id}",
    params(("id", description = "Employee ID")),
    request_body = EmployeePayload,
    responses(
        (status = 200, description = "Karyawan diperbarui", body = EmployeeDetail),
        (status = 404, description = "Karyawan tidak ditemukan"),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn update(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<EmployeePayload>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    sqlx::query_scalar::<_, u64>("SELECT id FROM employees WHERE id = ?")
        .bind(id)
        .fetch_optional(pool.get_ref())
        .await?
        .ok_or(ApiError::not_found("Karyawan"))?;

    sqlx::query(
        "UPDATE employees \
         SET full_name = ?, email = ?, phone = ?, birth_date = ?, address = ?, hire_date = ?, \
             department_id = ?, position_id = ?, status = ? \
         WHERE id = ?",
    )
    .bind(&payload.full_name)
    .bind(&payload.email)
    .bind(&payload.phone)
    .bind(payload.birth_date)
    .bind(&payload.address)
    .bind(payload.hire_date)
    .bind(payload.department_id)
    .bind(payload.position_id)
    .bind(payload.status)
    .bind(id)
    .execute(pool.get_ref())
    .await?;

    let employee = fetch_detail(pool.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Karyawan diperbarui", employee)))
}

/// Delete an employee
#[utoipa::path(
    delete,
    path = "/api/employee/{id}",
    params(("id", description = "Employee ID")),
    responses(
        (status = 200, description = "Karyawan dihapus"),
        (status = 404, description = "Karyawan tidak ditemukan"),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn remove(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let result = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(path.into_inner())
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Karyawan"));
    }
    Ok(HttpResponse::Ok().json(ApiResponse::ok_empty("Karyawan dihapus")))
}
