use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::response::ApiResponse;

#[derive(Deserialize, ToSchema)]
pub struct PayrollPayload {
    #[schema(example = 7)]
    pub employee_id: u64,
    #[schema(example = "2026-08")]
    pub month: String,
    #[schema(example = 50000.0)]
    pub base_salary: f64,
    #[serde(default)]
    #[schema(example = 5000.0)]
    pub allowance: f64,
    #[serde(default)]
    #[schema(example = 2000.0)]
    pub deduction: f64,
}

impl PayrollPayload {
    /// The only payroll arithmetic in the system.
    fn total(&self) -> f64 {
        self.base_salary + self.allowance - self.deduction
    }
}

/// Payroll row joined with employee, department and position names.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct PayrollRow {
    pub id: u64,
    pub employee_id: u64,
    #[schema(example = "Budi Santoso")]
    pub employee_name: String,
    pub department_name: String,
    pub position_name: String,
    pub month: String,
    pub base_salary: f64,
    pub allowance: f64,
    pub deduction: f64,
    pub total_salary: f64,
}

const ROW_SELECT: &str = "SELECT g.id, g.employee_id, e.full_name AS employee_name, \
     d.name AS department_name, p.name AS position_name, \
     g.month, g.base_salary, g.allowance, g.deduction, g.total_salary \
     FROM payrolls g \
     JOIN employees e ON e.id = g.employee_id \
     JOIN departments d ON d.id = e.department_id \
     JOIN positions p ON p.id = e.position_id";

async fn fetch_row(pool: &MySqlPool, id: u64) -> Result<PayrollRow, ApiError> {
    let sql = format!("{ROW_SELECT} WHERE g.id = ?");
    sqlx::query_as::<_, PayrollRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(ApiError::not_found("Gaji"))
}

/// Create a payroll entry
#[utoipa::path(
    post,
    path = "/api/payroll",
    request_body = PayrollPayload,
    responses((status = 200, description = "Gaji dibuat", body = PayrollRow), (status = 401)),
    security(("bearer_auth" = [])),
    tag = "Payroll"
)]
pub async fn create(
    pool: web::Data<MySqlPool>,
    payload: web::Json<PayrollPayload>,
) -> Result<HttpResponse, ApiError> {
    let result = sqlx::query(
        "INSERT INTO payrolls (employee_id, month, base_salary, allowance, deduction, total_salary) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(payload.employee_id)
    .bind(&payload.month)
    .bind(payload.base_salary)
    .bind(payload.allowance)
    .bind(payload.deduction)
    .bind(payload.total())
    .execute(pool.get_ref())
    .await?;

    let payroll = fetch_row(pool.get_ref(), result.last_insert_id()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Gaji dibuat", payroll)))
}

/// List all payroll entries, newest first
#[utoipa::path(
    get,
    path = "/api/payroll",
    responses((status = 200, body = [PayrollRow]), (status = 401)),
    security(("bearer_auth" = [])),
    tag = "Payroll"
)]
pub async fn list(pool: web::Data<MySqlPool>) -> Result<HttpResponse, ApiError> {
    let sql = format!("{ROW_SELECT} ORDER BY g.id DESC");
    let payrolls = sqlx::query_as::<_, PayrollRow>(&sql)
        .fetch_all(pool.get_ref())
        .await?;

    let message = if payrolls.is_empty() {
        "Belum ada gaji"
    } else {
        "Gaji ditemukan"
    };
    Ok(HttpResponse::Ok().json(ApiResponse::ok(message, payrolls)))
}

/// Get one payroll entry
#[utoipa::path(
    get,
    path = "/api/payroll/{id}",
    params(("id", description = "Payroll ID")),
    responses(
        (status = 200, body = PayrollRow),
        (status = 404, description = "Gaji tidak ditemukan"),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Payroll"
)]
pub async fn get(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let payroll = fetch_row(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Gaji ditemukan", payroll)))
}

/// Replace a payroll entry; the total is recomputed
#[utoipa::path(
    put,
    path = "/api/payroll/{id}",
    params(("id", description = "Payroll ID")),
    request_body = PayrollPayload,
    responses(
        (status = 200, description = "Gaji diperbarui", body = PayrollRow),
        (status = 404, description = "Gaji tidak ditemukan"),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Payroll"
)]
pub async fn update(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<PayrollPayload>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    sqlx::query_scalar::<_, u64>("SELECT id FROM payrolls WHERE id = ?")
        .bind(id)
        .fetch_optional(pool.get_ref())
        .await?
        .ok_or(ApiError::not_found("Gaji"))?;

    sqlx::query(
        "UPDATE payrolls \
         SET employee_id = ?, month = ?, base_salary = ?, allowance = ?, deduction = ?, total_salary = ? \
         WHERE id = ?",
    )
    .bind(payload.employee_id)
    .bind(&payload.month)
    .bind(payload.base_salary)
    .bind(payload.allowance)
    .bind(payload.deduction)
    .bind(payload.total())
    .bind(id)
    .execute(pool.get_ref())
    .await?;

    let payroll = fetch_row(pool.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Gaji diperbarui", payroll)))
}

/// Delete a payroll entry
#[utoipa::path(
    delete,
    path = "/api/payroll/{id}",
    params(("id", description = "Payroll ID")),
    responses(
        (status = 200, description = "Gaji dihapus"),
        (status = 404, description = "Gaji tidak ditemukan"),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Payroll"
)]
pub async fn remove(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let result = sqlx::query("DELETE FROM payrolls WHERE id = ?")
        .bind(path.into_inner())
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Gaji"));
    }
    Ok(HttpResponse::Ok().json(ApiResponse::ok_empty("Gaji dihapus")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_base_plus_allowance_minus_deduction() {
        let payload = PayrollPayload {
            employee_id: 7,
            month: "2026-08".into(),
            base_salary: 50_000.0,
            allowance: 5_000.0,
            deduction: 2_000.0,
        };
        assert_eq!(payload.total(), 53_000.0);
    }

    #[test]
    fn allowance_and_deduction_default_to_zero() {
        let payload: PayrollPayload = serde_json::from_str(
            r#"{"employee_id": 7, "month": "2026-08", "base_salary": 50000.0}"#,
        )
        .unwrap();
        assert_eq!(payload.allowance, 0.0);
        assert_eq!(payload.deduction, 0.0);
        assert_eq!(payload.total(), 50_000.0);
    }
}
