use actix_web::{HttpResponse, web};
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use tracing::debug;
use utoipa::ToSchema;

use crate::attendance::store::MySqlAttendanceStore;
use crate::attendance::workflow;
use crate::error::{ApiError, is_duplicate_key};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::response::ApiResponse;

#[derive(Deserialize, ToSchema)]
pub struct ClockRequest {
    #[schema(example = 7)]
    pub employee_id: u64,
}

/// Admin path takes the full record shape; `clock_out_time` requires a
/// `clock_in_time` at or before it.
#[derive(Deserialize, ToSchema)]
pub struct AttendancePayload {
    #[schema(example = 7)]
    pub employee_id: u64,
    #[schema(example = "2026-08-27", value_type = String, format = "date")]
    pub date: NaiveDate,
    pub clock_in_time: Option<NaiveDateTime>,
    pub clock_out_time: Option<NaiveDateTime>,
    pub status: AttendanceStatus,
}

impl AttendancePayload {
    fn check_times(&self) -> Result<(), ApiError> {
        match (self.clock_in_time, self.clock_out_time) {
            (None, Some(_)) => Err(ApiError::Validation(
                "Waktu keluar membutuhkan waktu masuk".into(),
            )),
            (Some(t_in), Some(t_out)) if t_out < t_in => Err(ApiError::Validation(
                "Waktu keluar tidak boleh sebelum waktu masuk".into(),
            )),
            _ => Ok(()),
        }
    }
}

/// Attendance row joined with the employee's name for list/detail views.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceRow {
    pub id: u64,
    pub employee_id: u64,
    #[schema(example = "Budi Santoso")]
    pub employee_name: String,
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    pub clock_in_time: Option<NaiveDateTime>,
    pub clock_out_time: Option<NaiveDateTime>,
    pub status: AttendanceStatus,
}

const ROW_SELECT: &str = "SELECT a.id, a.employee_id, e.full_name AS employee_name, a.date, \
     a.clock_in_time, a.clock_out_time, a.status \
     FROM attendance a JOIN employees e ON e.id = a.employee_id";

/// Clock-in: first call of the day creates today's record
#[utoipa::path(
    post,
    path = "/api/attendance/clock-in",
    request_body = ClockRequest,
    responses(
        (status = 200, description = "Absensi masuk disimpan", body = AttendanceRecord),
        (status = 400, description = "Anda sudah melakukan absen masuk"),
        (status = 401),
        (status = 500)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn clock_in(
    pool: web::Data<MySqlPool>,
    payload: web::Json<ClockRequest>,
) -> Result<HttpResponse, ApiError> {
    let store = MySqlAttendanceStore::new(pool.get_ref());
    let record = workflow::clock_in(&store, payload.employee_id, Local::now().naive_local()).await?;

    debug!(employee_id = payload.employee_id, "clock-in recorded");
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Absensi masuk disimpan", record)))
}

/// Clock-out: stamps the departure time on today's record
#[utoipa::path(
    post,
    path = "/api/attendance/clock-out",
    request_body = ClockRequest,
    responses(
        (status = 200, description = "Absensi keluar disimpan", body = AttendanceRecord),
        (status = 400, description = "Anda sudah melakukan absen keluar"),
        (status = 404, description = "Absensi masuk tidak ditemukan"),
        (status = 401),
        (status = 500)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn clock_out(
    pool: web::Data<MySqlPool>,
    payload: web::Json<ClockRequest>,
) -> Result<HttpResponse, ApiError> {
    let store = MySqlAttendanceStore::new(pool.get_ref());
    let record =
        workflow::clock_out(&store, payload.employee_id, Local::now().naive_local()).await?;

    debug!(employee_id = payload.employee_id, "clock-out recorded");
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Absensi keluar disimpan", record)))
}

/// Create an attendance record directly (admin path)
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = AttendancePayload,
    responses(
        (status = 200, description = "Absensi dibuat", body = AttendanceRecord),
        (status = 400, description = "Validation error or duplicate day"),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn create(
    pool: web::Data<MySqlPool>,
    payload: web::Json<AttendancePayload>,
) -> Result<HttpResponse, ApiError> {
    payload.check_times()?;

    let result = sqlx::query(
        "INSERT INTO attendance (employee_id, date, clock_in_time, clock_out_time, status) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(payload.employee_id)
    .bind(payload.date)
    .bind(payload.clock_in_time)
    .bind(payload.clock_out_time)
    .bind(payload.status)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        if is_duplicate_key(&e) {
            ApiError::DuplicateAttendance
        } else {
            ApiError::Store(e)
        }
    })?;

    let record = AttendanceRecord {
        id: result.last_insert_id(),
        employee_id: payload.employee_id,
        date: payload.date,
        clock_in_time: payload.clock_in_time,
        clock_out_time: payload.clock_out_time,
        status: payload.status,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Absensi dibuat", record)))
}

/// List all attendance records
#[utoipa::path(
    get,
    path = "/api/attendance",
    responses((status = 200, body = [AttendanceRow]), (status = 401)),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn list(pool: web::Data<MySqlPool>) -> Result<HttpResponse, ApiError> {
    let sql = format!("{ROW_SELECT} ORDER BY a.id ASC");
    let rows = sqlx::query_as::<_, AttendanceRow>(&sql)
        .fetch_all(pool.get_ref())
        .await?;

    let message = if rows.is_empty() {
        "Belum ada absensi"
    } else {
        "Absensi ditemukan"
    };
    Ok(HttpResponse::Ok().json(ApiResponse::ok(message, rows)))
}

/// Get one attendance record
#[utoipa::path(
    get,
    path = "/api/attendance/{id}",
    params(("id", description = "Attendance ID")),
    responses(
        (status = 200, body = AttendanceRow),
        (status = 404, description = "Absensi tidak ditemukan"),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn get(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let sql = format!("{ROW_SELECT} WHERE a.id = ?");
    let row = sqlx::query_as::<_, AttendanceRow>(&sql)
        .bind(id)
        .fetch_optional(pool.get_ref())
        .await?
        .ok_or(ApiError::not_found("Absensi"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok("Absensi ditemukan", row)))
}

/// Replace an attendance record (admin path)
#[utoipa::path(
    put,
    path = "/api/attendance/{id}",
    params(("id", description = "Attendance ID")),
    request_body = AttendancePayload,
    responses(
        (status = 200, description = "Absensi diperbarui", body = AttendanceRecord),
        (status = 400),
        (status = 404, description = "Absensi tidak ditemukan"),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn update(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<AttendancePayload>,
) -> Result<HttpResponse, ApiError> {
    payload.check_times()?;

    let id = path.into_inner();
    sqlx::query_scalar::<_, u64>("SELECT id FROM attendance WHERE id = ?")
        .bind(id)
        .fetch_optional(pool.get_ref())
        .await?
        .ok_or(ApiError::not_found("Absensi"))?;

    sqlx::query(
        "UPDATE attendance \
         SET employee_id = ?, date = ?, clock_in_time = ?, clock_out_time = ?, status = ? \
         WHERE id = ?",
    )
    .bind(payload.employee_id)
    .bind(payload.date)
    .bind(payload.clock_in_time)
    .bind(payload.clock_out_time)
    .bind(payload.status)
    .bind(id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        // moving the row onto another employee's day can still collide
        if is_duplicate_key(&e) {
            ApiError::DuplicateAttendance
        } else {
            ApiError::Store(e)
        }
    })?;

    let record = AttendanceRecord {
        id,
        employee_id: payload.employee_id,
        date: payload.date,
        clock_in_time: payload.clock_in_time,
        clock_out_time: payload.clock_out_time,
        status: payload.status,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Absensi diperbarui", record)))
}

/// Delete an attendance record
#[utoipa::path(
    delete,
    path = "/api/attendance/{id}",
    params(("id", description = "Attendance ID")),
    responses(
        (status = 200, description = "Absensi dihapus"),
        (status = 404, description = "Absensi tidak ditemukan"),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn remove(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let result = sqlx::query("DELETE FROM attendance WHERE id = ?")
        .bind(id)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Absensi"));
    }
    Ok(HttpResponse::Ok().json(ApiResponse::ok_empty("Absensi dihapus")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn payload(
        clock_in_time: Option<NaiveDateTime>,
        clock_out_time: Option<NaiveDateTime>,
    ) -> AttendancePayload {
        AttendancePayload {
            employee_id: 7,
            date: at("2026-08-27 00:00:00").date(),
            clock_in_time,
            clock_out_time,
            status: AttendanceStatus::Present,
        }
    }

    #[test]
    fn clock_out_without_clock_in_is_invalid() {
        let err = payload(None, Some(at("2026-08-27 17:00:00")))
            .check_times()
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn clock_out_before_clock_in_is_invalid() {
        let err = payload(
            Some(at("2026-08-27 17:00:00")),
            Some(at("2026-08-27 08:00:00")),
        )
        .check_times()
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn ordered_times_pass() {
        assert!(
            payload(
                Some(at("2026-08-27 08:00:00")),
                Some(at("2026-08-27 17:00:00")),
            )
            .check_times()
            .is_ok()
        );
        assert!(payload(Some(at("2026-08-27 08:00:00")), None).check_times().is_ok());
        assert!(payload(None, None).check_times().is_ok());
    }
}
