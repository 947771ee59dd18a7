use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::MySqlPool;

use crate::error::{ApiError, is_duplicate_key};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};

const RECORD_COLUMNS: &str = "id, employee_id, date, clock_in_time, clock_out_time, status";

/// Persistence seam for the clock-in/clock-out workflow. The store is the
/// sole source of truth; both mutations are single-row and atomic.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    async fn find_for_day(
        &self,
        employee_id: u64,
        day: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, ApiError>;

    /// Creates the daily record with `status = present`. The unique key on
    /// `(employee_id, date)` makes a concurrent duplicate surface as
    /// `AlreadyClockedIn` rather than a second row.
    async fn insert_clock_in(
        &self,
        employee_id: u64,
        day: NaiveDate,
        at: NaiveDateTime,
    ) -> Result<AttendanceRecord, ApiError>;

    /// Sets `clock_out_time` only if it is still unset; a lost race reports
    /// `AlreadyClockedOut`.
    async fn set_clock_out(&self, id: u64, at: NaiveDateTime)
    -> Result<AttendanceRecord, ApiError>;
}

pub struct MySqlAttendanceStore {
    pool: MySqlPool,
}

impl MySqlAttendanceStore {
    pub fn new(pool: &MySqlPool) -> Self {
        Self { pool: pool.clone() }
    }
}

#[async_trait]
impl AttendanceStore for MySqlAttendanceStore {
    async fn find_for_day(
        &self,
        employee_id: u64,
        day: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, ApiError> {
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM attendance WHERE employee_id = ? AND date = ?"
        );
        let record = sqlx::query_as::<_, AttendanceRecord>(&sql)
            .bind(employee_id)
            .bind(day)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn insert_clock_in(
        &self,
        employee_id: u64,
        day: NaiveDate,
        at: NaiveDateTime,
    ) -> Result<AttendanceRecord, ApiError> {
        let result = sqlx::query(
            "INSERT INTO attendance (employee_id, date, clock_in_time, status) VALUES (?, ?, ?, ?)",
        )
        .bind(employee_id)
        .bind(day)
        .bind(at)
        .bind(AttendanceStatus::Present)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_duplicate_key(&e) {
                ApiError::AlreadyClockedIn
            } else {
                ApiError::Store(e)
            }
        })?;

        Ok(AttendanceRecord {
            id: result.last_insert_id(),
            employee_id,
            date: day,
            clock_in_time: Some(at),
            clock_out_time: None,
            status: AttendanceStatus::Present,
        })
    }

    async fn set_clock_out(
        &self,
        id: u64,
        at: NaiveDateTime,
    ) -> Result<AttendanceRecord, ApiError> {
        let result =
            sqlx::query("UPDATE attendance SET clock_out_time = ? WHERE id = ? AND clock_out_time IS NULL")
                .bind(at)
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::AlreadyClockedOut);
        }

        let sql = format!("SELECT {RECORD_COLUMNS} FROM attendance WHERE id = ?");
        let record = sqlx::query_as::<_, AttendanceRecord>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(record)
    }
}

#[cfg(test)]
pub mod memory {
    //! In-memory store mirroring the MySQL store's contract, including the
    //! daily uniqueness constraint and the guarded clock-out update.

    use tokio::sync::RwLock;

    use super::*;

    #[derive(Default)]
    pub struct MemoryAttendanceStore {
        records: RwLock<Vec<AttendanceRecord>>,
    }

    impl MemoryAttendanceStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn snapshot(&self) -> Vec<AttendanceRecord> {
            self.records.read().await.clone()
        }
    }

    #[async_trait]
    impl AttendanceStore for MemoryAttendanceStore {
        async fn find_for_day(
            &self,
            employee_id: u64,
            day: NaiveDate,
        ) -> Result<Option<AttendanceRecord>, ApiError> {
            let records = self.records.read().await;
            Ok(records
                .iter()
                .find(|r| r.employee_id == employee_id && r.date == day)
                .cloned())
        }

        async fn insert_clock_in(
            &self,
            employee_id: u64,
            day: NaiveDate,
            at: NaiveDateTime,
        ) -> Result<AttendanceRecord, ApiError> {
            let mut records = self.records.write().await;
            if records
                .iter()
                .any(|r| r.employee_id == employee_id && r.date == day)
            {
                return Err(ApiError::AlreadyClockedIn);
            }
            let record = AttendanceRecord {
                id: records.len() as u64 + 1,
                employee_id,
                date: day,
                clock_in_time: Some(at),
                clock_out_time: None,
                status: AttendanceStatus::Present,
            };
            records.push(record.clone());
            Ok(record)
        }

        async fn set_clock_out(
            &self,
            id: u64,
            at: NaiveDateTime,
        ) -> Result<AttendanceRecord, ApiError> {
            let mut records = self.records.write().await;
            let record = records
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or(ApiError::NoClockInFound)?;
            if record.clock_out_time.is_some() {
                return Err(ApiError::AlreadyClockedOut);
            }
            record.clock_out_time = Some(at);
            Ok(record.clone())
        }
    }
}
