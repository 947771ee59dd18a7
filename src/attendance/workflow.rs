//! Clock-in / clock-out transitions over the daily attendance record.
//!
//! Both operations read the day's record first and perform at most one
//! write, so a failed attempt never leaves partial state behind.

use chrono::{NaiveDate, NaiveDateTime};

use crate::attendance::store::AttendanceStore;
use crate::error::ApiError;
use crate::model::attendance::AttendanceRecord;

/// The calendar day a timestamp falls on, time component discarded.
///
/// "Today" is server-local time; pin the server zone (e.g. via `TZ`) when
/// employees span time zones.
pub fn day_of(at: NaiveDateTime) -> NaiveDate {
    at.date()
}

/// First call of the day creates the record with `clock_in_time = now` and
/// `status = present`; any later call fails with `AlreadyClockedIn`.
///
/// The lookup gives the friendly error path; correctness against concurrent
/// clock-ins rests on the store's `(employee_id, date)` unique key, which
/// turns the losing insert into `AlreadyClockedIn` as well.
pub async fn clock_in<S: AttendanceStore>(
    store: &S,
    employee_id: u64,
    now: NaiveDateTime,
) -> Result<AttendanceRecord, ApiError> {
    let today = day_of(now);

    if store.find_for_day(employee_id, today).await?.is_some() {
        return Err(ApiError::AlreadyClockedIn);
    }

    store.insert_clock_in(employee_id, today, now).await
}

/// Stamps `clock_out_time` on today's record. No record means no clock-in
/// happened today (`NoClockInFound`; there is no backfill path), and a
/// record that already has a clock-out stays untouched
/// (`AlreadyClockedOut`).
pub async fn clock_out<S: AttendanceStore>(
    store: &S,
    employee_id: u64,
    now: NaiveDateTime,
) -> Result<AttendanceRecord, ApiError> {
    let today = day_of(now);

    let record = store
        .find_for_day(employee_id, today)
        .await?
        .ok_or(ApiError::NoClockInFound)?;

    if record.clock_out_time.is_some() {
        return Err(ApiError::AlreadyClockedOut);
    }

    store.set_clock_out(record.id, now).await
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::attendance::store::memory::MemoryAttendanceStore;
    use crate::model::attendance::AttendanceStatus;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[tokio::test]
    async fn clock_in_creates_present_record_for_the_day() {
        let store = MemoryAttendanceStore::new();
        let now = at("2026-08-27 08:05:00");

        let record = clock_in(&store, 7, now).await.unwrap();

        assert_eq!(record.employee_id, 7);
        assert_eq!(record.date, day_of(now));
        assert_eq!(record.clock_in_time, Some(now));
        assert_eq!(record.clock_out_time, None);
        assert_eq!(record.status, AttendanceStatus::Present);
    }

    #[tokio::test]
    async fn second_clock_in_same_day_is_rejected_without_a_write() {
        let store = MemoryAttendanceStore::new();
        clock_in(&store, 7, at("2026-08-27 08:00:00")).await.unwrap();
        let before = store.snapshot().await;

        let err = clock_in(&store, 7, at("2026-08-27 09:30:00"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::AlreadyClockedIn));
        assert_eq!(store.snapshot().await.len(), before.len());
        assert_eq!(
            store.snapshot().await[0].clock_in_time,
            before[0].clock_in_time
        );
    }

    #[tokio::test]
    async fn losing_the_insert_race_reports_already_clocked_in() {
        let store = MemoryAttendanceStore::new();
        let now = at("2026-08-27 08:00:00");
        // Another request got past the existence check and inserted first.
        store.insert_clock_in(7, day_of(now), now).await.unwrap();

        let err = store
            .insert_clock_in(7, day_of(now), at("2026-08-27 08:00:01"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::AlreadyClockedIn));
        assert_eq!(store.snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn clock_out_before_clock_in_is_not_found() {
        let store = MemoryAttendanceStore::new();

        let err = clock_out(&store, 9, at("2026-08-27 17:00:00"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NoClockInFound));
        assert!(store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn clock_out_stamps_a_time_not_before_clock_in() {
        let store = MemoryAttendanceStore::new();
        let t1 = at("2026-08-27 08:00:00");
        let t2 = at("2026-08-27 17:00:00");
        clock_in(&store, 7, t1).await.unwrap();

        let record = clock_out(&store, 7, t2).await.unwrap();

        assert_eq!(record.clock_out_time, Some(t2));
        assert!(record.clock_out_time.unwrap() >= record.clock_in_time.unwrap());
        assert_eq!(record.status, AttendanceStatus::Present);
    }

    #[tokio::test]
    async fn second_clock_out_is_rejected_and_keeps_the_first_time() {
        let store = MemoryAttendanceStore::new();
        clock_in(&store, 7, at("2026-08-27 08:00:00")).await.unwrap();
        let t2 = at("2026-08-27 17:00:00");
        clock_out(&store, 7, t2).await.unwrap();

        let err = clock_out(&store, 7, at("2026-08-27 18:00:00"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::AlreadyClockedOut));
        assert_eq!(store.snapshot().await[0].clock_out_time, Some(t2));
    }

    #[tokio::test]
    async fn midnight_boundary_starts_a_fresh_day() {
        let store = MemoryAttendanceStore::new();

        let first = clock_in(&store, 7, at("2026-08-27 23:59:59")).await.unwrap();
        let second = clock_in(&store, 7, at("2026-08-28 00:00:01")).await.unwrap();

        assert_ne!(first.date, second.date);
        assert_eq!(store.snapshot().await.len(), 2);
    }

    #[tokio::test]
    async fn employees_do_not_share_daily_records() {
        let store = MemoryAttendanceStore::new();
        clock_in(&store, 7, at("2026-08-27 08:00:00")).await.unwrap();

        clock_in(&store, 8, at("2026-08-27 08:01:00")).await.unwrap();
        let err = clock_out(&store, 9, at("2026-08-27 17:00:00"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NoClockInFound));
        assert_eq!(store.snapshot().await.len(), 2);
    }
}
