use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Stored as a lowercase string; defaults to `present` when a record is
/// created through clock-in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Display, EnumString,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Excused,
    Sick,
    Absent,
}

/// One row per employee per day, enforced by a unique key on
/// `(employee_id, date)`. `clock_out_time` is only ever set after
/// `clock_in_time`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceRecord {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 7)]
    pub employee_id: u64,
    /// Calendar day, time component discarded.
    #[schema(example = "2026-08-27", value_type = String, format = "date")]
    pub date: NaiveDate,
    pub clock_in_time: Option<NaiveDateTime>,
    pub clock_out_time: Option<NaiveDateTime>,
    pub status: AttendanceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_lowercase_wire_names() {
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::Present).unwrap(),
            "\"present\""
        );
        let parsed: AttendanceStatus = serde_json::from_str("\"sick\"").unwrap();
        assert_eq!(parsed, AttendanceStatus::Sick);
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(serde_json::from_str::<AttendanceStatus>("\"late\"").is_err());
    }
}
