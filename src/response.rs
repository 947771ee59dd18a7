use serde::Serialize;
use utoipa::ToSchema;

/// Canonical response body: `{ "ok": bool, "message": string, "data": T|null }`.
///
/// Built fresh for every response; nothing is shared between calls.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T: Serialize> {
    #[schema(example = true)]
    pub ok: bool,
    #[schema(example = "Karyawan ditemukan")]
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            ok: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Success without a payload (deletes); `data` serializes as JSON `null`.
    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
            data: None,
        }
    }

    /// Failure envelope; `data` serializes as JSON `null`.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_carries_payload() {
        let resp = ApiResponse::ok("Absensi masuk disimpan", json!({"id": 1}));
        let body = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            body,
            json!({"ok": true, "message": "Absensi masuk disimpan", "data": {"id": 1}})
        );
    }

    #[test]
    fn error_envelope_has_null_data() {
        let resp = ApiResponse::error("Anda sudah melakukan absen masuk");
        let body = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            body,
            json!({"ok": false, "message": "Anda sudah melakukan absen masuk", "data": null})
        );
    }

    #[test]
    fn empty_success_has_null_data() {
        let body = serde_json::to_value(ApiResponse::ok_empty("Absensi dihapus")).unwrap();
        assert_eq!(
            body,
            json!({"ok": true, "message": "Absensi dihapus", "data": null})
        );
    }
}
