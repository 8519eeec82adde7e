//! JSON bodies returned to the upload widget.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

/// Answer to a successful upload; becomes the record's `response`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    /// Server-side identifier of the stored upload
    pub id: String,

    /// File name sent in the multipart part
    pub name: String,

    /// Bytes received
    pub size: u64,

    /// Multipart field the file arrived in
    pub field: String,

    /// Extra text fields sent with the file
    pub fields: BTreeMap<String, String>,

    /// RFC 3339 timestamp
    pub received_at: String,
}

impl UploadReceipt {
    pub fn new(name: String, size: u64, field: String, fields: BTreeMap<String, String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            size,
            field,
            fields,
            received_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Create an error response
pub fn error_response(error: &str) -> Value {
    json!({
        "id": Uuid::new_v4().to_string(),
        "status": "error",
        "error": error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_uses_camel_case() {
        let mut fields = BTreeMap::new();
        fields.insert("folder".to_string(), "inbox".to_string());
        let receipt = UploadReceipt::new("a.txt".into(), 3, "file".into(), fields);

        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["name"], "a.txt");
        assert_eq!(json["size"], 3);
        assert_eq!(json["fields"]["folder"], "inbox");
        assert!(json["receivedAt"].is_string());
        assert!(json.get("received_at").is_none());
    }

    #[test]
    fn test_error_response_shape() {
        let body = error_response("No file provided");
        assert_eq!(body["status"], "error");
        assert_eq!(body["error"], "No file provided");
        assert!(Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());
    }
}
