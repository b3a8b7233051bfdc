use crate::Category;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Audit record of one accepted selection.
///
/// Nothing in this crate persists records, they are handed to whatever
/// store the caller uses. Serialized as:
///
/// ```json
/// {
///   "user_agent": "Mozilla/5.0 ...",
///   "agent_type": "mobile",
///   "timestamp": "2025-01-01T00:00:00Z",
///   "client_key": "127.0.0.1",
///   "endpoint": "/api/random/mobile"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRecord {
    /// The selected user agent text.
    #[serde(rename = "user_agent")]
    pub text: String,
    /// Scope the text was selected from.
    #[serde(rename = "agent_type")]
    pub category: Category,
    /// When the selection happened.
    pub timestamp: Timestamp,
    /// The client the selection was made for, e.g. its IP address.
    pub client_key: String,
    /// The endpoint or operation that made the selection.
    pub endpoint: String,
}

impl SelectionRecord {
    /// Create a record for a selection made right now.
    pub fn new(
        text: impl Into<String>,
        category: Category,
        client_key: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            category,
            timestamp: Timestamp::now(),
            client_key: client_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Overwrite the time of the selection.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_form() {
        let record = SelectionRecord::new(
            "Mozilla/5.0 (Android 15; Mobile; rv:143.0) Gecko/143.0 Firefox/143.0",
            Category::Any,
            "10.0.0.7",
            "/api/random",
        )
        .with_timestamp(Timestamp::UNIX_EPOCH);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            serde_json::json!({
                "user_agent": "Mozilla/5.0 (Android 15; Mobile; rv:143.0) Gecko/143.0 Firefox/143.0",
                "agent_type": "random",
                "timestamp": "1970-01-01T00:00:00Z",
                "client_key": "10.0.0.7",
                "endpoint": "/api/random",
            }),
            value
        );

        let parsed: SelectionRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record, parsed);
    }
}
