//! Wire types for requests and responses that are not domain types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Request body for the bulk delete endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct BulkDeleteRequest<'a> {
    pub ids: Vec<&'a str>,
}

/// Error body returned by the backend on 4xx responses.
///
/// The backend is not consistent about which of `error`/`message` it fills,
/// and per-field details come either as `errors` or `details`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
    #[serde(default, alias = "details")]
    pub errors: Option<serde_json::Value>,
}

impl ApiErrorBody {
    /// Best general message, falling back to `fallback`.
    pub fn summary(&self, fallback: &str) -> String {
        self.message
            .clone()
            .or_else(|| self.error.clone())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Per-field messages, if the body carried an object of them.
    pub fn field_messages(&self) -> BTreeMap<String, String> {
        let Some(serde_json::Value::Object(map)) = &self.errors else {
            return BTreeMap::new();
        };

        map.iter()
            .map(|(field, value)| {
                let text = match value {
                    serde_json::Value::String(s) => s.clone(),
                    serde_json::Value::Array(items) => items
                        .iter()
                        .map(|v| v.as_str().map_or_else(|| v.to_string(), str::to_string))
                        .collect::<Vec<_>>()
                        .join(", "),
                    other => other.to_string(),
                };
                (field.clone(), text)
            })
            .collect()
    }
}
