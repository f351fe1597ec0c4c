// src/api/responses.rs
//! OData envelopes for Microsoft Graph responses.

use serde::{Deserialize, Serialize};

/// Envelope for every Graph collection response.
///
/// `@odata.nextLink` is the sole continuation signal: present means more
/// results are waiting behind that URL, absent means the walk is done.
/// `@odata.count` only appears when the request asked for it with
/// `$count=true`, and it counts the whole collection, not this slice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(
        rename = "@odata.context",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub context: Option<String>,

    #[serde(
        rename = "@odata.count",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub count: Option<i64>,

    #[serde(
        rename = "@odata.nextLink",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub next_link: Option<String>,

    #[serde(default)]
    pub value: Vec<T>,
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        Self {
            context: None,
            count: None,
            next_link: None,
            value: Vec::new(),
        }
    }
}

/// Graph error envelope: `{"error": {"code": "...", "message": "..."}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphErrorBody {
    pub error: GraphErrorPayload,
}

/// The code/message pair inside a Graph error envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphErrorPayload {
    pub code: String,
    #[serde(default)]
    pub message: String,
    /// Request id and timestamp Graph attaches for support cases.
    #[serde(rename = "innerError", default)]
    pub inner_error: Option<serde_json::Value>,
}
