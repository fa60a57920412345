//! rosbridge v2 protocol frames.
//!
//! Only the two frames involved in a service call are modeled; everything
//! else the bridge may send is skipped.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Frames sent to the bridge.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub(crate) enum Outbound {
    /// Invoke a named service once.
    CallService {
        id: String,
        service: String,
        args: Value,
    },
}

/// Frames received from the bridge.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub(crate) enum Inbound {
    /// Result of a service call.
    ServiceResponse {
        id: Option<String>,
        #[serde(default)]
        values: Value,
        #[serde(default = "default_true")]
        result: bool,
    },
    /// Status frames and anything else we do not act on.
    #[serde(other)]
    Ignored,
}

const fn default_true() -> bool {
    true
}
