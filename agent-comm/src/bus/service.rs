//! Typed service contracts.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A named request/response contract exposed on the bus.
///
/// Implementors are zero-sized markers pairing a request payload with the
/// response payload the remote service returns.
pub trait Service {
    /// Request payload, serialized into the call's `args`.
    type Request: Serialize + Send + Sync;
    /// Response payload, deserialized from the call's `values`.
    type Response: DeserializeOwned + Send;
}

/// The atomic-action service exposed by the behaviour executor.
#[derive(Debug, Clone, Copy)]
pub struct AtomicAction;

/// Request for one atomic action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AtomicActionRequest {
    /// Serialized action parameters. The schema is defined entirely by
    /// the remote service, e.g. `{"vel": 1.0}`.
    pub input: String,
}

/// Response from an atomic action call.
///
/// Opaque to callers here; the smoke-test client never inspects it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AtomicActionResponse {
    /// Whatever the executor reports back.
    #[serde(default)]
    pub output: String,
}

impl Service for AtomicAction {
    type Request = AtomicActionRequest;
    type Response = AtomicActionResponse;
}
