//! Convenience re-exports for common usage.

pub use crate::bus::{
    AtomicAction, AtomicActionRequest, AtomicActionResponse, Node, Service, ServiceClient,
};
pub use crate::error::{BusError, Error, Result, VlmError, VlmErrorKind};
pub use crate::vlm::{Vlm, VlmConfig};
