//! Client glue for a rosbridge-style robotics middleware bus.
//!
//! Processes register as named nodes and issue synchronous calls against
//! named services. Service discovery, routing, and transport all stay
//! inside the bridge; this module only speaks the JSON protocol frames
//! needed for a single call.
//!
//! Registration is an explicit [`Node::connect`] call rather than an
//! import-time side effect: construct one node per process and reuse it.

mod node;
mod protocol;
mod service;

pub use node::{Node, ServiceClient};
pub use service::{AtomicAction, AtomicActionRequest, AtomicActionResponse, Service};
