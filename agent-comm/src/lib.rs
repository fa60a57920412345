//! Agent-side communication glue for vision-language robot control.
//!
//! This crate provides two small, independent pieces:
//!
//! - [`vlm`] — a thin adapter that formats a text prompt and a
//!   base64-encoded image into one multimodal chat-completion request and
//!   returns the text of the first response.
//! - [`bus`] — client glue for a rosbridge-style robotics middleware bus:
//!   explicit node registration and typed, synchronous service calls.
//!
//! There is no shared state and no data flow between the two.

pub mod bus;
pub mod error;
pub mod prelude;
pub mod vlm;

pub use error::{BusError, Error, Result, VlmError, VlmErrorKind};
