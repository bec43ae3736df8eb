//! Structured logging for the hospital workspace
//!
//! - One initialization point, `init(profile)`
//! - `log_op_start!`, `log_op_end!` and `log_op_error!` for command boundaries
//! - An in-memory capture layer for asserting on events in tests
//!
//! ```rust
//! use hospital_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```
//!
//! Engine commands own the start/end/error events. Core and store code only
//! emit `tracing::debug!` details. DNIs and phone numbers go through
//! `types::Sensitive` before reaching a log line.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
