//! Types shared by the hospital error and logging facilities
//!
//! - **Correlation types**: RequestId, TraceId, RequestContext
//! - **Sensitive data**: `Sensitive<T>` for patient identifiers in logs
//! - **Schema constants**: canonical log field keys and event names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::{RequestContext, RequestId, TraceId};
pub use sensitive::Sensitive;
