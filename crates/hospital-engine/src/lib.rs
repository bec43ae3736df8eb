//! Hospital Engine - command orchestration
//!
//! Each command loads the registry from SQLite, applies one core operation
//! and persists the rows it touched in a single transaction. Commands own
//! the start/end/error log events for their operation.

pub mod commands;
