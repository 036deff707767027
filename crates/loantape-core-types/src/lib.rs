//! Core types shared across loantape facilities
//!
//! This crate holds the canonical schema constants used by the logging
//! facility and by every crate that emits structured events.

pub mod schema;
