//! LoanTape Engine - Orchestration layer
//!
//! Provides high-level commands that load snapshot files through the store
//! and run the core consistency engine and analytics over them.

pub mod commands;
