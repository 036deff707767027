//! Canonical schema constants for structured logging and events
//!
//! These constants keep field keys consistent across all crates.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Snapshot identifiers
pub const FIELD_OLD_LABEL: &str = "old_label";
pub const FIELD_NEW_LABEL: &str = "new_label";
pub const FIELD_SNAPSHOT_LABEL: &str = "snapshot_label";
pub const FIELD_SNAPSHOT_DIGEST: &str = "snapshot_digest";

// Collection sizes
pub const FIELD_ROW_COUNT: &str = "row_count";
pub const FIELD_PAIR_COUNT: &str = "pair_count";

// Finding counts
pub const FIELD_ISSUE_COUNT: &str = "issue_count";
pub const FIELD_WARNING_COUNT: &str = "warning_count";
pub const FIELD_INFO_COUNT: &str = "info_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
