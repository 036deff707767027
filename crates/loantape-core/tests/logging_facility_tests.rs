#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{base_deals, tape};
use loantape_core::errors::{ExError, ExErrorKind, LoanTapeError};
use loantape_core::logging_facility::test_capture::init_test_capture;
use loantape_core::{check, check_sequence, log_op_end, log_op_error, log_op_start};
use loantape_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, snapshot_label = "2026-01-31");

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[0].field("snapshot_label"), Some("2026-01-31"));
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    capture.assert_field(op_name, EVENT_END, "duration_ms", "42");
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = LoanTapeError::UnknownCurrency {
        code: "XYZ".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    capture.assert_field(op_name, EVENT_END_ERROR, "err_code", "ERR_UNKNOWN_CURRENCY");
}

#[test]
fn test_log_op_error_accepts_ex_error() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_4";

    let err = ExError::new(ExErrorKind::Io).with_message("gone");
    log_op_error!(op_name, err, duration_ms = 1);

    capture.assert_field(op_name, EVENT_END_ERROR, "err_code", ExErrorKind::Io.code());
}

#[test]
fn test_consistency_check_logs_counts() {
    let capture = init_test_capture();
    let old = tape("log-old-5", base_deals());
    let new = tape("log-new-5", base_deals().into_iter().take(2).collect());

    check(&old, &new, "log-old-5", "log-new-5");

    let ends: Vec<_> = capture
        .events_for_op("consistency_check")
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .filter(|e| e.field("issue_count") == Some("1"))
        .collect();
    assert!(!ends.is_empty());
    assert_eq!(ends[0].field("passed"), Some("false"));

    capture.assert_field("consistency_check", EVENT_START, "old_label", "log-old-5");
}

#[test]
fn test_sequence_logs_pair_count() {
    let capture = init_test_capture();
    let snaps = vec![
        tape("seq-a", base_deals()),
        tape("seq-b", base_deals()),
        tape("seq-c", base_deals()),
    ];

    check_sequence(&snaps);

    let found = capture.count_events(|e| {
        e.op.as_deref() == Some("check_sequence")
            && e.event.as_deref() == Some(EVENT_END)
            && e.field("pair_count") == Some("2")
    });
    assert!(found >= 1);
}
