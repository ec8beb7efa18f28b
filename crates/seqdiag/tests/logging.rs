//! Tests for logging functionality
//!
//! These tests verify that logging initialization works correctly
//! with different configurations, and that building under a subscriber
//! behaves exactly as without one.

use seqdiag::core::logging::{init_logging, LogFormat};
use seqdiag::SequenceDiagram;
use std::str::FromStr;
use tracing_subscriber::util::SubscriberInitExt;

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
    assert_eq!(LogFormat::from_str("COMPACT").unwrap(), LogFormat::Compact);
    assert!(LogFormat::from_str("invalid").is_err());
}

#[test]
fn test_init_logging_with_levels() {
    // Only the first call can install the global subscriber; the rest must
    // fail gracefully rather than panic
    let _ = init_logging(Some("trace"), Some("compact"));
    let _ = init_logging(Some("debug"), Some("compact"));
    let _ = init_logging(Some("warn"), Some("compact"));
    let _ = init_logging(Some("off"), Some("compact"));
}

#[test]
fn test_init_logging_with_formats() {
    let _ = init_logging(Some("info"), Some("pretty"));
    let _ = init_logging(Some("info"), Some("json"));
}

#[test]
fn test_init_logging_invalid_format() {
    let result = init_logging(Some("info"), Some("invalid_format"));
    assert!(result.is_err());
}

#[test]
fn test_building_under_trace_subscriber() {
    let _guard = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .set_default();

    let mut diagram = SequenceDiagram::default();
    diagram
        .participant("A")
        .loop_start("x")
        .sync_request("A", "A", "tick")
        .loop_end()
        .alt_end();

    assert!(diagram.last_error().is_some());
    assert!(diagram.finalize().is_err());
    assert_eq!(
        diagram.into_inner(),
        b"sequenceDiagram\n    participant A\n    loop x\n    A->>A: tick\n    end"
    );
}
