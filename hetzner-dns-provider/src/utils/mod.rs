//! Utility modules.

/// Timestamp (de)serialization for API payloads.
pub mod datetime;

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;
