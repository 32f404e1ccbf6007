//! Utility modules.

/// Lenient int64 serde helpers for proto3 JSON payloads.
pub mod int64;

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;
