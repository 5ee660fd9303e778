//! Shared primitive types used across the crate.

/// A stable, unique identifier for any stored entity (UUID v4 text).
pub type EntityId = String;

/// RFC 3339 creation timestamp, assigned once at insert.
pub type Timestamp = String;

/// Global 1-based position of a record in a generated dataset.
pub type RecordId = u32;
