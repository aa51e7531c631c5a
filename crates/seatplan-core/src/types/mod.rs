//! # Core Type Definitions
//!
//! This module contains the record model for the Seatplan engine:
//! - Identifiers (`ExamineeId`, `RoomId`, `Subject`)
//! - Input records (`Examinee`, `Room`)
//! - Partition key for the grouping stage (`GroupKey`)
//! - Output unit (`SeatAssignment`)
//! - Error types (`SeatplanError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Implement `Ord` where they key a `BTreeMap`
//! - Carry calendar dates as `chrono::NaiveDate` (no time component)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Unique identifier for an examinee within one active roster.
///
/// Stored exactly as supplied; the lookup stage compares it
/// case-insensitively via [`ExamineeId::matches`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExamineeId(pub String);

impl ExamineeId {
    /// Create a new examinee identifier from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive equality, as used by seat lookup.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        self.0.to_lowercase() == query.to_lowercase()
    }
}

impl fmt::Display for ExamineeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a room.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoomId(pub String);

impl RoomId {
    /// Create a new room identifier from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Subject identifier component of an examinee record.
///
/// Together with the exam date it defines the examinee's group key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Subject(pub String);

impl Subject {
    /// Create a new subject from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the subject as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// EXAMINEE
// =============================================================================

/// One examinee row from the active roster.
///
/// Supplied fresh on every run; the engine never persists examinees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Examinee {
    /// Unique identifier within the active set. Never empty after roster
    /// validation.
    pub id: ExamineeId,
    /// Display name.
    pub name: String,
    /// Subject identifier; with `date` it forms the group key.
    pub subject: Subject,
    /// Exam date, calendar date only.
    pub date: NaiveDate,
}

impl Examinee {
    /// Create a new examinee record.
    #[must_use]
    pub fn new(id: ExamineeId, name: impl Into<String>, subject: Subject, date: NaiveDate) -> Self {
        Self {
            id,
            name: name.into(),
            subject,
            date,
        }
    }

    /// The (subject, date) key this examinee partitions under.
    #[must_use]
    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            subject: self.subject.clone(),
            date: self.date,
        }
    }
}

// =============================================================================
// ROOM
// =============================================================================

/// One room row from the room roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: RoomId,
    /// Display name.
    pub name: String,
    /// Total seat capacity. Positive after roster validation.
    pub capacity: u32,
    /// Layout descriptor exactly as supplied, expected shape `"R x C"`.
    /// Unparseable descriptors fall back to a default column count at
    /// placement time rather than failing the run.
    pub layout: String,
}

impl Room {
    /// Create a new room record.
    #[must_use]
    pub fn new(
        id: RoomId,
        name: impl Into<String>,
        capacity: u32,
        layout: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            capacity,
            layout: layout.into(),
        }
    }
}

// =============================================================================
// GROUP KEY
// =============================================================================

/// Partition key for the grouping stage: subject, then date.
///
/// `Ord` is derived so a `BTreeMap<GroupKey, _>` iterates groups in a fixed,
/// deterministic order regardless of roster order. The interleaving stage
/// depends on that fixed order for its round-robin walk.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    /// Subject component, compared first.
    pub subject: Subject,
    /// Exam date component, compared second.
    pub date: NaiveDate,
}

impl GroupKey {
    /// Create a new group key.
    #[must_use]
    pub fn new(subject: Subject, date: NaiveDate) -> Self {
        Self { subject, date }
    }
}

// =============================================================================
// SEAT ASSIGNMENT
// =============================================================================

/// The output unit: one examinee fixed to one seat in one room.
///
/// Room capacity and layout are denormalized at assignment time so a plan can
/// be exported, displayed, or looked up without re-joining against the room
/// list. Serializes in camelCase for the wire and snapshot formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatAssignment {
    /// Identifier of the placed examinee.
    pub examinee_id: ExamineeId,
    /// Display name of the placed examinee.
    pub examinee_name: String,
    /// Subject the examinee sits for.
    pub subject: Subject,
    /// Exam date.
    pub date: NaiveDate,
    /// Identifier of the assigned room.
    pub room_id: RoomId,
    /// Display name of the assigned room.
    pub room_name: String,
    /// Seat number, 1-based and sequential within the room.
    pub seat_number: u32,
    /// Row, 1-based, derived from seat number and the room's column count.
    pub row: u32,
    /// Column, 1-based, derived from seat number and the room's column count.
    pub column: u32,
    /// Room capacity at time of assignment.
    pub room_capacity: u32,
    /// Room layout descriptor at time of assignment.
    pub room_layout: String,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Seatplan system.
///
/// - Use `Result<T, SeatplanError>` for fallible operations
/// - The CORE should never panic; all errors must be recoverable
/// - Row-level roster problems are quarantined, not raised as errors
#[derive(Debug, Error)]
pub enum SeatplanError {
    /// Generation was invoked with an empty examinee list.
    #[error("No examinees supplied")]
    NoExaminees,

    /// Generation was invoked with an empty room list.
    #[error("No rooms supplied")]
    NoRooms,

    /// A room ended up with more assignments than its stated capacity.
    /// Checked after placement; the min-capped fill makes this unreachable
    /// in practice, and a firing check aborts the whole run.
    #[error("Room {0} over capacity: {1} assigned, capacity {2}")]
    CapacityOverflow(RoomId, u32, u32),

    /// A required roster column is absent from the header row.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
