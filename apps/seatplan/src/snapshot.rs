//! # Plan Snapshot
//!
//! One JSON file (default `seatplan.json`) holds the most recent plan. It is
//! overwritten wholesale on every successful generation, import, or pull, and
//! read back by `serve`, `find`, `export`, and `status`.
//!
//! The envelope uses the same camelCase keys as the HTTP wire format, so a
//! snapshot file and a `GET /api/seating` body are interchangeable.

use chrono::{DateTime, Utc};
use seatplan_core::{SeatAssignment, Seating, SeatplanError};
use serde::{Deserialize, Serialize};
use std::path::Path;

// =============================================================================
// ENVELOPE
// =============================================================================

/// On-disk snapshot envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub seating_arrangement: Vec<SeatAssignment>,
    pub total_students: usize,
    pub generated_at: DateTime<Utc>,
    #[serde(default)]
    pub unplaced_count: usize,
}

impl Snapshot {
    /// Wrap a plan for writing.
    #[must_use]
    pub fn from_seating(seating: &Seating) -> Self {
        Self {
            seating_arrangement: seating.assignments.clone(),
            total_students: seating.total(),
            generated_at: seating.generated_at,
            unplaced_count: seating.unplaced,
        }
    }

    /// Unwrap a read envelope back into a plan.
    #[must_use]
    pub fn into_seating(self) -> Seating {
        Seating {
            assignments: self.seating_arrangement,
            unplaced: self.unplaced_count,
            generated_at: self.generated_at,
        }
    }
}

// =============================================================================
// LOAD / SAVE
// =============================================================================

/// Load the snapshot plan, if one exists.
///
/// A missing file is not an error — it means no plan has been generated yet.
///
/// # Errors
///
/// [`SeatplanError::IoError`] when the file exists but cannot be read or
/// parsed.
pub fn load(path: &Path) -> Result<Option<Seating>, SeatplanError> {
    if !path.exists() {
        return Ok(None);
    }

    let data = std::fs::read(path)
        .map_err(|e| SeatplanError::IoError(format!("Read snapshot {:?}: {}", path, e)))?;
    let snapshot: Snapshot = serde_json::from_slice(&data)
        .map_err(|e| SeatplanError::IoError(format!("Parse snapshot {:?}: {}", path, e)))?;

    Ok(Some(snapshot.into_seating()))
}

/// Write the plan, replacing any previous snapshot wholesale.
///
/// # Errors
///
/// [`SeatplanError::IoError`] when the file cannot be encoded or written.
pub fn save(path: &Path, seating: &Seating) -> Result<(), SeatplanError> {
    let snapshot = Snapshot::from_seating(seating);
    let data = serde_json::to_vec_pretty(&snapshot)
        .map_err(|e| SeatplanError::IoError(format!("Encode snapshot: {}", e)))?;
    std::fs::write(path, &data)
        .map_err(|e| SeatplanError::IoError(format!("Write snapshot {:?}: {}", path, e)))?;

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
