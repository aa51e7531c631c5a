//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.
//!
//! All bodies use camelCase keys on the wire, matching the
//! [`SeatAssignment`] serialization in `seatplan-core`.

use chrono::{DateTime, Utc};
use seatplan_core::{SeatAssignment, Seating, SeatplanError};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub total_students: usize,
}

impl HealthResponse {
    #[must_use]
    pub fn new(total_students: usize) -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            total_students,
        }
    }
}

// =============================================================================
// SAVE SEATING REQUEST/RESPONSE
// =============================================================================

/// Upload request: a complete seating arrangement to store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSeatingRequest {
    pub seating_arrangement: Vec<SeatAssignment>,
}

impl SaveSeatingRequest {
    /// Convert to a stored plan, validating the arrangement.
    ///
    /// Empty arrangements are rejected at the boundary so a stray client
    /// cannot wipe the currently served plan with a blank upload.
    pub fn to_seating(&self) -> Result<Seating, SeatplanError> {
        if self.seating_arrangement.is_empty() {
            return Err(SeatplanError::NoExaminees);
        }
        Ok(Seating::new(self.seating_arrangement.clone(), 0))
    }
}

/// Upload response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSeatingResponse {
    pub success: bool,
    pub total_students: usize,
    pub error: Option<String>,
}

impl SaveSeatingResponse {
    pub fn success(total_students: usize) -> Self {
        Self {
            success: true,
            total_students,
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            total_students: 0,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// SEATING RESPONSE
// =============================================================================

/// Full-plan download response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatingResponse {
    pub seating_arrangement: Vec<SeatAssignment>,
    pub total_students: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub unplaced_count: usize,
}

impl SeatingResponse {
    /// Response body for a stored plan.
    pub fn from_seating(seating: &Seating) -> Self {
        Self {
            seating_arrangement: seating.assignments.clone(),
            total_students: seating.total(),
            generated_at: Some(seating.generated_at),
            unplaced_count: seating.unplaced,
        }
    }

    /// Response body when no plan is loaded.
    pub fn empty() -> Self {
        Self {
            seating_arrangement: vec![],
            total_students: 0,
            generated_at: None,
            unplaced_count: 0,
        }
    }
}

// =============================================================================
// STUDENT RESPONSE
// =============================================================================

/// Single-examinee lookup response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub student: Option<SeatAssignment>,
}

impl StudentResponse {
    pub fn found(assignment: &SeatAssignment) -> Self {
        Self {
            found: true,
            student: Some(assignment.clone()),
        }
    }

    pub fn not_found() -> Self {
        Self {
            found: false,
            student: None,
        }
    }
}
