//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.

use super::{
    AppState,
    types::{
        HealthResponse, SaveSeatingRequest, SaveSeatingResponse, SeatingResponse, StudentResponse,
    },
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use seatplan_core::find;

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let plan = state.plan.read().await;
    let total = plan.as_ref().map_or(0, |seating| seating.total());
    Json(HealthResponse::new(total))
}

// =============================================================================
// SAVE SEATING HANDLER
// =============================================================================

/// Store an uploaded seating arrangement, replacing any previous plan.
pub async fn save_seating_handler(
    State(state): State<AppState>,
    Json(request): Json<SaveSeatingRequest>,
) -> impl IntoResponse {
    // Validate and convert request to a stored plan
    let seating = match request.to_seating() {
        Ok(s) => s,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(SaveSeatingResponse::error(format!(
                    "Invalid arrangement: {}",
                    e
                ))),
            );
        }
    };

    let total = seating.total();

    // Get write lock and replace the plan wholesale
    let mut plan = state.plan.write().await;
    *plan = Some(seating);

    tracing::info!("Stored seating plan: {} assignments", total);
    (StatusCode::OK, Json(SaveSeatingResponse::success(total)))
}

// =============================================================================
// SEATING HANDLER
// =============================================================================

/// Return the complete stored plan.
pub async fn seating_handler(State(state): State<AppState>) -> impl IntoResponse {
    let plan = state.plan.read().await;

    match plan.as_ref() {
        Some(seating) => (StatusCode::OK, Json(SeatingResponse::from_seating(seating))),
        None => (StatusCode::NOT_FOUND, Json(SeatingResponse::empty())),
    }
}

// =============================================================================
// STUDENT HANDLER
// =============================================================================

/// Look up one examinee's assignment by identifier (case-insensitive).
pub async fn student_handler(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> impl IntoResponse {
    let plan = state.plan.read().await;
    let assignments = plan
        .as_ref()
        .map_or(&[][..], |seating| seating.assignments.as_slice());

    match find(&identifier, assignments) {
        Some(assignment) => (StatusCode::OK, Json(StudentResponse::found(assignment))),
        None => (StatusCode::NOT_FOUND, Json(StudentResponse::not_found())),
    }
}
