//! # seatplan-core
//!
//! The deterministic seat-assignment engine for Seatplan - THE LOGIC.
//!
//! This crate turns an examinee roster and a room roster into a seating plan
//! that keeps same-subject examinees apart where group sizes permit, never
//! exceeds a room's capacity, and round-trips through a portable delimited
//! text format.
//!
//! ## Pipeline
//!
//! roster → [`grouping`] → [`interleave`] → [`placement`] → plan →
//! [`export`] / [`lookup`]
//!
//! ## Architectural Constraints
//!
//! The CORE:
//! - Is stateless: every call receives its inputs and returns a fresh plan;
//!   the caller owns the current `Seating`
//! - Is deterministic given a seeded random source (the shuffle is the only
//!   randomness, and it is injected)
//! - Has NO async, NO network, NO file I/O (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod engine;
pub mod export;
pub mod grouping;
pub mod interleave;
pub mod lookup;
pub mod placement;
pub mod roster;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    Examinee, ExamineeId, GroupKey, Room, RoomId, SeatAssignment, SeatplanError, Subject,
};

// =============================================================================
// RE-EXPORTS: Pipeline Stages
// =============================================================================

pub use engine::{Seating, generate};
pub use grouping::group_examinees;
pub use interleave::interleave;
pub use lookup::find;
pub use placement::{
    DEFAULT_SEAT_COLUMNS, Placement, SeatMatrix, columns_of, place, seat_coordinates,
};

// =============================================================================
// RE-EXPORTS: Boundaries (roster in, text out)
// =============================================================================

pub use export::{EXPORT_HEADER, export_filename, from_text, to_text};
pub use roster::{
    EXAMINEE_COLUMNS, ROOM_COLUMNS, RosterOutcome, SkippedRow, parse_examinees, parse_rooms,
};
