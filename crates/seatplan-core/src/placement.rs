//! # Placement Stage
//!
//! Walks the interleaved sequence into rooms. Rooms are visited in ascending
//! capacity order (stable, so equal capacities keep their roster order); each
//! room takes the next `min(capacity, remaining)` examinees and numbers their
//! seats `1..=k`. Row and column coordinates derive from the seat number and
//! the room's column count.
//!
//! Filling small rooms first packs them tightly and leaves the large rooms
//! for the bulk of the remaining volume. It is a utilization heuristic, not
//! an optimal bin-packing.
//!
//! Capacity safety is by construction: the per-room take is capped, so no
//! room can ever receive more examinees than its stated capacity. Leftover
//! examinees are reported as an unplaced count, never as a failure.

use crate::types::{Examinee, Room, SeatAssignment};

// =============================================================================
// LAYOUT DESCRIPTOR
// =============================================================================

/// Column count assumed when a room's layout descriptor cannot be parsed.
///
/// A bad descriptor degrades only the row/column derivation; placement and
/// seat numbering proceed regardless, and no error is surfaced.
pub const DEFAULT_SEAT_COLUMNS: u32 = 5;

/// Parsed form of a room's `"R x C"` layout descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatMatrix {
    /// Row count claimed by the descriptor.
    pub rows: u32,
    /// Column count claimed by the descriptor.
    pub columns: u32,
}

impl SeatMatrix {
    /// Parse a layout descriptor such as `"2x5"` or `"12 X 8"`.
    ///
    /// Returns `None` unless both dimensions parse as positive integers.
    #[must_use]
    pub fn parse(layout: &str) -> Option<Self> {
        let (rows_part, columns_part) = layout.split_once(['x', 'X'])?;
        let rows: u32 = rows_part.trim().parse().ok()?;
        let columns: u32 = columns_part.trim().parse().ok()?;
        if rows == 0 || columns == 0 {
            return None;
        }
        Some(Self { rows, columns })
    }

    /// Total seats the descriptor claims.
    #[must_use]
    pub const fn seats(self) -> u32 {
        self.rows.saturating_mul(self.columns)
    }
}

/// Column count for a room, falling back to [`DEFAULT_SEAT_COLUMNS`] when the
/// layout descriptor does not parse.
#[must_use]
pub fn columns_of(layout: &str) -> u32 {
    SeatMatrix::parse(layout).map_or(DEFAULT_SEAT_COLUMNS, |matrix| matrix.columns)
}

/// Derive the 1-based `(row, column)` pair for a 1-based seat number.
///
/// `columns` must be positive; [`columns_of`] guarantees that.
#[must_use]
pub const fn seat_coordinates(seat_number: u32, columns: u32) -> (u32, u32) {
    ((seat_number - 1) / columns + 1, (seat_number - 1) % columns + 1)
}

// =============================================================================
// PLACEMENT
// =============================================================================

/// Result of the placement stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// One assignment per placed examinee, in placement order.
    pub assignments: Vec<SeatAssignment>,
    /// Examinees left over after every room filled.
    pub unplaced: usize,
}

/// Fill rooms from the interleaved sequence.
///
/// Stops when the sequence is drained or every room is full; whichever comes
/// first. The caller is expected to surface a non-zero `unplaced` count as a
/// warning alongside the plan.
#[must_use]
pub fn place(sequence: Vec<Examinee>, rooms: &[Room]) -> Placement {
    let mut ordered: Vec<&Room> = rooms.iter().collect();
    ordered.sort_by_key(|room| room.capacity);

    let mut assignments = Vec::with_capacity(sequence.len());
    let mut remaining = sequence.into_iter();

    for room in ordered {
        let columns = columns_of(&room.layout);
        for (offset, examinee) in remaining.by_ref().take(room.capacity as usize).enumerate() {
            let seat_number = offset as u32 + 1;
            let (row, column) = seat_coordinates(seat_number, columns);
            assignments.push(SeatAssignment {
                examinee_id: examinee.id,
                examinee_name: examinee.name,
                subject: examinee.subject,
                date: examinee.date,
                room_id: room.id.clone(),
                room_name: room.name.clone(),
                seat_number,
                row,
                column,
                room_capacity: room.capacity,
                room_layout: room.layout.clone(),
            });
        }
    }

    let unplaced = remaining.count();
    Placement {
        assignments,
        unplaced,
    }
}

// =============================================================================
// TESTS
// =============================================================================
