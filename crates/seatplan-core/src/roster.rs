//! # Roster Ingestion
//!
//! The typed upload boundary. Delimited roster text goes in; validated
//! [`Examinee`] and [`Room`] records come out, alongside a quarantine list of
//! the rows that failed to map cleanly. The core pipeline never sees a
//! loosely-typed row.
//!
//! Header columns are recognized case-insensitively and may appear in any
//! order. A missing required column is fatal; a bad row never is — it lands
//! in the quarantine with its line number and a reason.

use crate::types::{Examinee, ExamineeId, Room, RoomId, SeatplanError, Subject};
use chrono::NaiveDate;

// =============================================================================
// COLUMNS
// =============================================================================

/// Recognized examinee roster columns.
pub const EXAMINEE_COLUMNS: [&str; 4] = ["identifier", "name", "subject", "date"];

/// Recognized room roster columns.
pub const ROOM_COLUMNS: [&str; 4] = ["room id", "room name", "seat count", "layout descriptor"];

// =============================================================================
// OUTCOME
// =============================================================================

/// One quarantined roster row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based physical line number in the uploaded text.
    pub line: usize,
    /// Why the row was rejected.
    pub reason: String,
}

/// Result of parsing one roster: the clean records plus the quarantine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterOutcome<T> {
    /// Rows that mapped cleanly, in upload order.
    pub records: Vec<T>,
    /// Rows that did not, with line numbers and reasons.
    pub skipped: Vec<SkippedRow>,
}

// =============================================================================
// PARSERS
// =============================================================================

/// Parse an examinee roster.
///
/// Required columns: `identifier`, `name`, `subject`, `date` (ISO
/// `YYYY-MM-DD`). Rows with an empty identifier or an unparseable date are
/// quarantined.
///
/// # Errors
///
/// [`SeatplanError::MissingColumn`] when a required column is absent from
/// the header row (or the text has no header row at all).
pub fn parse_examinees(text: &str) -> Result<RosterOutcome<Examinee>, SeatplanError> {
    parse_roster(text, &EXAMINEE_COLUMNS, |fields, at| {
        let identifier = field(fields, at[0]);
        if identifier.is_empty() {
            return Err("empty identifier".to_string());
        }
        let raw_date = field(fields, at[3]);
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
            .map_err(|_| format!("unparseable date: {raw_date:?}"))?;

        Ok(Examinee::new(
            ExamineeId::new(identifier),
            field(fields, at[1]),
            Subject::new(field(fields, at[2])),
            date,
        ))
    })
}

/// Parse a room roster.
///
/// Required columns: `room id`, `room name`, `seat count`, `layout
/// descriptor`. Rows with an empty room id or a non-positive seat count are
/// quarantined. The layout descriptor is carried verbatim; placement falls
/// back to a default column count if it does not parse.
///
/// # Errors
///
/// [`SeatplanError::MissingColumn`] when a required column is absent from
/// the header row.
pub fn parse_rooms(text: &str) -> Result<RosterOutcome<Room>, SeatplanError> {
    parse_roster(text, &ROOM_COLUMNS, |fields, at| {
        let id = field(fields, at[0]);
        if id.is_empty() {
            return Err("empty room id".to_string());
        }
        let raw_capacity = field(fields, at[2]);
        let capacity: u32 = raw_capacity
            .parse()
            .ok()
            .filter(|c| *c > 0)
            .ok_or_else(|| format!("capacity must be a positive integer, got {raw_capacity:?}"))?;

        Ok(Room::new(
            RoomId::new(id),
            field(fields, at[1]),
            capacity,
            field(fields, at[3]),
        ))
    })
}

// =============================================================================
// SHARED MACHINERY
// =============================================================================

/// Walk one roster: locate the required columns, then map every data row
/// through `build`, quarantining the rows it rejects.
fn parse_roster<T>(
    text: &str,
    required: &[&str],
    build: impl Fn(&[String], &[usize]) -> Result<T, String>,
) -> Result<RosterOutcome<T>, SeatplanError> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let header_cells: Vec<String> = match lines.next() {
        Some((_, header)) => header.split(',').map(clean_field).collect(),
        None => Vec::new(),
    };
    let column_at = locate_columns(&header_cells, required)?;

    let mut records = Vec::new();
    let mut skipped = Vec::new();
    for (index, line) in lines {
        let line_number = index + 1;
        let fields: Vec<String> = line.split(',').map(clean_field).collect();
        if fields.len() < header_cells.len() {
            skipped.push(SkippedRow {
                line: line_number,
                reason: format!(
                    "row has {} fields, header has {}",
                    fields.len(),
                    header_cells.len()
                ),
            });
            continue;
        }
        match build(&fields, &column_at) {
            Ok(record) => records.push(record),
            Err(reason) => skipped.push(SkippedRow {
                line: line_number,
                reason,
            }),
        }
    }

    Ok(RosterOutcome { records, skipped })
}

/// Map each required column name to its index in the header.
fn locate_columns(header_cells: &[String], required: &[&str]) -> Result<Vec<usize>, SeatplanError> {
    required
        .iter()
        .map(|name| {
            header_cells
                .iter()
                .position(|cell| cell.eq_ignore_ascii_case(name))
                .ok_or_else(|| SeatplanError::MissingColumn((*name).to_string()))
        })
        .collect()
}

fn clean_field(raw: &str) -> String {
    raw.replace('"', "").trim().to_string()
}

fn field(fields: &[String], index: usize) -> &str {
    fields.get(index).map_or("", String::as_str)
}

// =============================================================================
// TESTS
// =============================================================================
