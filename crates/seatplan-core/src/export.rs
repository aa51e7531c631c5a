//! # Serialization Stage
//!
//! Converts a finished plan to and from a row-oriented text block: one fixed
//! header line naming the 11 fields, then one comma-delimited line per
//! assignment. Text fields are double-quoted with embedded quotes doubled;
//! numeric fields are written bare.
//!
//! ## Known limitations
//!
//! The import side is deliberately naive: it splits on every comma, strips
//! every quote character, and trims each field. Consequences:
//!
//! - A comma inside a free-text field (name, room name) desynchronizes the
//!   column alignment of that row on re-import.
//! - An embedded quote survives export (doubled, so external CSV tools read
//!   the file correctly) but is stripped on re-import.
//!
//! The round trip is exact for every field that contains neither a comma nor
//! a quote. Re-imported assignments are accepted without range-checking and
//! are not re-validated against any examinee or room master list.

use crate::types::{ExamineeId, RoomId, SeatAssignment, Subject};
use chrono::NaiveDate;

// =============================================================================
// FORMAT
// =============================================================================

/// The fixed header row: 11 field names in export order.
pub const EXPORT_HEADER: [&str; 11] = [
    "Identifier",
    "Name",
    "Subject",
    "Date",
    "Room ID",
    "Room Name",
    "Seat Number",
    "Row",
    "Column",
    "Room Capacity",
    "Room Layout",
];

/// Suggested download filename for an export produced on `date`.
#[must_use]
pub fn export_filename(date: NaiveDate) -> String {
    format!("exam-seating-{date}.csv")
}

// =============================================================================
// EXPORT
// =============================================================================

/// Render assignments as the delimited text block.
///
/// The header line is unquoted; data rows quote text fields (doubling any
/// embedded `"`) and leave seat number, row, column, and capacity bare.
#[must_use]
pub fn to_text(assignments: &[SeatAssignment]) -> String {
    let mut out = String::new();
    out.push_str(&EXPORT_HEADER.join(","));
    out.push('\n');

    for assignment in assignments {
        let fields = [
            quoted(assignment.examinee_id.as_str()),
            quoted(&assignment.examinee_name),
            quoted(assignment.subject.as_str()),
            quoted(&assignment.date.to_string()),
            quoted(assignment.room_id.as_str()),
            quoted(&assignment.room_name),
            assignment.seat_number.to_string(),
            assignment.row.to_string(),
            assignment.column.to_string(),
            assignment.room_capacity.to_string(),
            quoted(&assignment.room_layout),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// Wrap a text field in double quotes, doubling embedded quotes.
fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

// =============================================================================
// IMPORT
// =============================================================================

/// Parse a delimited text block back into assignments.
///
/// Blank lines are skipped. A data row is accepted when it has at least as
/// many fields as the header row; shorter rows are dropped without notice.
/// Within an accepted row, unparseable numeric fields default to 0 and an
/// unparseable date defaults to the epoch date.
#[must_use]
pub fn from_text(text: &str) -> Vec<SeatAssignment> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());
    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let required = header.split(',').count();

    let mut assignments = Vec::new();
    for line in lines {
        let fields: Vec<String> = line.split(',').map(clean_field).collect();
        if fields.len() < required {
            continue;
        }
        assignments.push(assignment_from_fields(&fields));
    }
    assignments
}

/// Strip every quote character and trim surrounding whitespace.
fn clean_field(raw: &str) -> String {
    raw.replace('"', "").trim().to_string()
}

fn field(fields: &[String], index: usize) -> &str {
    fields.get(index).map_or("", String::as_str)
}

fn numeric_field(fields: &[String], index: usize) -> u32 {
    field(fields, index).parse().unwrap_or(0)
}

fn date_field(fields: &[String], index: usize) -> NaiveDate {
    NaiveDate::parse_from_str(field(fields, index), "%Y-%m-%d").unwrap_or_default()
}

fn assignment_from_fields(fields: &[String]) -> SeatAssignment {
    SeatAssignment {
        examinee_id: ExamineeId::new(field(fields, 0)),
        examinee_name: field(fields, 1).to_string(),
        subject: Subject::new(field(fields, 2)),
        date: date_field(fields, 3),
        room_id: RoomId::new(field(fields, 4)),
        room_name: field(fields, 5).to_string(),
        seat_number: numeric_field(fields, 6),
        row: numeric_field(fields, 7),
        column: numeric_field(fields, 8),
        room_capacity: numeric_field(fields, 9),
        room_layout: field(fields, 10).to_string(),
    }
}

// =============================================================================
// TESTS
// =============================================================================
