//! # Lookup Stage
//!
//! Answers "where do I sit?" against a caller-supplied plan. The engine
//! holds no plan of its own; whoever owns the current `Seating` passes its
//! assignments in.

use crate::types::SeatAssignment;

/// Find the assignment for an identifier.
///
/// Matching is case-insensitive and exact; no partial or fuzzy matching.
/// Identifiers are assumed unique within one plan, so the first match is
/// returned if duplicates exist.
#[must_use]
pub fn find<'a>(identifier: &str, assignments: &'a [SeatAssignment]) -> Option<&'a SeatAssignment> {
    assignments
        .iter()
        .find(|assignment| assignment.examinee_id.matches(identifier))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::types::{ExamineeId, RoomId, Subject};
    use chrono::NaiveDate;

    fn assignment(id: &str, seat: u32) -> SeatAssignment {
        SeatAssignment {
            examinee_id: ExamineeId::new(id),
            examinee_name: id.to_string(),
            subject: Subject::new("Math"),
            date: NaiveDate::from_ymd_opt(2026, 6, 15).unwrap(),
            room_id: RoomId::new("R1"),
            room_name: "Hall".to_string(),
            seat_number: seat,
            row: 1,
            column: seat,
            room_capacity: 10,
            room_layout: "2x5".to_string(),
        }
    }

    #[test]
    fn finds_regardless_of_query_case() {
        let plan = vec![assignment("Stu-001", 1), assignment("Stu-002", 2)];

        let lower = find("stu-002", &plan);
        let upper = find("STU-002", &plan);
        let mixed = find("StU-002", &plan);

        assert_eq!(lower, upper);
        assert_eq!(upper, mixed);
        assert_eq!(lower.unwrap().seat_number, 2);
    }

    #[test]
    fn unknown_identifier_is_not_found() {
        let plan = vec![assignment("Stu-001", 1)];
        assert!(find("Stu-999", &plan).is_none());
    }

    #[test]
    fn duplicate_identifiers_return_the_first_match() {
        let mut first = assignment("DUP", 1);
        first.room_name = "First Hall".to_string();
        let mut second = assignment("dup", 2);
        second.room_name = "Second Hall".to_string();

        let plan = vec![first, second];
        let found = find("Dup", &plan).unwrap();
        assert_eq!(found.room_name, "First Hall");
    }

    #[test]
    fn empty_plan_finds_nothing() {
        assert!(find("anyone", &[]).is_none());
    }
}
