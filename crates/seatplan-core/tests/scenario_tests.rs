//! # Scenario Tests
//!
//! Fixed end-to-end arrangements with known expected outcomes:
//! - Round-robin alternation across two uneven subject groups
//! - Ascending-capacity fill across two rooms
//! - Overflow reporting when rooms run out
//! - Import tolerance for short and malformed rows

use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use seatplan_core::{
    Examinee, ExamineeId, Room, RoomId, SeatplanError, Subject, find, from_text, generate,
    parse_examinees, parse_rooms, to_text,
};

fn exam_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 15).expect("valid date")
}

fn examinee(id: &str, subject: &str) -> Examinee {
    Examinee::new(ExamineeId::new(id), id, Subject::new(subject), exam_date())
}

fn room(id: &str, capacity: u32, layout: &str) -> Room {
    Room::new(RoomId::new(id), id, capacity, layout)
}

// =============================================================================
// ALTERNATION ACROSS UNEVEN GROUPS
// =============================================================================

mod alternation {
    use super::*;

    /// 3 "A" + 4 "B" in one 10-seat "2x5" room: seven seats numbered 1-7,
    /// coordinates walking the first row then wrapping, and the first six
    /// positions strictly alternating A/B whatever the shuffle seed.
    #[test]
    fn two_subject_groups_alternate_until_the_smaller_runs_out() {
        for seed in [0, 7, 4242] {
            let examinees = vec![
                examinee("A1", "A"),
                examinee("A2", "A"),
                examinee("A3", "A"),
                examinee("B1", "B"),
                examinee("B2", "B"),
                examinee("B3", "B"),
                examinee("B4", "B"),
            ];
            let rooms = [room("hall", 10, "2x5")];

            let mut rng = StdRng::seed_from_u64(seed);
            let seating = generate(examinees, &rooms, &mut rng).expect("generate");

            assert_eq!(seating.total(), 7);
            assert_eq!(seating.unplaced, 0);

            let seats: Vec<u32> = seating.assignments.iter().map(|a| a.seat_number).collect();
            assert_eq!(seats, vec![1, 2, 3, 4, 5, 6, 7]);

            let coords: Vec<(u32, u32)> = seating
                .assignments
                .iter()
                .map(|a| (a.row, a.column))
                .collect();
            assert_eq!(
                coords,
                vec![(1, 1), (1, 2), (1, 3), (1, 4), (1, 5), (2, 1), (2, 2)]
            );

            let subjects: Vec<&str> = seating
                .assignments
                .iter()
                .map(|a| a.subject.as_str())
                .collect();
            assert_eq!(subjects, vec!["A", "B", "A", "B", "A", "B", "B"]);
        }
    }
}

// =============================================================================
// ASCENDING-CAPACITY FILL
// =============================================================================

mod room_fill_order {
    use super::*;

    /// 12 examinees over rooms of capacity 5 and 10: the small room fills
    /// first with exactly 5, the rest land in the large room, nobody is left
    /// over. Listing the large room first must not change that.
    #[test]
    fn smaller_room_fills_first_regardless_of_listing_order() {
        let examinees: Vec<Examinee> = (0..12)
            .map(|n| examinee(&format!("S{n}"), "Math"))
            .collect();
        let rooms = [room("large", 10, "2x5"), room("small", 5, "1x5")];

        let mut rng = StdRng::seed_from_u64(13);
        let seating = generate(examinees, &rooms, &mut rng).expect("generate");

        assert_eq!(seating.total(), 12);
        assert_eq!(seating.unplaced, 0);

        let counts = seating.room_counts();
        assert_eq!(counts[&RoomId::new("small")], 5);
        assert_eq!(counts[&RoomId::new("large")], 7);
        assert!(
            seating.assignments[..5]
                .iter()
                .all(|a| a.room_id.as_str() == "small")
        );
    }
}

// =============================================================================
// OVERFLOW REPORTING
// =============================================================================

mod overflow {
    use super::*;

    /// 20 examinees into 15 total seats: the plan still comes back with 15
    /// assignments and an unplaced count of 5, not an error.
    #[test]
    fn overflow_yields_a_partial_plan_with_a_count() {
        let examinees: Vec<Examinee> = (0..20)
            .map(|n| examinee(&format!("S{n}"), if n % 2 == 0 { "A" } else { "B" }))
            .collect();
        let rooms = [room("r1", 5, "1x5"), room("r2", 10, "2x5")];

        let mut rng = StdRng::seed_from_u64(99);
        let seating = generate(examinees, &rooms, &mut rng).expect("generate");

        assert_eq!(seating.total(), 15);
        assert_eq!(seating.unplaced, 5);
    }

    /// Empty inputs refuse to run, with the matching error for each side.
    #[test]
    fn empty_inputs_are_refused() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            generate(Vec::new(), &[room("r", 5, "1x5")], &mut rng),
            Err(SeatplanError::NoExaminees)
        ));
        assert!(matches!(
            generate(vec![examinee("S1", "A")], &[], &mut rng),
            Err(SeatplanError::NoRooms)
        ));
    }
}

// =============================================================================
// IMPORT TOLERANCE
// =============================================================================

mod import_tolerance {
    use super::*;

    /// A row carrying 9 of the 11 fields is dropped; the well-formed rows
    /// around it import untouched.
    #[test]
    fn nine_field_row_is_dropped_without_harming_neighbors() {
        let examinees = vec![examinee("S1", "A"), examinee("S2", "B"), examinee("S3", "A")];
        let rooms = [room("hall", 10, "2x5")];
        let mut rng = StdRng::seed_from_u64(5);
        let seating = generate(examinees, &rooms, &mut rng).expect("generate");

        let text = to_text(&seating.assignments);
        let mut lines: Vec<&str> = text.lines().collect();
        lines.insert(2, "\"X9\",\"Truncated\",\"A\",\"2026-06-15\",\"hall\",\"hall\",9,2,4");
        let patched = lines.join("\n");

        let reimported = from_text(&patched);
        assert_eq!(reimported.len(), 3);
        assert!(reimported.iter().all(|a| a.examinee_id.as_str() != "X9"));
        assert_eq!(reimported, seating.assignments);
    }
}

// =============================================================================
// FULL PIPELINE
// =============================================================================

mod full_pipeline {
    use super::*;

    /// Roster text in, answer out: parse both rosters, generate, export,
    /// re-import, and look a single examinee up by a differently-cased id.
    #[test]
    fn roster_text_to_seat_lookup() {
        let examinee_text = "identifier,name,subject,date\n\
                             STU-01,Ada Lovelace,Math,2026-06-15\n\
                             STU-02,Grace Hopper,Math,2026-06-15\n\
                             STU-03,Alan Turing,Physics,2026-06-15\n\
                             STU-04,Edsger Dijkstra,Physics,2026-06-15\n";
        let room_text = "room id,room name,seat count,layout descriptor\n\
                         R1,Main Hall,10,2x5\n";

        let examinees = parse_examinees(examinee_text).expect("examinees");
        let rooms = parse_rooms(room_text).expect("rooms");
        assert!(examinees.skipped.is_empty());
        assert!(rooms.skipped.is_empty());

        let mut rng = StdRng::seed_from_u64(21);
        let seating = generate(examinees.records, &rooms.records, &mut rng).expect("generate");
        assert_eq!(seating.total(), 4);

        let reimported = from_text(&to_text(&seating.assignments));
        let found = find("stu-03", &reimported).expect("present");
        assert_eq!(found.examinee_name, "Alan Turing");
        assert_eq!(found.room_name, "Main Hall");
        assert!(found.seat_number >= 1 && found.seat_number <= 4);
    }
}
