//! # Property-Based Tests
//!
//! Universal invariants of the seat-assignment pipeline, checked over
//! randomized rosters, room lists, and shuffle seeds.

use chrono::NaiveDate;
use proptest::collection::vec;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use seatplan_core::{
    Examinee, ExamineeId, Room, RoomId, Subject, columns_of, find, from_text, generate,
    group_examinees, interleave, place, to_text,
};
use std::collections::{BTreeMap, BTreeSet};

const SUBJECTS: [&str; 5] = ["Algebra", "Biology", "Chemistry", "Drawing", "English"];
const LAYOUTS: [&str; 4] = ["2x5", "4x6", "10x10", "open plan"];

fn exam_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 15).expect("valid date")
}

/// Build a roster with unique sequential ids; each entry picks its subject
/// from the fixed pool.
fn make_roster(subject_picks: &[usize]) -> Vec<Examinee> {
    subject_picks
        .iter()
        .enumerate()
        .map(|(n, pick)| {
            Examinee::new(
                ExamineeId::new(format!("S{n}")),
                format!("Examinee {n}"),
                Subject::new(SUBJECTS[pick % SUBJECTS.len()]),
                exam_date(),
            )
        })
        .collect()
}

fn make_rooms(shapes: &[(u32, usize)]) -> Vec<Room> {
    shapes
        .iter()
        .enumerate()
        .map(|(n, (capacity, layout_pick))| {
            Room::new(
                RoomId::new(format!("R{n}")),
                format!("Room {n}"),
                *capacity,
                LAYOUTS[layout_pick % LAYOUTS.len()],
            )
        })
        .collect()
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// With enough total capacity, every examinee is placed exactly once and
    /// nobody is reported unplaced.
    #[test]
    fn sufficient_capacity_places_everyone(
        subject_picks in vec(0usize..5, 1..60),
        layout_pick in 0usize..4,
        seed in any::<u64>()
    ) {
        let examinees = make_roster(&subject_picks);
        let input_ids: BTreeSet<String> =
            examinees.iter().map(|e| e.id.as_str().to_string()).collect();
        // One room exactly as large as the roster.
        let rooms = make_rooms(&[(examinees.len() as u32, layout_pick)]);

        let mut rng = StdRng::seed_from_u64(seed);
        let seating = generate(examinees, &rooms, &mut rng).expect("generate");

        prop_assert_eq!(seating.unplaced, 0);
        prop_assert_eq!(seating.total(), input_ids.len());
        let output_ids: BTreeSet<String> = seating
            .assignments
            .iter()
            .map(|a| a.examinee_id.as_str().to_string())
            .collect();
        prop_assert_eq!(output_ids, input_ids);
    }

    /// Placed plus unplaced always equals the roster size, and no room ever
    /// exceeds its stated capacity, whatever the capacity mix.
    #[test]
    fn capacity_is_never_exceeded(
        subject_picks in vec(0usize..5, 1..60),
        shapes in vec((1u32..20, 0usize..4), 1..6),
        seed in any::<u64>()
    ) {
        let examinees = make_roster(&subject_picks);
        let total = examinees.len();
        let rooms = make_rooms(&shapes);

        let mut rng = StdRng::seed_from_u64(seed);
        let seating = generate(examinees, &rooms, &mut rng).expect("generate");

        prop_assert_eq!(seating.total() + seating.unplaced, total);
        let counts = seating.room_counts();
        for room in &rooms {
            let assigned = counts.get(&room.id).copied().unwrap_or(0);
            prop_assert!(assigned <= room.capacity as usize);
        }
    }

    /// Seat numbers within each room form a contiguous 1..=k run.
    #[test]
    fn seat_numbers_are_contiguous_per_room(
        subject_picks in vec(0usize..5, 1..60),
        shapes in vec((1u32..20, 0usize..4), 1..6),
        seed in any::<u64>()
    ) {
        let examinees = make_roster(&subject_picks);
        let rooms = make_rooms(&shapes);

        let mut rng = StdRng::seed_from_u64(seed);
        let seating = generate(examinees, &rooms, &mut rng).expect("generate");

        let mut per_room: BTreeMap<&RoomId, Vec<u32>> = BTreeMap::new();
        for assignment in &seating.assignments {
            per_room.entry(&assignment.room_id).or_default().push(assignment.seat_number);
        }
        for seats in per_room.values_mut() {
            seats.sort_unstable();
            let expected: Vec<u32> = (1..=seats.len() as u32).collect();
            prop_assert_eq!(&*seats, &expected);
        }
    }

    /// Recomputing (row, column) from the seat number and the room's column
    /// count reproduces the stored coordinates.
    #[test]
    fn coordinates_match_the_stated_formula(
        subject_picks in vec(0usize..5, 1..60),
        shapes in vec((1u32..20, 0usize..4), 1..6),
        seed in any::<u64>()
    ) {
        let examinees = make_roster(&subject_picks);
        let rooms = make_rooms(&shapes);

        let mut rng = StdRng::seed_from_u64(seed);
        let seating = generate(examinees, &rooms, &mut rng).expect("generate");

        for assignment in &seating.assignments {
            let columns = columns_of(&assignment.room_layout);
            prop_assert_eq!(assignment.row, (assignment.seat_number - 1) / columns + 1);
            prop_assert_eq!(assignment.column, (assignment.seat_number - 1) % columns + 1);
        }
    }

    /// Export then import reproduces every field (all generated fields are
    /// free of commas and quotes).
    #[test]
    fn text_round_trip_is_lossless_for_clean_fields(
        subject_picks in vec(0usize..5, 1..40),
        shapes in vec((1u32..20, 0usize..3), 1..4),
        seed in any::<u64>()
    ) {
        let examinees = make_roster(&subject_picks);
        let rooms = make_rooms(&shapes);

        let mut rng = StdRng::seed_from_u64(seed);
        let seating = generate(examinees, &rooms, &mut rng).expect("generate");

        let reimported = from_text(&to_text(&seating.assignments));
        prop_assert_eq!(reimported, seating.assignments);
    }

    /// Lookup returns the same assignment for any casing of the identifier.
    #[test]
    fn lookup_is_case_insensitive(
        subject_picks in vec(0usize..5, 1..40),
        pick in any::<prop::sample::Index>(),
        seed in any::<u64>()
    ) {
        let examinees = make_roster(&subject_picks);
        let rooms = make_rooms(&[(examinees.len() as u32, 0)]);

        let mut rng = StdRng::seed_from_u64(seed);
        let seating = generate(examinees, &rooms, &mut rng).expect("generate");

        let target = &seating.assignments[pick.index(seating.assignments.len())];
        let id = target.examinee_id.as_str();

        let upper = find(&id.to_uppercase(), &seating.assignments);
        let lower = find(&id.to_lowercase(), &seating.assignments);
        prop_assert_eq!(upper, Some(target));
        prop_assert_eq!(lower, Some(target));
    }

    /// The interleaved sequence is a permutation of the grouped input.
    #[test]
    fn interleave_emits_every_examinee_exactly_once(
        subject_picks in vec(0usize..5, 0..80),
        seed in any::<u64>()
    ) {
        let examinees = make_roster(&subject_picks);
        let input_ids: BTreeSet<String> =
            examinees.iter().map(|e| e.id.as_str().to_string()).collect();

        let mut rng = StdRng::seed_from_u64(seed);
        let sequence = interleave(group_examinees(examinees), &mut rng);

        prop_assert_eq!(sequence.len(), input_ids.len());
        let output_ids: BTreeSet<String> =
            sequence.iter().map(|e| e.id.as_str().to_string()).collect();
        prop_assert_eq!(output_ids, input_ids);
    }

    /// Grouping preserves each examinee's relative order within its group.
    #[test]
    fn grouping_preserves_relative_order(subject_picks in vec(0usize..5, 0..80)) {
        let examinees = make_roster(&subject_picks);
        let groups = group_examinees(examinees.clone());

        let position: BTreeMap<&str, usize> = examinees
            .iter()
            .enumerate()
            .map(|(n, e)| (e.id.as_str(), n))
            .collect();

        for (key, members) in &groups {
            let mut last = None;
            for member in members {
                prop_assert_eq!(&member.group_key(), key);
                let pos = position[member.id.as_str()];
                if let Some(prev) = last {
                    prop_assert!(pos > prev);
                }
                last = Some(pos);
            }
        }
    }

    /// Same roster, same seed, same plan.
    #[test]
    fn generation_is_reproducible_under_a_fixed_seed(
        subject_picks in vec(0usize..5, 1..60),
        shapes in vec((1u32..20, 0usize..4), 1..6),
        seed in any::<u64>()
    ) {
        let rooms = make_rooms(&shapes);

        let mut rng_one = StdRng::seed_from_u64(seed);
        let mut rng_two = StdRng::seed_from_u64(seed);
        let first = generate(make_roster(&subject_picks), &rooms, &mut rng_one).expect("generate");
        let second = generate(make_roster(&subject_picks), &rooms, &mut rng_two).expect("generate");

        prop_assert_eq!(first.assignments, second.assignments);
        prop_assert_eq!(first.unplaced, second.unplaced);
    }

    /// Placement consumes the sequence in order: the room fill order is the
    /// sequence order, regardless of how rooms were listed.
    #[test]
    fn placement_preserves_sequence_order(
        count in 1usize..60,
        shapes in vec((1u32..20, 0usize..4), 1..6)
    ) {
        let sequence = make_roster(&vec![0; count]);
        let expected: Vec<String> =
            sequence.iter().map(|e| e.id.as_str().to_string()).collect();
        let rooms = make_rooms(&shapes);

        let placement = place(sequence, &rooms);

        let placed: Vec<String> = placement
            .assignments
            .iter()
            .map(|a| a.examinee_id.as_str().to_string())
            .collect();
        prop_assert_eq!(&placed[..], &expected[..placed.len()]);
    }
}
