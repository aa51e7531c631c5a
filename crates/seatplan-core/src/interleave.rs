//! # Interleaving Stage
//!
//! Flattens the (subject, date) groups into one ordered sequence in which
//! consecutive examinees belong to different groups wherever group sizes
//! permit.
//!
//! Two passes:
//! 1. Each group's internal order is shuffled independently and uniformly
//!    (Fisher–Yates) using the caller-supplied random source.
//! 2. A round-robin walk takes one examinee from each group per pass, in the
//!    map's fixed key order, until every group is drained.
//!
//! ## Limitation
//!
//! This reduces same-subject adjacency; it does not eliminate it. Once a
//! smaller group is exhausted the surviving groups' members run back to back
//! for the remainder of the sequence. Callers presenting the result should
//! say "reduced", never "prevented".

use crate::types::{Examinee, GroupKey};
use rand::Rng;
use std::collections::{BTreeMap, VecDeque};

/// Flatten shuffled groups into a collision-reduced sequence.
///
/// Every input examinee appears exactly once in the output; the output length
/// equals the sum of all group lengths. The caller controls reproducibility
/// through `rng`: a seeded generator replays the exact sequence, a
/// thread-local one gives a fresh arrangement per run.
pub fn interleave(
    mut groups: BTreeMap<GroupKey, Vec<Examinee>>,
    rng: &mut impl Rng,
) -> Vec<Examinee> {
    for members in groups.values_mut() {
        shuffle(members, rng);
    }

    // BTreeMap::into_values keeps the fixed key order, so each round-robin
    // pass visits the groups in the same sequence.
    let mut queues: Vec<VecDeque<Examinee>> = groups.into_values().map(VecDeque::from).collect();
    let total: usize = queues.iter().map(VecDeque::len).sum();
    let passes = queues.iter().map(VecDeque::len).max().unwrap_or(0);

    let mut sequence = Vec::with_capacity(total);
    for _ in 0..passes {
        for queue in &mut queues {
            if let Some(examinee) = queue.pop_front() {
                sequence.push(examinee);
            }
        }
    }
    sequence
}

/// Uniform in-place Fisher–Yates shuffle.
fn shuffle(members: &mut [Examinee], rng: &mut impl Rng) {
    for i in (1..members.len()).rev() {
        let j = rng.gen_range(0..=i);
        members.swap(i, j);
    }
}

// =============================================================================
// TESTS
// =============================================================================
