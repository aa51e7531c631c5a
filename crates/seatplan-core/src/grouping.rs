//! # Grouping Stage
//!
//! Partitions the active examinee list into disjoint groups keyed by
//! (subject, date). Each examinee's original relative order is preserved
//! within its group.
//!
//! The partition is returned as a `BTreeMap` so downstream stages see the
//! groups in a fixed, deterministic order (subject, then date) no matter how
//! the roster was ordered.

use crate::types::{Examinee, GroupKey};
use std::collections::BTreeMap;

/// Partition examinees by (subject, date).
///
/// No filtering happens here; the input is assumed to already be the active
/// set. The output's key order is fixed by `GroupKey`'s `Ord`, which the
/// interleaving stage relies on for its round-robin walk.
#[must_use]
pub fn group_examinees(examinees: Vec<Examinee>) -> BTreeMap<GroupKey, Vec<Examinee>> {
    let mut groups: BTreeMap<GroupKey, Vec<Examinee>> = BTreeMap::new();
    for examinee in examinees {
        groups.entry(examinee.group_key()).or_default().push(examinee);
    }
    groups
}

// =============================================================================
// TESTS
// =============================================================================
