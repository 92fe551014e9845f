//! Common Friends
//!
//! Set intersection of two friend lists by email.

use shared_types::{Email, User};
use std::collections::BTreeSet;

/// Emails present in both lists, sorted and free of duplicates.
///
/// Symmetric: `intersect_friends(a, b) == intersect_friends(b, a)`.
pub fn intersect_friends(a: &[User], b: &[User]) -> Vec<Email> {
    let left: BTreeSet<&str> = a.iter().map(|u| u.email.as_str()).collect();
    let right: BTreeSet<&str> = b.iter().map(|u| u.email.as_str()).collect();

    left.intersection(&right).map(|e| e.to_string()).collect()
}
