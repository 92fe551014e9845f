//! Candidate Merging
//!
//! Union of the three recipient sources, keyed by email. Block filtering is
//! not done here because it needs one store round-trip per candidate.

use crate::domain::value_objects::{CandidateSet, CandidateSource};
use shared_types::User;

/// Merge friends, subscribers and resolved mentions into one candidate set.
///
/// A user present in several sources is kept once with every source recorded.
pub fn merge_candidates(friends: &[User], subscribers: &[User], mentioned: &[User]) -> CandidateSet {
    let mut candidates = CandidateSet::new();

    let sources = [
        (friends, CandidateSource::Friend),
        (subscribers, CandidateSource::Subscriber),
        (mentioned, CandidateSource::Mention),
    ];
    for (users, source) in sources {
        for user in users {
            candidates.insert(user, source);
        }
    }

    candidates
}
