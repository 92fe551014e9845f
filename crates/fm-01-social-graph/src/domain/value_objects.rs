//! Value objects for recipient resolution

use serde::{Deserialize, Serialize};
use shared_types::{Email, User};
use std::collections::btree_map::{self, BTreeMap};

/// Where a recipient candidate came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandidateSource {
    /// Friend of the sender
    Friend,
    /// Subscribed to the sender's updates
    Subscriber,
    /// `@`-mentioned in the message text
    Mention,
}

/// A user who may receive a notification, with every source that nominated them
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub user: User,
    pub sources: Vec<CandidateSource>,
}

impl Candidate {
    pub fn has_source(&self, source: CandidateSource) -> bool {
        self.sources.contains(&source)
    }
}

/// Deduplicated recipient candidates keyed by email.
///
/// A user nominated by several sources is stored once; iteration is in email
/// order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CandidateSet {
    by_email: BTreeMap<Email, Candidate>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `user` as nominated by `source`. Returns true if the user was new.
    pub fn insert(&mut self, user: &User, source: CandidateSource) -> bool {
        match self.by_email.entry(user.email.clone()) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(Candidate {
                    user: user.clone(),
                    sources: vec![source],
                });
                true
            }
            btree_map::Entry::Occupied(mut slot) => {
                let candidate = slot.get_mut();
                if !candidate.has_source(source) {
                    candidate.sources.push(source);
                }
                false
            }
        }
    }

    pub fn get(&self, email: &str) -> Option<&Candidate> {
        self.by_email.get(email)
    }

    pub fn len(&self) -> usize {
        self.by_email.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_email.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.by_email.values()
    }
}
