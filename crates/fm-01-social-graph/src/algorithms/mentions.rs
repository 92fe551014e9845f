//! Mention Extraction
//!
//! A mention is any whitespace-delimited token containing `@`. Tokens are not
//! validated as email addresses and punctuation is not stripped, so
//! `"bob@example.com,"` stays a distinct token that will not match a stored
//! email exactly.

use std::collections::HashSet;

/// Extract mention tokens from `text`, in first-seen order, without duplicates.
pub fn extract_mentions(text: &str) -> Vec<&str> {
    let mut seen = HashSet::new();
    text.split_whitespace()
        .filter(|t| t.contains('@'))
        .filter(|t| seen.insert(*t))
        .collect()
}
