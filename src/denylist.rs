//! Search terms rejected before any network call.

use crate::query::{SearchQuery, normalize};
use std::collections::BTreeSet;

/// Term blocked when no other policy is configured.
pub const DEFAULT_BLOCKED_TERM: &str = "israel";

/// A set of normalized search terms.
///
/// Terms go through the same normalization as [`SearchQuery`], so a match is
/// an exact comparison of normalized forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denylist {
    terms: BTreeSet<String>,
}

impl Default for Denylist {
    fn default() -> Self {
        Self::from_terms([DEFAULT_BLOCKED_TERM])
    }
}

impl Denylist {
    /// A denylist that blocks nothing.
    pub fn empty() -> Self {
        Self { terms: BTreeSet::new() }
    }

    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::empty();
        for term in terms {
            list.insert(term.as_ref());
        }
        list
    }

    /// Add a term. Blank terms are ignored.
    pub fn insert(&mut self, term: &str) {
        let term = normalize(term);
        if !term.is_empty() {
            self.terms.insert(term);
        }
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(&normalize(term))
    }

    pub fn is_blocked(&self, query: &SearchQuery) -> bool {
        self.terms.contains(query.as_str())
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }
}
