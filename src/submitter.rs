//! Query submission: normalize → denylist → lookup → [`ResultState`].
//!
//! [`QuerySubmitter`] handles a single submission. [`SearchSession`] owns the
//! current state across submissions and makes sure a slow, stale response
//! never overwrites the result of a newer one.

use crate::denylist::Denylist;
use crate::query::SearchQuery;
use crate::source::CountrySource;
use crate::state::ResultState;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info, warn};

#[cfg(test)]
mod tests;

pub struct QuerySubmitter<S> {
    source: S,
    denylist: Denylist,
}

impl<S: CountrySource> QuerySubmitter<S> {
    pub fn new(source: S, denylist: Denylist) -> Self {
        Self { source, denylist }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn denylist(&self) -> &Denylist {
        &self.denylist
    }

    /// Run one submission to completion.
    ///
    /// Blocked terms never reach the source; everything else, blank input
    /// included, is looked up exactly once. Every lookup failure maps to the
    /// same [`ResultState::Error`] message; the cause is only logged.
    pub async fn submit(&self, raw: &str) -> ResultState {
        let query = SearchQuery::new(raw);
        debug!(raw, query = %query, "normalized search query");

        if self.denylist.is_blocked(&query) {
            info!(query = %query, "query rejected by denylist");
            return ResultState::Blocked;
        }

        match self.source.lookup_by_name(&query).await {
            Ok(records) => {
                info!(query = %query, count = records.len(), "lookup succeeded");
                ResultState::Loaded(records)
            }
            Err(err) => {
                warn!(query = %query, error = %err, "lookup failed");
                ResultState::lookup_failed()
            }
        }
    }
}

/// Sequence number handed out when a submission starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// What happened to a submission's result.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// The result became the current state.
    Applied(ResultState),
    /// A newer submission started first; the result was dropped.
    Stale(Ticket),
}

/// Current [`ResultState`] plus latest-wins sequencing.
pub struct SearchSession<S> {
    submitter: QuerySubmitter<S>,
    latest: AtomicU64,
    state: Mutex<ResultState>,
}

impl<S: CountrySource> SearchSession<S> {
    pub fn new(submitter: QuerySubmitter<S>) -> Self {
        Self { submitter, latest: AtomicU64::new(0), state: Mutex::new(ResultState::Empty) }
    }

    pub fn submitter(&self) -> &QuerySubmitter<S> {
        &self.submitter
    }

    /// Snapshot of the current state.
    pub fn current(&self) -> ResultState {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Submit and apply the result unless a newer submission has started
    /// in the meantime.
    pub async fn submit(&self, raw: &str) -> Submission {
        let ticket = self.begin();
        let result = self.submitter.submit(raw).await;
        self.complete(ticket, result)
    }

    /// Start a submission. Any ticket handed out earlier becomes stale.
    pub fn begin(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Store `result` if `ticket` is still the latest one.
    pub fn complete(&self, ticket: Ticket, result: ResultState) -> Submission {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let latest = self.latest.load(Ordering::SeqCst);
        if ticket.0 != latest {
            debug!(ticket = ticket.0, latest, "discarding stale lookup result");
            return Submission::Stale(ticket);
        }

        *state = result.clone();
        Submission::Applied(result)
    }
}
