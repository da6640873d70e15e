//! What the display layer renders after a query.

use crate::record::CountryRecord;
use serde::Serialize;

/// Message shown for every failed lookup.
pub const LOOKUP_FAILED_MESSAGE: &str = "No country found or something went wrong.";

/// Exactly one of these is active at a time; a submission replaces the whole
/// value rather than patching flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum ResultState {
    #[default]
    Empty,
    Loaded(Vec<CountryRecord>),
    Error(String),
    Blocked,
}

impl ResultState {
    pub(crate) fn lookup_failed() -> Self {
        ResultState::Error(LOOKUP_FAILED_MESSAGE.to_string())
    }

    /// Records to display; empty for every state but `Loaded`.
    pub fn records(&self) -> &[CountryRecord] {
        match self {
            ResultState::Loaded(records) => records,
            _ => &[],
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ResultState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, ResultState::Blocked)
    }
}
