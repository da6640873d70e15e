//! Country lookup against the REST Countries API.
//!
//! A search term is normalized, checked against a [`Denylist`], and looked
//! up by name; the outcome is a single [`ResultState`]. Each record can be
//! turned into a [`CountryCard`], which adds the current local time derived
//! from the record's UTC-offset descriptor.
//!
//! ```no_run
//! # async fn run() -> Result<(), country_lookup::ConfigError> {
//! use country_lookup::{Clock, Config, CountryCard, ResultState};
//!
//! let config = Config::from_env()?;
//! let submitter = config.submitter()?;
//!
//! if let ResultState::Loaded(records) = submitter.submit("  Japan ").await {
//!     for record in &records {
//!         let card = CountryCard::from_record(record, &Clock::system(), &config.localize);
//!         println!("{} ({}) {}", card.name, card.capital, card.local_time);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod macros;

mod card;
mod config;
mod denylist;
mod error;
mod query;
mod record;
mod source;
mod state;
mod submitter;
mod timezone;

pub use card::{CardCurrency, CountryCard, NO_CAPITAL, cards, group_thousands};
pub use config::{Config, ENV_BASE_URL, ENV_BLOCKED, ENV_TIME_FORMAT, ENV_TIMEOUT_SECS, parse_timeout};
pub use denylist::{DEFAULT_BLOCKED_TERM, Denylist};
pub use error::{ConfigError, LookupError};
pub use query::SearchQuery;
pub use record::{CountryName, CountryRecord, Currencies, Currency, DEFAULT_TIMEZONE, Flags};
pub use source::{CountrySource, DEFAULT_BASE_URL, RestCountriesClient};
pub use state::{LOOKUP_FAILED_MESSAGE, ResultState};
pub use submitter::{QuerySubmitter, SearchSession, Submission, Ticket};
pub use timezone::{
    Clock, DEFAULT_TIME_FORMAT, LocalizeOptions, OffsetBasis, Sign, UNKNOWN, UtcOffset, is_valid_format,
    to_local_time, to_local_time_at,
};
