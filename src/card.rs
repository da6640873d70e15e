//! Display-ready view of a country record.

use crate::record::CountryRecord;
use crate::timezone::{Clock, LocalizeOptions, to_local_time_at};
use serde::Serialize;

/// Shown when a record has no capital.
pub const NO_CAPITAL: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardCurrency {
    pub code: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

/// Everything a renderer needs for one record, with defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryCard {
    /// `cca3`; unique within a result list.
    pub key: String,
    pub name: String,
    pub capital: String,
    pub region: String,
    /// Population with `,` thousands separators.
    pub population: String,
    pub timezone: String,
    pub local_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<CardCurrency>,
    pub flag_url: String,
    pub flag_alt: String,
}

impl CountryCard {
    pub fn from_record(record: &CountryRecord, clock: &Clock, options: &LocalizeOptions) -> Self {
        let timezone = record.primary_timezone().to_string();
        let local_time = to_local_time_at(&timezone, clock, options);

        let currency = record.primary_currency().map(|(code, currency)| CardCurrency {
            code: code.to_string(),
            name: currency.name.clone(),
            symbol: currency.symbol.clone(),
        });

        let flag_alt = match record.flags.alt.as_deref() {
            Some(alt) if !alt.is_empty() => alt.to_string(),
            _ => format!("{} flag", record.name()),
        };

        Self {
            key: record.cca3.clone(),
            name: record.name().to_string(),
            capital: record.primary_capital().unwrap_or(NO_CAPITAL).to_string(),
            region: record.region.clone(),
            population: group_thousands(record.population),
            timezone,
            local_time,
            currency,
            flag_url: record.flags.png.clone(),
            flag_alt,
        }
    }
}

/// Cards for a whole result list, sharing one clock reading.
pub fn cards(records: &[CountryRecord], clock: &Clock, options: &LocalizeOptions) -> Vec<CountryCard> {
    records.iter().map(|record| CountryCard::from_record(record, clock, options)).collect()
}

/// `67391582` -> `67,391,582`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
