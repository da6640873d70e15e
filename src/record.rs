//! Country records as returned by the REST Countries API.
//!
//! The upstream schema is large; only the fields the lookup renders are
//! modelled and everything else is ignored. Apart from `name` and `cca3`,
//! every field may be missing from a response.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Descriptor used when a record carries no timezone.
pub const DEFAULT_TIMEZONE: &str = "UTC+00:00";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub name: CountryName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capital: Option<Vec<String>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub flags: Flags,
    /// ISO 3166-1 alpha-3 code; unique per record.
    pub cca3: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub population: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timezones: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currencies: Option<Currencies>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryName {
    pub common: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags {
    #[serde(default, deserialize_with = "null_as_default")]
    pub png: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl CountryRecord {
    /// Common name, e.g. `"France"`.
    pub fn name(&self) -> &str {
        &self.name.common
    }

    /// First listed capital, if any.
    pub fn primary_capital(&self) -> Option<&str> {
        self.capital.as_ref()?.first().map(String::as_str)
    }

    /// First timezone descriptor, falling back to [`DEFAULT_TIMEZONE`].
    pub fn primary_timezone(&self) -> &str {
        self.timezones.first().map(String::as_str).unwrap_or(DEFAULT_TIMEZONE)
    }

    /// First currency in upstream key order.
    pub fn primary_currency(&self) -> Option<(&str, &Currency)> {
        self.currencies.as_ref()?.first()
    }
}

/// Absent and `null` both mean "not provided".
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Currency code to currency mapping that keeps the order keys had in the
/// response body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Currencies(Vec<(String, Currency)>);

impl Currencies {
    pub fn new(entries: Vec<(String, Currency)>) -> Self {
        Self(entries)
    }

    pub fn first(&self) -> Option<(&str, &Currency)> {
        self.0.first().map(|(code, currency)| (code.as_str(), currency))
    }

    pub fn get(&self, code: &str) -> Option<&Currency> {
        self.0.iter().find(|(c, _)| c == code).map(|(_, currency)| currency)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Currency)> {
        self.0.iter().map(|(code, currency)| (code.as_str(), currency))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Currencies {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (code, currency) in &self.0 {
            map.serialize_entry(code, currency)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Currencies {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CurrenciesVisitor;

        impl<'de> Visitor<'de> for CurrenciesVisitor {
            type Value = Currencies;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of currency codes to currencies")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((code, currency)) = access.next_entry::<String, Currency>()? {
                    entries.push((code, currency));
                }
                Ok(Currencies(entries))
            }
        }

        deserializer.deserialize_map(CurrenciesVisitor)
    }
}
