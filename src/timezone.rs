//! UTC-offset descriptors and the local time derived from them.
//!
//! The upstream API encodes each timezone as a descriptor such as
//! `UTC+05:30`, `UTC-0400` or `UTC-04`. [`to_local_time`] turns one into the
//! current wall-clock time at that offset; anything that doesn't look like a
//! descriptor becomes [`UNKNOWN`].
//!
//! ## Offset basis
//!
//! Shifting the caller's *local* clock reading by the target offset double
//! counts the caller's own offset, but some callers expect exactly that.
//! Both readings are available through [`OffsetBasis`]:
//!
//! - [`OffsetBasis::Utc`] (default): UTC now + target offset.
//! - [`OffsetBasis::CallerLocal`]: caller-local now + target offset.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeDelta, Utc};
use std::fmt::{self, Write};

/// Returned for descriptors that don't parse.
pub const UNKNOWN: &str = "Unknown";

/// en-US style date-time, e.g. `1/15/2024, 5:30:00 PM`.
pub const DEFAULT_TIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    fn factor(self) -> i64 {
        match self {
            Sign::Plus => 1,
            Sign::Minus => -1,
        }
    }
}

/// A parsed `UTC±HH[:MM]` descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcOffset {
    pub sign: Sign,
    pub hours: u32,
    pub minutes: u32,
}

impl UtcOffset {
    /// Find a `UTC±HH[:]MM` / `UTC±HH` descriptor anywhere in `descriptor`.
    pub fn parse(descriptor: &str) -> Option<Self> {
        let caps = crate::regex!(r"UTC([+-])(\d{2}):?(\d{2})?").captures(descriptor)?;

        let sign = if &caps[1] == "+" { Sign::Plus } else { Sign::Minus };
        let hours = caps[2].parse().ok()?;
        let minutes = match caps.get(3) {
            Some(m) => m.as_str().parse().ok()?,
            None => 0,
        };

        Some(Self { sign, hours, minutes })
    }

    /// Signed offset in minutes.
    pub fn total_minutes(&self) -> i64 {
        self.sign.factor() * (i64::from(self.hours) * 60 + i64::from(self.minutes))
    }

    /// Signed offset in milliseconds.
    pub fn as_millis(&self) -> i64 {
        self.total_minutes() * 60_000
    }

    pub fn as_delta(&self) -> TimeDelta {
        TimeDelta::milliseconds(self.as_millis())
    }

    /// `None` when the offset is a day or more, which chrono can't represent.
    pub fn to_fixed_offset(&self) -> Option<FixedOffset> {
        let seconds = i32::try_from(self.total_minutes() * 60).ok()?;
        FixedOffset::east_opt(seconds)
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.sign {
            Sign::Plus => '+',
            Sign::Minus => '-',
        };
        write!(f, "UTC{}{:02}:{:02}", sign, self.hours, self.minutes)
    }
}

/// Which clock reading the target offset is added to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OffsetBasis {
    #[default]
    Utc,
    CallerLocal,
}

/// A single reading of the clock, plus the caller's own UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    pub now: DateTime<Utc>,
    pub caller_offset: FixedOffset,
}

impl Clock {
    /// Read the system clock and local offset.
    pub fn system() -> Self {
        let local = Local::now();
        Self { now: local.with_timezone(&Utc), caller_offset: *local.offset() }
    }

    pub fn fixed(now: DateTime<Utc>, caller_offset: FixedOffset) -> Self {
        Self { now, caller_offset }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizeOptions {
    pub basis: OffsetBasis,
    /// `chrono` strftime format used to render the result.
    pub format: String,
}

impl Default for LocalizeOptions {
    fn default() -> Self {
        Self { basis: OffsetBasis::default(), format: DEFAULT_TIME_FORMAT.to_string() }
    }
}

/// True when `format` renders a wall-clock time.
///
/// Unknown specifiers fail, and so do offset specifiers (`%z`, `%:z`, `%Z`):
/// the rendered value carries no offset.
pub fn is_valid_format(format: &str) -> bool {
    render(&DateTime::<Utc>::UNIX_EPOCH.naive_utc(), format).is_some()
}

/// Current local time at `descriptor`'s offset, rendered with default options.
///
/// Reads the system clock on every call; nothing is cached.
pub fn to_local_time(descriptor: &str) -> String {
    to_local_time_at(descriptor, &Clock::system(), &LocalizeOptions::default())
}

/// Local time at `descriptor`'s offset for a given clock reading.
pub fn to_local_time_at(descriptor: &str, clock: &Clock, options: &LocalizeOptions) -> String {
    let Some(offset) = UtcOffset::parse(descriptor) else {
        return UNKNOWN.to_string();
    };
    let Some(shifted) = shifted_time(offset, clock, options.basis) else {
        return UNKNOWN.to_string();
    };

    render(&shifted, &options.format).unwrap_or_else(|| UNKNOWN.to_string())
}

/// `None` where `Display` would fail: bad specifiers, or fields a naive
/// datetime doesn't have.
fn render(value: &NaiveDateTime, format: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", value.format(format)).ok()?;
    Some(out)
}

fn shifted_time(offset: UtcOffset, clock: &Clock, basis: OffsetBasis) -> Option<NaiveDateTime> {
    let base = match basis {
        OffsetBasis::Utc => clock.now.naive_utc(),
        OffsetBasis::CallerLocal => clock.now.with_timezone(&clock.caller_offset).naive_local(),
    };
    base.checked_add_signed(offset.as_delta())
}
