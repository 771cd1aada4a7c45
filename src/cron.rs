use crate::{
    matcher::{FieldMatcher, MAX_ATTEMPTS},
    parser, CronError, Result,
};
use chrono::{DateTime, NaiveDateTime, TimeDelta, TimeZone, Timelike};
use std::{
    fmt::Display,
    hash::{Hash, Hasher},
    str::FromStr,
};
use tracing::{debug, trace};

/// Number of one-second probes to step over a local time which doesn't exist in the time zone.
///
/// Real-world DST gaps are one hour long at most, some historical ones took two.
const MAX_DST_GAP_PROBES: usize = 4 * 3600;

/// Compiled six-field cron expression.
///
/// Instances are immutable, so a single [`Cron`] may be shared between threads and queried concurrently.
///
/// Two expressions are equal if they match the same fields in the same way,
/// regardless of their source text: `@daily` is equal to `0 0 0 * * *`.
/// For cron expression syntax and usage examples, please refer to the [crate documentation](crate).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
#[cfg_attr(feature = "serde", serde(into = "String"))]
pub struct Cron {
    second: FieldMatcher,
    minute: FieldMatcher,
    hour: FieldMatcher,
    day_of_month: FieldMatcher,
    month: FieldMatcher,
    day_of_week: FieldMatcher,
    source: String,
}

impl Cron {
    /// Parses and validates provided `expression` and constructs [`Cron`] instance.
    ///
    /// Leading and trailing whitespaces are ignored.
    /// Alternative way to construct [`Cron`] is to use one of `try_from` or `from_str` methods.
    ///
    /// Returns [`CronError`] in a case provided expression is unparsable or has values out of range.
    pub fn parse(expression: &str) -> Result<Self> {
        let source = expression.trim();
        let [second, minute, hour, day_of_month, month, day_of_week] =
            parser::parse_fields(source).inspect_err(|error| {
                debug!(expression = source, %error, "invalid cron expression");
            })?;

        trace!(expression = source, "cron expression compiled");

        Ok(Self {
            second,
            minute,
            hour,
            day_of_month,
            month,
            day_of_week,
            source: source.to_owned(),
        })
    }

    /// Returns `true` if the `expression` can be parsed.
    pub fn is_valid(expression: &str) -> bool {
        parser::parse_fields(expression.trim()).is_ok()
    }

    /// Returns source text of the expression, without surrounding whitespaces.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns the earliest time which matches the expression and is strictly after `from`.
    ///
    /// Returns `None` if there is no such time.
    #[inline]
    pub fn next<Tz: TimeZone>(&self, from: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        let from = from.clone().checked_add_signed(TimeDelta::nanoseconds(1))?;
        self.next_or_same(&from)
    }

    /// Returns the earliest time which matches the expression and isn't before `from`.
    ///
    /// The expression is matched against the local wall-clock time of `from`:
    /// - if the matching local time is ambiguous (clocks were turned back),
    ///   the earliest instant which isn't before `from` is returned;
    /// - if the matching local time doesn't exist (clocks were turned forward), it's skipped.
    ///
    /// Result is always a whole second. Returns `None` if there is no such time.
    pub fn next_or_same<Tz: TimeZone>(&self, from: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        let tz = from.timezone();
        let mut seed = from.naive_local();

        for _ in 0..MAX_DST_GAP_PROBES {
            let local = self.next_or_same_local(seed)?;
            let mapped = tz.from_local_datetime(&local);

            if let Some(found) = mapped
                .clone()
                .earliest()
                .filter(|dt| dt >= from)
                .or_else(|| mapped.clone().latest().filter(|dt| dt >= from))
            {
                return Some(found);
            }

            if mapped.earliest().is_none() {
                trace!(%local, "local time doesn't exist in the time zone, skipping");
            }
            seed = local.checked_add_signed(TimeDelta::seconds(1))?;
        }

        debug!(expression = %self.source, ?from, "no existing local time found");
        None
    }

    /// Returns up to `n` consecutive times matching the expression, starting strictly after `from`.
    ///
    /// The result is shorter than `n` if the expression runs out of matching times.
    pub fn next_n<Tz: TimeZone>(&self, from: &DateTime<Tz>, n: usize) -> Vec<DateTime<Tz>> {
        self.iter(from).take(n).collect()
    }

    /// Returns iterator of matching times starting strictly after `from`.
    #[inline]
    pub fn iter<Tz: TimeZone>(&self, from: &DateTime<Tz>) -> impl Iterator<Item = DateTime<Tz>> {
        CronIterator {
            cron: self.clone(),
            next: self.next(from),
        }
    }

    /// Consumes [`Cron`] and returns iterator of matching times starting strictly after `from`.
    #[inline]
    pub fn into_iter<Tz: TimeZone>(self, from: &DateTime<Tz>) -> impl Iterator<Item = DateTime<Tz>> {
        let next = self.next(from);
        CronIterator { cron: self, next }
    }

    /// Runs the whole-expression fixed-point search over local wall-clock time.
    fn next_or_same_local(&self, from: NaiveDateTime) -> Option<NaiveDateTime> {
        let mut seed = from;

        for _ in 0..MAX_ATTEMPTS {
            let candidate = self.apply_fields(seed)?;
            if candidate == seed {
                return Some(candidate);
            }
            seed = candidate;
        }

        debug!(expression = %self.source, %from, attempts = MAX_ATTEMPTS, "no matching time found");
        None
    }

    /// Single pass of all matchers, from the coarsest field to the finest one.
    fn apply_fields(&self, dt: NaiveDateTime) -> Option<NaiveDateTime> {
        let dt = self.day_of_week.next_or_same(dt)?;
        let dt = self.month.next_or_same(dt)?;
        let dt = self.day_of_month.next_or_same(dt)?;
        let dt = self.hour.next_or_same(dt)?;
        let dt = self.minute.next_or_same(dt)?;
        let dt = self.second.next_or_same(dt)?;

        if dt.nanosecond() == 0 {
            Some(dt)
        } else {
            dt.with_nanosecond(0)?.checked_add_signed(TimeDelta::seconds(1))
        }
    }

    fn matchers(&self) -> [&FieldMatcher; 6] {
        [
            &self.second,
            &self.minute,
            &self.hour,
            &self.day_of_month,
            &self.month,
            &self.day_of_week,
        ]
    }
}

/// Contains iterator state.
#[derive(Debug, Clone)]
struct CronIterator<Tz: TimeZone> {
    cron: Cron,
    next: Option<DateTime<Tz>>,
}

impl<Tz: TimeZone> Iterator for CronIterator<Tz> {
    type Item = DateTime<Tz>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = self.cron.next(&current);
        Some(current)
    }
}

impl PartialEq for Cron {
    fn eq(&self, other: &Self) -> bool {
        self.matchers() == other.matchers()
    }
}

impl Eq for Cron {}

impl Hash for Cron {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.matchers().hash(state);
    }
}

impl From<Cron> for String {
    fn from(value: Cron) -> Self {
        value.source
    }
}

impl From<&Cron> for String {
    fn from(value: &Cron) -> Self {
        value.source.clone()
    }
}

impl TryFrom<String> for Cron {
    type Error = CronError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl TryFrom<&String> for Cron {
    type Error = CronError;

    fn try_from(value: &String) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for Cron {
    type Error = CronError;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl FromStr for Cron {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Display for Cron {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}
