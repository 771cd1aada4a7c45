use crate::{Cron, Result};
use chrono::{DateTime, TimeZone};

/// Returns `true` if the `expression` is a valid cron expression.
///
/// ```rust
/// assert!(cron_next::is_valid("0 0 12 ? * MON-FRI"));
/// assert!(!cron_next::is_valid("0 0 12 * *"));
/// ```
#[inline]
pub fn is_valid(expression: &str) -> bool {
    Cron::is_valid(expression)
}

/// Parses the `expression` and returns up to `n` consecutive matching times strictly after `from`.
///
/// This is a shortcut for one-off queries, parse it once with [`Cron::parse`] to query it repeatedly.
///
/// ```rust
/// use chrono::{DateTime, Utc};
///
/// # fn main() -> cron_next::Result<()> {
/// let from = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap().with_timezone(&Utc);
/// let times = cron_next::next_n("0 0 0 L * *", &from, 2)?;
/// assert_eq!(times[0].to_rfc3339(), "2024-01-31T00:00:00+00:00");
/// assert_eq!(times[1].to_rfc3339(), "2024-02-29T00:00:00+00:00");
/// # Ok(())
/// # }
/// ```
pub fn next_n<Tz: TimeZone>(expression: &str, from: &DateTime<Tz>, n: usize) -> Result<Vec<DateTime<Tz>>> {
    Ok(Cron::parse(expression)?.next_n(from, n))
}
