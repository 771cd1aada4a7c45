//! Six-field cron expression parser and next fire time calculator.
#![deny(unsafe_code, warnings, missing_docs)]

//! This is a small engine, intended to:
//! - parse six-field cron expressions, including Quartz-style `L`, `W` and `#` extensions;
//! - compute the next time matching an expression, strictly after (or not before) a given instant.
//!
//! It's built on top of [chrono](https://crates.io/crates/chrono) and works with any [`chrono::TimeZone`].
//!
//! _This is not a cron jobs scheduler or runner._ It answers "when is the next time?" only,
//! timers and job execution are up to the caller.
//!
//! ## Cron expression format
//!
//! Expression has exactly six whitespace separated fields: seconds, minutes, hours, days of month, months and days of week.
//! All fields must match for a time to match the expression.
//!
//! The table below describes valid values and patterns of each field:
//!
//! | Field        | Allowed values           | Allowed special characters |
//! |--------------|--------------------------|----------------------------|
//! | Seconds      | 0-59                     | * , - /                    |
//! | Minutes      | 0-59                     | * , - /                    |
//! | Hours        | 0-23                     | * , - /                    |
//! | Day of Month | 1-31                     | * , - / ? L W              |
//! | Month        | 1-12 or JAN-DEC          | * , - /                    |
//! | Day of Week  | 0-7 or MON-SUN (0,7=SUN) | * , - / ? L #              |
//!
//! Patterns meanings:
//! - `*` - each possible value, i.e. `0,1,2,...,59` for minutes;
//! - `?` - same as `*`, allowed in day of month and day of week fields only;
//! - `,` - list of values or patterns, i.e. `1,7,12`, `SUN,FRI`;
//! - `-` - range of values, i.e. `0-15`, `JAN-MAR`; a range may wrap, i.e. `22-2` for hours means `22,23,0,1,2`;
//! - `/` - repeating values, i.e. `*/12`, `10/5`, `30-59/2`;
//! - `L` - last day of the month (`L`), `n` days before it (`L-3`),
//!   or the last particular day of the week in the month (`5L`, `FRIL`);
//! - `LW` - last weekday (Monday to Friday) of the month;
//! - `W` - the weekday nearest to the specified day of month in the same month, i.e. `15W`;
//! - `#` - n-th particular day of the week in the month, i.e. `fri#1`, `2#5`.
//!
//! Names and letters are case-insensitive.
//! Also, short macros for well-known expressions are allowed:
//!
//! | Macro                      | Expression    |
//! |----------------------------|---------------|
//! | `@yearly` (or `@annually`) | 0 0 0 1 1 *   |
//! | `@monthly`                 | 0 0 0 1 * *   |
//! | `@weekly`                  | 0 0 0 * * 0   |
//! | `@daily` (or `@midnight`)  | 0 0 0 * * *   |
//! | `@hourly`                  | 0 0 * * * *   |
//!
//! Expression which can never match, like `0 0 0 31 2 *`, is valid, but it has no next time.
//! Search for the next time is bounded by [`MAX_ATTEMPTS`] passes, so it always terminates.
//!
//! ## How to use
//!
//! The main entity of the crate is a [`Cron`] structure, which has these basic methods:
//! - [parse()](Cron::parse): constructor to parse and validate provided expression;
//! - [next()](Cron::next): returns the next matching time strictly after the provided timestamp;
//! - [next_or_same()](Cron::next_or_same): the same, but the provided timestamp itself may match;
//! - [iter()](Cron::iter): returns an `Iterator` which produces a series of matching times.
//! - [into_iter()](Cron::into_iter): the same as `iter()`, but consumes the expression.
//!
//! ### Example with `next`
//! ```rust
//! use chrono::{DateTime, Utc};
//! use cron_next::{Cron, Result};
//!
//! fn next() -> Result<()> {
//!     let cron = Cron::parse("0 0 12 L * ?")?;
//!     let now = DateTime::parse_from_rfc3339("2024-02-10T08:00:00Z").unwrap().with_timezone(&Utc);
//!
//!     // Noon of the last day of the month
//!     let next = cron.next(&now);
//!     assert_eq!(next.unwrap().to_rfc3339(), "2024-02-29T12:00:00+00:00");
//!
//!     Ok(())
//! }
//! # next().unwrap();
//! ```
//!
//! ### Example with `iter`
//! ```rust
//! use chrono::Utc;
//! use cron_next::{Cron, Result};
//!
//! fn iterator() -> Result<()> {
//!     let cron = Cron::parse("0 30 9 ? * MON-FRI")?;
//!     let now = Utc::now();
//!
//!     // Get the next 10 timestamps after now
//!     cron.iter(&now).take(10).for_each(|t| println!("next: {t}"));
//!
//!     Ok(())
//! }
//! # iterator().unwrap();
//! ```
//!
//! ## Time zones
//!
//! Expression is matched against the local wall-clock time of the provided timestamp,
//! and the result is returned in the same time zone.
//! Local times skipped by a DST transition never match;
//! local times repeated by a DST transition match once, at the earliest instant which isn't before the provided timestamp.
//!
//! # Feature flags
//! * `serde`: adds [`Serialize`](https://docs.rs/serde/latest/serde/trait.Serialize.html) and [`Deserialize`](https://docs.rs/serde/latest/serde/trait.Deserialize.html) trait implementation for [`Cron`].

/// Cron expression and next time calculation.
pub mod cron;
/// Crate specific Error implementation.
pub mod error;
mod field;
mod lookup;
mod matcher;
mod parser;
mod series;
mod utils;

// Re-export of public entities.
pub use cron::Cron;
pub use error::CronError;
pub use field::FieldKind;
pub use lookup::{is_valid, next_n};
pub use matcher::MAX_ATTEMPTS;

/// Convenient alias for `Result`.
pub type Result<T, E = CronError> = std::result::Result<T, E>;
