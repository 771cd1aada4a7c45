use crate::utils;
use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use std::fmt::Display;

/// Kind of the cron expression field.
///
/// Each kind knows its valid values, the calendar unit it advances by,
/// and which lower-order fields have to be reset when its value changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKind {
    /// Seconds, `0-59`.
    Second,
    /// Minutes, `0-59`.
    Minute,
    /// Hours, `0-23`.
    Hour,
    /// Day of month, `1-31`.
    DayOfMonth,
    /// Month, `1-12` or `JAN-DEC`.
    Month,
    /// Day of week, `0-7` or `MON-SUN`, where both `0` and `7` are Sunday.
    DayOfWeek,
}

impl FieldKind {
    /// Values accepted in the expression text.
    pub(crate) fn bounds(self) -> (u32, u32) {
        match self {
            Self::Second | Self::Minute => (0, 59),
            Self::Hour => (0, 23),
            Self::DayOfMonth => (1, 31),
            Self::Month => (1, 12),
            Self::DayOfWeek => (0, 7),
        }
    }

    /// Calendar values of the field, i.e. Monday is `1` and Sunday is `7` for days of week.
    pub(crate) fn cycle(self) -> (u32, u32) {
        match self {
            Self::DayOfWeek => (1, 7),
            _ => self.bounds(),
        }
    }

    /// Lower-order fields which are reset to minimum when this field changes.
    fn lower_orders(self) -> &'static [FieldKind] {
        match self {
            Self::Second => &[],
            Self::Minute => &[Self::Second],
            Self::Hour => &[Self::Minute, Self::Second],
            Self::DayOfMonth | Self::DayOfWeek => &[Self::Hour, Self::Minute, Self::Second],
            Self::Month => &[Self::DayOfMonth, Self::Hour, Self::Minute, Self::Second],
        }
    }

    /// Returns the field's value of the `dt`.
    pub(crate) fn get(self, dt: &NaiveDateTime) -> u32 {
        match self {
            Self::Second => dt.second(),
            Self::Minute => dt.minute(),
            Self::Hour => dt.hour(),
            Self::DayOfMonth => dt.day(),
            Self::Month => dt.month(),
            Self::DayOfWeek => dt.weekday().number_from_monday(),
        }
    }

    /// Valid values of the field at the `dt`: days of month depend on the month and year.
    pub(crate) fn range_at(self, dt: &NaiveDateTime) -> (u32, u32) {
        match self {
            Self::DayOfMonth => (1, utils::days_in_month(dt.year(), dt.month())),
            _ => self.cycle(),
        }
    }

    /// Sets the field to the `value`, which must be valid at the `dt`.
    ///
    /// Changing the month keeps the day of month if possible, or clamps it to the last day.
    fn with_value(self, dt: NaiveDateTime, value: u32) -> Option<NaiveDateTime> {
        match self {
            Self::Second => dt.with_second(value),
            Self::Minute => dt.with_minute(value),
            Self::Hour => dt.with_hour(value),
            Self::DayOfMonth => dt.with_day(value),
            Self::Month => {
                let day = dt.day().min(utils::days_in_month(dt.year(), value));
                NaiveDate::from_ymd_opt(dt.year(), value, day).map(|date| date.and_time(dt.time()))
            }
            Self::DayOfWeek => {
                let current = self.get(&dt) as i64;
                dt.checked_add_signed(TimeDelta::days(value as i64 - current))
            }
        }
    }

    /// Adds `amount` of the field's base calendar units.
    fn add(self, dt: NaiveDateTime, amount: u32) -> Option<NaiveDateTime> {
        let amount64 = amount as i64;
        match self {
            Self::Second => dt.checked_add_signed(TimeDelta::try_seconds(amount64)?),
            Self::Minute => dt.checked_add_signed(TimeDelta::try_minutes(amount64)?),
            Self::Hour => dt.checked_add_signed(TimeDelta::try_hours(amount64)?),
            Self::DayOfMonth | Self::DayOfWeek => dt.checked_add_signed(TimeDelta::try_days(amount64)?),
            Self::Month => dt.checked_add_months(Months::new(amount)),
        }
    }

    /// Moves `dt` forward until the field is equal to `goal`, or, if the `goal`
    /// doesn't exist in the current cycle, to the beginning of the next cycle.
    pub(crate) fn elapse_until(self, dt: NaiveDateTime, goal: u32) -> Option<NaiveDateTime> {
        let current = self.get(&dt);
        let (min, max) = self.range_at(&dt);

        if current < goal {
            if goal <= max {
                self.with_value(dt, goal)
            } else {
                // e.g. 31st of April: jump over the rest of the cycle
                self.add(dt, max - current + 1)
            }
        } else {
            self.add(dt, goal + max - current + 1 - min)
        }
    }

    /// Advances `dt` to the minimal value of the field in the next cycle of the higher-order unit.
    ///
    /// Lower-order fields are left untouched.
    pub(crate) fn roll_forward(self, dt: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            Self::Second => dt.checked_add_signed(TimeDelta::minutes(1))?.with_second(0),
            Self::Minute => dt.checked_add_signed(TimeDelta::hours(1))?.with_minute(0),
            Self::Hour => dt.checked_add_signed(TimeDelta::days(1))?.with_hour(0),
            Self::DayOfMonth => dt.checked_add_months(Months::new(1))?.with_day(1),
            Self::Month => Self::Month.with_value(dt.checked_add_months(Months::new(12))?, 1),
            Self::DayOfWeek => {
                let next_week = dt.checked_add_signed(TimeDelta::weeks(1))?;
                Self::DayOfWeek.with_value(next_week, 1)
            }
        }
    }

    /// Resets all lower-order fields (and sub-second part) to their minimums.
    pub(crate) fn reset(self, dt: NaiveDateTime) -> Option<NaiveDateTime> {
        let mut dt = dt.with_nanosecond(0)?;
        for kind in self.lower_orders() {
            let (min, _) = kind.range_at(&dt);
            dt = kind.with_value(dt, min)?;
        }
        Some(dt)
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::DayOfMonth => "day-of-month",
            Self::Month => "month",
            Self::DayOfWeek => "day-of-week",
        };
        write!(f, "{name}")
    }
}
