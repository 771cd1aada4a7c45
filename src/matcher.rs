use crate::{field::FieldKind, utils};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

/// Maximum number of attempts to find a matching value, both within a single field
/// and for the whole expression.
///
/// The longest gap between two matching days is a leap-year cycle,
/// so any satisfiable expression reaches its fixed point within this budget.
pub const MAX_ATTEMPTS: usize = 366;

/// Set of field values, bit `N` stands for value `N`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub(crate) struct ValueSet(u64);

impl ValueSet {
    pub(crate) fn insert(&mut self, value: u32) {
        debug_assert!(value < u64::BITS);
        self.0 |= 1 << value;
    }

    pub(crate) fn contains(&self, value: u32) -> bool {
        value < u64::BITS && self.0 & (1 << value) != 0
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Smallest member which is greater than or equal to `value`.
    pub(crate) fn next_from(&self, value: u32) -> Option<u32> {
        if value >= u64::BITS {
            return None;
        }
        let masked = self.0 & (u64::MAX << value);
        if masked == 0 {
            None
        } else {
            Some(masked.trailing_zeros())
        }
    }

    /// Returns a new set with every member moved from `from` to `to`.
    pub(crate) fn remap(mut self, from: u32, to: u32) -> Self {
        if self.contains(from) {
            self.0 &= !(1 << from);
            self.insert(to);
        }
        self
    }
}

impl FromIterator<u32> for ValueSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut set = Self::default();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

/// Compiled field of the cron expression.
///
/// Every matcher finds the earliest instant not before a seed which satisfies the field,
/// leaving the other fields to the next pass of the expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum FieldMatcher {
    /// `*` or `?`: every value matches.
    All,
    /// Explicit set of values, from lists, ranges and steps.
    Membership(FieldKind, ValueSet),
    /// `nW`: weekday nearest to the day `n` of the month.
    NearestWeekday(u32),
    /// `L` or `L-n`: `n` days before the last day of the month.
    LastDayOfMonth(u32),
    /// `LW`: last weekday of the month.
    LastWeekdayOfMonth,
    /// `wL`: last specified day of the week in the month.
    LastSpecificWeekdayOfMonth(Weekday),
    /// `w#n`: n-th specified day of the week in the month.
    NthSpecificWeekdayOfMonth(Weekday, u32),
    /// Comma separated list with at least one extended term, the earliest match wins.
    Union(Vec<FieldMatcher>),
}

impl FieldMatcher {
    /// Returns the earliest instant which is not before `dt` and matches the field,
    /// or `None` if there is no such instant.
    ///
    /// If `dt` matches it's returned as is, otherwise all lower-order fields of the result are reset.
    pub(crate) fn next_or_same(&self, dt: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            Self::All => Some(dt),
            Self::Membership(kind, values) => Self::next_member(*kind, values, dt),
            Self::Union(matchers) => matchers.iter().filter_map(|m| m.next_or_same(dt)).min(),
            _ => self.next_adjusted(dt),
        }
    }

    fn next_member(kind: FieldKind, values: &ValueSet, dt: NaiveDateTime) -> Option<NaiveDateTime> {
        let mut current = kind.get(&dt);
        if values.contains(current) {
            return Some(dt);
        }

        let mut dt = dt;
        for _ in 0..MAX_ATTEMPTS {
            dt = match values.next_from(current) {
                Some(goal) => kind.elapse_until(dt, goal)?,
                None => kind.roll_forward(dt)?,
            };
            current = kind.get(&dt);
            if values.contains(current) {
                return kind.reset(dt);
            }
        }

        None
    }

    fn next_adjusted(&self, dt: NaiveDateTime) -> Option<NaiveDateTime> {
        let mut seed = dt;
        let mut rolled = false;

        for _ in 0..MAX_ATTEMPTS {
            if let Some(result) = self.adjust(&seed) {
                if result >= seed {
                    return match self.declared_kind() {
                        Some(kind) if rolled => kind.reset(result),
                        _ => Some(result),
                    };
                }
            }
            seed = self.roll_forward_kind().roll_forward(seed)?;
            rolled = true;
        }

        None
    }

    /// Kind of the expression field this matcher was compiled from.
    pub(crate) fn declared_kind(&self) -> Option<FieldKind> {
        match self {
            Self::All | Self::Union(_) => None,
            Self::Membership(kind, _) => Some(*kind),
            Self::NearestWeekday(_) | Self::LastDayOfMonth(_) | Self::LastWeekdayOfMonth => Some(FieldKind::DayOfMonth),
            Self::LastSpecificWeekdayOfMonth(_) | Self::NthSpecificWeekdayOfMonth(..) => Some(FieldKind::DayOfWeek),
        }
    }

    /// Calendar unit the matcher advances by when the current cycle has no match.
    ///
    /// Extended matchers, including day-of-week ones bound to a month (`wL`, `w#n`), advance month by month.
    pub(crate) fn roll_forward_kind(&self) -> FieldKind {
        match self {
            Self::Membership(kind, _) => *kind,
            Self::All | Self::Union(_) => FieldKind::Second,
            _ => FieldKind::DayOfMonth,
        }
    }

    /// Target date of the extended matcher in the month of the `dt`.
    fn adjust(&self, dt: &NaiveDateTime) -> Option<NaiveDateTime> {
        let (year, month) = (dt.year(), dt.month());
        let target: NaiveDate = match self {
            Self::NearestWeekday(day) => utils::nearest_weekday(year, month, *day)?,
            Self::LastDayOfMonth(offset) => {
                let last = utils::days_in_month(year, month);
                NaiveDate::from_ymd_opt(year, month, last.checked_sub(*offset).filter(|day| *day > 0)?)?
            }
            Self::LastWeekdayOfMonth => utils::last_business_day(year, month)?,
            Self::LastSpecificWeekdayOfMonth(weekday) => utils::last_weekday_of_month(year, month, *weekday)?,
            Self::NthSpecificWeekdayOfMonth(weekday, n) => utils::nth_weekday_of_month(year, month, *weekday, *n)?,
            Self::All | Self::Membership(..) | Self::Union(_) => return Some(*dt),
        };

        if target == dt.date() {
            Some(*dt)
        } else {
            target.and_hms_opt(0, 0, 0)
        }
    }
}
