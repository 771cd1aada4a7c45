/// Common utility functions.
use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Returns `true` if `input` is a non-empty string of ASCII digits, regardless of its value.
pub(crate) fn is_number(input: &str) -> bool {
    !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit())
}

/// Converts string of ASCII digits into unsigned number.
///
/// Signs, whitespaces, empty strings and numbers which don't fit into `u32` are rejected.
pub(crate) fn parse_number(input: &str) -> Option<u32> {
    if is_number(input) {
        input.parse::<u32>().ok()
    } else {
        None
    }
}

/// Replaces every mnemonic from `names` in the upper-cased `input` with its number,
/// where the first name has number `first`.
pub(crate) fn replace_names(input: &str, names: &[&str], first: u32) -> String {
    let mut result = input.to_uppercase();
    for (index, name) in names.iter().enumerate() {
        if result.contains(name) {
            result = result.replace(name, &(first + index as u32).to_string());
        }
    }
    result
}

/// Converts cron day-of-week number into the [`Weekday`]: both `0` and `7` are Sunday.
pub(crate) fn weekday_from_number(value: u32) -> Option<Weekday> {
    match value {
        0 | 7 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Returns `true` if provided year is leap.
#[inline]
pub(crate) fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns number of days in specified month, `month` is expected in 1..=12.
pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[inline]
fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

/// Returns the last date of the month.
pub(crate) fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))
}

/// Returns date of the last specified day of the week in the month.
pub(crate) fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let last_day = last_day_of_month(year, month)?;
    let shift = (last_day.weekday().num_days_from_monday() + 7 - weekday.num_days_from_monday()) % 7;

    last_day.checked_sub_days(Days::new(shift as u64))
}

/// Returns date of the N-th specified day of the week in the month,
/// or `None` if the month has fewer such days.
pub(crate) fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<NaiveDate> {
    let n = u8::try_from(n).ok()?;
    NaiveDate::from_weekday_of_month_opt(year, month, weekday, n)
}

/// Returns the last business day (Monday to Friday) of the month.
pub(crate) fn last_business_day(year: i32, month: u32) -> Option<NaiveDate> {
    let last_day = last_day_of_month(year, month)?;
    let shift = match last_day.weekday() {
        Weekday::Sat => 1,
        Weekday::Sun => 2,
        _ => 0,
    };

    last_day.checked_sub_days(Days::new(shift))
}

/// Returns date of the weekday (not Sundays or Saturday) nearest to the specified day in the same month.
///
/// Saturday moves to Friday and Sunday moves to Monday, unless that crosses the month boundary:
/// Saturday the 1st moves to Monday the 3rd, Sunday the last day moves to Friday two days before.
/// Returns `None` if the month doesn't have such a day.
pub(crate) fn nearest_weekday(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let weekday = date.weekday();

    if !is_weekend(weekday) {
        return Some(date);
    }

    let days_in_month = days_in_month(year, month);
    let nearest = match weekday {
        // saturday
        Weekday::Sat if day > 1 => day - 1,
        Weekday::Sat => day + 2,
        // sunday
        _ if day == days_in_month => day - 2,
        _ => day + 1,
    };

    NaiveDate::from_ymd_opt(year, month, nearest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case("0", Some(0))]
    #[case("5", Some(5))]
    #[case("05", Some(5))]
    #[case("59", Some(59))]
    #[case("4294967295", Some(u32::MAX))]
    #[case("4294967296", None)]
    #[case("", None)]
    #[case("-1", None)]
    #[case("+1", None)]
    #[case(" 1", None)]
    #[case("1.5", None)]
    #[case("abc", None)]
    fn test_parse_number(#[case] input: &str, #[case] expected: Option<u32>) {
        assert_eq!(parse_number(input), expected, "input = '{input}'");
    }

    #[rstest]
    #[case("0", true)]
    #[case("007", true)]
    #[case("99999999999999999999", true)]
    #[case("", false)]
    #[case("-1", false)]
    #[case("1a", false)]
    fn test_is_number(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_number(input), expected, "input = '{input}'");
    }

    #[rstest]
    #[case("jan", "1")]
    #[case("JAN-mar", "1-3")]
    #[case("Jun,Dec/2", "6,12/2")]
    #[case("*/2", "*/2")]
    #[case("juLY", "7Y")]
    fn test_replace_month_names(#[case] input: &str, #[case] expected: &str) {
        let months = [
            "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
        ];
        assert_eq!(replace_names(input, &months, 1), expected);
    }

    #[rstest]
    #[case("mon-fri", "1-5")]
    #[case("SUN", "7")]
    #[case("friL", "5L")]
    #[case("Tue#2", "2#2")]
    #[case("sat,sun", "6,7")]
    #[case("l", "L")]
    fn test_replace_weekday_names(#[case] input: &str, #[case] expected: &str) {
        let days = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];
        assert_eq!(replace_names(input, &days, 1), expected);
    }

    #[rstest]
    #[case(0, Some(Weekday::Sun))]
    #[case(1, Some(Weekday::Mon))]
    #[case(2, Some(Weekday::Tue))]
    #[case(3, Some(Weekday::Wed))]
    #[case(4, Some(Weekday::Thu))]
    #[case(5, Some(Weekday::Fri))]
    #[case(6, Some(Weekday::Sat))]
    #[case(7, Some(Weekday::Sun))]
    #[case(8, None)]
    fn test_weekday_from_number(#[case] value: u32, #[case] expected: Option<Weekday>) {
        assert_eq!(weekday_from_number(value), expected);
    }

    #[rstest]
    // Test leap years divisible by 4 but not 100
    #[case(2024, true)]
    #[case(1996, true)]
    // Test leap years divisible by 400
    #[case(2000, true)]
    #[case(1600, true)]
    // Test non-leap years not divisible by 4
    #[case(2023, false)]
    #[case(2021, false)]
    // Test non-leap years divisible by 100 but not 400
    #[case(1900, false)]
    #[case(2100, false)]
    fn test_is_leap_year(#[case] year: i32, #[case] expected: bool) {
        assert_eq!(
            is_leap_year(year),
            expected,
            "{year:} is {}",
            if expected { "leap" } else { "not-leap" }
        );
    }

    #[rstest]
    #[case(2023, 1, 31)]
    #[case(2023, 3, 31)]
    #[case(2023, 4, 30)]
    #[case(2023, 6, 30)]
    #[case(2023, 7, 31)]
    #[case(2023, 8, 31)]
    #[case(2023, 9, 30)]
    #[case(2023, 11, 30)]
    #[case(2023, 12, 31)]
    #[case(2023, 2, 28)]
    #[case(2024, 2, 29)]
    #[case(2000, 2, 29)]
    #[case(1900, 2, 28)]
    #[case(2100, 2, 28)]
    fn test_days_in_month(#[case] y: i32, #[case] m: u32, #[case] expected: u32) {
        assert_eq!(days_in_month(y, m), expected, "{y:04}-{m:02} has {expected} days");
    }

    #[rstest]
    #[case(2024, 1, 31)]
    #[case(2024, 2, 29)]
    #[case(2023, 2, 28)]
    #[case(2024, 4, 30)]
    fn test_last_day_of_month(#[case] y: i32, #[case] m: u32, #[case] expected: u32) {
        assert_eq!(last_day_of_month(y, m), Some(date(y, m, expected)));
    }

    #[rstest]
    #[case(2023, 12, Weekday::Sun, 31)]
    #[case(2023, 11, Weekday::Sun, 26)]
    #[case(2024, 2, Weekday::Sun, 25)]
    #[case(2023, 2, Weekday::Sun, 26)]
    #[case(2023, 12, Weekday::Mon, 25)]
    #[case(2023, 12, Weekday::Tue, 26)]
    #[case(2023, 12, Weekday::Wed, 27)]
    #[case(2023, 12, Weekday::Thu, 28)]
    #[case(2023, 12, Weekday::Fri, 29)]
    #[case(2023, 12, Weekday::Sat, 30)]
    #[case(2024, 2, Weekday::Thu, 29)]
    #[case(2000, 2, Weekday::Sun, 27)]
    #[case(1900, 2, Weekday::Sun, 25)]
    fn test_last_weekday_of_month(#[case] y: i32, #[case] m: u32, #[case] weekday: Weekday, #[case] expected: u32) {
        assert_eq!(
            last_weekday_of_month(y, m, weekday),
            Some(date(y, m, expected)),
            "last {weekday:?} of {y}-{m:02} should be {expected}"
        );
    }

    #[rstest]
    #[case(2023, 12, Weekday::Sun, 1, Some(3))]
    #[case(2023, 12, Weekday::Mon, 1, Some(4))]
    #[case(2023, 12, Weekday::Tue, 1, Some(5))]
    #[case(2023, 12, Weekday::Wed, 1, Some(6))]
    #[case(2023, 12, Weekday::Thu, 1, Some(7))]
    #[case(2023, 12, Weekday::Fri, 1, Some(1))]
    #[case(2023, 12, Weekday::Sat, 1, Some(2))]
    #[case(2023, 12, Weekday::Sun, 2, Some(10))]
    #[case(2023, 12, Weekday::Sun, 3, Some(17))]
    #[case(2023, 12, Weekday::Sun, 4, Some(24))]
    #[case(2023, 12, Weekday::Sun, 5, Some(31))]
    #[case(2023, 12, Weekday::Fri, 5, Some(29))]
    #[case(2023, 12, Weekday::Mon, 5, None)]
    #[case(2024, 2, Weekday::Thu, 5, Some(29))]
    #[case(2024, 2, Weekday::Fri, 5, None)]
    #[case(2024, 1, Weekday::Tue, 5, Some(30))]
    #[case(2024, 1, Weekday::Tue, 6, None)]
    #[case(2024, 1, Weekday::Tue, 0, None)]
    #[case(2024, 1, Weekday::Tue, 1000, None)]
    fn test_nth_weekday_of_month(
        #[case] y: i32,
        #[case] m: u32,
        #[case] weekday: Weekday,
        #[case] n: u32,
        #[case] expected: Option<u32>,
    ) {
        assert_eq!(
            nth_weekday_of_month(y, m, weekday, n),
            expected.map(|d| date(y, m, d)),
            "{n}-th {weekday:?} of {y}-{m:02}"
        );
    }

    #[rstest]
    #[case(2024, 1, 31)] // Wednesday
    #[case(2024, 3, 29)] // 31st is Sunday
    #[case(2024, 6, 28)] // 30th is Sunday
    #[case(2024, 8, 30)] // 31st is Saturday
    #[case(2024, 11, 29)] // 30th is Saturday
    #[case(2025, 2, 28)] // Friday
    fn test_last_business_day(#[case] y: i32, #[case] m: u32, #[case] expected: u32) {
        assert_eq!(last_business_day(y, m), Some(date(y, m, expected)));
    }

    #[rstest]
    // Test regular weekdays (Monday-Friday)
    #[case(2024, 1, 1, Some(1))] // Monday -> same day
    #[case(2024, 1, 2, Some(2))] // Tuesday -> same day
    #[case(2024, 1, 3, Some(3))] // Wednesday -> same day
    #[case(2024, 1, 4, Some(4))] // Thursday -> same day
    #[case(2024, 1, 5, Some(5))] // Friday -> same day
    // Test weekends
    #[case(2024, 1, 6, Some(5))] // Saturday -> Friday
    #[case(2024, 1, 7, Some(8))] // Sunday -> Monday
    // Test month boundaries
    #[case(2024, 1, 31, Some(31))]
    #[case(2024, 2, 1, Some(1))]
    #[case(2024, 2, 29, Some(29))]
    #[case(2023, 2, 28, Some(28))]
    #[case(2024, 4, 30, Some(30))]
    #[case(2024, 6, 29, Some(28))] // Saturday -> Friday
    #[case(2024, 6, 30, Some(28))] // Sunday, last day -> Friday
    #[case(2024, 6, 23, Some(24))] // Sunday, not the last day -> Monday
    #[case(2025, 11, 30, Some(28))] // Sunday, last day -> Friday
    #[case(2025, 11, 29, Some(28))] // Saturday before the last Sunday -> Friday
    #[case(2024, 12, 31, Some(31))]
    #[case(2024, 3, 31, Some(29))] // Last day is Sunday
    #[case(2024, 8, 31, Some(30))] // Last day is Saturday
    #[case(2024, 6, 1, Some(3))] // The first day is Saturday
    #[case(2024, 9, 1, Some(2))] // The first day is Sunday
    // Missing days
    #[case(2024, 4, 31, None)]
    #[case(2023, 2, 29, None)]
    #[case(2024, 1, 0, None)]
    fn test_nearest_weekday(#[case] y: i32, #[case] m: u32, #[case] d: u32, #[case] expected: Option<u32>) {
        assert_eq!(
            nearest_weekday(y, m, d),
            expected.map(|e| date(y, m, e)),
            "nearest weekday to {y}-{m:02}-{d:02}"
        );
    }
}
