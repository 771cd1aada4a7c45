use crate::{
    field::FieldKind,
    matcher::{FieldMatcher, ValueSet},
    series::SeriesWithStep,
    utils, CronError, Result,
};
use chrono::Weekday;

const MACROS: [(&str, &str); 7] = [
    ("@yearly", "0 0 0 1 1 *"),
    ("@annually", "0 0 0 1 1 *"),
    ("@monthly", "0 0 0 1 * *"),
    ("@weekly", "0 0 0 * * 0"),
    ("@daily", "0 0 0 * * *"),
    ("@midnight", "0 0 0 * * *"),
    ("@hourly", "0 0 * * * *"),
];

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];
const DAYS_OF_WEEK: [&str; 7] = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];

const NUMBER_OF_FIELDS: usize = 6;

/// Longest `L-n` offset which still matches the first day of some month.
const MAX_LAST_DAY_OFFSET: u32 = 30;

/// Returns the six-field equivalent of the macro, or the `input` itself if it's not a macro.
pub(crate) fn expand_macro(input: &str) -> &str {
    MACROS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(input))
        .map(|(_, expanded)| *expanded)
        .unwrap_or(input)
}

/// Compiles a trimmed expression into matchers, in the order of the expression fields.
pub(crate) fn parse_fields(expression: &str) -> Result<[FieldMatcher; NUMBER_OF_FIELDS]> {
    if expression.is_empty() {
        return Err(CronError::EmptyExpression);
    }

    let expanded = expand_macro(expression);
    let tokens: Vec<&str> = expanded.split_whitespace().collect();
    if tokens.len() != NUMBER_OF_FIELDS {
        return Err(CronError::InvalidFieldCount {
            expression: expression.to_owned(),
            found: tokens.len(),
        });
    }

    Ok([
        compile_field(FieldKind::Second, tokens[0])?,
        compile_field(FieldKind::Minute, tokens[1])?,
        compile_field(FieldKind::Hour, tokens[2])?,
        compile_field(FieldKind::DayOfMonth, tokens[3])?,
        compile_field(FieldKind::Month, tokens[4])?,
        compile_field(FieldKind::DayOfWeek, tokens[5])?,
    ])
}

fn is_day_field(kind: FieldKind) -> bool {
    matches!(kind, FieldKind::DayOfMonth | FieldKind::DayOfWeek)
}

fn is_extended_term(kind: FieldKind, term: &str) -> bool {
    match kind {
        FieldKind::DayOfMonth => term.contains(['L', 'W']),
        FieldKind::DayOfWeek => term.contains(['L', '#']),
        _ => false,
    }
}

fn compile_field(kind: FieldKind, token: &str) -> Result<FieldMatcher> {
    if let Some(c) = token
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '*' | ',' | '-' | '/' | '#' | '?')))
    {
        return Err(CronError::format(kind, token, format!("unexpected character '{c}'")));
    }

    let text = match kind {
        FieldKind::Month => utils::replace_names(token, &MONTHS, 1),
        FieldKind::DayOfWeek => utils::replace_names(token, &DAYS_OF_WEEK, 1),
        _ => token.to_uppercase(),
    };

    if text == "*" || (text == "?" && is_day_field(kind)) {
        return Ok(FieldMatcher::All);
    }

    let terms: Vec<&str> = text.split(',').collect();
    let mut values = ValueSet::default();
    let mut extended = Vec::new();

    for term in &terms {
        if term.is_empty() {
            return Err(CronError::format(kind, token, "empty list item"));
        } else if *term == "?" && !is_day_field(kind) {
            return Err(CronError::format(kind, token, "'?' is allowed in day fields only"));
        } else if is_extended_term(kind, term) {
            extended.push(match kind {
                FieldKind::DayOfMonth => compile_day_of_month_extended(term, token)?,
                _ => compile_day_of_week_extended(term, token)?,
            });
        } else {
            values = compile_standard_term(kind, term, token, values)?;
        }
    }

    if kind == FieldKind::DayOfWeek {
        values = values.remap(0, 7);
    }

    if extended.is_empty() {
        return Ok(FieldMatcher::Membership(kind, values));
    }
    if terms.len() == 1 {
        return Ok(extended.remove(0));
    }
    if !values.is_empty() {
        extended.push(FieldMatcher::Membership(kind, values));
    }

    Ok(FieldMatcher::Union(extended))
}

/// Adds values of `*`, `?`, `N`, `A-B`, `*/S`, `N/S` or `A-B/S` term to the `values`.
fn compile_standard_term(kind: FieldKind, term: &str, token: &str, mut values: ValueSet) -> Result<ValueSet> {
    let (base, step) = match term.split_once('/') {
        Some((base, step)) => {
            let step = utils::parse_number(step)
                .ok_or_else(|| number_error(kind, step, token, format!("invalid step '{step}'")))?;
            if step == 0 {
                return Err(CronError::range(kind, token, "step must be greater than 0"));
            }
            (base, Some(step))
        }
        None => (term, None),
    };

    let (cycle_min, cycle_max) = kind.cycle();
    let (min, max) = kind.bounds();

    let series = if base == "*" || base == "?" {
        if base == "?" && (step.is_some() || !is_day_field(kind)) {
            return Err(CronError::format(kind, token, "'?' can't be combined with other values"));
        }
        // day of week starts from Sunday as 0, same as `0-7/S`
        SeriesWithStep::new(min, max, step.unwrap_or(1), (min, max))
    } else if let Some((start, end)) = base.split_once('-') {
        let start = parse_value(kind, start, token)?;
        let end = parse_value(kind, end, token)?;
        let step = step.unwrap_or(1);

        if start <= end {
            SeriesWithStep::new(start, end, step, (start, end))
        } else if kind == FieldKind::DayOfWeek && end == 0 {
            SeriesWithStep::new(start, cycle_max, step, (start, cycle_max))
        } else {
            // wraps around the cycle, e.g. 22-2 for hours
            SeriesWithStep::new(start, end, step, (cycle_min, cycle_max))
        }
    } else {
        let start = parse_value(kind, base, token)?;
        match step {
            Some(step) => SeriesWithStep::new(start, max, step, (start, max)),
            None => SeriesWithStep::new(start, start, 1, (start, start)),
        }
    };

    for value in series {
        values.insert(value);
    }

    Ok(values)
}

/// Error for `input` which isn't a `u32`: digits which don't fit are out of range, anything else is malformed.
fn number_error(kind: FieldKind, input: &str, token: &str, reason: String) -> CronError {
    if utils::is_number(input) {
        CronError::range(kind, token, format!("{input} is too large"))
    } else {
        CronError::format(kind, token, reason)
    }
}

/// Parses a single numeric value of the field, names are expected to be replaced already.
fn parse_value(kind: FieldKind, input: &str, token: &str) -> Result<u32> {
    let value = utils::parse_number(input)
        .ok_or_else(|| number_error(kind, input, token, format!("'{input}' is not a number")))?;

    let (min, max) = kind.bounds();
    if value < min || value > max {
        return Err(CronError::range(
            kind,
            token,
            format!("{value} is outside of {min}-{max}"),
        ));
    }

    Ok(value)
}

fn compile_day_of_month_extended(term: &str, token: &str) -> Result<FieldMatcher> {
    const KIND: FieldKind = FieldKind::DayOfMonth;

    if let Some(position) = term.find('L') {
        if position != 0 {
            return Err(CronError::format(KIND, token, "'L' must be the first character"));
        }

        return match &term[1..] {
            "" => Ok(FieldMatcher::LastDayOfMonth(0)),
            "W" => Ok(FieldMatcher::LastWeekdayOfMonth),
            suffix => {
                let invalid_suffix = || format!("invalid suffix '{suffix}' after 'L'");
                let digits = suffix
                    .strip_prefix('-')
                    .ok_or_else(|| CronError::format(KIND, token, invalid_suffix()))?;
                let offset =
                    utils::parse_number(digits).ok_or_else(|| number_error(KIND, digits, token, invalid_suffix()))?;
                if offset == 0 || offset > MAX_LAST_DAY_OFFSET {
                    return Err(CronError::range(
                        KIND,
                        token,
                        format!("offset {offset} is outside of 1-{MAX_LAST_DAY_OFFSET}"),
                    ));
                }
                Ok(FieldMatcher::LastDayOfMonth(offset))
            }
        };
    }

    match term.strip_suffix('W') {
        Some(day) if !day.contains('W') => Ok(FieldMatcher::NearestWeekday(parse_value(KIND, day, token)?)),
        _ => Err(CronError::format(KIND, token, "'W' must be the last character")),
    }
}

fn parse_weekday(input: &str, token: &str) -> Result<Weekday> {
    let value = parse_value(FieldKind::DayOfWeek, input, token)?;
    utils::weekday_from_number(value)
        .ok_or_else(|| CronError::range(FieldKind::DayOfWeek, token, format!("{value} is not a day of week")))
}

fn compile_day_of_week_extended(term: &str, token: &str) -> Result<FieldMatcher> {
    const KIND: FieldKind = FieldKind::DayOfWeek;

    if let Some((weekday, ordinal)) = term.split_once('#') {
        let weekday = parse_weekday(weekday, token)?;
        if ordinal.is_empty() {
            return Err(CronError::format(KIND, token, "missing ordinal after '#'"));
        }
        let not_positive = || CronError::range(KIND, token, format!("ordinal {ordinal} must be positive"));
        if ordinal.strip_prefix('-').is_some_and(utils::is_number) {
            return Err(not_positive());
        }
        let ordinal = utils::parse_number(ordinal)
            .ok_or_else(|| number_error(KIND, ordinal, token, format!("'{ordinal}' is not a number")))?;
        if ordinal == 0 {
            return Err(not_positive());
        }

        return Ok(FieldMatcher::NthSpecificWeekdayOfMonth(weekday, ordinal));
    }

    match term.strip_suffix('L') {
        Some(weekday) if !weekday.is_empty() && !weekday.contains('L') => {
            Ok(FieldMatcher::LastSpecificWeekdayOfMonth(parse_weekday(weekday, token)?))
        }
        Some("") => Err(CronError::format(KIND, token, "'L' requires a day of week")),
        _ => Err(CronError::format(KIND, token, "'L' must be the last character")),
    }
}
