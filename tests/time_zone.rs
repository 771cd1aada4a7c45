use chrono::DateTime;
use chrono_tz::{Europe::Kyiv, Tz};
use cron_next::{Cron, Result};
use rstest::rstest;
use std::time::Duration;

fn kyiv(input: &str) -> DateTime<Tz> {
    DateTime::parse_from_rfc3339(input).unwrap().with_timezone(&Kyiv)
}

#[rstest]
// winter and summer time
#[case("0 0 12 * * *", "2024-01-10T08:00:00+02:00", "2024-01-10T12:00:00+02:00")]
#[case("0 0 12 * * *", "2024-07-10T08:00:00+03:00", "2024-07-10T12:00:00+03:00")]
// clocks turned forward at 03:00, so 03:30 doesn't exist that day
#[case("0 30 3 * * *", "2024-03-30T12:00:00+02:00", "2024-04-01T03:30:00+03:00")]
#[case("0 0 * * * *", "2024-03-31T02:30:00+02:00", "2024-03-31T04:00:00+03:00")]
#[case("* * * * * *", "2024-03-31T02:59:59+02:00", "2024-03-31T04:00:00+03:00")]
#[case("0 0 0 * * *", "2024-03-30T12:00:00+02:00", "2024-03-31T00:00:00+02:00")]
// clocks turned back at 04:00, so 03:00-03:59 happens twice that day
#[case("0 30 3 * * *", "2024-10-27T00:00:00+03:00", "2024-10-27T03:30:00+03:00")]
#[case("0 45 3 * * *", "2024-10-27T03:40:00+02:00", "2024-10-27T03:45:00+02:00")]
#[case("0 0 * * * *", "2024-10-27T02:30:00+03:00", "2024-10-27T03:00:00+03:00")]
#[case("0 0 * * * *", "2024-10-27T03:00:00+03:00", "2024-10-27T04:00:00+02:00")]
#[case("0 0 0 L * *", "2024-10-27T03:30:00+02:00", "2024-10-31T00:00:00+02:00")]
#[timeout(Duration::from_secs(5))]
fn next_in_time_zone_with_dst(#[case] expression: &str, #[case] from: &str, #[case] expected: &str) -> Result<()> {
    let cron = Cron::parse(expression)?;
    let next = cron.next(&kyiv(from)).unwrap();

    assert_eq!(next, kyiv(expected), "'{expression}' from {from}");
    assert_eq!(next.to_rfc3339(), expected);

    Ok(())
}

#[rstest]
#[timeout(Duration::from_secs(5))]
fn local_time_matches_once_per_day_across_dst() -> Result<()> {
    let cron = Cron::parse("0 30 3 * * *")?;
    let times: Vec<String> = cron
        .iter(&kyiv("2024-10-25T12:00:00+03:00"))
        .take(4)
        .map(|t| t.to_rfc3339())
        .collect();

    assert_eq!(
        times,
        vec![
            "2024-10-26T03:30:00+03:00",
            "2024-10-27T03:30:00+03:00",
            "2024-10-28T03:30:00+02:00",
            "2024-10-29T03:30:00+02:00",
        ]
    );

    Ok(())
}
