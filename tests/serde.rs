#![cfg(feature = "serde")]

use cron_next::Cron;
use rstest::rstest;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Job {
    name: String,
    schedule: Cron,
}

#[rstest]
#[case("0 0 0 * * *")]
#[case("@hourly")]
#[case("0 0 12 ? * 2#5")]
fn serialize_as_source_string(#[case] expression: &str) {
    let job = Job {
        name: "backup".into(),
        schedule: Cron::parse(expression).unwrap(),
    };

    let json = serde_json::to_string(&job).unwrap();
    assert_eq!(json, format!(r#"{{"name":"backup","schedule":"{expression}"}}"#));

    let restored: Job = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, job);
    assert_eq!(restored.schedule.as_str(), expression);
}

#[rstest]
#[case(r#"{"name":"backup","schedule":"0 0 0 * *"}"#)]
#[case(r#"{"name":"backup","schedule":"0 0 0 32 * *"}"#)]
#[case(r#"{"name":"backup","schedule":42}"#)]
fn reject_invalid_expression(#[case] json: &str) {
    assert!(serde_json::from_str::<Job>(json).is_err());
}
