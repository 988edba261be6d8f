//! Tests for JavaScript-compatible JSON dates.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::json::javascript_iso8601;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct SamplePayload {
    message: String,
    #[serde(with = "javascript_iso8601")]
    creation_date: DateTime<Utc>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct OptionalPayload {
    #[serde(default, with = "javascript_iso8601::option")]
    seen_at: Option<DateTime<Utc>>,
}

/// `new Date("2022-01-19T21:21:33.983Z").getTime()` in JavaScript.
const ARBITRARY_MILLIS: i64 = 1_642_627_293_983;
const ARBITRARY_STRING: &str = "2022-01-19T21:21:33.983Z";

fn arbitrary_date() -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ARBITRARY_MILLIS).unwrap()
}

mod formatter {
    use super::*;

    #[test]
    fn encodes_with_milliseconds_and_z() {
        assert_eq!(javascript_iso8601::encode(&arbitrary_date()), ARBITRARY_STRING);
    }

    #[test]
    fn encodes_whole_seconds_with_zero_millis() {
        let date = Utc.with_ymd_and_hms(2024, 2, 29, 8, 5, 0).unwrap();

        assert_eq!(javascript_iso8601::encode(&date), "2024-02-29T08:05:00.000Z");
    }

    #[test]
    fn decodes_javascript_output() {
        assert_eq!(
            javascript_iso8601::decode(ARBITRARY_STRING).unwrap(),
            arbitrary_date()
        );
    }

    #[test]
    fn decodes_without_fractional_seconds() {
        let date = javascript_iso8601::decode("2022-01-19T21:21:33Z").unwrap();

        assert_eq!(date.timestamp(), 1_642_627_293);
    }

    #[test]
    fn decodes_offsets_into_utc() {
        let date = javascript_iso8601::decode("2022-01-19T22:21:33.983+01:00").unwrap();

        assert_eq!(date, arbitrary_date());
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(javascript_iso8601::decode("2022:01-19T21:21:33.983Z").is_err());
    }
}

mod serde_with {
    use super::*;

    #[test]
    fn decodes_payload() {
        let json = format!(r#"{{"message":"👋","creation_date":"{ARBITRARY_STRING}"}}"#);

        let payload: SamplePayload = serde_json::from_str(&json).unwrap();

        assert_eq!(payload.message, "👋");
        assert_eq!(payload.creation_date, arbitrary_date());
    }

    #[test]
    fn encodes_payload() {
        let payload = SamplePayload {
            message: "👋".to_string(),
            creation_date: arbitrary_date(),
        };

        let json = serde_json::to_string(&payload).unwrap();

        assert!(json.contains(&format!(r#""creation_date":"{ARBITRARY_STRING}""#)));
        assert!(json.contains(r#""message":"👋""#));
    }

    #[test]
    fn invalid_date_fails_decoding() {
        let json = r#"{"message":"👋","creation_date":"2022:01-19T21:21:33.983Z"}"#;

        let error = serde_json::from_str::<SamplePayload>(json).unwrap_err();

        assert!(error.to_string().contains("invalid date"));
    }

    #[test]
    fn optional_dates_round_trip_absent_and_present() {
        let absent: OptionalPayload = serde_json::from_str("{}").unwrap();
        let null: OptionalPayload = serde_json::from_str(r#"{"seen_at":null}"#).unwrap();
        let present: OptionalPayload =
            serde_json::from_str(&format!(r#"{{"seen_at":"{ARBITRARY_STRING}"}}"#)).unwrap();

        assert_eq!(absent.seen_at, None);
        assert_eq!(null.seen_at, None);
        assert_eq!(present.seen_at, Some(arbitrary_date()));
        assert_eq!(
            serde_json::to_string(&present).unwrap(),
            format!(r#"{{"seen_at":"{ARBITRARY_STRING}"}}"#)
        );
    }
}
