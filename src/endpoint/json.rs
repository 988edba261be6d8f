//! JSON helpers for web backends.

/// Serde `with` module for dates in the format JavaScript's `Date.toJSON()`
/// produces, e.g. `2022-01-19T21:21:33.983Z`.
///
/// Dates are always encoded in UTC with millisecond precision. Decoding
/// accepts any RFC 3339 timestamp, with or without fractional seconds.
///
/// # Example
///
/// ```
/// use blocks_transport::endpoint::json::javascript_iso8601;
/// use chrono::{DateTime, Utc};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Payload {
///     message: String,
///     #[serde(with = "javascript_iso8601")]
///     created_at: DateTime<Utc>,
/// }
///
/// let json = r#"{"message":"hi","created_at":"2022-01-19T21:21:33.983Z"}"#;
/// let payload: Payload = serde_json::from_str(json).unwrap();
/// assert_eq!(payload.created_at.timestamp_millis(), 1_642_627_293_983);
/// ```
pub mod javascript_iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Formats a date as `YYYY-MM-DDTHH:MM:SS.sssZ`.
    #[must_use]
    pub fn encode(date: &DateTime<Utc>) -> String {
        date.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Parses an RFC 3339 timestamp into UTC.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `s` is not a valid timestamp.
    pub fn decode(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(s).map(|date| date.with_timezone(&Utc))
    }

    /// Serializes a date as a JavaScript ISO-8601 string.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error.
    pub fn serialize<S: Serializer>(
        date: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode(date))
    }

    /// Deserializes a date from an ISO-8601 string.
    ///
    /// # Errors
    ///
    /// Fails if the value is not a string or not a valid timestamp.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        decode(&s).map_err(|e| serde::de::Error::custom(format!("invalid date '{s}': {e}")))
    }

    /// The same format for `Option<DateTime<Utc>>` fields.
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        /// Serializes an optional date.
        ///
        /// # Errors
        ///
        /// Returns the serializer's error.
        #[allow(clippy::ref_option)]
        pub fn serialize<S: Serializer>(
            date: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => serializer.serialize_some(&super::encode(date)),
                None => serializer.serialize_none(),
            }
        }

        /// Deserializes an optional date.
        ///
        /// # Errors
        ///
        /// Fails if a present value is not a valid timestamp.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|s| {
                    super::decode(&s)
                        .map_err(|e| serde::de::Error::custom(format!("invalid date '{s}': {e}")))
                })
                .transpose()
        }
    }
}
