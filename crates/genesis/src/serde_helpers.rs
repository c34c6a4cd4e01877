//! Serde adapters for genesis fields.

/// Serializes a [`Duration`](std::time::Duration) as a human readable string
/// such as `"10s"` or `"3days"`.
pub(crate) mod duration {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*value).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(&s).map_err(de::Error::custom)
    }
}

/// Reads a block height from an integer or a decimal string.
///
/// TOML integers are signed 64-bit, so heights above `i64::MAX` (such as
/// [`UNSCHEDULED_HEIGHT`](crate::UNSCHEDULED_HEIGHT)) can only be written as
/// strings there. Heights are always serialized as integers.
pub(crate) mod height {
    use serde::de::{self, Deserializer, Visitor};
    use std::fmt;

    struct HeightVisitor;

    impl Visitor<'_> for HeightVisitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative block height as an integer or decimal string")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<u64, E> {
            Ok(value)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<u64, E> {
            u64::try_from(value)
                .map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<u64, E> {
            if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
                return Err(E::invalid_value(de::Unexpected::Str(value), &self));
            }
            value
                .parse()
                .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(HeightVisitor)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "super::duration")]
        interval: Duration,
    }

    #[test]
    fn test_duration_strings() {
        let w: Wrapper = serde_json::from_str(r#"{"interval":"5s"}"#).unwrap();
        assert_eq!(w.interval, Duration::from_secs(5));

        let w = Wrapper {
            interval: Duration::from_secs(3 * 24 * 3600),
        };
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, r#"{"interval":"3days"}"#);
    }

    #[derive(Debug, Deserialize)]
    struct Activation {
        #[serde(deserialize_with = "super::height::deserialize")]
        height: u64,
    }

    #[test]
    fn test_height_forms() {
        let f: Activation = serde_json::from_str(r#"{"height":432001}"#).unwrap();
        assert_eq!(f.height, 432_001);
        let f: Activation = serde_json::from_str(r#"{"height":"18446744073709551615"}"#).unwrap();
        assert_eq!(f.height, u64::MAX);
        let f: Activation = serde_json::from_str(r#"{"height":18446744073709551615}"#).unwrap();
        assert_eq!(f.height, u64::MAX);
    }

    #[test]
    fn test_height_rejects_invalid() {
        for bad in [
            r#"{"height":-1}"#,
            r#"{"height":"-1"}"#,
            r#"{"height":""}"#,
            r#"{"height":"0x10"}"#,
            r#"{"height":"18446744073709551616"}"#,
            r#"{"height":1.5}"#,
        ] {
            assert!(serde_json::from_str::<Activation>(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_duration_rejects_bare_numbers() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"interval":"ten"}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"interval":10}"#).is_err());
    }
}
