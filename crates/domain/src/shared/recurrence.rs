use serde::{
    de::{IgnoredAny, MapAccess, SeqAccess, Visitor},
    Deserialize, Serialize,
};
use std::{convert::Infallible, fmt::Display, str::FromStr};

/// How a `BaseEvent` repeats.
///
/// Any frequency the engine does not know about is read as `None`, so a
/// series with an unsupported rule still shows up once on its start date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Frequency {
    None,
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

impl Default for Frequency {
    fn default() -> Self {
        Self::None
    }
}

impl Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let freq = match self {
            Self::None => "none",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
        };
        write!(f, "{}", freq)
    }
}

impl FromStr for Frequency {
    type Err = Infallible;

    fn from_str(freq: &str) -> Result<Self, Self::Err> {
        let freq = match freq.trim().to_lowercase().as_str() {
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "biweekly" => Self::Biweekly,
            "monthly" => Self::Monthly,
            _ => Self::None,
        };
        Ok(freq)
    }
}

impl Serialize for Frequency {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Frequency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct FrequencyVisitor;

        impl<'de> Visitor<'de> for FrequencyVisitor {
            type Value = Frequency;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("A recurrence frequency string or null")
            }

            fn visit_str<E>(self, value: &str) -> Result<Frequency, E>
            where
                E: serde::de::Error,
            {
                Ok(value.parse::<Frequency>().unwrap_or_default())
            }

            fn visit_unit<E>(self) -> Result<Frequency, E>
            where
                E: serde::de::Error,
            {
                Ok(Frequency::None)
            }

            fn visit_none<E>(self) -> Result<Frequency, E>
            where
                E: serde::de::Error,
            {
                Ok(Frequency::None)
            }

            fn visit_bool<E>(self, _: bool) -> Result<Frequency, E>
            where
                E: serde::de::Error,
            {
                Ok(Frequency::None)
            }

            fn visit_i64<E>(self, _: i64) -> Result<Frequency, E>
            where
                E: serde::de::Error,
            {
                Ok(Frequency::None)
            }

            fn visit_u64<E>(self, _: u64) -> Result<Frequency, E>
            where
                E: serde::de::Error,
            {
                Ok(Frequency::None)
            }

            fn visit_f64<E>(self, _: f64) -> Result<Frequency, E>
            where
                E: serde::de::Error,
            {
                Ok(Frequency::None)
            }

            // Structured values are drained so the surrounding record still parses
            fn visit_seq<A>(self, mut seq: A) -> Result<Frequency, A::Error>
            where
                A: SeqAccess<'de>,
            {
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(Frequency::None)
            }

            fn visit_map<A>(self, mut map: A) -> Result<Frequency, A::Error>
            where
                A: MapAccess<'de>,
            {
                while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
                Ok(Frequency::None)
            }
        }

        deserializer.deserialize_any(FrequencyVisitor)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_known_frequencies() {
        assert_eq!("daily".parse::<Frequency>().unwrap(), Frequency::Daily);
        assert_eq!("Weekly".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert_eq!(" biweekly ".parse::<Frequency>().unwrap(), Frequency::Biweekly);
        assert_eq!("MONTHLY".parse::<Frequency>().unwrap(), Frequency::Monthly);
        assert_eq!("none".parse::<Frequency>().unwrap(), Frequency::None);
    }

    #[test]
    fn unknown_frequencies_fall_back_to_none() {
        assert_eq!("yearly".parse::<Frequency>().unwrap(), Frequency::None);
        assert_eq!("".parse::<Frequency>().unwrap(), Frequency::None);

        let freq: Frequency = serde_json::from_str("\"fortnightly\"").unwrap();
        assert_eq!(freq, Frequency::None);
        let freq: Frequency = serde_json::from_str("null").unwrap();
        assert_eq!(freq, Frequency::None);
        for raw in &["2", "-1", "1.5", "true", "[\"weekly\"]", "{\"every\": 2}"] {
            let freq: Frequency = serde_json::from_str(raw).unwrap();
            assert_eq!(freq, Frequency::None);
        }
    }

    #[test]
    fn serializes_frequency() {
        assert_eq!(
            serde_json::to_string(&Frequency::Biweekly).unwrap(),
            "\"biweekly\""
        );
        assert_eq!(Frequency::Monthly.to_string(), "monthly");
    }
}
