use std::ops::Deref;

use serde::Deserialize;

/// A duration written as space separated `<n><unit>` parts, e.g. `1h 30m`.
///
/// Supported units are `ms`, `s`, `m`, `h` and `d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s)
            .map(Self)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid duration: {s:?}")))
    }
}

fn parse(s: &str) -> Option<std::time::Duration> {
    s.split_whitespace()
        .try_fold(std::time::Duration::ZERO, |total, part| {
            let (value, unit) = part.split_at(part.find(|c: char| !c.is_ascii_digit())?);
            let value = value.parse::<u64>().ok()?;
            let part = match unit {
                "ms" => std::time::Duration::from_millis(value),
                "s" => std::time::Duration::from_secs(value),
                "m" => std::time::Duration::from_secs(value.checked_mul(60)?),
                "h" => std::time::Duration::from_secs(value.checked_mul(60 * 60)?),
                "d" => std::time::Duration::from_secs(value.checked_mul(24 * 60 * 60)?),
                _ => return None,
            };
            total.checked_add(part)
        })
}
