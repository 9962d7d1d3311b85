use std::{
    convert::Infallible,
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A loosely-formatted user entry such as `150W` or `2.5h`.
///
/// The raw text is preserved verbatim so that stored records round-trip
/// unchanged; the magnitude is parsed once, at ingestion.
#[derive(Clone, Default)]
pub struct Measure {
    raw: String,
    magnitude: f64,
}

impl Measure {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let magnitude = lenient_magnitude(&raw);
        Self { raw, magnitude }
    }

    /// Compose an entry from an already-typed magnitude and a unit suffix.
    pub fn from_magnitude(magnitude: f64, unit: &str) -> Self {
        Self::new(format!("{magnitude}{unit}"))
    }

    pub const fn magnitude(&self) -> f64 {
        self.magnitude
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl FromStr for Measure {
    type Err = Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(raw))
    }
}

impl Display for Measure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Debug for Measure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.raw)
    }
}

impl Serialize for Measure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Measure {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::new(String::deserialize(deserializer)?))
    }
}

/// Parse a free-form numeric entry: every character that is not a digit or a
/// dot is stripped (a minus sign survives only in leading position), and
/// anything that still fails to parse contributes `0.0` instead of an error.
#[must_use]
pub fn lenient_magnitude(raw: &str) -> f64 {
    let mut filtered = String::with_capacity(raw.len());
    for character in raw.chars() {
        match character {
            '0'..='9' | '.' => filtered.push(character),
            '-' if filtered.is_empty() => filtered.push(character),
            _ => {}
        }
    }
    filtered.parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_lenient_magnitude() {
        assert_abs_diff_eq!(lenient_magnitude("150W"), 150.0);
        assert_abs_diff_eq!(lenient_magnitude("2.5h"), 2.5);
        assert_abs_diff_eq!(lenient_magnitude("  -3 kW "), -3.0);
        assert_abs_diff_eq!(lenient_magnitude(""), 0.0);
        assert_abs_diff_eq!(lenient_magnitude("garbage"), 0.0);
        assert_abs_diff_eq!(lenient_magnitude("1.2.3"), 0.0);
    }

    #[test]
    fn test_lenient_magnitude_is_idempotent() {
        for raw in ["150W", "2.5h", "-3", "nonsense", ""] {
            let parsed = lenient_magnitude(raw);
            assert_abs_diff_eq!(lenient_magnitude(&parsed.to_string()), parsed);
        }
    }

    #[test]
    fn test_raw_round_trip() {
        let measure: Measure = serde_json::from_str("\"1,5 h\"").unwrap();
        assert_eq!(serde_json::to_string(&measure).unwrap(), "\"1,5 h\"");
        assert_abs_diff_eq!(measure.magnitude(), 15.0);
    }

    #[test]
    fn test_from_magnitude() {
        let measure = Measure::from_magnitude(150.0, "W");
        assert_eq!(measure.raw(), "150W");
        assert_abs_diff_eq!(measure.magnitude(), 150.0);
    }
}
