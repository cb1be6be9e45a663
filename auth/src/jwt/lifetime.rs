use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use humantime::DurationError;
use serde::Deserialize;

use super::errors::LifetimeError;

/// How long an issued token stays valid.
///
/// Parsed from duration strings such as `"1d"`, `"12h"`, `"90m"`,
/// `"2 days"` or `"1h 30m"`. A bare number string is read as milliseconds,
/// while a numeric configuration value is read as seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawLifetime")]
pub struct TokenLifetime(Duration);

impl TokenLifetime {
    /// Lifetime of a whole number of seconds.
    ///
    /// # Errors
    /// * `NotPositive` - `seconds` is zero
    /// * `OutOfRange` - `seconds` does not fit a duration
    pub fn from_seconds(seconds: u64) -> Result<Self, LifetimeError> {
        let seconds = i64::try_from(seconds).map_err(|_| LifetimeError::OutOfRange)?;
        let duration = Duration::try_seconds(seconds).ok_or(LifetimeError::OutOfRange)?;
        Self::from_duration(duration)
    }

    fn from_millis(millis: i64) -> Result<Self, LifetimeError> {
        let duration = Duration::try_milliseconds(millis).ok_or(LifetimeError::OutOfRange)?;
        Self::from_duration(duration)
    }

    fn from_duration(duration: Duration) -> Result<Self, LifetimeError> {
        if duration <= Duration::zero() {
            return Err(LifetimeError::NotPositive(duration.num_milliseconds()));
        }
        Ok(Self(duration))
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }

    /// Whole seconds, rounded down. Used for the `exp` claim.
    pub fn as_seconds(&self) -> i64 {
        self.0.num_seconds()
    }
}

impl Default for TokenLifetime {
    /// One day.
    fn default() -> Self {
        Self(Duration::days(1))
    }
}

impl FromStr for TokenLifetime {
    type Err = LifetimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            let millis: i64 = trimmed.parse().map_err(|_| LifetimeError::OutOfRange)?;
            return Self::from_millis(millis);
        }

        let duration = humantime::parse_duration(trimmed).map_err(|e| match e {
            DurationError::UnknownUnit { unit, .. } => LifetimeError::UnknownUnit(unit),
            DurationError::NumberOverflow => LifetimeError::OutOfRange,
            _ => LifetimeError::InvalidFormat(s.to_string()),
        })?;

        Self::from_duration(Duration::from_std(duration).map_err(|_| LifetimeError::OutOfRange)?)
    }
}

impl fmt::Display for TokenLifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.as_seconds())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLifetime {
    Seconds(u64),
    Text(String),
}

impl TryFrom<RawLifetime> for TokenLifetime {
    type Error = LifetimeError;

    fn try_from(raw: RawLifetime) -> Result<Self, Self::Error> {
        match raw {
            RawLifetime::Seconds(seconds) => Self::from_seconds(seconds),
            RawLifetime::Text(text) => text.parse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_one_day() {
        assert_eq!(TokenLifetime::default().as_seconds(), 24 * 60 * 60);
        assert_eq!("1d".parse::<TokenLifetime>().unwrap(), TokenLifetime::default());
    }

    #[test]
    fn test_parse_units() {
        let cases = [
            ("45s", 45),
            ("90m", 90 * 60),
            ("12h", 12 * 60 * 60),
            ("2 days", 2 * 24 * 60 * 60),
            ("1w", 7 * 24 * 60 * 60),
            ("1h 30m", 90 * 60),
        ];

        for (input, seconds) in cases {
            let lifetime: TokenLifetime = input.parse().expect(input);
            assert_eq!(lifetime.as_seconds(), seconds, "{}", input);
        }
    }

    #[test]
    fn test_bare_number_is_milliseconds() {
        let lifetime: TokenLifetime = "120000".parse().unwrap();
        assert_eq!(lifetime.as_seconds(), 120);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "".parse::<TokenLifetime>(),
            Err(LifetimeError::InvalidFormat(_))
        ));
        assert!(matches!(
            "soon".parse::<TokenLifetime>(),
            Err(LifetimeError::InvalidFormat(_))
        ));
        assert!(matches!(
            "3 fortnights".parse::<TokenLifetime>(),
            Err(LifetimeError::UnknownUnit(_))
        ));
        assert!(matches!(
            "0s".parse::<TokenLifetime>(),
            Err(LifetimeError::NotPositive(0))
        ));
    }

    #[test]
    fn test_from_seconds() {
        assert_eq!(TokenLifetime::from_seconds(60).unwrap().as_seconds(), 60);
        assert!(TokenLifetime::from_seconds(0).is_err());
        assert!(TokenLifetime::from_seconds(u64::MAX).is_err());
    }

    #[test]
    fn test_deserialize_number_or_string() {
        let from_number: TokenLifetime = serde_json::from_str("3600").unwrap();
        let from_text: TokenLifetime = serde_json::from_str("\"1h\"").unwrap();
        assert_eq!(from_number, from_text);

        assert!(serde_json::from_str::<TokenLifetime>("\"never\"").is_err());
    }
}
