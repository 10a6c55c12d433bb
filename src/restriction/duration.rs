/// Restriction lifetime encoding
///
/// The restriction API stores lifetimes as a seconds count and has no
/// value for "forever", so permanence travels as a ten-year sentinel.
use crate::error::{RelayError, RelayResult};
use serde::Serialize;
use std::fmt;

/// Ten years in seconds. Any lifetime at or above this is permanent.
pub const PERMANENT_DURATION_SECONDS: u64 = 315_360_000;

/// Lifetime of a restriction, counted from when it was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "seconds", rename_all = "lowercase")]
pub enum RestrictionDuration {
    Permanent,
    Timed(u64),
}

impl RestrictionDuration {
    /// Zero or negative seconds request a permanent restriction
    pub fn from_seconds(seconds: i64) -> Self {
        if seconds <= 0 {
            RestrictionDuration::Permanent
        } else {
            RestrictionDuration::Timed(seconds as u64)
        }
    }

    /// Zero or negative minutes request a permanent restriction
    pub fn from_minutes(minutes: i64) -> Self {
        Self::from_seconds(minutes.saturating_mul(60))
    }

    /// True for the explicit variant and for any lifetime reaching the sentinel
    pub fn is_permanent(&self) -> bool {
        match self {
            RestrictionDuration::Permanent => true,
            RestrictionDuration::Timed(seconds) => *seconds >= PERMANENT_DURATION_SECONDS,
        }
    }

    /// Seconds to transmit to the restriction API
    pub fn wire_seconds(&self) -> u64 {
        match self {
            RestrictionDuration::Permanent => PERMANENT_DURATION_SECONDS,
            RestrictionDuration::Timed(seconds) => *seconds,
        }
    }

    /// Seconds for live server envelopes, where -1 means permanent
    pub fn envelope_seconds(&self) -> i64 {
        if self.is_permanent() {
            return -1;
        }
        self.wire_seconds() as i64
    }

    /// Encode as the API's duration string, e.g. `"1800s"`
    pub(crate) fn encode(&self) -> String {
        format!("{}s", self.wire_seconds())
    }

    /// Decode the API's duration string. Fractional seconds are truncated.
    pub(crate) fn decode(raw: &str) -> RelayResult<Self> {
        let digits = raw.trim().trim_end_matches('s');
        let whole = digits.split('.').next().unwrap_or_default();
        let seconds = whole
            .parse::<u64>()
            .map_err(|_| RelayError::Decode(format!("Invalid restriction duration: {:?}", raw)))?;
        Ok(RestrictionDuration::Timed(seconds))
    }

    /// Whole hours and remaining minutes, `None` when permanent
    pub fn hours_minutes(&self) -> Option<(u64, u64)> {
        if self.is_permanent() {
            return None;
        }
        let seconds = self.wire_seconds();
        Some((seconds / 3600, (seconds % 3600) / 60))
    }
}

impl fmt::Display for RestrictionDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hours_minutes() {
            None => write!(f, "Permanent"),
            Some((hours, minutes)) => write!(f, "{}h {}m total", hours, minutes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_positive_minutes_are_permanent() {
        for minutes in [0, -1, -60, i64::MIN] {
            let duration = RestrictionDuration::from_minutes(minutes);
            assert!(duration.is_permanent());
            assert_eq!(duration.wire_seconds(), PERMANENT_DURATION_SECONDS);
            assert_eq!(duration.encode(), "315360000s");
            assert_eq!(duration.to_string(), "Permanent");
        }
    }

    #[test]
    fn test_positive_minutes_transmit_exact_seconds() {
        for minutes in [1_i64, 30, 59, 61, 1440, 10_000] {
            let duration = RestrictionDuration::from_minutes(minutes);
            assert_eq!(duration.wire_seconds(), (minutes * 60) as u64);
        }
    }

    #[test]
    fn test_thirty_minutes_displays_hours_and_minutes() {
        let duration = RestrictionDuration::from_minutes(30);
        assert_eq!(duration.encode(), "1800s");
        assert_eq!(duration.to_string(), "0h 30m total");
    }

    #[test]
    fn test_decomposition() {
        assert_eq!(RestrictionDuration::from_minutes(90).to_string(), "1h 30m total");
        assert_eq!(RestrictionDuration::from_minutes(1440).to_string(), "24h 0m total");
        assert_eq!(RestrictionDuration::from_seconds(59).to_string(), "0h 0m total");
    }

    #[test]
    fn test_decode() {
        assert_eq!(
            RestrictionDuration::decode("1800s").unwrap(),
            RestrictionDuration::Timed(1800)
        );
        assert_eq!(
            RestrictionDuration::decode("3600.500s").unwrap(),
            RestrictionDuration::Timed(3600)
        );
        assert!(RestrictionDuration::decode("not-a-duration").is_err());
    }

    #[test]
    fn test_sentinel_and_beyond_decode_as_permanent() {
        assert!(RestrictionDuration::decode("315360000s").unwrap().is_permanent());
        assert!(RestrictionDuration::decode("999999999s").unwrap().is_permanent());
        assert!(!RestrictionDuration::decode("315359999s").unwrap().is_permanent());
    }

    #[test]
    fn test_round_trip_preserves_decomposition() {
        for minutes in [1_i64, 30, 95, 4320] {
            let applied = RestrictionDuration::from_minutes(minutes);
            let decoded = RestrictionDuration::decode(&applied.encode()).unwrap();
            assert_eq!(applied.hours_minutes(), decoded.hours_minutes());
        }
    }

    #[test]
    fn test_huge_minutes_transmit_exactly_but_display_permanent() {
        let minutes = 6_000_000_i64;
        let duration = RestrictionDuration::from_minutes(minutes);
        assert_eq!(duration.wire_seconds(), (minutes * 60) as u64);
        assert!(duration.is_permanent());
        assert_eq!(duration.to_string(), "Permanent");
    }

    #[test]
    fn test_envelope_seconds() {
        assert_eq!(RestrictionDuration::from_minutes(0).envelope_seconds(), -1);
        assert_eq!(RestrictionDuration::from_minutes(2).envelope_seconds(), 120);
    }
}
