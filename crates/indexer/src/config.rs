use crate::error::{IndexerError, Result};
use std::time::Duration;

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_REBUILD_TIMEOUT: Duration = Duration::from_secs(2 * 60);
/// Longest duration `parse_duration` accepts (one year)
pub const MAX_DURATION: Duration = Duration::from_secs(365 * 24 * 60 * 60);
/// Concurrent fetches per batch
pub const DEFAULT_FETCH_BATCH_SIZE: usize = 20;

#[derive(Debug, Clone)]
pub struct RefreshConfig {
    pub interval: Duration,
    pub rebuild_timeout: Duration,
    pub fetch_batch_size: usize,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_REFRESH_INTERVAL,
            rebuild_timeout: DEFAULT_REBUILD_TIMEOUT,
            fetch_batch_size: DEFAULT_FETCH_BATCH_SIZE,
        }
    }
}

/// Parse `<integer><unit>` where unit is one of `ms`, `s`, `m`, `h` (e.g. `90s`, `5m`).
///
/// Values above [`MAX_DURATION`] are rejected.
pub fn parse_duration(raw: &str) -> Result<Duration> {
    let value = raw.trim();
    let split = value
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| IndexerError::InvalidConfig(format!("duration '{value}' has no unit")))?;
    let (digits, unit) = value.split_at(split);

    let amount: u64 = digits
        .parse()
        .map_err(|_| IndexerError::InvalidConfig(format!("duration '{value}' has no amount")))?;

    let duration = match unit {
        "ms" => Some(Duration::from_millis(amount)),
        "s" => Some(Duration::from_secs(amount)),
        "m" => amount.checked_mul(60).map(Duration::from_secs),
        "h" => amount.checked_mul(60 * 60).map(Duration::from_secs),
        other => {
            return Err(IndexerError::InvalidConfig(format!(
                "duration '{value}' has unknown unit '{other}' (expected ms, s, m or h)"
            )))
        }
    };
    match duration {
        Some(duration) if duration <= MAX_DURATION => Ok(duration),
        _ => Err(IndexerError::InvalidConfig(format!(
            "duration '{value}' exceeds the maximum of {}h",
            MAX_DURATION.as_secs() / 3600
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_every_unit() {
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_duration("45s").unwrap(), Duration::from_secs(45));
        assert_eq!(parse_duration(" 5m ").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_duration("2h").unwrap(), Duration::from_secs(7200));
    }

    #[test]
    fn rejects_malformed_input() {
        for raw in ["", "5", "m", "5 m", "5d", "-5s", "1.5h", "5M"] {
            assert!(
                matches!(parse_duration(raw), Err(IndexerError::InvalidConfig(_))),
                "expected '{raw}' to be rejected"
            );
        }
    }

    #[test]
    fn rejects_durations_beyond_maximum() {
        for raw in ["9300000000000000000s", "18446744073709551615h", "8761h"] {
            assert!(
                matches!(parse_duration(raw), Err(IndexerError::InvalidConfig(_))),
                "expected '{raw}' to be rejected"
            );
        }
        assert_eq!(parse_duration("8760h").unwrap(), MAX_DURATION);
    }

    #[test]
    fn default_refresh_is_five_minutes() {
        let config = RefreshConfig::default();
        assert_eq!(config.interval, Duration::from_secs(300));
        assert_eq!(config.fetch_batch_size, 20);
    }
}
