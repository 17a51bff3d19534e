use chrono::{DateTime, Offset, Utc};
use chrono_tz::Tz;
use thiserror::Error;

/// Wall-clock rendering used for `local time`, matching the `en-AU` locale
/// (`19/10/2026, 3:04:05 pm`).
const LOCAL_TIME_FORMAT: &str = "%d/%m/%Y, %-I:%M:%S %P";

/// Answers "what time is it over there" for IANA zone identifiers.
///
/// Both operations fail with [`ClockError::InvalidZone`] when the identifier is not part of the
/// timezone database. Callers are expected to recover from that locally.
///
/// # Examples
/// ```
/// use vaguely_clock::{SystemClock, ZoneClock};
///
/// let clock = SystemClock;
/// assert!(clock.short_offset("Australia/Melbourne").unwrap().starts_with("GMT+"));
/// assert!(clock.short_offset("Invalid/Timezone").is_err());
/// ```
pub trait ZoneClock: Send + Sync {
    /// Renders the current instant as local wall-clock time in `zone`.
    fn local_time(&self, zone: &str) -> Result<String, ClockError>;

    /// Returns the short offset form (`GMT`, `GMT+10`, `GMT+5:30`, `GMT-3`) of `zone` right now.
    fn short_offset(&self, zone: &str) -> Result<String, ClockError>;
}

/// Errors emitted by [`ZoneClock`] implementations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClockError {
    #[error("unrecognized timezone identifier: {0}")]
    InvalidZone(String),
}

/// Clock backed by the system time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl ZoneClock for SystemClock {
    fn local_time(&self, zone: &str) -> Result<String, ClockError> {
        local_time_at(Utc::now(), zone)
    }

    fn short_offset(&self, zone: &str) -> Result<String, ClockError> {
        short_offset_at(Utc::now(), zone)
    }
}

/// Clock frozen at a single UTC instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl ZoneClock for FixedClock {
    fn local_time(&self, zone: &str) -> Result<String, ClockError> {
        local_time_at(self.instant, zone)
    }

    fn short_offset(&self, zone: &str) -> Result<String, ClockError> {
        short_offset_at(self.instant, zone)
    }
}

fn parse_zone(zone: &str) -> Result<Tz, ClockError> {
    zone.parse::<Tz>()
        .map_err(|_| ClockError::InvalidZone(zone.to_owned()))
}

fn local_time_at(instant: DateTime<Utc>, zone: &str) -> Result<String, ClockError> {
    let tz = parse_zone(zone)?;
    Ok(instant
        .with_timezone(&tz)
        .format(LOCAL_TIME_FORMAT)
        .to_string())
}

fn short_offset_at(instant: DateTime<Utc>, zone: &str) -> Result<String, ClockError> {
    let tz = parse_zone(zone)?;
    let offset_secs = instant
        .with_timezone(&tz)
        .offset()
        .fix()
        .local_minus_utc();

    if offset_secs == 0 {
        return Ok("GMT".to_owned());
    }

    let sign = if offset_secs > 0 { '+' } else { '-' };
    let abs_secs = offset_secs.unsigned_abs();
    let hours = abs_secs / 3600;
    let minutes = (abs_secs % 3600) / 60;

    if minutes == 0 {
        Ok(format!("GMT{sign}{hours}"))
    } else {
        Ok(format!("GMT{sign}{hours}:{minutes:02}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn winter_in_melbourne() -> FixedClock {
        // 2024-07-01 02:30:00 UTC, AEST (+10) in Melbourne.
        FixedClock::new(Utc.with_ymd_and_hms(2024, 7, 1, 2, 30, 0).unwrap())
    }

    fn summer_in_melbourne() -> FixedClock {
        // 2024-01-15 13:05:09 UTC, AEDT (+11) in Melbourne.
        FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 15, 13, 5, 9).unwrap())
    }

    #[test]
    fn renders_local_time_in_en_au_form() {
        let clock = winter_in_melbourne();
        assert_eq!(
            clock.local_time("Australia/Melbourne").unwrap(),
            "01/07/2024, 12:30:00 pm"
        );

        let clock = summer_in_melbourne();
        assert_eq!(
            clock.local_time("Australia/Melbourne").unwrap(),
            "16/01/2024, 12:05:09 am"
        );
    }

    #[test]
    fn short_offset_follows_daylight_saving() {
        assert_eq!(
            winter_in_melbourne()
                .short_offset("Australia/Melbourne")
                .unwrap(),
            "GMT+10"
        );
        assert_eq!(
            summer_in_melbourne()
                .short_offset("Australia/Melbourne")
                .unwrap(),
            "GMT+11"
        );
    }

    #[test]
    fn short_offset_keeps_minutes_and_sign() {
        let clock = winter_in_melbourne();
        assert_eq!(clock.short_offset("Asia/Kolkata").unwrap(), "GMT+5:30");
        assert_eq!(clock.short_offset("Asia/Kathmandu").unwrap(), "GMT+5:45");
        assert_eq!(
            clock.short_offset("America/Sao_Paulo").unwrap(),
            "GMT-3"
        );
        assert_eq!(
            clock.short_offset("America/St_Johns").unwrap(),
            "GMT-2:30"
        );
    }

    #[test]
    fn zero_offset_has_no_suffix() {
        let clock = winter_in_melbourne();
        assert_eq!(clock.short_offset("UTC").unwrap(), "GMT");
        assert_eq!(clock.short_offset("Atlantic/Reykjavik").unwrap(), "GMT");
    }

    #[test]
    fn unknown_zone_is_rejected() {
        let clock = SystemClock;
        assert_eq!(
            clock.local_time("Invalid/Timezone"),
            Err(ClockError::InvalidZone("Invalid/Timezone".into()))
        );
        assert!(matches!(
            clock.short_offset(""),
            Err(ClockError::InvalidZone(_))
        ));
    }
}
