use std::sync::LazyLock;

use regex::Regex;
use vaguely_clock::ZoneClock;

/// Shown whenever the offset of a zone cannot be determined.
pub const UNKNOWN_OFFSET: &str = "UTC+??:??";

static SINGLE_DIGIT_HOUR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([+-])(\d)(:|$)").expect("valid hour pattern"));
static MISSING_MINUTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([+-]\d{2})$").expect("valid minutes pattern"));

/// Returns the canonical `UTC±HH:MM` offset of `timezone` right now.
///
/// Absent or unrecognized zones yield [`UNKNOWN_OFFSET`]. Zones sitting exactly on UTC yield
/// plain `"UTC"`.
pub fn utc_offset(clock: &dyn ZoneClock, timezone: Option<&str>) -> String {
    let Some(zone) = timezone else {
        return UNKNOWN_OFFSET.to_owned();
    };

    match clock.short_offset(zone) {
        Ok(raw) => normalize(&raw),
        Err(err) => {
            tracing::debug!(%zone, error = %err, "falling back to unknown utc offset");
            UNKNOWN_OFFSET.to_owned()
        }
    }
}

/// Rewrites a short `GMT±H[:MM]` offset as `UTC±HH:MM`.
pub fn normalize(raw: &str) -> String {
    let renamed = raw.replacen("GMT", "UTC", 1);
    let padded = SINGLE_DIGIT_HOUR.replace(&renamed, "${1}0${2}${3}");
    MISSING_MINUTES.replace(&padded, "${1}:00").into_owned()
}
