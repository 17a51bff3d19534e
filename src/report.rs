//! Builders for the `/where` and `/when` answers.

use rand::Rng;
use serde::Serialize;
use vaguely_clock::ZoneClock;

use crate::context::{RequestMetadata, ResponseFormat};
use crate::decor;
use crate::offset::utc_offset;
use crate::response::Reply;

pub const LOCATION_UNAVAILABLE: &str = "Unable to retrieve location data";
pub const TIMEZONE_UNAVAILABLE: &str = "Unable to retrieve timezone data";

/// Placeholder for any field the edge did not supply.
pub const UNKNOWN: &str = "unknown";

const LOCATION_INTRO: &str = "your location is";
const TIME_INTRO: &str = "your time is";

/// JSON body shared by both answers.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub preamble: String,
    pub data: T,
    pub spirit_animal: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationData {
    pub country: String,
    pub region: String,
    pub city: String,
    pub latitude: String,
    pub longitude: String,
    pub postcode: String,
    pub colo: String,
}

impl LocationData {
    pub fn from_metadata(metadata: &RequestMetadata) -> Self {
        Self {
            country: or_unknown(&metadata.country),
            region: or_unknown(&metadata.region),
            city: or_unknown(&metadata.city),
            latitude: or_unknown(&metadata.latitude),
            longitude: or_unknown(&metadata.longitude),
            postcode: or_unknown(&metadata.postal_code),
            colo: or_unknown(&metadata.colo),
        }
    }

    fn to_text(&self) -> String {
        format!(
            "country: {}\nregion: {}\ncity: {}\nlatitude: {}\nlongitude: {}\npostcode: {}\ncf colo: {}",
            self.country,
            self.region,
            self.city,
            self.latitude,
            self.longitude,
            self.postcode,
            self.colo,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeData {
    pub local_time: String,
    pub timezone: String,
    pub utc_offset: String,
    pub colo: String,
}

impl TimeData {
    /// Resolves the local time and offset of the client's zone. Unrecognized zones degrade to
    /// placeholders rather than failing.
    pub fn from_metadata(metadata: &RequestMetadata, clock: &dyn ZoneClock) -> Self {
        let timezone = metadata.timezone.as_deref();
        let local_time = timezone
            .and_then(|zone| match clock.local_time(zone) {
                Ok(time) => Some(time),
                Err(err) => {
                    tracing::debug!(%zone, error = %err, "local time unavailable");
                    None
                }
            })
            .unwrap_or_else(|| UNKNOWN.to_owned());

        Self {
            local_time,
            timezone: or_unknown(&metadata.timezone),
            utc_offset: utc_offset(clock, timezone),
            colo: or_unknown(&metadata.colo),
        }
    }

    fn to_text(&self) -> String {
        format!(
            "local time: {}\ntimezone: {}\nutc offset: {}\ncf colo: {}",
            self.local_time, self.timezone, self.utc_offset, self.colo,
        )
    }
}

/// Answers `/where`.
pub fn location<R>(metadata: Option<&RequestMetadata>, format: ResponseFormat, rng: &mut R) -> Reply
where
    R: Rng + ?Sized,
{
    let Some(metadata) = metadata else {
        return unavailable(format, LOCATION_UNAVAILABLE);
    };

    let data = LocationData::from_metadata(metadata);
    match format {
        ResponseFormat::Text => Reply::text(decor::decorate(rng, LOCATION_INTRO, &data.to_text())),
        ResponseFormat::Json => Reply::json(&envelope(rng, LOCATION_INTRO, data)),
    }
}

/// Answers `/when`.
pub fn time<R>(
    metadata: Option<&RequestMetadata>,
    format: ResponseFormat,
    clock: &dyn ZoneClock,
    rng: &mut R,
) -> Reply
where
    R: Rng + ?Sized,
{
    let Some(metadata) = metadata else {
        return unavailable(format, TIMEZONE_UNAVAILABLE);
    };

    let data = TimeData::from_metadata(metadata, clock);
    match format {
        ResponseFormat::Text => Reply::text(decor::decorate(rng, TIME_INTRO, &data.to_text())),
        ResponseFormat::Json => Reply::json(&envelope(rng, TIME_INTRO, data)),
    }
}

fn envelope<T, R>(rng: &mut R, intro: &str, data: T) -> Envelope<T>
where
    R: Rng + ?Sized,
{
    Envelope {
        preamble: decor::preamble(rng, intro),
        data,
        spirit_animal: decor::spirit_animal(rng),
    }
}

fn unavailable(format: ResponseFormat, message: &'static str) -> Reply {
    match format {
        ResponseFormat::Text => Reply::text(message),
        ResponseFormat::Json => Reply::json(&ErrorBody { error: message }),
    }
}

fn or_unknown(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| UNKNOWN.to_owned())
}
