use std::convert::Infallible;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use serde::{Deserialize, Deserializer, Serialize};

/// Header set by the Worker shim that carries the `request.cf` object as JSON.
pub const METADATA_HEADER: &str = "x-vaguely-metadata";

const COUNTRY_HEADER: &str = "cf-ipcountry";
const REGION_HEADER: &str = "cf-region";
const CITY_HEADER: &str = "cf-ipcity";
const LATITUDE_HEADER: &str = "cf-iplatitude";
const LONGITUDE_HEADER: &str = "cf-iplongitude";
const POSTAL_CODE_HEADER: &str = "cf-postal-code";
const TIMEZONE_HEADER: &str = "cf-timezone";
const COLO_HEADER: &str = "cf-colo";
const RAY_HEADER: &str = "cf-ray";

/// Request-scoped view of the inbound request: who the edge thinks the client is, and which
/// representation the client asked for.
#[derive(Clone, Debug)]
pub struct EdgeRequest {
    metadata: Option<RequestMetadata>,
    format: ResponseFormat,
}

impl EdgeRequest {
    pub fn new(metadata: Option<RequestMetadata>, format: ResponseFormat) -> Self {
        Self { metadata, format }
    }

    /// Returns the connection metadata, or `None` when the edge supplied none at all.
    pub fn metadata(&self) -> Option<&RequestMetadata> {
        self.metadata.as_ref()
    }

    pub fn format(&self) -> ResponseFormat {
        self.format
    }
}

/// Connection metadata inferred by Cloudflare for the client of a request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestMetadata {
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub latitude: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub longitude: Option<String>,
    pub postal_code: Option<String>,
    pub colo: Option<String>,
    pub timezone: Option<String>,
}

impl RequestMetadata {
    /// Builds metadata from the shim header, falling back to Cloudflare's visitor location headers.
    ///
    /// Returns `None` when neither source is present.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        if let Some(metadata) = Self::from_metadata_header(headers) {
            return Some(metadata);
        }

        let metadata = Self {
            country: header_value(headers, COUNTRY_HEADER),
            region: header_value(headers, REGION_HEADER),
            city: header_value(headers, CITY_HEADER),
            latitude: header_value(headers, LATITUDE_HEADER),
            longitude: header_value(headers, LONGITUDE_HEADER),
            postal_code: header_value(headers, POSTAL_CODE_HEADER),
            colo: header_value(headers, COLO_HEADER)
                .or_else(|| header_value(headers, RAY_HEADER).and_then(colo_from_ray)),
            timezone: header_value(headers, TIMEZONE_HEADER),
        };

        (metadata != Self::default()).then_some(metadata)
    }

    fn from_metadata_header(headers: &HeaderMap) -> Option<Self> {
        let raw = headers.get(METADATA_HEADER)?;
        match serde_json::from_slice(raw.as_bytes()) {
            Ok(metadata) => Some(metadata),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring malformed {METADATA_HEADER} header");
                None
            }
        }
    }
}

/// Representation negotiated through the `Accept` header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    #[default]
    Text,
    Json,
}

impl ResponseFormat {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let wants_json = headers
            .get(header::ACCEPT)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|accept| accept.contains("application/json"));

        if wants_json { Self::Json } else { Self::Text }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for EdgeRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self {
            metadata: RequestMetadata::from_headers(&parts.headers),
            format: ResponseFormat::from_headers(&parts.headers),
        })
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .map(|value| String::from_utf8_lossy(value.as_bytes()))
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// `cf-ray` looks like `8f1c2d3e4a5b6c7d-SYD`; the suffix is the colo.
fn colo_from_ray(ray: String) -> Option<String> {
    ray.rsplit_once('-')
        .map(|(_, colo)| colo.to_owned())
        .filter(|colo| !colo.is_empty())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(value)) => Ok(Some(value)),
        Some(serde_json::Value::Number(value)) => Ok(Some(value.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number, found {other}"
        ))),
    }
}
