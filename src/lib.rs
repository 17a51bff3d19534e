//! Vaguely.
//!
//! An Axum responder meant to run in a Cloudflare container. It echoes the coarse
//! location and local time Cloudflare inferred for a request, wrapped in flavor text
//! from the Cloudflare soothsayers, or as JSON when asked for `application/json`.

pub mod config;
pub mod context;
pub mod decor;
pub mod error;
pub mod offset;
pub mod report;
pub mod response;
pub mod routes;
pub mod runtime;

pub use crate::config::{ConfigError, RuntimeConfig, RuntimeConfigBuilder};
pub use crate::context::{EdgeRequest, RequestMetadata, ResponseFormat};
pub use crate::error::{Result, VaguelyError};
pub use crate::response::{ContentType, Reply};
pub use crate::routes::{AppState, Route, router};
pub use crate::runtime::{run, serve};
pub use vaguely_clock::{ClockError, FixedClock, SystemClock, ZoneClock};
