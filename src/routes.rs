use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{Method, Uri};
use rand::Rng;
use vaguely_clock::{SystemClock, ZoneClock};

use crate::context::EdgeRequest;
use crate::decor::{ANIMAL_EMOJIS, pick};
use crate::report;
use crate::response::Reply;

pub const NOT_FOUND_MESSAGE: &str = "404 - Unknown path. Try /where or /when";

/// The complete set of paths the responder answers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Root,
    Where,
    When,
}

impl Route {
    /// Exact match on the path; `""` is treated as `"/"`.
    pub fn resolve(path: &str) -> Option<Self> {
        match path {
            "" | "/" => Some(Route::Root),
            "/where" => Some(Route::Where),
            "/when" => Some(Route::When),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Where => "/where",
            Route::When => "/when",
        }
    }
}

/// Shared state handed to every request.
#[derive(Clone)]
pub struct AppState {
    clock: Arc<dyn ZoneClock>,
}

impl AppState {
    pub fn new(clock: impl ZoneClock + 'static) -> Self {
        Self {
            clock: Arc::new(clock),
        }
    }

    pub fn clock(&self) -> &dyn ZoneClock {
        self.clock.as_ref()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

/// Builds the responder's router. Every method and path goes through the route table.
pub fn router(state: AppState) -> Router {
    Router::new().fallback(dispatch).with_state(state)
}

async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    request: EdgeRequest,
) -> Reply {
    let Some(route) = Route::resolve(uri.path()) else {
        tracing::debug!(%method, path = %uri.path(), "unknown path");
        return Reply::not_found(NOT_FOUND_MESSAGE);
    };

    tracing::debug!(
        %method,
        route = route.as_str(),
        format = ?request.format(),
        has_metadata = request.metadata().is_some(),
        "dispatching request"
    );

    respond(route, &request, state.clock(), &mut rand::thread_rng())
}

/// Renders the answer for an already resolved route.
pub fn respond<R>(route: Route, request: &EdgeRequest, clock: &dyn ZoneClock, rng: &mut R) -> Reply
where
    R: Rng + ?Sized,
{
    match route {
        Route::Root => Reply::html(root_page(rng)),
        Route::Where => report::location(request.metadata(), request.format(), rng),
        Route::When => report::time(request.metadata(), request.format(), clock, rng),
    }
}

/// Landing page listing the available abilities.
pub fn root_page<R>(rng: &mut R) -> String
where
    R: Rng + ?Sized,
{
    let animal = pick(rng, ANIMAL_EMOJIS);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <title>Vaguely</title>
  <style>
    body {{ padding: 2em; font-family: monospace; color: #333; }}
    h1 {{ color: #f6821f; }}
    .route {{ margin: 1em 0; }}
    .path {{ font-weight: bold; color: #0066cc; }}
    .desc {{ color: #666; margin-left: 2em; }}
  </style>
</head>
<body>
  <h1>Vaguely {animal}</h1>
  <p>A service for vague information.</p>

  <h2>Abilities:</h2>

  <div class="route">
    <div class="path">/where</div>
    <div class="desc">Where you are, roughly.</div>
  </div>

  <div class="route">
    <div class="path">/when</div>
    <div class="desc">When you are, mostly.</div>
  </div>
</body>
</html>"#
    )
}
