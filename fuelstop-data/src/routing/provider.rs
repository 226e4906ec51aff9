//! HTTP-based `DirectionsProvider` using OSRM's Route API.
//!
//! The [`DirectionsProvider`] trait is synchronous so planning stays free of
//! async plumbing. This provider bridges to `reqwest` by blocking on a Tokio
//! runtime it owns, or on the caller's multi-threaded runtime when there is
//! one.
//!
//! # Example
//!
//! ```no_run
//! use fuelstop_core::{DirectionsProvider, GeoPoint};
//! use fuelstop_data::routing::HttpDirectionsProvider;
//!
//! let provider = HttpDirectionsProvider::new("http://localhost:5000")?;
//! let route = provider.route(GeoPoint::new(35.47, -97.52), GeoPoint::new(39.74, -104.99))?;
//! println!("{} vertices, {:.1} miles", route.coordinates.len(), route.total_distance_miles);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::time::Duration;

use fuelstop_core::{DirectionsError, DirectionsProvider, GeoPoint, METERS_PER_MILE, RouteGeometry};
use log::debug;
use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use super::osrm::RouteResponse;

/// Error type for [`HttpDirectionsProvider`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Default user agent for OSRM requests.
pub const DEFAULT_USER_AGENT: &str = "fuelstop-routing/0.1";

/// Default OSRM endpoint.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Long routes take OSRM a while to compute at full overview.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for [`HttpDirectionsProvider`].
#[derive(Debug, Clone)]
pub struct HttpDirectionsProviderConfig {
    /// Base URL for the OSRM service (e.g., `"http://localhost:5000"`).
    pub base_url: String,
    /// OSRM routing profile, usually `driving`.
    pub profile: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpDirectionsProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            profile: "driving".to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpDirectionsProviderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP directions provider using the OSRM Route API.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the provider blocks on its own current-thread
/// runtime. Inside a multi-threaded runtime it borrows that runtime's handle
/// through [`tokio::task::block_in_place`]. Inside a `current_thread` runtime
/// it falls back to its own runtime, which blocks the caller's executor for
/// the duration of the request.
///
/// The owned runtime is shut down in the background on drop, so the provider
/// may be dropped from inside any runtime.
pub struct HttpDirectionsProvider {
    client: Client,
    config: HttpDirectionsProviderConfig,
    runtime: Option<Runtime>,
}

impl Drop for HttpDirectionsProvider {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

impl std::fmt::Debug for HttpDirectionsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDirectionsProvider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HttpDirectionsProvider {
    /// Create a provider for `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpDirectionsProviderConfig::new(base_url))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpDirectionsProviderConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime: Some(runtime),
        })
    }

    /// Build the OSRM Route API URL from `start` to `end`.
    ///
    /// Coordinates are written `lon,lat` as OSRM expects.
    fn build_route_url(&self, start: GeoPoint, end: GeoPoint) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}?overview=full&geometries=geojson",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            start.lng,
            start.lat,
            end.lng,
            end.lat
        )
    }

    async fn fetch_route_async(
        &self,
        start: GeoPoint,
        end: GeoPoint,
    ) -> Result<RouteGeometry, DirectionsError> {
        let url = self.build_route_url(start, end);
        debug!("requesting route from {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        let body: RouteResponse =
            response
                .json()
                .await
                .map_err(|err| DirectionsError::ParseError {
                    message: err.to_string(),
                })?;

        convert_response(body)
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> DirectionsError {
        if error.is_timeout() {
            return DirectionsError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return DirectionsError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        DirectionsError::NetworkError {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

/// Convert an OSRM response into route geometry in miles.
fn convert_response(response: RouteResponse) -> Result<RouteGeometry, DirectionsError> {
    if response.code == "NoRoute" {
        return Err(DirectionsError::NoRoute);
    }
    if !response.is_ok() {
        return Err(DirectionsError::ServiceError {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }

    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or(DirectionsError::NoRoute)?;

    if !route.distance.is_finite() || route.distance < 0.0 {
        return Err(DirectionsError::ParseError {
            message: format!("invalid route distance {}", route.distance),
        });
    }
    if route.geometry.coordinates.is_empty() {
        return Err(DirectionsError::ParseError {
            message: "route geometry has no coordinates".to_owned(),
        });
    }

    let coordinates = route
        .geometry
        .coordinates
        .into_iter()
        .map(|[lng, lat]| GeoPoint::new(lat, lng))
        .collect();

    Ok(RouteGeometry {
        coordinates,
        total_distance_miles: route.distance / METERS_PER_MILE,
    })
}

impl DirectionsProvider for HttpDirectionsProvider {
    fn route(&self, start: GeoPoint, end: GeoPoint) -> Result<RouteGeometry, DirectionsError> {
        let future = self.fetch_route_async(start, end);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => match &self.runtime {
                Some(runtime) => runtime.block_on(future),
                None => Err(DirectionsError::NetworkError {
                    url: self.build_route_url(start, end),
                    message: "provider runtime has shut down".to_owned(),
                }),
            },
        }
    }
}
