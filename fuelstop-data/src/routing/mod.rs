//! HTTP-based directions providers for routing services.
//!
//! This module provides [`HttpDirectionsProvider`], an implementation of
//! [`fuelstop_core::DirectionsProvider`] that fetches driving routes from an
//! OSRM routing service.
//!
//! # Architecture
//!
//! The provider calls the OSRM Route API once per request with the full
//! route overview as GeoJSON. The synchronous trait is implemented by
//! blocking on async HTTP calls internally, keeping the core library
//! embeddable in synchronous contexts.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use fuelstop_core::{DirectionsProvider, GeoPoint};
//! use fuelstop_data::routing::{HttpDirectionsProvider, HttpDirectionsProviderConfig};
//!
//! let config = HttpDirectionsProviderConfig::new("http://localhost:5000")
//!     .with_timeout(Duration::from_secs(90))
//!     .with_user_agent("my-app/1.0");
//! let provider = HttpDirectionsProvider::with_config(config)?;
//!
//! let route = provider.route(GeoPoint::new(35.47, -97.52), GeoPoint::new(39.74, -104.99))?;
//! println!("{:.1} miles", route.total_distance_miles);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod osrm;
mod provider;

#[doc(hidden)]
pub mod test_support;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpDirectionsProvider, HttpDirectionsProviderConfig,
    ProviderBuildError,
};
