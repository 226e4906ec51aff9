//! Obtain route geometry from a directions service.
//!
//! The `DirectionsProvider` trait abstracts the road-network routing the
//! planner relies on but never performs itself. Callers pass an origin and a
//! destination and receive a [`RouteGeometry`](crate::RouteGeometry).

mod error;
mod provider;

pub use error::DirectionsError;
pub use provider::DirectionsProvider;
