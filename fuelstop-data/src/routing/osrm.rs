//! OSRM API response types for the Route service.
//!
//! Requests are made with `overview=full&geometries=geojson`, so the route
//! geometry arrives as a GeoJSON `LineString` of `[longitude, latitude]`
//! pairs and distances are in metres.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use serde::Deserialize;

/// OSRM Route API response.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"NoRoute"` - No route between the coordinates
    /// - `"InvalidQuery"` - Invalid query parameters
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

/// One route alternative.
#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    /// Route length in metres.
    pub distance: f64,
    /// Full-resolution route geometry.
    pub geometry: LineString,
}

/// GeoJSON line geometry.
#[derive(Debug, Deserialize)]
pub struct LineString {
    /// `[longitude, latitude]` pairs.
    pub coordinates: Vec<[f64; 2]>,
}

impl RouteResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_success_response() {
        let json = r#"{
            "code": "Ok",
            "routes": [{
                "distance": 16093.44,
                "duration": 600.0,
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[-97.5, 35.4], [-97.4, 35.5]]
                }
            }],
            "waypoints": []
        }"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(response.is_ok());
        let route = response.routes.first().expect("one route");
        assert_eq!(route.distance, 16093.44);
        assert_eq!(route.geometry.coordinates, vec![[-97.5, 35.4], [-97.4, 35.5]]);
    }

    #[test]
    fn deserialise_error_response() {
        let json = r#"{
            "code": "NoRoute",
            "message": "Impossible route between points"
        }"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(!response.is_ok());
        assert_eq!(
            response.message.as_deref(),
            Some("Impossible route between points")
        );
        assert!(response.routes.is_empty());
    }
}
