//! Geographic points and great-circle distances.
//!
//! Distances are computed on a spherical Earth using the haversine formula.
//! The radius matches the IUGG mean Earth radius, so results agree with the
//! usual "great circle" helpers to well under a tenth of a mile over
//! continental routes.

use geo::Coord;

/// Mean Earth radius in miles (6371.009 km).
pub const EARTH_RADIUS_MILES: f64 = 3_958.761_3;

/// Number of metres in one statute mile.
pub const METERS_PER_MILE: f64 = 1_609.344;

/// A WGS84 position expressed in degrees.
///
/// Conversions to and from [`geo::Coord`] follow the `x = longitude`,
/// `y = latitude` convention.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fuelstop_core::GeoPoint;
///
/// let denver = GeoPoint::new(39.7392, -104.9903);
/// let coord: Coord<f64> = denver.into();
/// assert_eq!(coord.x, -104.9903);
/// assert_eq!(GeoPoint::from(coord), denver);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lng: f64,
}

impl GeoPoint {
    /// Construct a point from latitude and longitude in degrees.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both components are finite and inside the WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        self.lat_is_valid() && self.lng_is_valid()
    }

    /// Whether the latitude is finite and within `[-90, 90]`.
    pub fn lat_is_valid(&self) -> bool {
        self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat)
    }

    /// Whether the longitude is finite and within `[-180, 180]`.
    pub fn lng_is_valid(&self) -> bool {
        self.lng.is_finite() && (-180.0..=180.0).contains(&self.lng)
    }

    /// Planar `[lat, lng]` coordinates used by the spatial indices.
    pub(crate) const fn planar(self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

impl From<GeoPoint> for Coord<f64> {
    fn from(point: GeoPoint) -> Self {
        Coord {
            x: point.lng,
            y: point.lat,
        }
    }
}

impl From<Coord<f64>> for GeoPoint {
    fn from(coord: Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }
}

/// Great-circle distance between `a` and `b` in miles.
///
/// Inputs are not validated; NaN coordinates propagate into the result.
///
/// # Examples
/// ```
/// use fuelstop_core::{GeoPoint, great_circle_miles};
///
/// let origin = GeoPoint::new(0.0, 0.0);
/// assert_eq!(great_circle_miles(origin, origin), 0.0);
///
/// // One degree along a meridian is roughly 69.09 miles.
/// let north = GeoPoint::new(1.0, 0.0);
/// assert!((great_circle_miles(origin, north) - 69.09).abs() < 0.01);
/// ```
pub fn great_circle_miles(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let central_angle = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_MILES * central_angle
}
