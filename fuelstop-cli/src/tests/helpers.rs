//! Test helpers for writing station sheets and route files.

use camino::Utf8Path;
use fuelstop_core::test_support::{meridian_geometry, meridian_point};
use std::fs;

/// Stations at miles 0, 490 and 980 of a meridian route; the cheapest plan
/// over 1000 miles costs 259.70.
pub(super) const REFERENCE_STATIONS: &[(f64, f64)] = &[(0.0, 3.00), (490.0, 2.50), (980.0, 2.80)];

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write fixture file");
}

/// Write a price sheet with one row per `(mile, price)` on the meridian.
pub(super) fn write_station_sheet(path: &Utf8Path, stations: &[(f64, f64)]) {
    let mut sheet = String::from("OPIS Truckstop ID,Latitude,Longitude,Retail Price\n");
    for (id, &(mile, price)) in stations.iter().enumerate() {
        let point = meridian_point(mile);
        sheet.push_str(&format!("{id},{},{},{price}\n", point.lat, point.lng));
    }
    write_utf8(path, sheet.as_bytes());
}

/// Write a meridian route geometry of `total_miles` as JSON.
pub(super) fn write_route_file(path: &Utf8Path, total_miles: f64) {
    let payload =
        serde_json::to_string_pretty(&meridian_geometry(total_miles, 10.0)).expect("encode route");
    write_utf8(path, payload.as_bytes());
}
