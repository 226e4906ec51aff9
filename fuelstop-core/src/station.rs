//! Fuel stations and the shared catalog that planning runs read from.
//!
//! A [`StationCatalog`] is immutable once built. Long-running services that
//! refresh prices keep the current catalog inside a [`CatalogHandle`] and
//! replace it wholesale, so every planning run works on one consistent
//! snapshot.

use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;

use crate::geodesy::GeoPoint;

/// A fuel station and its advertised price.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    /// Station position.
    pub location: GeoPoint,
    /// Price per unit of fuel.
    pub price_per_unit_fuel: f64,
}

/// Errors returned by [`Station::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StationError {
    /// Latitude outside `[-90, 90]` or not finite.
    #[error("invalid latitude {0}")]
    InvalidLatitude(f64),
    /// Longitude outside `[-180, 180]` or not finite.
    #[error("invalid longitude {0}")]
    InvalidLongitude(f64),
    /// Negative or non-finite price.
    #[error("invalid price {0}")]
    InvalidPrice(f64),
}

impl Station {
    /// Validate and construct a station.
    ///
    /// # Errors
    ///
    /// Returns a [`StationError`] naming the first invalid field.
    ///
    /// # Examples
    /// ```
    /// use fuelstop_core::{GeoPoint, Station, StationError};
    ///
    /// let station = Station::new(GeoPoint::new(36.1, -115.1), 3.49)?;
    /// assert_eq!(station.price_per_unit_fuel, 3.49);
    ///
    /// let err = Station::new(GeoPoint::new(36.1, -115.1), -1.0).unwrap_err();
    /// assert_eq!(err, StationError::InvalidPrice(-1.0));
    /// # Ok::<(), StationError>(())
    /// ```
    pub fn new(location: GeoPoint, price_per_unit_fuel: f64) -> Result<Self, StationError> {
        if !location.lat_is_valid() {
            return Err(StationError::InvalidLatitude(location.lat));
        }
        if !location.lng_is_valid() {
            return Err(StationError::InvalidLongitude(location.lng));
        }
        if !price_per_unit_fuel.is_finite() || price_per_unit_fuel < 0.0 {
            return Err(StationError::InvalidPrice(price_per_unit_fuel));
        }
        Ok(Self {
            location,
            price_per_unit_fuel,
        })
    }
}

/// Read-only collection of stations.
///
/// Order is preserved from construction and used to break price ties, so the
/// same catalog always yields the same plan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationCatalog {
    stations: Vec<Station>,
}

impl StationCatalog {
    /// Build a catalog from already validated stations.
    pub fn new(stations: Vec<Station>) -> Self {
        Self { stations }
    }

    /// Stations in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, Station> {
        self.stations.iter()
    }

    /// Station at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Station> {
        self.stations.get(index)
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether the catalog holds no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl FromIterator<Station> for StationCatalog {
    fn from_iter<I: IntoIterator<Item = Station>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a StationCatalog {
    type Item = &'a Station;
    type IntoIter = std::slice::Iter<'a, Station>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Shared reference to the current catalog snapshot.
///
/// Readers call [`CatalogHandle::snapshot`] once per planning run and keep the
/// returned `Arc` for the whole run. A refresh builds the replacement catalog
/// completely before calling [`CatalogHandle::replace`]; in-flight runs keep
/// the snapshot they started with.
///
/// # Examples
/// ```
/// use fuelstop_core::{CatalogHandle, GeoPoint, Station, StationCatalog};
///
/// let handle = CatalogHandle::new(StationCatalog::default());
/// let before = handle.snapshot();
///
/// let station = Station::new(GeoPoint::new(0.0, 0.0), 3.0).unwrap();
/// handle.replace(StationCatalog::new(vec![station]));
///
/// assert!(before.is_empty());
/// assert_eq!(handle.snapshot().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct CatalogHandle {
    current: RwLock<Arc<StationCatalog>>,
}

impl CatalogHandle {
    /// Wrap an initial catalog.
    pub fn new(catalog: StationCatalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// The catalog installed at the time of the call.
    pub fn snapshot(&self) -> Arc<StationCatalog> {
        // A poisoned lock still holds a complete snapshot because writers only
        // ever swap the pointer.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Install `catalog` and return the snapshot it replaces.
    pub fn replace(&self, catalog: StationCatalog) -> Arc<StationCatalog> {
        let replacement = Arc::new(catalog);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, replacement)
    }
}
