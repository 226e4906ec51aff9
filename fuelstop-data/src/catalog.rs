//! Station catalog loading from CSV price sheets.
//!
//! Price sheets carry one station per row. Only the `Latitude`, `Longitude`
//! and `Retail Price` columns are read; any other columns are ignored. A row
//! whose values cannot be parsed or validated is skipped with a warning, so one
//! bad row never hides the rest of the sheet. A sheet missing a required
//! column is rejected outright.

use std::collections::HashSet;
use std::io::{self, Read};
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use fuelstop_core::{CatalogHandle, GeoPoint, Station, StationCatalog};
use fuelstop_fs::open_utf8_file;
use log::{debug, info, warn};
use thiserror::Error;

/// Header of the latitude column.
pub const LATITUDE_COLUMN: &str = "Latitude";
/// Header of the longitude column.
pub const LONGITUDE_COLUMN: &str = "Longitude";
/// Header of the price column.
pub const PRICE_COLUMN: &str = "Retail Price";

/// Errors raised while loading a station catalog.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// The catalog file could not be opened.
    #[error("failed to open station catalog {path}: {source}")]
    Open {
        /// Path that was opened.
        path: Utf8PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The header row could not be read.
    #[error("failed to read header row of {origin}: {source}")]
    Header {
        /// Path or label of the catalog.
        origin: String,
        /// Underlying CSV error.
        source: csv::Error,
    },
    /// A required column is absent from the header row.
    #[error("station catalog {origin} has no `{column}` column")]
    MissingColumn {
        /// Path or label of the catalog.
        origin: String,
        /// Header that was expected.
        column: String,
    },
}

/// Row counts from one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Rows turned into stations.
    pub loaded: usize,
    /// Rows skipped because they could not be parsed or validated.
    pub skipped: usize,
    /// Rows dropped as repeats of an earlier station identifier.
    pub duplicates: usize,
}

/// A freshly loaded catalog and how it was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedCatalog {
    /// Stations in sheet order.
    pub catalog: StationCatalog,
    /// Row counts.
    pub report: LoadReport,
}

/// Configurable CSV station loader.
///
/// # Examples
/// ```
/// use fuelstop_data::catalog::StationCsvLoader;
///
/// let sheet = "Truckstop ID,Latitude,Longitude,Retail Price\n\
///              7,35.1,-101.8,3.19\n\
///              7,35.1,-101.8,3.19\n\
///              9,36.0,-102.0,not-a-price\n";
/// let loaded = StationCsvLoader::new()
///     .dedupe_by("Truckstop ID")
///     .read(sheet.as_bytes(), "inline")?;
/// assert_eq!(loaded.catalog.len(), 1);
/// assert_eq!(loaded.report.duplicates, 1);
/// assert_eq!(loaded.report.skipped, 1);
/// # Ok::<(), fuelstop_data::catalog::CatalogLoadError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct StationCsvLoader {
    dedupe_column: Option<String>,
}

struct Columns {
    latitude: usize,
    longitude: usize,
    price: usize,
    dedupe: Option<usize>,
}

impl StationCsvLoader {
    /// Loader that keeps every valid row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only the first row for each value of `column`.
    ///
    /// Rows with an empty identifier are never treated as duplicates.
    #[must_use]
    pub fn dedupe_by(mut self, column: impl Into<String>) -> Self {
        self.dedupe_column = Some(column.into());
        self
    }

    /// Load the catalog stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogLoadError::Open`] when the file cannot be opened, and
    /// the errors of [`StationCsvLoader::read`] otherwise.
    pub fn load(&self, path: &Utf8Path) -> Result<LoadedCatalog, CatalogLoadError> {
        let file = open_utf8_file(path).map_err(|source| CatalogLoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.read(file, path.as_str())
    }

    /// Read a catalog from `reader`; `origin` labels log lines and errors.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogLoadError::Header`] when the header row is unreadable
    /// and [`CatalogLoadError::MissingColumn`] when a required column (or the
    /// configured de-duplication column) is absent.
    pub fn read<R: Read>(&self, reader: R, origin: &str) -> Result<LoadedCatalog, CatalogLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let columns = self.resolve_columns(&mut csv_reader, origin)?;

        let mut stations = Vec::new();
        let mut report = LoadReport::default();
        let mut seen_ids = HashSet::new();

        for (index, record) in csv_reader.records().enumerate() {
            // Header occupies line 1.
            let line = index + 2;
            let record = match record {
                Ok(record) => record,
                Err(err) => {
                    warn!("{origin}:{line}: skipping unreadable row: {err}");
                    report.skipped += 1;
                    continue;
                }
            };

            if let Some(id) = columns.dedupe.and_then(|idx| record.get(idx)) {
                if !id.is_empty() && !seen_ids.insert(id.to_owned()) {
                    debug!("{origin}:{line}: dropping repeat of station {id}");
                    report.duplicates += 1;
                    continue;
                }
            }

            match parse_station(&record, &columns) {
                Ok(station) => {
                    stations.push(station);
                    report.loaded += 1;
                }
                Err(reason) => {
                    warn!("{origin}:{line}: skipping invalid station row: {reason}");
                    report.skipped += 1;
                }
            }
        }

        info!(
            "loaded {} stations from {origin} ({} skipped, {} duplicates)",
            report.loaded, report.skipped, report.duplicates
        );
        Ok(LoadedCatalog {
            catalog: StationCatalog::new(stations),
            report,
        })
    }

    fn resolve_columns<R: Read>(
        &self,
        reader: &mut csv::Reader<R>,
        origin: &str,
    ) -> Result<Columns, CatalogLoadError> {
        let headers = reader.headers().map_err(|source| CatalogLoadError::Header {
            origin: origin.to_owned(),
            source,
        })?;
        let find = |column: &str| {
            headers
                .iter()
                .position(|header| header == column)
                .ok_or_else(|| CatalogLoadError::MissingColumn {
                    origin: origin.to_owned(),
                    column: column.to_owned(),
                })
        };

        Ok(Columns {
            latitude: find(LATITUDE_COLUMN)?,
            longitude: find(LONGITUDE_COLUMN)?,
            price: find(PRICE_COLUMN)?,
            dedupe: self.dedupe_column.as_deref().map(find).transpose()?,
        })
    }
}

fn parse_station(record: &csv::StringRecord, columns: &Columns) -> Result<Station, String> {
    let field = |idx: usize, name: &str| -> Result<f64, String> {
        let raw = record.get(idx).ok_or_else(|| format!("missing {name}"))?;
        raw.parse::<f64>()
            .map_err(|err| format!("{name} `{raw}`: {err}"))
    };
    let lat = field(columns.latitude, LATITUDE_COLUMN)?;
    let lng = field(columns.longitude, LONGITUDE_COLUMN)?;
    let price = field(columns.price, PRICE_COLUMN)?;
    Station::new(GeoPoint::new(lat, lng), price).map_err(|err| err.to_string())
}

/// Load `path` with the default loader and return only the catalog.
///
/// # Errors
///
/// See [`StationCsvLoader::load`].
pub fn load_station_catalog(path: &Utf8Path) -> Result<StationCatalog, CatalogLoadError> {
    StationCsvLoader::new().load(path).map(|loaded| loaded.catalog)
}

/// Reload `path` and install it into `handle`.
///
/// The replacement is fully built before the swap, so a failed load leaves
/// the current snapshot in place. Returns the snapshot that was replaced.
///
/// # Errors
///
/// See [`StationCsvLoader::load`].
pub fn refresh_catalog(
    handle: &CatalogHandle,
    loader: &StationCsvLoader,
    path: &Utf8Path,
) -> Result<Arc<StationCatalog>, CatalogLoadError> {
    let loaded = loader.load(path)?;
    Ok(handle.replace(loaded.catalog))
}
