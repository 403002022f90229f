//! Input location parsing
//!
//! Locations come either from explicit parallel latitude/longitude lists or
//! from a CSV file. Column detection accepts the case variants commonly seen
//! in exposure files.

use crate::error::{Error, Result};
use std::path::Path;

/// Accepted latitude column names, checked in order
pub const LAT_NAMES: [&str; 4] = ["latitude", "Latitude", "lat", "Lat"];
/// Accepted longitude column names, checked in order
pub const LON_NAMES: [&str; 4] = ["longitude", "Longitude", "lon", "Lon"];

/// Read a location CSV into parallel latitude/longitude vectors
///
/// The file must have one latitude and one longitude column named after any
/// entry of [`LAT_NAMES`]/[`LON_NAMES`]. Other columns are ignored. Row order
/// is preserved.
///
/// # Errors
///
/// Returns [`Error::Input`] when either coordinate column is missing or a
/// cell does not parse as a float, and [`Error::Csv`] / [`Error::Io`] for
/// file-level failures.
pub fn read_location_csv(path: impl AsRef<Path>) -> Result<(Vec<f64>, Vec<f64>)> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let headers = reader.headers()?.clone();

    let lat_idx = find_column(&headers, &LAT_NAMES).ok_or_else(|| {
        Error::Input(format!(
            "{}: no latitude column, expected one of {:?}",
            path.as_ref().display(),
            LAT_NAMES
        ))
    })?;
    let lon_idx = find_column(&headers, &LON_NAMES).ok_or_else(|| {
        Error::Input(format!(
            "{}: no longitude column, expected one of {:?}",
            path.as_ref().display(),
            LON_NAMES
        ))
    })?;

    let mut lats = Vec::new();
    let mut lons = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        lats.push(parse_coordinate(&record, lat_idx, row, "latitude")?);
        lons.push(parse_coordinate(&record, lon_idx, row, "longitude")?);
    }

    tracing::debug!(
        points = lats.len(),
        path = %path.as_ref().display(),
        "loaded location CSV"
    );
    Ok((lats, lons))
}

fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    names
        .iter()
        .find_map(|name| headers.iter().position(|h| h.trim() == *name))
}

fn parse_coordinate(
    record: &csv::StringRecord,
    index: usize,
    row: usize,
    kind: &str,
) -> Result<f64> {
    let raw = record
        .get(index)
        .ok_or_else(|| Error::Input(format!("row {}: missing {kind} value", row + 2)))?;
    raw.trim()
        .parse::<f64>()
        .map_err(|_| Error::Input(format!("row {}: invalid {kind} value '{raw}'", row + 2)))
}
