//! Request batching and response flattening
//!
//! The core of the crate: a large point list is split into contiguous,
//! near-equal chunks no larger than the API limit, queried strictly
//! sequentially, and each reply is flattened into the run's [`HazardTable`].
//! Any failed call aborts the run; there is never a partial table.

use crate::client::HazardClient;
use crate::error::{Error, Result};
use crate::table::{HazardRow, HazardTable, RowDetail};
use crate::types::{HazardQuery, PointResponse, Product};

/// Split parallel coordinate slices into near-equal contiguous chunks
///
/// Produces `ceil(n / max_per_call)` chunks preserving input order and the
/// index pairing between latitudes and longitudes. Sizes differ by at most
/// one, with the larger chunks first (2500 points with a limit of 1000 give
/// 834, 833, 833). An empty input yields no chunks.
///
/// Callers must pass equal-length slices and a non-zero limit;
/// [`fetch_hazard`] validates both before calling this.
pub fn split_points<'a>(
    lats: &'a [f64],
    lons: &'a [f64],
    max_per_call: usize,
) -> Vec<(&'a [f64], &'a [f64])> {
    debug_assert_eq!(lats.len(), lons.len());
    debug_assert!(max_per_call > 0);

    let n = lats.len();
    if n == 0 {
        return Vec::new();
    }

    let num_chunks = n.div_ceil(max_per_call);
    let base = n / num_chunks;
    let remainder = n % num_chunks;

    let mut chunks = Vec::with_capacity(num_chunks);
    let mut start = 0;
    for i in 0..num_chunks {
        let size = if i < remainder { base + 1 } else { base };
        let end = start + size;
        chunks.push((&lats[start..end], &lons[start..end]));
        start = end;
    }
    chunks
}

/// Flatten one API response into the table
///
/// Emits one row per windspeed entry of every feature, attaching the storm
/// name and season (Metryc) or the run's constant return period (DeepCyc),
/// plus the batch's header values. Row count equals the sum of
/// `windspeeds.len()` over all features.
///
/// # Errors
///
/// Returns [`Error::HeaderMismatch`] when the response's header field set
/// differs from the table's, and [`Error::Input`] when a Metryc feature's
/// storm arrays are shorter than its windspeed list.
pub fn flatten_response(
    table: &mut HazardTable,
    query: &HazardQuery,
    response: &PointResponse,
) -> Result<()> {
    let header_values = table.batch_header_values(&response.header)?;
    let product = table.product();

    for feature in &response.features {
        let props = &feature.properties;
        for (i, windspeed) in props.windspeeds.iter().enumerate() {
            let detail = match product {
                Product::DeepCyc => RowDetail::ReturnPeriod(query.rp_year),
                Product::Metryc => {
                    let name = props
                        .storm_names
                        .as_ref()
                        .and_then(|names| names.get(i))
                        .ok_or_else(|| storm_array_error(&props.cell_id, "storm_names", i))?
                        .clone();
                    let season = *props
                        .storm_seasons
                        .as_ref()
                        .and_then(|seasons| seasons.get(i))
                        .ok_or_else(|| storm_array_error(&props.cell_id, "storm_seasons", i))?;
                    RowDetail::Storm { name, season }
                }
            };
            table.push_row(HazardRow {
                cell_id: props.cell_id.clone(),
                latitude: props.latitude,
                longitude: props.longitude,
                windspeed: *windspeed,
                detail,
                header_values: header_values.clone(),
            });
        }
    }
    Ok(())
}

fn storm_array_error(cell_id: &serde_json::Value, array: &str, index: usize) -> Error {
    Error::Input(format!(
        "cell {cell_id}: {array} has no entry for windspeed index {index}"
    ))
}

/// Fetch hazard data for a point list and flatten it into one table
///
/// Splits the input into batches of at most `max_points_per_call` points,
/// issues one point query per batch strictly sequentially, and flattens every
/// reply. Output order is deterministic: batch order, then feature order,
/// then windspeed order.
///
/// # Errors
///
/// Returns [`Error::Input`] for mismatched coordinate list lengths, and
/// propagates the first query or flattening failure, discarding any rows
/// accumulated so far.
pub async fn fetch_hazard(
    client: &HazardClient,
    product: Product,
    query: &HazardQuery,
    lats: &[f64],
    lons: &[f64],
) -> Result<HazardTable> {
    if lats.len() != lons.len() {
        return Err(Error::Input(format!(
            "latitude and longitude lists differ in length: {} vs {}",
            lats.len(),
            lons.len()
        )));
    }
    let max_per_call = client.config().max_points_per_call;
    if max_per_call == 0 {
        return Err(Error::Config {
            message: "max_points_per_call must be at least 1".to_string(),
            key: Some("max_points_per_call".to_string()),
        });
    }

    let mut table = HazardTable::new(product);
    let chunks = split_points(lats, lons, max_per_call);
    let total_batches = chunks.len();

    for (index, (chunk_lats, chunk_lons)) in chunks.into_iter().enumerate() {
        tracing::info!(
            batch = index + 1,
            total_batches,
            points = chunk_lats.len(),
            %product,
            "querying hazard batch"
        );
        let response = client
            .point_query(product, query, chunk_lats, chunk_lons)
            .await?;
        flatten_response(&mut table, query, &response)?;
    }

    Ok(table)
}
