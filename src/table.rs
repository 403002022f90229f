//! Flat output table and CSV serialization
//!
//! The table is the accumulator for a whole run: one row per
//! (cell, storm-or-return-period) pair, in deterministic batch → feature →
//! windspeed order, indexed by the (non-unique) `cell_id` column.

use crate::error::{Error, Result};
use crate::types::Product;
use serde_json::Value;
use std::io::Write;
use std::path::Path;

/// Per-row context that differs between the two products
#[derive(Clone, Debug, PartialEq)]
pub enum RowDetail {
    /// DeepCyc: the constant return period of the run, if one was requested
    ReturnPeriod(Option<u32>),
    /// Metryc: the historical storm this windspeed belongs to
    Storm {
        /// Storm name, e.g. "Katrina"
        name: String,
        /// Storm season (year)
        season: i64,
    },
}

/// One flattened output row
#[derive(Clone, Debug)]
pub struct HazardRow {
    /// Spatial grid cell identifier (non-unique across rows)
    pub cell_id: Value,
    /// Cell-center latitude
    pub latitude: f64,
    /// Cell-center longitude
    pub longitude: f64,
    /// Windspeed value for this storm or return period
    pub windspeed: f64,
    /// Product-specific context
    pub detail: RowDetail,
    /// Header values of the batch that produced this row, parallel to the
    /// table's header columns
    pub header_values: Vec<Value>,
}

/// Accumulated flat table for one run
///
/// Column order matches the original tool's output: `cell_id` first (the
/// index), then `latitude`, `longitude`, `windspeed`, the product-specific
/// columns, and finally every header field of the first batch.
#[derive(Clone, Debug)]
pub struct HazardTable {
    product: Product,
    header_columns: Vec<String>,
    header_seen: bool,
    rows: Vec<HazardRow>,
}

impl HazardTable {
    /// Create an empty table for the given product
    pub fn new(product: Product) -> Self {
        Self {
            product,
            header_columns: Vec::new(),
            header_seen: false,
            rows: Vec::new(),
        }
    }

    /// The product this table was built for
    pub fn product(&self) -> Product {
        self.product
    }

    /// Number of rows accumulated so far
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The accumulated rows, in batch → feature → windspeed order
    pub fn rows(&self) -> &[HazardRow] {
        &self.rows
    }

    /// Full column list, index column first
    pub fn columns(&self) -> Vec<String> {
        let mut columns = vec![
            "cell_id".to_string(),
            "latitude".to_string(),
            "longitude".to_string(),
            "windspeed".to_string(),
        ];
        match self.product {
            Product::DeepCyc => columns.push("return_period".to_string()),
            Product::Metryc => {
                columns.push("storm_name".to_string());
                columns.push("storm_season".to_string());
            }
        }
        columns.extend(self.header_columns.iter().cloned());
        columns
    }

    /// Register a batch header and return its values in column order
    ///
    /// The first batch fixes the header column set; every later batch must
    /// present exactly the same field names. Values may differ per batch and
    /// are attached to each of that batch's rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HeaderMismatch`] when a later batch's field set
    /// differs from the first one.
    pub(crate) fn batch_header_values(
        &mut self,
        header: &serde_json::Map<String, Value>,
    ) -> Result<Vec<Value>> {
        let keys: Vec<String> = header.keys().cloned().collect();
        if !self.header_seen {
            self.header_columns = keys.clone();
            self.header_seen = true;
        } else if self.header_columns != keys {
            return Err(Error::HeaderMismatch {
                expected: self.header_columns.clone(),
                got: keys,
            });
        }
        Ok(self
            .header_columns
            .iter()
            .map(|k| header.get(k).cloned().unwrap_or(Value::Null))
            .collect())
    }

    /// Append one row
    pub(crate) fn push_row(&mut self, row: HazardRow) {
        self.rows.push(row);
    }

    /// Write the table as CSV to an arbitrary writer
    ///
    /// # Errors
    ///
    /// Propagates CSV serialization and underlying I/O errors.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(self.columns())?;

        for row in &self.rows {
            let mut record: Vec<String> = Vec::with_capacity(6 + row.header_values.len());
            record.push(scalar_to_field(&row.cell_id));
            record.push(row.latitude.to_string());
            record.push(row.longitude.to_string());
            record.push(row.windspeed.to_string());
            match &row.detail {
                RowDetail::ReturnPeriod(rp) => {
                    record.push(rp.map(|y| y.to_string()).unwrap_or_default());
                }
                RowDetail::Storm { name, season } => {
                    record.push(name.clone());
                    record.push(season.to_string());
                }
            }
            for value in &row.header_values {
                record.push(scalar_to_field(value));
            }
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Write the table as CSV to a file path
    ///
    /// # Errors
    ///
    /// Propagates file creation, CSV serialization and I/O errors.
    pub fn write_csv_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_csv(file)
    }
}

/// Render a scalar JSON value as a bare CSV field
///
/// Strings are emitted without surrounding JSON quotes; null becomes an empty
/// cell. Non-scalar values are not expected in headers or cell ids but are
/// rendered as compact JSON rather than dropped.
fn scalar_to_field(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
