//! # hazard-dl
//!
//! Batch client for tropical-cyclone hazard APIs. Splits a coordinate list
//! into bounded-size point queries, issues them sequentially, and flattens
//! the nested JSON replies (features → properties → per-storm windspeed
//! arrays) into one flat table keyed by cell id, ready for CSV export.
//!
//! Two products are supported: DeepCyc (simulated-storm return-period
//! statistics) and Metryc (observed historical per-storm records). The
//! product is a tagged enum resolved once per run; a failed API call aborts
//! the whole run with no partial output.
//!
//! ## Quick Start
//!
//! ```no_run
//! use hazard_dl::{
//!     fetch_hazard, ClientConfig, EnvTokenProvider, HazardClient, HazardQuery, Product,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HazardClient::new(
//!         ClientConfig::default(),
//!         Arc::new(EnvTokenProvider::default()),
//!     )?;
//!
//!     let query = HazardQuery {
//!         rp_year: Some(100),
//!         ..HazardQuery::default()
//!     };
//!     let table = fetch_hazard(
//!         &client,
//!         Product::DeepCyc,
//!         &query,
//!         &[29.95747],
//!         &[-90.06295],
//!     )
//!     .await?;
//!     table.write_csv_file("hazard.csv")?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Access token providers
pub mod auth;
/// Request batching and response flattening
pub mod batch;
/// HTTP client for the point endpoints
pub mod client;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Input location parsing
pub mod locations;
/// Flat output table and CSV serialization
pub mod table;
/// Core domain types and API wire models
pub mod types;

// Re-export commonly used types
pub use auth::{EnvTokenProvider, StaticTokenProvider, TokenProvider};
pub use batch::{fetch_hazard, flatten_response, split_points};
pub use client::HazardClient;
pub use config::{ClientConfig, MAX_POINTS_PER_CALL};
pub use error::{Error, Result};
pub use locations::read_location_csv;
pub use table::{HazardRow, HazardTable, RowDetail};
pub use types::{
    Feature, FeatureProperties, HazardQuery, PointResponse, Product, TerrainCorrection,
};
