//! Core domain types and API wire models

use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Hazard product variant
///
/// The two products share the same response framing but differ in the call
/// shape and the per-windspeed context: DeepCyc windspeeds are indexed by a
/// return period, Metryc windspeeds by a historical storm. The variant is
/// resolved once at entry and drives dispatch from then on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Product {
    /// Simulated-storm return-period windspeed statistics per cell
    DeepCyc,
    /// Observed historical per-storm windspeed records per cell
    Metryc,
}

impl Product {
    /// API endpoint path for this product's point query
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            Product::DeepCyc => "deepcyc/pointep",
            Product::Metryc => "metryc/point",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Product::DeepCyc => write!(f, "DeepCyc"),
            Product::Metryc => write!(f, "Metryc"),
        }
    }
}

impl FromStr for Product {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "deepcyc" => Ok(Product::DeepCyc),
            "metryc" => Ok(Product::Metryc),
            other => Err(Error::Input(format!(
                "unknown product '{other}', expected DeepCyc or Metryc"
            ))),
        }
    }
}

/// Surface-roughness adjustment applied to windspeed values
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainCorrection {
    /// Full terrain gust
    #[default]
    FtGust,
    /// Open water
    Ow,
    /// Open terrain
    Ot,
    /// All open terrain
    Aot,
}

impl TerrainCorrection {
    /// Wire code sent to the API (e.g. "FT_GUST")
    pub fn code(&self) -> &'static str {
        match self {
            TerrainCorrection::FtGust => "FT_GUST",
            TerrainCorrection::Ow => "OW",
            TerrainCorrection::Ot => "OT",
            TerrainCorrection::Aot => "AOT",
        }
    }
}

impl fmt::Display for TerrainCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TerrainCorrection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "FT_GUST" => Ok(TerrainCorrection::FtGust),
            "OW" => Ok(TerrainCorrection::Ow),
            "OT" => Ok(TerrainCorrection::Ot),
            "AOT" => Ok(TerrainCorrection::Aot),
            other => Err(Error::Input(format!(
                "unknown terrain correction '{other}', expected FT_GUST, OW, OT or AOT"
            ))),
        }
    }
}

/// Hazard query parameters shared by every batch of a run
#[derive(Clone, Debug)]
pub struct HazardQuery {
    /// Return period in years (DeepCyc only; omitted from the call when None)
    pub rp_year: Option<u32>,
    /// Terrain correction code
    pub terrain_correction: TerrainCorrection,
    /// Windspeed averaging period, e.g. "3-seconds"
    pub windspeed_averaging_period: String,
    /// Optional label echoed back by the API, not used in processing
    pub tag: Option<String>,
}

impl Default for HazardQuery {
    fn default() -> Self {
        Self {
            rp_year: None,
            terrain_correction: TerrainCorrection::default(),
            windspeed_averaging_period: "3-seconds".to_string(),
            tag: None,
        }
    }
}

/// Top-level JSON reply for a point query
///
/// `header` carries run metadata (product name, simulation details, units)
/// that the API repeats identically for every batch of a run.
#[derive(Clone, Debug, Deserialize)]
pub struct PointResponse {
    /// Metadata field name → scalar value, constant across the batch
    #[serde(default)]
    pub header: serde_json::Map<String, Value>,
    /// One feature per queried cell that has data
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// A single GeoJSON-style feature in a point response
#[derive(Clone, Debug, Deserialize)]
pub struct Feature {
    /// Per-cell hazard properties
    pub properties: FeatureProperties,
}

/// Per-cell properties of a feature
///
/// `windspeeds` always holds one entry per storm (Metryc) or per queried
/// return period (DeepCyc). The storm arrays are parallel to `windspeeds`
/// and only present on Metryc responses.
#[derive(Clone, Debug, Deserialize)]
pub struct FeatureProperties {
    /// Cell-center latitude, WGS84 degrees
    pub latitude: f64,
    /// Cell-center longitude, WGS84 degrees
    pub longitude: f64,
    /// Spatial grid cell identifier
    pub cell_id: Value,
    /// One windspeed per storm or return period
    pub windspeeds: Vec<f64>,
    /// Storm names parallel to `windspeeds` (Metryc only)
    #[serde(default)]
    pub storm_names: Option<Vec<String>>,
    /// Storm seasons parallel to `windspeeds` (Metryc only)
    #[serde(default)]
    pub storm_seasons: Option<Vec<i64>>,
}
