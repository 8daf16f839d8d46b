// src/data/records.rs

use crate::domain::features::FeatureRow;
use crate::domain::geo::{GeoPoint, ProjectedPoint};
use crate::domain::sectors::Sector;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Unique parcel identifier used as the key of every table.
pub type Pid = u64;

/// One row of the map table as it appears in the CSV file.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawHouse {
    #[serde(rename = "PID")]
    pub pid: Pid,
    #[serde(rename = "Prop_Addr")]
    pub address: String,
    #[serde(rename = "Neighborhood")]
    pub neighborhood: String,
    #[serde(rename = "Sector")]
    pub sector: Sector,
    #[serde(rename = "MSSubClass")]
    pub house_type: u8,
    #[serde(rename = "SalePrice")]
    pub sale_price: f64,
    #[serde(rename = "YearBuilt")]
    pub year_built: i32,
    #[serde(rename = "OverallQual")]
    pub overall_qual: u8,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
}

/// A house on the map, with its projected position and label encodings.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseRecord {
    pub pid: Pid,
    pub address: String,
    pub neighborhood: String,
    pub sector: Sector,
    pub house_type: u8,
    pub sale_price: f64,
    pub year_built: i32,
    pub overall_qual: u8,
    pub location: GeoPoint,
    pub position: ProjectedPoint,
    /// Index of `neighborhood` among the sorted distinct neighborhoods.
    pub neighborhood_code: usize,
    /// Index of the sector code among the sorted distinct sector codes.
    pub sector_code: usize,
}

/// A house as the price model sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelHouse {
    pub pid: Pid,
    /// Recorded sale price; kept out of the feature row.
    pub actual_price: Option<f64>,
    pub features: FeatureRow,
}

/// A house in the feature-distribution plots.
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturePlotRow {
    pub pid: Pid,
    pub good_liv_area: f64,
    pub sale_price: f64,
    /// Categorical columns (e.g. `KitchenQual` → `Good`).
    pub categories: BTreeMap<String, String>,
}

impl FeaturePlotRow {
    pub fn category(&self, feature: &str) -> Option<&str> {
        self.categories.get(feature).map(String::as_str)
    }
}
