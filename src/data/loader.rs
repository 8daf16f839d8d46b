//! CSV loading for the three static tables.

use crate::data::records::{FeaturePlotRow, HouseRecord, ModelHouse, Pid, RawHouse};
use crate::domain::features::FeatureRow;
use crate::domain::geo::{GeoPoint, ProjectionError};
use crate::domain::stats::label_encode;
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

const PID_COLUMN: &str = "PID";
const SALE_PRICE_COLUMN: &str = "SalePrice";
const LIVING_AREA_COLUMN: &str = "GoodLivArea";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("PID {pid}: column '{column}' has invalid value '{value}'")]
    InvalidValue {
        pid: String,
        column: String,
        value: String,
    },

    #[error("duplicate PID {0}")]
    DuplicatePid(Pid),

    #[error("house {pid} has an invalid location: {source}")]
    Projection {
        pid: Pid,
        #[source]
        source: ProjectionError,
    },
}

fn open(path: &Path) -> Result<BufReader<File>, LoadError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| LoadError::Open {
            path: path.display().to_string(),
            source,
        })
}

fn check_unique(seen: &mut HashSet<Pid>, pid: Pid) -> Result<(), LoadError> {
    if seen.insert(pid) {
        Ok(())
    } else {
        Err(LoadError::DuplicatePid(pid))
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
}

fn parse_pid(raw: &str) -> Result<Pid, LoadError> {
    raw.trim().parse().map_err(|_| LoadError::InvalidValue {
        pid: raw.to_string(),
        column: PID_COLUMN.to_string(),
        value: raw.to_string(),
    })
}

fn parse_number(pid: Pid, column: &str, raw: &str) -> Result<f64, LoadError> {
    raw.trim().parse().map_err(|_| LoadError::InvalidValue {
        pid: pid.to_string(),
        column: column.to_string(),
        value: raw.to_string(),
    })
}

/// Reads the map table and projects every house onto the map plane.
pub fn read_houses<R: Read>(reader: R) -> Result<Vec<HouseRecord>, LoadError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut seen = HashSet::new();
    let mut raw_rows = Vec::new();

    for result in rdr.deserialize::<RawHouse>() {
        let raw = result?;
        check_unique(&mut seen, raw.pid)?;
        raw_rows.push(raw);
    }

    let neighborhoods: Vec<&str> = raw_rows.iter().map(|h| h.neighborhood.as_str()).collect();
    let sectors: Vec<&str> = raw_rows.iter().map(|h| h.sector.code()).collect();
    let neighborhood_codes = label_encode(&neighborhoods);
    let sector_codes = label_encode(&sectors);

    raw_rows
        .iter()
        .zip(neighborhood_codes.into_iter().zip(sector_codes))
        .map(|(raw, (neighborhood_code, sector_code))| -> Result<HouseRecord, LoadError> {
            let location = GeoPoint::new(raw.latitude, raw.longitude);
            let position = location
                .project()
                .map_err(|source| LoadError::Projection {
                    pid: raw.pid,
                    source,
                })?;

            Ok(HouseRecord {
                pid: raw.pid,
                address: raw.address.clone(),
                neighborhood: raw.neighborhood.clone(),
                sector: raw.sector,
                house_type: raw.house_type,
                sale_price: raw.sale_price,
                year_built: raw.year_built,
                overall_qual: raw.overall_qual,
                location,
                position,
                neighborhood_code,
                sector_code,
            })
        })
        .collect()
}

/// Reads the model table: `PID`, optional `SalePrice`, and numeric features.
pub fn read_model_houses<R: Read>(reader: R) -> Result<Vec<ModelHouse>, LoadError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();
    let pid_idx = column_index(&headers, PID_COLUMN)?;
    let price_idx = headers.iter().position(|h| h == SALE_PRICE_COLUMN);

    let mut seen = HashSet::new();
    let mut houses = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let pid = parse_pid(&record[pid_idx])?;
        check_unique(&mut seen, pid)?;

        let mut features = FeatureRow::new();
        let mut actual_price = None;

        for (idx, (name, raw)) in headers.iter().zip(record.iter()).enumerate() {
            if idx == pid_idx {
                continue;
            }
            let value = parse_number(pid, name, raw)?;
            if Some(idx) == price_idx {
                actual_price = Some(value);
            } else {
                features.set(name, value);
            }
        }

        houses.push(ModelHouse {
            pid,
            actual_price,
            features,
        });
    }

    Ok(houses)
}

/// Reads the feature-plot table; every column other than the id, living area
/// and sale price is kept as a categorical string.
pub fn read_feature_plot_rows<R: Read>(reader: R) -> Result<Vec<FeaturePlotRow>, LoadError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();
    let pid_idx = column_index(&headers, PID_COLUMN)?;
    let area_idx = column_index(&headers, LIVING_AREA_COLUMN)?;
    let price_idx = column_index(&headers, SALE_PRICE_COLUMN)?;

    let mut seen = HashSet::new();
    let mut rows = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let pid = parse_pid(&record[pid_idx])?;
        check_unique(&mut seen, pid)?;

        let categories: BTreeMap<String, String> = headers
            .iter()
            .zip(record.iter())
            .enumerate()
            .filter(|(idx, _)| ![pid_idx, area_idx, price_idx].contains(idx))
            .map(|(_, (name, value))| (name.to_string(), value.trim().to_string()))
            .collect();

        rows.push(FeaturePlotRow {
            pid,
            good_liv_area: parse_number(pid, LIVING_AREA_COLUMN, &record[area_idx])?,
            sale_price: parse_number(pid, SALE_PRICE_COLUMN, &record[price_idx])?,
            categories,
        });
    }

    Ok(rows)
}

pub fn load_houses(path: &Path) -> Result<Vec<HouseRecord>, LoadError> {
    read_houses(open(path)?)
}

pub fn load_model_houses(path: &Path) -> Result<Vec<ModelHouse>, LoadError> {
    read_model_houses(open(path)?)
}

pub fn load_feature_plot_rows(path: &Path) -> Result<Vec<FeaturePlotRow>, LoadError> {
    read_feature_plot_rows(open(path)?)
}
