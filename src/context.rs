// src/context.rs
use crate::config::AppConfig;
use crate::data::loader::{load_feature_plot_rows, load_houses, load_model_houses};
use crate::data::{FeaturePlotRow, HouseRecord, LoadError, ModelHouse, Pid};
use crate::domain::sectors::Sector;
use crate::model::{ModelError, PriceModel};
use std::collections::HashMap;
use thiserror::Error;

pub const MAP_TABLE: &str = "map_data.csv";
pub const MODEL_TABLE: &str = "model_data.csv";
pub const FEATURE_PLOT_TABLE: &str = "feature_plot_data.csv";

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("loading {table}: {source}")]
    Data {
        table: &'static str,
        #[source]
        source: LoadError,
    },

    #[error("loading price model: {0}")]
    Model(#[from] ModelError),

    #[error("house {pid} lacks model features: {}", .missing.join(", "))]
    MissingFeatures { pid: Pid, missing: Vec<String> },
}

/// Everything the dashboard reads: loaded once at startup, never mutated.
#[derive(Debug)]
pub struct AppContext {
    houses: Vec<HouseRecord>,
    model_houses: HashMap<Pid, ModelHouse>,
    plot_rows: Vec<FeaturePlotRow>,
    model: PriceModel,
    default_house_pid: Pid,
}

impl AppContext {
    pub fn load(cfg: &AppConfig) -> Result<Self, StartupError> {
        let dir = &cfg.assets_dir;
        let table = |table: &'static str| {
            move |source: LoadError| StartupError::Data { table, source }
        };

        let houses = load_houses(&dir.join(MAP_TABLE)).map_err(table(MAP_TABLE))?;
        let model_houses =
            load_model_houses(&dir.join(MODEL_TABLE)).map_err(table(MODEL_TABLE))?;
        let plot_rows = load_feature_plot_rows(&dir.join(FEATURE_PLOT_TABLE))
            .map_err(table(FEATURE_PLOT_TABLE))?;
        let model = PriceModel::load(cfg.model_path())?;
        check_model_features(&model, &model_houses)?;

        tracing::info!(
            houses = houses.len(),
            model_rows = model_houses.len(),
            plot_rows = plot_rows.len(),
            model = model.kind(),
            "dataset loaded from {}",
            dir.display()
        );

        Ok(Self::from_parts(
            houses,
            model_houses,
            plot_rows,
            model,
            cfg.default_house_pid,
        ))
    }

    pub fn from_parts(
        houses: Vec<HouseRecord>,
        model_houses: Vec<ModelHouse>,
        plot_rows: Vec<FeaturePlotRow>,
        model: PriceModel,
        default_house_pid: Pid,
    ) -> Self {
        let model_houses = model_houses.into_iter().map(|h| (h.pid, h)).collect();
        Self {
            houses,
            model_houses,
            plot_rows,
            model,
            default_house_pid,
        }
    }

    pub fn houses(&self) -> &[HouseRecord] {
        &self.houses
    }

    pub fn plot_rows(&self) -> &[FeaturePlotRow] {
        &self.plot_rows
    }

    pub fn model(&self) -> &PriceModel {
        &self.model
    }

    pub fn house(&self, pid: Pid) -> Option<&HouseRecord> {
        self.houses.iter().find(|h| h.pid == pid)
    }

    pub fn model_house(&self, pid: Pid) -> Option<&ModelHouse> {
        self.model_houses.get(&pid)
    }

    /// Distinct neighborhoods of `sector`, in first-seen order.
    pub fn neighborhoods_in(&self, sector: Sector) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for h in self.houses.iter().filter(|h| h.sector == sector) {
            if !out.contains(&h.neighborhood.as_str()) {
                out.push(&h.neighborhood);
            }
        }
        out
    }

    pub fn houses_in<'a>(
        &'a self,
        sector: Sector,
        neighborhood: &'a str,
    ) -> impl Iterator<Item = &'a HouseRecord> + 'a {
        self.houses
            .iter()
            .filter(move |h| h.sector == sector && h.neighborhood == neighborhood)
    }

    /// Lowest and highest recorded sale price on the map.
    pub fn price_range(&self) -> (f64, f64) {
        self.houses
            .iter()
            .map(|h| h.sale_price)
            .fold(None, |acc: Option<(f64, f64)>, p| match acc {
                None => Some((p, p)),
                Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
            })
            .unwrap_or((0.0, 0.0))
    }

    /// House the renovation modeler starts from: the configured default if it
    /// is in the selected neighborhood, else the first modeled house there.
    pub fn baseline_pid(&self, sector: Sector, neighborhood: &str) -> Option<Pid> {
        let mut candidates = self
            .houses_in(sector, neighborhood)
            .filter(|h| self.model_houses.contains_key(&h.pid))
            .map(|h| h.pid)
            .peekable();

        let first = candidates.peek().copied();
        if candidates.any(|pid| pid == self.default_house_pid) {
            Some(self.default_house_pid)
        } else {
            first
        }
    }
}

/// Every modeled house must carry every feature the model reads.
fn check_model_features(model: &PriceModel, houses: &[ModelHouse]) -> Result<(), StartupError> {
    let expected = model.feature_names();
    for house in houses {
        let missing: Vec<String> = expected
            .iter()
            .filter(|f| !house.features.contains(f))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(StartupError::MissingFeatures {
                pid: house.pid,
                missing,
            });
        }
    }
    Ok(())
}
