//! Pretrained sale-price models.
//!
//! The dashboard never trains anything: a model is deserialized once from
//! JSON at startup and only ever asked for point predictions through
//! [`PricePredictor`].

mod linear;
mod trees;

pub use linear::LinearModel;
pub use trees::{TreeEnsemble, TreeNode};

use crate::domain::features::FeatureRow;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Anything that can turn a feature row into a price estimate.
pub trait PricePredictor {
    type Error: std::error::Error + 'static;

    fn predict(&self, row: &FeatureRow) -> Result<f64, Self::Error>;
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model requires feature '{0}' which the row does not have")]
    MissingFeature(String),

    #[error("malformed tree {tree}: {reason}")]
    MalformedTree { tree: usize, reason: String },

    #[error("failed to read model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Serialized model file, tagged by `"kind"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PriceModel {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsemble),
}

impl PriceModel {
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let model: PriceModel = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            PriceModel::Linear(_) => Ok(()),
            PriceModel::TreeEnsemble(ensemble) => ensemble.validate(),
        }
    }

    /// Names of the features the model reads.
    pub fn feature_names(&self) -> Vec<String> {
        match self {
            PriceModel::Linear(m) => m.coefficients.keys().cloned().collect(),
            PriceModel::TreeEnsemble(m) => m.feature_names(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PriceModel::Linear(_) => "linear",
            PriceModel::TreeEnsemble(_) => "tree_ensemble",
        }
    }
}

impl PricePredictor for PriceModel {
    type Error = ModelError;

    fn predict(&self, row: &FeatureRow) -> Result<f64, ModelError> {
        match self {
            PriceModel::Linear(m) => m.predict(row),
            PriceModel::TreeEnsemble(m) => m.predict(row),
        }
    }
}
