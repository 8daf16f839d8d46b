use super::{ModelError, PricePredictor};
use crate::domain::features::FeatureRow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Linear regression over named features.
///
/// `price = intercept + Σ coefficients[name] * row[name]`. Row columns
/// without a coefficient are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: BTreeMap<String, f64>,
}

impl LinearModel {
    pub fn new(intercept: f64, coefficients: BTreeMap<String, f64>) -> Self {
        Self {
            intercept,
            coefficients,
        }
    }
}

impl PricePredictor for LinearModel {
    type Error = ModelError;

    fn predict(&self, row: &FeatureRow) -> Result<f64, ModelError> {
        self.coefficients
            .iter()
            .try_fold(self.intercept, |acc, (name, weight)| {
                let value = row
                    .get(name)
                    .ok_or_else(|| ModelError::MissingFeature(name.clone()))?;
                Ok(acc + weight * value)
            })
    }
}
