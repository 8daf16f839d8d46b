// src/domain/estimate.rs

use crate::domain::features::FeatureRow;
use crate::model::PricePredictor;
use serde::Serialize;
use thiserror::Error;

/// Baseline vs. renovated price comparison shown by the renovation modeler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceEstimate {
    pub base_price: i64,
    pub reno_price: i64,
    pub delta: i64,
    /// Percent change relative to `base_price`, rounded to two decimals.
    pub percent_change: f64,
}

#[derive(Debug, Error)]
pub enum EstimateError<E: std::error::Error + 'static> {
    #[error("baseline price is zero; percent change is undefined")]
    DivisionByZero,

    #[error("baseline and renovated rows differ in features: {}", .0.join(", "))]
    SchemaMismatch(Vec<String>),

    #[error("model returned a price outside 0..2^63 ({0})")]
    InvalidPrediction(f64),

    #[error("price difference does not fit in an i64")]
    DeltaOverflow,

    #[error(transparent)]
    Model(E),
}

/// Prices both rows with `model` and reports the difference.
///
/// Both predictions are floored to whole currency units before the delta is
/// taken. Negative, non-finite and unrepresentable predictions are rejected
/// rather than saturated. Errors from the model are handed back untouched.
pub fn estimate<M: PricePredictor>(
    baseline: &FeatureRow,
    renovated: &FeatureRow,
    model: &M,
) -> Result<PriceEstimate, EstimateError<M::Error>> {
    let mismatch = baseline.schema_difference(renovated);
    if !mismatch.is_empty() {
        return Err(EstimateError::SchemaMismatch(mismatch));
    }

    let base_price = floored_price(model, baseline)?;
    let reno_price = floored_price(model, renovated)?;

    if base_price == 0 {
        return Err(EstimateError::DivisionByZero);
    }

    let delta = reno_price
        .checked_sub(base_price)
        .ok_or(EstimateError::DeltaOverflow)?;
    let percent_change = round2(100.0 * delta as f64 / base_price as f64);

    Ok(PriceEstimate {
        base_price,
        reno_price,
        delta,
        percent_change,
    })
}

fn floored_price<M: PricePredictor>(
    model: &M,
    row: &FeatureRow,
) -> Result<i64, EstimateError<M::Error>> {
    let raw = model.predict(row).map_err(EstimateError::Model)?;
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if !raw.is_finite() || raw < 0.0 || raw >= i64::MAX as f64 {
        return Err(EstimateError::InvalidPrediction(raw));
    }
    Ok(raw.floor() as i64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
