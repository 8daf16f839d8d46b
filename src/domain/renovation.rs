// src/domain/renovation.rs

use crate::domain::features::{encode, FeatureRow};
use thiserror::Error;

pub const POOL_FEATURE: &str = "HasPool";
pub const CENTRAL_AIR_GROUP: &str = "CentralAir_";
pub const PAVED_DRIVE_GROUP: &str = "PavedDrive_";
pub const BATHS_FEATURE: &str = "AllBathAbv";

/// Indicator category meaning "yes" in the binary one-hot groups.
const YES: &str = "Y";

pub const MAX_ADDED_BATHS: f64 = 2.0;
pub const BATH_STEP: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenovationError {
    #[error("added bathrooms must be between 0 and 2 in steps of 0.5, got {0}")]
    InvalidBaths(f64),

    #[error("this house's features have no column for {0}")]
    Unsupported(&'static str),
}

/// What the baseline house already has, read from its feature row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BaselineAmenities {
    pub pool: bool,
    pub central_air: bool,
    pub paved_drive: bool,
}

impl BaselineAmenities {
    pub fn of(row: &FeatureRow) -> Self {
        let flag = |name: &str| row.get(name).is_some_and(|v| v >= 0.5);
        Self {
            pool: flag(POOL_FEATURE),
            central_air: flag(&yes_column(CENTRAL_AIR_GROUP)),
            paved_drive: flag(&yes_column(PAVED_DRIVE_GROUP)),
        }
    }
}

/// Renovations that would change a row: the house lacks the amenity and the
/// row has the column that records it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenovationOptions {
    pub pool: bool,
    pub central_air: bool,
    pub paved_drive: bool,
    pub baths: bool,
}

impl RenovationOptions {
    pub fn of(row: &FeatureRow) -> Self {
        let has = BaselineAmenities::of(row);
        Self {
            pool: !has.pool && row.contains(POOL_FEATURE),
            central_air: !has.central_air && row.contains(&yes_column(CENTRAL_AIR_GROUP)),
            paved_drive: !has.paved_drive && row.contains(&yes_column(PAVED_DRIVE_GROUP)),
            baths: row.contains(BATHS_FEATURE),
        }
    }
}

fn yes_column(group: &str) -> String {
    format!("{group}{YES}")
}

/// Hypothetical modifications chosen in the renovation modeler.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Renovation {
    pub build_pool: bool,
    pub install_central_air: bool,
    pub pave_driveway: bool,
    pub added_baths: f64,
}

impl Renovation {
    pub fn new(
        build_pool: bool,
        install_central_air: bool,
        pave_driveway: bool,
        added_baths: f64,
    ) -> Result<Self, RenovationError> {
        let steps = added_baths / BATH_STEP;
        if !(0.0..=MAX_ADDED_BATHS).contains(&added_baths) || steps.fract() != 0.0 {
            return Err(RenovationError::InvalidBaths(added_baths));
        }
        Ok(Self {
            build_pool,
            install_central_air,
            pave_driveway,
            added_baths,
        })
    }

    /// Fails when a requested option has no column in `row`, so it could
    /// never show up in a price.
    pub fn check_supported(&self, row: &FeatureRow) -> Result<(), RenovationError> {
        if self.build_pool && !row.contains(POOL_FEATURE) {
            return Err(RenovationError::Unsupported("a pool"));
        }
        if self.install_central_air && !row.contains(&yes_column(CENTRAL_AIR_GROUP)) {
            return Err(RenovationError::Unsupported("central air"));
        }
        if self.pave_driveway && !row.contains(&yes_column(PAVED_DRIVE_GROUP)) {
            return Err(RenovationError::Unsupported("a paved driveway"));
        }
        if self.added_baths > 0.0 && !row.contains(BATHS_FEATURE) {
            return Err(RenovationError::Unsupported("bathrooms"));
        }
        Ok(())
    }

    /// Returns the renovated copy of `baseline`.
    ///
    /// Amenities the house already has are left alone, so asking for a pool
    /// on a house with one changes nothing. The row's schema never changes.
    pub fn apply(&self, baseline: &FeatureRow) -> FeatureRow {
        let open = RenovationOptions::of(baseline);
        let mut row = baseline.clone();

        if self.build_pool && open.pool {
            row.set(POOL_FEATURE, 1.0);
        }
        // without a "Y" column, encoding would only zero the group
        if self.install_central_air && open.central_air {
            row = encode(&row, CENTRAL_AIR_GROUP, YES);
        }
        if self.pave_driveway && open.paved_drive {
            row = encode(&row, PAVED_DRIVE_GROUP, YES);
        }
        if self.added_baths > 0.0 {
            if let Some(baths) = row.get(BATHS_FEATURE) {
                row.set(BATHS_FEATURE, baths + self.added_baths);
            }
        }

        row
    }

    pub fn is_noop(&self) -> bool {
        !self.build_pool
            && !self.install_central_air
            && !self.pave_driveway
            && self.added_baths == 0.0
    }
}
