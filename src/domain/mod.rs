pub mod estimate;
pub mod features;
pub mod format;
pub mod geo;
pub mod renovation;
pub mod sectors;
pub mod stats;
