pub mod loader;
pub mod records;

pub use loader::LoadError;
pub use records::{FeaturePlotRow, HouseRecord, ModelHouse, Pid};
