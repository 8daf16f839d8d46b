pub mod collaborators;
pub mod engineering;
pub mod features;
pub mod map;
pub mod renovation;
pub mod sectors;

pub use collaborators::collaborators_page;
pub use engineering::engineering_page;
pub use features::features_page;
pub use map::{map_page, MapChoice};
pub use renovation::{estimate_panel, renovation_page, RenovationVm};
pub use sectors::{sectors_page, SectorsVm};
