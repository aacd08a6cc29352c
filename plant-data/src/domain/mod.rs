pub mod power_plant;
pub mod view;

pub use power_plant::{Dataset, PowerPlant};
pub use view::{FilterCriteria, FuelCapacity, MapCenter, ViewMetrics, NO_TOP_FUEL};
