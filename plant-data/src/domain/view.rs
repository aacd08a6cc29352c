use std::collections::BTreeSet;

use serde::Serialize;

/// Sentinel reported as the top fuel when the filtered set is empty.
pub const NO_TOP_FUEL: &str = "N/A";

/// A user's current selection. Rebuilt from the request on every interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub country: String,
    /// Fuels to include. An empty set selects nothing, not everything.
    pub fuels: BTreeSet<String>,
}

/// Total capacity for one fuel within a filtered set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelCapacity {
    pub fuel: String,
    pub total_mw: f64,
}

/// Headline KPIs for the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewMetrics {
    pub total_mw: f64,
    pub plant_count: usize,
    /// Fuel with the largest summed capacity, or [`NO_TOP_FUEL`].
    pub top_fuel: String,
}

/// Arithmetic mean of the filtered plants' coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapCenter {
    pub lat: f64,
    pub lon: f64,
}
