use std::collections::BTreeSet;

use plant_data::domain::{FuelCapacity, PowerPlant};
use serde::Serialize;

/// Map marker for one plant, ready for the UI's map widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerDescriptor {
    pub lat: f64,
    pub lon: f64,
    pub label: String,
    pub fuel: String,
    pub color: &'static str,
}

/// One bar of the capacity-by-fuel chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Legend row for a selected fuel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub fuel: String,
    pub color: &'static str,
}

/// Fixed fuel palette. Total: fuels outside the table get gray.
pub fn fuel_color(fuel: &str) -> &'static str {
    match fuel {
        "Nuclear" => "purple",
        "Coal" => "black",
        "Hydro" => "blue",
        "Solar" => "orange",
        "Gas" => "red",
        "Wind" => "green",
        _ => "gray",
    }
}

/// One marker per record, colored by fuel and labeled with the plant name
/// and capacity.
pub fn to_markers(records: &[&PowerPlant]) -> Vec<MarkerDescriptor> {
    records
        .iter()
        .map(|p| MarkerDescriptor {
            lat: p.latitude,
            lon: p.longitude,
            label: format!("{} ({} MW)", p.name, p.capacity_mw),
            fuel: p.primary_fuel.clone(),
            color: fuel_color(&p.primary_fuel),
        })
        .collect()
}

/// Bar-chart series in the summary's order (descending capacity).
pub fn to_chart_series(summary: &[FuelCapacity]) -> Vec<ChartPoint> {
    summary
        .iter()
        .map(|entry| ChartPoint {
            label: entry.fuel.clone(),
            value: entry.total_mw,
        })
        .collect()
}

/// One legend row per selected fuel, in selection order.
pub fn legend_entries(fuels: &BTreeSet<String>) -> Vec<LegendEntry> {
    fuels
        .iter()
        .map(|fuel| LegendEntry {
            fuel: fuel.clone(),
            color: fuel_color(fuel),
        })
        .collect()
}
