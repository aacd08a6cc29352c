use serde::Serialize;

/// One power plant, as loaded from the source CSV.
///
/// `raw` keeps the original row values aligned with [`Dataset::columns`] so
/// that columns the dashboard does not interpret still round-trip into the
/// CSV export unmodified.
#[derive(Debug, Clone, Serialize)]
pub struct PowerPlant {
    pub name: String,
    pub country_long: String,
    pub primary_fuel: String,
    pub capacity_mw: f64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip)]
    pub raw: Vec<String>,
}

/// The loaded power-plant table.
///
/// Built once at startup from the source file and treated as read-only for
/// the rest of the process lifetime. Invariant: every retained plant has a
/// parsed, finite `capacity_mw`, `latitude` and `longitude`.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Source header in original column order, pass-through columns included.
    pub columns: Vec<String>,
    /// Plants in source row order.
    pub plants: Vec<PowerPlant>,
}

impl Dataset {
    /// Distinct countries present in the dataset, sorted.
    pub fn countries(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .plants
            .iter()
            .map(|p| p.country_long.clone())
            .collect();
        out.sort();
        out.dedup();
        out
    }

    /// Distinct fuels available for `country`, sorted. Empty for a country
    /// the dataset does not contain.
    pub fn fuels_for_country(&self, country: &str) -> Vec<String> {
        let mut out: Vec<String> = self
            .plants
            .iter()
            .filter(|p| p.country_long == country)
            .map(|p| p.primary_fuel.clone())
            .collect();
        out.sort();
        out.dedup();
        out
    }
}
