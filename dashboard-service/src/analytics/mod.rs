use std::collections::HashMap;

use plant_data::domain::{
    Dataset, FilterCriteria, FuelCapacity, MapCenter, PowerPlant, ViewMetrics, NO_TOP_FUEL,
};

/// An aggregate with no defined value on zero records was requested over an
/// empty set.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("aggregation requested over an empty record set")]
pub struct EmptySetError;

/// Select the plants matching `criteria`, preserving dataset order.
///
/// An empty fuel selection selects nothing. An unknown country is a
/// selection with no matches, not an error.
pub fn filter_plants<'a>(dataset: &'a Dataset, criteria: &FilterCriteria) -> Vec<&'a PowerPlant> {
    dataset
        .plants
        .iter()
        .filter(|p| p.country_long == criteria.country && criteria.fuels.contains(&p.primary_fuel))
        .collect()
}

/// Total capacity per fuel, descending. The sort is stable, so fuels with
/// equal totals keep their first-encountered order.
pub fn summarize_by_fuel(records: &[&PowerPlant]) -> Vec<FuelCapacity> {
    let mut slot_by_fuel: HashMap<String, usize> = HashMap::new();
    let mut summary: Vec<FuelCapacity> = Vec::new();

    for plant in records {
        match slot_by_fuel.get(&plant.primary_fuel) {
            Some(&slot) => summary[slot].total_mw += plant.capacity_mw,
            None => {
                slot_by_fuel.insert(plant.primary_fuel.clone(), summary.len());
                summary.push(FuelCapacity {
                    fuel: plant.primary_fuel.clone(),
                    total_mw: plant.capacity_mw,
                });
            }
        }
    }

    summary.sort_by(|a, b| b.total_mw.total_cmp(&a.total_mw));
    summary
}

/// Headline numbers for the current selection. Total over an empty set is
/// zero and the top fuel falls back to the [`NO_TOP_FUEL`] sentinel instead
/// of indexing into an empty summary.
pub fn compute_metrics(records: &[&PowerPlant]) -> ViewMetrics {
    let summary = summarize_by_fuel(records);
    ViewMetrics {
        total_mw: records.iter().map(|p| p.capacity_mw).sum(),
        plant_count: records.len(),
        top_fuel: summary
            .first()
            .map(|entry| entry.fuel.clone())
            .unwrap_or_else(|| NO_TOP_FUEL.to_string()),
    }
}

/// Mean coordinate of the selection, used to center the map view. Explicit
/// error on an empty selection; a NaN center is never produced.
pub fn centroid(records: &[&PowerPlant]) -> Result<MapCenter, EmptySetError> {
    if records.is_empty() {
        return Err(EmptySetError);
    }
    let n = records.len() as f64;
    Ok(MapCenter {
        lat: records.iter().map(|p| p.latitude).sum::<f64>() / n,
        lon: records.iter().map(|p| p.longitude).sum::<f64>() / n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plant(name: &str, country: &str, fuel: &str, capacity_mw: f64, lat: f64, lon: f64) -> PowerPlant {
        PowerPlant {
            name: name.to_string(),
            country_long: country.to_string(),
            primary_fuel: fuel.to_string(),
            capacity_mw,
            latitude: lat,
            longitude: lon,
            raw: Vec::new(),
        }
    }

    fn dataset() -> Dataset {
        Dataset {
            columns: Vec::new(),
            plants: vec![
                plant("Korba", "India", "Coal", 100.0, 22.4, 82.7),
                plant("Bhadla", "India", "Solar", 50.0, 27.5, 71.9),
                plant("Talcher", "India", "Coal", 30.0, 20.9, 85.2),
                plant("Hoover Dam", "United States of America", "Hydro", 2080.0, 36.0, -114.7),
            ],
        }
    }

    fn criteria(country: &str, fuels: &[&str]) -> FilterCriteria {
        FilterCriteria {
            country: country.to_string(),
            fuels: fuels.iter().map(|f| f.to_string()).collect(),
        }
    }

    #[test]
    fn filter_returns_only_matching_records() {
        let data = dataset();
        let records = filter_plants(&data, &criteria("India", &["Coal", "Solar"]));

        assert_eq!(records.len(), 3);
        assert!(records
            .iter()
            .all(|p| p.country_long == "India" && (p.primary_fuel == "Coal" || p.primary_fuel == "Solar")));
        // Dataset order is preserved.
        assert_eq!(records[0].name, "Korba");
        assert_eq!(records[2].name, "Talcher");
    }

    #[test]
    fn filter_with_empty_fuel_selection_is_empty() {
        let data = dataset();
        assert!(filter_plants(&data, &criteria("India", &[])).is_empty());
    }

    #[test]
    fn filter_with_unknown_country_is_empty() {
        let data = dataset();
        assert!(filter_plants(&data, &criteria("Atlantis", &["Coal"])).is_empty());
    }

    #[test]
    fn summary_groups_sums_and_sorts_descending() {
        let data = dataset();
        let records = filter_plants(&data, &criteria("India", &["Coal", "Solar"]));
        let summary = summarize_by_fuel(&records);

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].fuel, "Coal");
        assert_eq!(summary[0].total_mw, 130.0);
        assert_eq!(summary[1].fuel, "Solar");
        assert_eq!(summary[1].total_mw, 50.0);

        let input_total: f64 = records.iter().map(|p| p.capacity_mw).sum();
        let summary_total: f64 = summary.iter().map(|e| e.total_mw).sum();
        assert_eq!(input_total, summary_total);
    }

    #[test]
    fn summary_ties_keep_first_encountered_order() {
        let plants = vec![
            plant("A", "India", "Wind", 75.0, 10.0, 70.0),
            plant("B", "India", "Gas", 75.0, 11.0, 71.0),
        ];
        let refs: Vec<&PowerPlant> = plants.iter().collect();
        let summary = summarize_by_fuel(&refs);

        assert_eq!(summary[0].fuel, "Wind");
        assert_eq!(summary[1].fuel, "Gas");
    }

    #[test]
    fn summary_of_empty_input_is_empty() {
        assert!(summarize_by_fuel(&[]).is_empty());
    }

    #[test]
    fn metrics_for_india_scenario() {
        let data = dataset();
        let records = filter_plants(&data, &criteria("India", &["Coal", "Solar"]));
        let metrics = compute_metrics(&records);

        assert_eq!(metrics.total_mw, 180.0);
        assert_eq!(metrics.plant_count, 3);
        assert_eq!(metrics.top_fuel, "Coal");
    }

    #[test]
    fn metrics_for_empty_selection_use_sentinel() {
        let metrics = compute_metrics(&[]);

        assert_eq!(metrics.total_mw, 0.0);
        assert_eq!(metrics.plant_count, 0);
        assert_eq!(metrics.top_fuel, NO_TOP_FUEL);
    }

    #[test]
    fn centroid_is_coordinate_mean() {
        let plants = vec![
            plant("A", "India", "Coal", 1.0, 10.0, 70.0),
            plant("B", "India", "Coal", 1.0, 30.0, 90.0),
        ];
        let refs: Vec<&PowerPlant> = plants.iter().collect();
        let center = centroid(&refs).expect("two records");

        assert_eq!(center.lat, 20.0);
        assert_eq!(center.lon, 80.0);
    }

    #[test]
    fn centroid_of_empty_selection_is_an_error() {
        assert_eq!(centroid(&[]), Err(EmptySetError));
    }
}
