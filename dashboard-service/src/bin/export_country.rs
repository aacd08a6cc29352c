use anyhow::{bail, Result};
use dashboard_service::{analytics, api, config::AppConfig, dataset, export, observability};
use plant_data::domain::FilterCriteria;
use std::{env, fs, path::Path};

fn main() -> Result<()> {
    observability::init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        bail!("usage: export_country <country> [fuel,fuel,...]");
    }
    let country = args[1].clone();

    // Load configuration (can point DASHBOARD_CONFIG to an alternate file).
    let cfg = AppConfig::load()?;
    let data = dataset::init(Path::new(&cfg.dataset.path))?;

    let fuels = match args.get(2) {
        Some(raw) => api::parse_fuel_list(raw),
        None => data.fuels_for_country(&country).into_iter().collect(),
    };
    let criteria = FilterCriteria {
        country: country.clone(),
        fuels,
    };

    let records = analytics::filter_plants(data, &criteria);
    if records.is_empty() {
        tracing::warn!(country = %country, "no plants match the requested selection");
    }

    let bytes = export::to_csv_bytes(data, &records)?;
    let out_path = format!("{country}_data.csv");
    fs::write(&out_path, bytes)?;
    tracing::info!(path = %out_path, plants = records.len(), "wrote export");

    Ok(())
}
