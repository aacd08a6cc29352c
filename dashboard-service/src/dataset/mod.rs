use std::{fs::File, io::Read, path::Path};

use once_cell::sync::OnceCell;
use plant_data::domain::{Dataset, PowerPlant};

/// Columns the dashboard interprets. Anything else in the header is carried
/// through untouched into the export path.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "name",
    "country_long",
    "primary_fuel",
    "capacity_mw",
    "latitude",
    "longitude",
];

#[derive(thiserror::Error, Debug)]
pub enum DataLoadError {
    #[error("failed to open dataset file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read dataset CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("dataset header is missing required columns: {0}")]
    MissingColumns(String),
}

static DATASET: OnceCell<Dataset> = OnceCell::new();

/// Load the dataset into the process-wide cache on first call and return it.
///
/// The cached value is immutable and lives until process exit; later calls
/// return the same reference without touching the filesystem.
pub fn init(path: &Path) -> Result<&'static Dataset, DataLoadError> {
    DATASET.get_or_try_init(|| load(path))
}

/// Read and clean the CSV at `path`. Row order is preserved, so the same
/// file always yields the same `Dataset`.
pub fn load(path: &Path) -> Result<Dataset, DataLoadError> {
    let file = File::open(path)?;
    let dataset = parse_dataset(file)?;
    tracing::info!(
        path = %path.display(),
        plants = dataset.plants.len(),
        columns = dataset.columns.len(),
        "loaded power plant dataset"
    );
    Ok(dataset)
}

/// Parse dataset CSV from any reader.
///
/// Rows whose `capacity_mw`, `latitude` or `longitude` is missing,
/// unparseable, non-finite or (for capacity) negative are dropped and
/// counted, never fatal. A header lacking a required column is fatal.
pub fn parse_dataset<R: Read>(reader: R) -> Result<Dataset, DataLoadError> {
    // Ragged rows are dropped by the field checks below instead of aborting
    // the whole load.
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let find = |name: &str| headers.iter().position(|h| h == name);
    let (name_i, country_i, fuel_i, capacity_i, lat_i, lon_i) = match (
        find("name"),
        find("country_long"),
        find("primary_fuel"),
        find("capacity_mw"),
        find("latitude"),
        find("longitude"),
    ) {
        (Some(a), Some(b), Some(c), Some(d), Some(e), Some(f)) => (a, b, c, d, e, f),
        _ => {
            let missing: Vec<&str> = REQUIRED_COLUMNS
                .iter()
                .copied()
                .filter(|name| find(name).is_none())
                .collect();
            return Err(DataLoadError::MissingColumns(missing.join(", ")));
        }
    };

    let mut plants = Vec::new();
    let mut skipped = 0usize;
    for result in rdr.records() {
        let record = result?;
        let get = |i: usize| record.get(i).unwrap_or("").trim();

        let (Some(capacity_mw), Some(latitude), Some(longitude)) = (
            parse_optional_f64(get(capacity_i)),
            parse_optional_f64(get(lat_i)),
            parse_optional_f64(get(lon_i)),
        ) else {
            skipped += 1;
            continue;
        };
        if capacity_mw < 0.0 {
            skipped += 1;
            continue;
        }

        let mut raw: Vec<String> = record.iter().map(str::to_string).collect();
        raw.resize(headers.len(), String::new());

        plants.push(PowerPlant {
            name: get(name_i).to_string(),
            country_long: get(country_i).to_string(),
            primary_fuel: get(fuel_i).to_string(),
            capacity_mw,
            latitude,
            longitude,
            raw,
        });
    }

    metrics::counter!("dataset_rows_loaded_total").increment(plants.len() as u64);
    metrics::counter!("dataset_rows_skipped_total").increment(skipped as u64);
    if skipped > 0 {
        tracing::warn!(skipped, "dropped rows with missing capacity or coordinates");
    }

    Ok(Dataset {
        columns: headers.iter().map(str::to_string).collect(),
        plants,
    })
}

fn parse_optional_f64(s: &str) -> Option<f64> {
    if s.is_empty() {
        None
    } else {
        s.parse().ok().filter(|v: &f64| v.is_finite())
    }
}
