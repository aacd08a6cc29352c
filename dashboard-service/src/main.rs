use std::path::Path;

use anyhow::Result;
use dashboard_service::{api, config::AppConfig, dataset, observability};

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();
    observability::init_metrics();

    // Load configuration
    let cfg = AppConfig::load()?;

    // One-time load into the process-wide cache; every request reads from
    // this immutable snapshot.
    let data = dataset::init(Path::new(&cfg.dataset.path))?;
    tracing::info!(
        plants = data.plants.len(),
        countries = data.countries().len(),
        "power plant dataset ready"
    );

    api::serve(data, &cfg).await
}
