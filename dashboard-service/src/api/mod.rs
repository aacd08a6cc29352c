use std::{collections::BTreeSet, net::SocketAddr, time::Instant};

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use plant_data::domain::{Dataset, FilterCriteria, MapCenter, PowerPlant, ViewMetrics};
use serde::{Deserialize, Serialize};

use crate::{
    analytics,
    config::AppConfig,
    export, observability,
    presentation::{self, ChartPoint, LegendEntry, MarkerDescriptor},
};

#[derive(Clone)]
struct ApiState {
    dataset: &'static Dataset,
    default_country: String,
    map_zoom: u8,
}

#[derive(Debug, Default, Deserialize)]
pub struct SelectionQuery {
    /// Absent means the configured default country.
    pub country: Option<String>,
    /// Comma-separated fuel list. Absent means every fuel available for the
    /// country; present but empty means an empty selection.
    pub fuels: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CountryQuery {
    country: String,
}

/// Center and zoom for the UI's map widget. Absent from the dashboard view
/// when the selection is empty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    pub center: MapCenter,
    pub zoom: u8,
}

/// Everything the external UI renders for one selection.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub country: String,
    pub fuels: Vec<String>,
    pub metrics: ViewMetrics,
    pub capacity_by_fuel: Vec<ChartPoint>,
    pub map: Option<MapView>,
    pub markers: Vec<MarkerDescriptor>,
    pub legend: Vec<LegendEntry>,
    /// Table rows, capacity descending.
    pub plants: Vec<PowerPlant>,
}

/// Serve the dashboard API until the process is stopped.
pub async fn serve(dataset: &'static Dataset, cfg: &AppConfig) -> anyhow::Result<()> {
    let state = ApiState {
        dataset,
        default_country: cfg.ui.default_country.clone(),
        map_zoom: cfg.ui.map_zoom,
    };

    let app = Router::new()
        .route("/api/countries", get(countries))
        .route("/api/fuels", get(fuels))
        .route("/api/dashboard", get(dashboard))
        .route("/api/export", get(export_csv))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state);

    let addr: SocketAddr = cfg
        .http
        .bind_addr
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid http.bind_addr: {e}"))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "dashboard API listening");
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

async fn countries(State(state): State<ApiState>) -> Json<Vec<String>> {
    Json(state.dataset.countries())
}

async fn fuels(State(state): State<ApiState>, Query(q): Query<CountryQuery>) -> Json<Vec<String>> {
    Json(state.dataset.fuels_for_country(&q.country))
}

async fn dashboard(
    State(state): State<ApiState>,
    Query(q): Query<SelectionQuery>,
) -> Json<DashboardView> {
    metrics::counter!("dashboard_requests_total").increment(1);
    let started = Instant::now();

    let criteria = resolve_criteria(state.dataset, &state.default_country, &q);
    let view = assemble_dashboard(state.dataset, criteria, state.map_zoom);

    metrics::histogram!("dashboard_recompute_seconds").record(started.elapsed().as_secs_f64());
    Json(view)
}

async fn export_csv(State(state): State<ApiState>, Query(q): Query<SelectionQuery>) -> Response {
    metrics::counter!("export_requests_total").increment(1);

    let criteria = resolve_criteria(state.dataset, &state.default_country, &q);
    let records = analytics::filter_plants(state.dataset, &criteria);
    match export::to_csv_bytes(state.dataset, &records) {
        Ok(bytes) => {
            let disposition = format!("attachment; filename=\"{}_data.csv\"", criteria.country);
            (
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "CSV export failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn metrics_endpoint() -> Response {
    match observability::render_metrics() {
        Some(body) => body.into_response(),
        None => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

/// Turn raw query parameters into concrete criteria.
///
/// A missing country falls back to the configured default when the dataset
/// contains it, otherwise to the first country alphabetically. A missing
/// fuel list means every fuel available for the country; an explicitly empty
/// one stays empty and therefore selects nothing.
pub fn resolve_criteria(dataset: &Dataset, default_country: &str, q: &SelectionQuery) -> FilterCriteria {
    let country = match &q.country {
        Some(c) => c.clone(),
        None => {
            let known = dataset.countries();
            if known.iter().any(|c| c == default_country) {
                default_country.to_string()
            } else {
                known.into_iter().next().unwrap_or_default()
            }
        }
    };

    let fuels: BTreeSet<String> = match &q.fuels {
        Some(raw) => parse_fuel_list(raw),
        None => dataset.fuels_for_country(&country).into_iter().collect(),
    };

    FilterCriteria { country, fuels }
}

/// Split a comma-separated fuel parameter. Blank entries are dropped, so an
/// empty string yields an empty selection.
pub fn parse_fuel_list(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

/// Recompute every derived view for one selection from the immutable
/// dataset snapshot.
pub fn assemble_dashboard(dataset: &Dataset, criteria: FilterCriteria, map_zoom: u8) -> DashboardView {
    let records = analytics::filter_plants(dataset, &criteria);
    let summary = analytics::summarize_by_fuel(&records);
    let view_metrics = analytics::compute_metrics(&records);
    let map = analytics::centroid(&records)
        .ok()
        .map(|center| MapView { center, zoom: map_zoom });
    let markers = presentation::to_markers(&records);
    let legend = presentation::legend_entries(&criteria.fuels);
    let capacity_by_fuel = presentation::to_chart_series(&summary);

    let mut plants: Vec<PowerPlant> = records.into_iter().cloned().collect();
    plants.sort_by(|a, b| b.capacity_mw.total_cmp(&a.capacity_mw));

    DashboardView {
        country: criteria.country,
        fuels: criteria.fuels.into_iter().collect(),
        metrics: view_metrics,
        capacity_by_fuel,
        map,
        markers,
        legend,
        plants,
    }
}
