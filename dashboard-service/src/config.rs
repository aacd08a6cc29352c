use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind_addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// Country preselected when a request names none. Ignored when the
    /// dataset does not contain it.
    pub default_country: String,
    #[serde(default = "default_map_zoom")]
    pub map_zoom: u8,
}

fn default_map_zoom() -> u8 {
    5
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub dataset: DatasetConfig,
    pub http: HttpConfig,
    pub ui: UiConfig,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        use std::env;

        let path = env::var("DASHBOARD_CONFIG").unwrap_or_else(|_| "dashboard-config.toml".to_string());
        let contents = fs::read_to_string(&path)?;
        let cfg: AppConfig = toml::from_str(&contents)?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [dataset]
            path = "plants.csv"

            [http]
            bind_addr = "127.0.0.1:8080"

            [ui]
            default_country = "India"
            map_zoom = 4
            "#,
        )
        .expect("config should parse");

        assert_eq!(cfg.dataset.path, "plants.csv");
        assert_eq!(cfg.ui.default_country, "India");
        assert_eq!(cfg.ui.map_zoom, 4);
    }

    #[test]
    fn map_zoom_defaults_when_omitted() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [dataset]
            path = "plants.csv"

            [http]
            bind_addr = "127.0.0.1:8080"

            [ui]
            default_country = "India"
            "#,
        )
        .expect("config should parse");

        assert_eq!(cfg.ui.map_zoom, 5);
    }
}
