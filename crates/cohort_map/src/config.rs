use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_TILES_SERVER_URL: &str = "https://{s}.tile.openstreetmap.org";

/// Padding, in pixels on every side, when fitting the viewport to a cohort.
pub const FIT_PADDING_PX: f64 = 50.0;

/// Where the map finds its GIS service and basemap tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GisConfig {
    /// Defaults to the application API url followed by `gis`.
    pub gis_service_url: String,
    /// Tile host without the `/{z}/{x}/{y}.png` suffix. Defaults to
    /// `DEFAULT_TILES_SERVER_URL`.
    pub tiles_server_url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppConfig {
    gis_service_url: Option<String>,
    tiles_server_url: Option<String>,
    api: Option<ApiSection>,
}

#[derive(Debug, Deserialize)]
struct ApiSection {
    url: String,
}

impl GisConfig {
    pub fn from_api_url(api_url: &str) -> Self {
        Self {
            gis_service_url: format!("{api_url}gis"),
            tiles_server_url: DEFAULT_TILES_SERVER_URL.to_string(),
        }
    }

    /// Reads the `gisServiceUrl`, `tilesServerUrl` and `api.url` keys of the
    /// application config JSON.
    pub fn from_app_config(json: &str) -> Result<Self, ConfigError> {
        let raw: AppConfig = serde_json::from_str(json)?;
        Self::resolve(
            raw.gis_service_url,
            raw.api.map(|api| api.url),
            raw.tiles_server_url,
        )
    }

    /// `GIS_SERVICE_URL`, `API_URL`, `TILES_SERVER_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Self::resolve(
            lookup("GIS_SERVICE_URL"),
            lookup("API_URL"),
            lookup("TILES_SERVER_URL"),
        )
    }

    fn resolve(
        gis_service_url: Option<String>,
        api_url: Option<String>,
        tiles_server_url: Option<String>,
    ) -> Result<Self, ConfigError> {
        let gis_service_url = match (non_empty(gis_service_url), non_empty(api_url)) {
            (Some(url), _) => url,
            (None, Some(api)) => format!("{api}gis"),
            (None, None) => return Err(ConfigError::MissingServiceUrl),
        };
        Ok(Self {
            gis_service_url,
            tiles_server_url: non_empty(tiles_server_url)
                .unwrap_or_else(|| DEFAULT_TILES_SERVER_URL.to_string()),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Collaborators bound by `CohortMap::configure`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapOptions {
    pub service_url: String,
    pub tile_url: String,
    /// Identifies the element the surface is created in.
    pub container: String,
}

impl MapOptions {
    pub fn new(config: &GisConfig, container: impl Into<String>) -> Self {
        Self {
            service_url: config.gis_service_url.clone(),
            tile_url: config.tiles_server_url.clone(),
            container: container.into(),
        }
    }
}
