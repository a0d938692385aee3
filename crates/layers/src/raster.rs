/// Zoom ceiling of the public basemap tiles.
pub const BASEMAP_MAX_ZOOM: u8 = 18;

pub const BASEMAP_LAYER_NAME: &str = "osm_tiles";

#[derive(Debug, Clone, PartialEq)]
pub struct RasterLayer {
    pub name: String,
    /// `{z}/{x}/{y}` template, optionally with a `{s}` subdomain slot.
    pub url_template: String,
    pub max_zoom: u8,
}

impl RasterLayer {
    pub fn basemap(tiles_server_url: &str) -> Self {
        Self {
            name: BASEMAP_LAYER_NAME.to_string(),
            url_template: format!("{}/{{z}}/{{x}}/{{y}}.png", tiles_server_url),
            max_zoom: BASEMAP_MAX_ZOOM,
        }
    }

    pub fn tile_url(&self, subdomain: &str, z: u8, x: u32, y: u32) -> String {
        self.url_template
            .replace("{s}", subdomain)
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}
