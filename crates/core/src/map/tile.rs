/// Tile URL template of the ground-station's local tile server.
const LOCAL_TILE_URL: &str = "http://localhost:8080/tiles/{z}/{x}/{y}.png"; // Hardcoded for now

/// Substitute image for tiles the server cannot deliver. Failed fetches are
/// replaced visually and never surface to the bridge.
const ERROR_TILE_URL: &str = "https://via.placeholder.com/256/ff0000/ffffff?text=Tile+Error";

/// Description of a raster tile layer. The layer itself is rendered by the
/// embedding map UI; this only carries its configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSource {
    pub url_template: String,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub tile_size: u32,
    pub attribution: String,
    pub error_tile_url: String,
}

impl TileSource {
    /// The fixed deployment source served next to the ground station.
    pub fn local() -> Self {
        Self {
            url_template: LOCAL_TILE_URL.to_owned(),
            min_zoom: 12,
            max_zoom: 14,
            tile_size: 256,
            attribution: "Local Tiles".to_owned(),
            error_tile_url: ERROR_TILE_URL.to_owned(),
        }
    }

    /// Expand the `{z}/{x}/{y}` template for one tile.
    pub fn tile_url(&self, z: u8, x: u32, y: u32) -> String {
        self.url_template
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }

    /// Bound a requested zoom level into the range this source serves.
    pub fn clamp_zoom(&self, zoom: u8) -> u8 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}
