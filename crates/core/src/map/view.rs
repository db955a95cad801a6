use crate::geo::{CornerSet, LatLngBounds, LngLat, ViewportSize, mercator};
use crate::map::tile::TileSource;
use crate::shape::{DrawToolConfig, DrawnShape};

/// The single map view of the ground station. Created once, on the host's
/// init event, and kept for the process lifetime.
pub struct MapView {
    center: LngLat,
    zoom: u8,
    size: ViewportSize,
    tile_source: TileSource,
    draw_tool: DrawToolConfig,
    drawn_items: Vec<DrawnShape>,
}

impl MapView {
    pub fn new(
        center: LngLat,
        zoom: u8,
        tile_source: TileSource,
        draw_tool: DrawToolConfig,
    ) -> Self {
        let zoom = tile_source.clamp_zoom(zoom);
        Self {
            center,
            zoom,
            size: ViewportSize::default(),
            tile_source,
            draw_tool,
            drawn_items: Vec::new(),
        }
    }

    pub fn center(&self) -> LngLat {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn size(&self) -> ViewportSize {
        self.size
    }

    pub fn tile_source(&self) -> &TileSource {
        &self.tile_source
    }

    pub fn draw_tool(&self) -> &DrawToolConfig {
        &self.draw_tool
    }

    pub fn set_center(&mut self, center: LngLat) {
        self.center = center;
    }

    /// Requested zoom is bounded by the tile source's served range.
    pub fn set_zoom(&mut self, zoom: u8) {
        self.zoom = self.tile_source.clamp_zoom(zoom);
    }

    pub fn resize(&mut self, size: ViewportSize) {
        self.size = size;
    }

    /// Current viewport bounds, recomputed from center, zoom and canvas size.
    pub fn bounds(&self) -> LatLngBounds {
        mercator::viewport_bounds(self.center, self.zoom, self.size, self.tile_source.tile_size)
    }

    /// The four viewport corners, recomputed on every call.
    pub fn corners(&self) -> CornerSet {
        CornerSet::from_bounds(&self.bounds())
    }

    /// Retain a completed shape for display.
    pub fn add_drawn(&mut self, shape: DrawnShape) {
        self.drawn_items.push(shape);
    }

    pub fn drawn_items(&self) -> &[DrawnShape] {
        &self.drawn_items
    }
}
