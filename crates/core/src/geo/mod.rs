pub mod mercator;

use serde::{Serialize, Serializer};

/// A single geographic coordinate. Serialized forms are always
/// longitude-first, matching the GeoJSON position order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    pub fn is_finite(&self) -> bool {
        self.lng.is_finite() && self.lat.is_finite()
    }
}

impl Serialize for LngLat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Wire form is a bare [lng, lat] pair
        (self.lng, self.lat).serialize(serializer)
    }
}

impl From<LngLat> for geo::Coord<f64> {
    fn from(value: LngLat) -> Self {
        geo::Coord {
            x: value.lng,
            y: value.lat,
        }
    }
}

/// Axis-aligned bounding box of the visible viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    pub south_west: LngLat,
    pub north_east: LngLat,
}

impl LatLngBounds {
    pub fn new(south_west: LngLat, north_east: LngLat) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    pub fn contains(&self, point: LngLat) -> bool {
        point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
            && point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
    }
}

/// The four corner coordinates of the current viewport. Derived from the
/// bounds on every query, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CornerSet {
    pub top_left: LngLat,
    pub top_right: LngLat,
    pub bottom_right: LngLat,
    pub bottom_left: LngLat,
}

impl CornerSet {
    pub fn from_bounds(bounds: &LatLngBounds) -> Self {
        let sw = bounds.south_west;
        let ne = bounds.north_east;
        Self {
            top_left: LngLat::new(sw.lng, ne.lat),
            top_right: LngLat::new(ne.lng, ne.lat),
            bottom_right: LngLat::new(ne.lng, sw.lat),
            bottom_left: LngLat::new(sw.lng, sw.lat),
        }
    }
}

/// Pixel size of the map canvas. The embedding page owns the real element;
/// the model needs the size to derive bounds from center and zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}
