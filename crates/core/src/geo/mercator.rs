//! Web Mercator projection between geographic coordinates and world pixels.
//!
//! Viewport bounds are derived from center, zoom and canvas size instead of
//! being read back from a rendering library.

use std::f64::consts::PI;

use super::{LatLngBounds, LngLat, ViewportSize};

/// Latitude limit of the projection; beyond this the math degenerates.
pub const MAX_LATITUDE: f64 = 85.051_128_78;

fn world_size(zoom: u8, tile_size: u32) -> f64 {
    tile_size as f64 * 2f64.powi(zoom as i32)
}

/// Project a coordinate to world-pixel space at the given zoom.
pub fn project(point: LngLat, zoom: u8, tile_size: u32) -> (f64, f64) {
    let world = world_size(zoom, tile_size);
    let lat = point.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);

    let x = (point.lng + 180.0) / 360.0 * world;
    let y = (1.0 - lat.to_radians().tan().asinh() / PI) / 2.0 * world;
    (x, y)
}

/// Inverse of [`project`]. y=0 is the northern edge of the world.
pub fn unproject(x: f64, y: f64, zoom: u8, tile_size: u32) -> LngLat {
    let world = world_size(zoom, tile_size);

    let lng = x / world * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * y / world)).sinh().atan().to_degrees();
    LngLat::new(lng, lat)
}

/// Bounds of a viewport of `size` pixels centered on `center`.
pub fn viewport_bounds(
    center: LngLat,
    zoom: u8,
    size: ViewportSize,
    tile_size: u32,
) -> LatLngBounds {
    let (cx, cy) = project(center, zoom, tile_size);
    let half_w = size.width as f64 / 2.0;
    let half_h = size.height as f64 / 2.0;

    let south_west = unproject(cx - half_w, cy + half_h, zoom, tile_size);
    let north_east = unproject(cx + half_w, cy - half_h, zoom, tile_size);
    LatLngBounds::new(south_west, north_east)
}
