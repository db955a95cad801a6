pub mod geo;
pub mod map;
pub mod shape;

pub use geo::{CornerSet, LatLngBounds, LngLat, ViewportSize};
pub use map::tile::TileSource;
pub use map::view::MapView;
pub use shape::{DrawToolConfig, DrawnShape, ShapeError, ShapeKind};
