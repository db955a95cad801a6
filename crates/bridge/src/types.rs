//! FFI mirrors of the core map types plus the validated init parameters.

use skywatch_core::{geo, shape};

/// One coordinate, longitude-first like every serialized position.
#[derive(Debug, Clone, Copy, PartialEq, uniffi::Record)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl From<LngLat> for geo::LngLat {
    fn from(value: LngLat) -> Self {
        geo::LngLat::new(value.lng, value.lat)
    }
}

impl From<geo::LngLat> for LngLat {
    fn from(value: geo::LngLat) -> Self {
        LngLat {
            lng: value.lng,
            lat: value.lat,
        }
    }
}

/// The four corners of the visible viewport.
#[derive(Debug, Clone, Copy, PartialEq, uniffi::Record)]
pub struct CornerSet {
    pub top_left: LngLat,
    pub top_right: LngLat,
    pub bottom_right: LngLat,
    pub bottom_left: LngLat,
}

impl From<geo::CornerSet> for CornerSet {
    fn from(value: geo::CornerSet) -> Self {
        CornerSet {
            top_left: value.top_left.into(),
            top_right: value.top_right.into(),
            bottom_right: value.bottom_right.into(),
            bottom_left: value.bottom_left.into(),
        }
    }
}

/// Raw init event payload. Fields the host left unset stay `None`, which
/// forces the validation step before a map view can exist.
#[derive(Debug, Clone, Copy, PartialEq, uniffi::Record)]
pub struct MapInitParams {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub zoom: Option<u8>,
}

#[derive(Debug)]
pub(crate) struct ValidInit {
    pub center: geo::LngLat,
    pub zoom: u8,
}

impl MapInitParams {
    /// Either every field is present, or the names of the missing ones.
    pub(crate) fn validate(&self) -> Result<ValidInit, Vec<&'static str>> {
        if let (Some(lat), Some(lng), Some(zoom)) = (self.lat, self.lng, self.zoom) {
            return Ok(ValidInit {
                center: geo::LngLat::new(lng, lat),
                zoom,
            });
        }

        let mut missing = Vec::new();
        if self.lat.is_none() {
            missing.push("lat");
        }
        if self.lng.is_none() {
            missing.push("lng");
        }
        if self.zoom.is_none() {
            missing.push("zoom");
        }
        Err(missing)
    }
}

/// Shape tool that produced a completed draw event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum ShapeKind {
    Polygon,
    Polyline,
    Rectangle,
    Circle,
    Marker,
    CircleMarker,
}

impl From<ShapeKind> for shape::ShapeKind {
    fn from(value: ShapeKind) -> Self {
        match value {
            ShapeKind::Polygon => shape::ShapeKind::Polygon,
            ShapeKind::Polyline => shape::ShapeKind::Polyline,
            ShapeKind::Rectangle => shape::ShapeKind::Rectangle,
            ShapeKind::Circle => shape::ShapeKind::Circle,
            ShapeKind::Marker => shape::ShapeKind::Marker,
            ShapeKind::CircleMarker => shape::ShapeKind::CircleMarker,
        }
    }
}
