use std::fmt;

use geojson::{Feature, GeoJson, Geometry, JsonObject, Value};

use crate::geo::LngLat;

/// Shape tools the draw control can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Polygon,
    Polyline,
    Rectangle,
    Circle,
    Marker,
    CircleMarker,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeKind::Polygon => "polygon",
            ShapeKind::Polyline => "polyline",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Marker => "marker",
            ShapeKind::CircleMarker => "circle marker",
        };
        f.write_str(name)
    }
}

/// Which tools the draw control exposes to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawToolConfig {
    pub polygon: bool,
    pub polyline: bool,
    pub rectangle: bool,
    pub circle: bool,
    pub marker: bool,
    pub circle_marker: bool,
}

impl DrawToolConfig {
    /// The deployed configuration: polygon creation only.
    pub fn polygon_only() -> Self {
        Self {
            polygon: true,
            polyline: false,
            rectangle: false,
            circle: false,
            marker: false,
            circle_marker: false,
        }
    }

    pub fn allows(&self, kind: ShapeKind) -> bool {
        match kind {
            ShapeKind::Polygon => self.polygon,
            ShapeKind::Polyline => self.polyline,
            ShapeKind::Rectangle => self.rectangle,
            ShapeKind::Circle => self.circle,
            ShapeKind::Marker => self.marker,
            ShapeKind::CircleMarker => self.circle_marker,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    #[error("draw tool does not offer {0} shapes")]
    DisabledKind(ShapeKind),
    #[error("polygon ring needs at least 3 vertices, got {0}")]
    DegenerateRing(usize),
    #[error("non-finite coordinate at ring vertex {index}")]
    NonFiniteCoordinate { index: usize },
    #[error("geojson serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Immutable snapshot of one completed user polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnShape {
    polygon: geo::Polygon<f64>,
}

impl DrawnShape {
    /// Build a polygon from the drawn vertex ring. The exterior ring is
    /// closed on construction.
    pub fn polygon(ring: Vec<LngLat>) -> Result<Self, ShapeError> {
        if ring.len() < 3 {
            return Err(ShapeError::DegenerateRing(ring.len()));
        }
        if let Some(index) = ring.iter().position(|v| !v.is_finite()) {
            return Err(ShapeError::NonFiniteCoordinate { index });
        }

        let exterior = geo::LineString::new(ring.into_iter().map(geo::Coord::from).collect());
        Ok(Self {
            // Polygon::new closes an open exterior ring
            polygon: geo::Polygon::new(exterior, vec![]),
        })
    }

    /// Number of vertices in the closed exterior ring.
    pub fn vertex_count(&self) -> usize {
        self.polygon.exterior().0.len()
    }

    /// Serialize as a GeoJSON `Feature` with `[lng, lat]` positions and an
    /// empty properties object, the interchange form the host consumes.
    pub fn to_geojson_string(&self) -> Result<String, ShapeError> {
        let exterior: Vec<Vec<f64>> = self
            .polygon
            .exterior()
            .0
            .iter()
            .map(|c| vec![c.x, c.y])
            .collect();

        let feature = Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Polygon(vec![exterior]))),
            id: None,
            properties: Some(JsonObject::new()),
            foreign_members: None,
        };
        Ok(serde_json::to_string(&GeoJson::Feature(feature))?)
    }
}
