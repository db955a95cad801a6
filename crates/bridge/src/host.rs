//! The host side of the channel, reduced to three optional capabilities.
//!
//! The host registers whichever sinks it implements; every outbound call is
//! best-effort and fire-and-forget. A handle with no capabilities at all is
//! how "no host environment" presents itself to the bridge.

use std::sync::Arc;

use tracing::warn;

use crate::types::CornerSet;

/// Diagnostic text messages.
#[uniffi::export(with_foreign)]
pub trait LogSink: Send + Sync {
    fn log_message(&self, message: String);
}

/// Serialized GeoJSON for each completed user polygon.
#[uniffi::export(with_foreign)]
pub trait PolygonSink: Send + Sync {
    fn polygon_drawn(&self, geojson: String);
}

/// Viewport corner updates after init and every pan/zoom settle.
#[uniffi::export(with_foreign)]
pub trait CornerSink: Send + Sync {
    fn corners_changed(&self, corners: CornerSet);
}

pub(crate) struct HostHandle {
    log: Option<Arc<dyn LogSink>>,
    polygons: Option<Arc<dyn PolygonSink>>,
    corners: Option<Arc<dyn CornerSink>>,
}

impl HostHandle {
    pub fn new(
        log: Option<Arc<dyn LogSink>>,
        polygons: Option<Arc<dyn PolygonSink>>,
        corners: Option<Arc<dyn CornerSink>>,
    ) -> Self {
        Self {
            log,
            polygons,
            corners,
        }
    }

    /// No capability present at all; the channel never came up.
    pub fn is_absent(&self) -> bool {
        self.log.is_none() && self.polygons.is_none() && self.corners.is_none()
    }

    pub fn log(&self, message: &str) {
        if let Some(sink) = &self.log {
            sink.log_message(message.to_owned());
        }
    }

    pub fn send_polygon(&self, geojson: &str) {
        if let Some(sink) = &self.polygons {
            sink.polygon_drawn(geojson.to_owned());
        }
    }

    pub fn send_corners(&self, corners: CornerSet) {
        match &self.corners {
            Some(sink) => sink.corners_changed(corners),
            None => warn!("host corner sink not attached; dropping corner update"),
        }
    }
}
