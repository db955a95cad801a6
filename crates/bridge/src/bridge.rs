//! The bridge between the map view and the host application.
//!
//! Entirely event-driven: the host fires `map_init` once, the map UI feeds
//! draw completions and pan/zoom settles, and every outbound message goes
//! through the host handle without blocking, retrying, or returning a value.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, info, warn};

use skywatch_core::geo;
use skywatch_core::map::tile::TileSource;
use skywatch_core::map::view::MapView;
use skywatch_core::shape::{self, DrawToolConfig, DrawnShape, ShapeError};

use crate::host::{CornerSink, HostHandle, LogSink, PolygonSink};
use crate::types::{CornerSet, LngLat, MapInitParams, ShapeKind};

enum BridgeState {
    Uninitialized,
    Ready(MapView),
}

/// Mediates between the map UI and the host channel. One instance per page.
#[derive(uniffi::Object)]
pub struct MapBridge {
    host: HostHandle,
    state: Mutex<BridgeState>,
}

#[uniffi::export]
impl MapBridge {
    /// Complete the channel handshake. Capabilities the host did not
    /// register stay `None`; a host with none at all leaves the bridge
    /// inert, which is a valid terminal mode rather than an error.
    #[uniffi::constructor]
    pub fn new(
        log: Option<Arc<dyn LogSink>>,
        polygons: Option<Arc<dyn PolygonSink>>,
        corners: Option<Arc<dyn CornerSink>>,
    ) -> Self {
        let host = HostHandle::new(log, polygons, corners);
        if host.is_absent() {
            warn!("no host channel available; map bridge is inert");
        } else {
            host.log("map initialization complete");
        }

        Self {
            host,
            state: Mutex::new(BridgeState::Uninitialized),
        }
    }

    /// The host's one init event. Missing parameters abort this attempt and
    /// leave the bridge uninitialized; there is no retry.
    pub fn map_init(&self, params: MapInitParams) {
        if self.host.is_absent() {
            warn!("ignoring map init; bridge is inert");
            return;
        }

        let corners = {
            let mut state = self.state();
            if let BridgeState::Ready(_) = *state {
                warn!("map already initialized; repeat init event ignored");
                return;
            }

            let valid = match params.validate() {
                Ok(valid) => valid,
                Err(missing) => {
                    error!(?missing, "map init aborted: parameters undefined");
                    return;
                }
            };

            let view = MapView::new(
                valid.center,
                valid.zoom,
                TileSource::local(),
                DrawToolConfig::polygon_only(),
            );
            info!(
                lat = valid.center.lat,
                lng = valid.center.lng,
                zoom = view.zoom(),
                "map view created"
            );

            let corners = view.corners();
            *state = BridgeState::Ready(view);
            corners
        };

        // initial corner notification, before any pan or zoom
        self.send_corner_update(corners);
    }

    /// A finished draw from the map's draw control. Any failure here is
    /// logged and contained; the next draw starts clean.
    pub fn draw_completed(&self, kind: ShapeKind, vertices: Vec<LngLat>) {
        let geojson = {
            let mut state = self.state();
            let BridgeState::Ready(view) = &mut *state else {
                warn!("draw event before map init; dropped");
                return;
            };

            match process_draw(view, kind, vertices) {
                Ok(geojson) => geojson,
                Err(error) => {
                    error!(%error, "failed to handle draw event; shape dropped");
                    return;
                }
            }
        };

        debug!(%geojson, "forwarding drawn polygon to host");
        self.host.send_polygon(&geojson);
    }

    /// Pan settled on a new center.
    pub fn pan_ended(&self, center: LngLat) {
        let Some(corners) = self.update_view(|view| view.set_center(center.into())) else {
            debug!("pan event before map init; ignored");
            return;
        };
        self.send_corner_update(corners);
    }

    /// Zoom settled on a new level; bounded by the tile source range.
    pub fn zoom_ended(&self, zoom: u8) {
        let Some(corners) = self.update_view(|view| view.set_zoom(zoom)) else {
            debug!("zoom event before map init; ignored");
            return;
        };
        self.send_corner_update(corners);
    }

    /// The embedding page resized the map canvas.
    pub fn viewport_resized(&self, width: u32, height: u32) {
        let Some(corners) =
            self.update_view(|view| view.resize(geo::ViewportSize::new(width, height)))
        else {
            debug!("resize event before map init; ignored");
            return;
        };
        self.send_corner_update(corners);
    }

    /// Pull-style corner query; `None` until the map view exists.
    pub fn corner_coordinates(&self) -> Option<CornerSet> {
        match &*self.state() {
            BridgeState::Ready(view) => Some(view.corners().into()),
            BridgeState::Uninitialized => None,
        }
    }

    /// Size of the drawn-items layer retained for display.
    pub fn drawn_shape_count(&self) -> u32 {
        match &*self.state() {
            BridgeState::Ready(view) => view.drawn_items().len() as u32,
            BridgeState::Uninitialized => 0,
        }
    }
}

impl MapBridge {
    fn state(&self) -> MutexGuard<'_, BridgeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply a view mutation and hand back the fresh corners, or `None`
    /// when no view exists yet.
    fn update_view(&self, apply: impl FnOnce(&mut MapView)) -> Option<geo::CornerSet> {
        let mut state = self.state();
        let BridgeState::Ready(view) = &mut *state else {
            return None;
        };
        apply(view);
        Some(view.corners())
    }

    fn send_corner_update(&self, corners: geo::CornerSet) {
        debug!(?corners, "viewport corners changed");
        self.host.send_corners(corners.into());
    }
}

fn process_draw(view: &mut MapView, kind: ShapeKind, vertices: Vec<LngLat>) -> eyre::Result<String> {
    let kind = shape::ShapeKind::from(kind);
    if !view.draw_tool().allows(kind) {
        return Err(ShapeError::DisabledKind(kind).into());
    }

    let ring = vertices.into_iter().map(geo::LngLat::from).collect();
    let shape = DrawnShape::polygon(ring)?;
    view.add_drawn(shape.clone());
    Ok(shape.to_geojson_string()?)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use geojson::{GeoJson, Value};

    use super::*;

    #[derive(Default)]
    struct LogRecorder {
        messages: Mutex<Vec<String>>,
    }

    impl LogSink for LogRecorder {
        fn log_message(&self, message: String) {
            self.messages.lock().unwrap().push(message);
        }
    }

    #[derive(Default)]
    struct PolygonRecorder {
        payloads: Mutex<Vec<String>>,
    }

    impl PolygonSink for PolygonRecorder {
        fn polygon_drawn(&self, geojson: String) {
            self.payloads.lock().unwrap().push(geojson);
        }
    }

    #[derive(Default)]
    struct CornerRecorder {
        payloads: Mutex<Vec<CornerSet>>,
    }

    impl CornerSink for CornerRecorder {
        fn corners_changed(&self, corners: CornerSet) {
            self.payloads.lock().unwrap().push(corners);
        }
    }

    struct TestHost {
        log: Arc<LogRecorder>,
        polygons: Arc<PolygonRecorder>,
        corners: Arc<CornerRecorder>,
        bridge: MapBridge,
    }

    fn connected_bridge() -> TestHost {
        let log = Arc::new(LogRecorder::default());
        let polygons = Arc::new(PolygonRecorder::default());
        let corners = Arc::new(CornerRecorder::default());
        let bridge = MapBridge::new(
            Some(log.clone()),
            Some(polygons.clone()),
            Some(corners.clone()),
        );
        TestHost {
            log,
            polygons,
            corners,
            bridge,
        }
    }

    fn valid_init() -> MapInitParams {
        MapInitParams {
            lat: Some(30.5728),
            lng: Some(114.3055),
            zoom: Some(13),
        }
    }

    fn triangle() -> Vec<LngLat> {
        vec![
            LngLat {
                lng: 114.30,
                lat: 30.57,
            },
            LngLat {
                lng: 114.32,
                lat: 30.57,
            },
            LngLat {
                lng: 114.31,
                lat: 30.59,
            },
        ]
    }

    #[test]
    fn handshake_logs_once() {
        let host = connected_bridge();
        assert_eq!(
            host.log.messages.lock().unwrap().as_slice(),
            ["map initialization complete"]
        );
    }

    #[test]
    fn absent_host_leaves_bridge_inert() {
        let bridge = MapBridge::new(None, None, None);

        bridge.map_init(valid_init());

        assert_eq!(bridge.corner_coordinates(), None);
        assert_eq!(bridge.drawn_shape_count(), 0);
    }

    #[test]
    fn init_rejects_missing_parameters() {
        for params in [
            MapInitParams {
                lat: None,
                ..valid_init()
            },
            MapInitParams {
                lng: None,
                ..valid_init()
            },
            MapInitParams {
                zoom: None,
                ..valid_init()
            },
        ] {
            let host = connected_bridge();
            host.bridge.map_init(params);

            assert_eq!(host.bridge.corner_coordinates(), None);
            assert!(host.corners.payloads.lock().unwrap().is_empty());
        }
    }

    #[test]
    fn valid_init_creates_view_and_sends_corners() {
        let host = connected_bridge();
        host.bridge.map_init(valid_init());

        let queried = host.bridge.corner_coordinates().expect("view exists");
        let sent = host.corners.payloads.lock().unwrap();
        assert_eq!(sent.as_slice(), [queried]);

        // viewport straddles the init center
        assert!(queried.top_left.lng < 114.3055);
        assert!(queried.top_right.lng > 114.3055);
        assert!(queried.bottom_left.lat < 30.5728);
        assert!(queried.top_left.lat > 30.5728);
    }

    #[test]
    fn repeat_init_is_ignored() {
        let host = connected_bridge();
        host.bridge.map_init(valid_init());
        let first = host.bridge.corner_coordinates();

        host.bridge.map_init(MapInitParams {
            lat: Some(31.0),
            lng: Some(115.0),
            zoom: Some(12),
        });

        assert_eq!(host.bridge.corner_coordinates(), first);
        assert_eq!(host.corners.payloads.lock().unwrap().len(), 1);
    }

    #[test]
    fn corner_query_before_init_yields_nothing() {
        let host = connected_bridge();

        assert_eq!(host.bridge.corner_coordinates(), None);
        assert!(host.corners.payloads.lock().unwrap().is_empty());
    }

    #[test]
    fn events_before_init_are_dropped() {
        let host = connected_bridge();

        host.bridge.draw_completed(ShapeKind::Polygon, triangle());
        host.bridge.pan_ended(LngLat {
            lng: 114.0,
            lat: 30.0,
        });
        host.bridge.zoom_ended(13);

        assert!(host.polygons.payloads.lock().unwrap().is_empty());
        assert!(host.corners.payloads.lock().unwrap().is_empty());
    }

    #[test]
    fn completed_draw_reaches_host_as_geojson() {
        let host = connected_bridge();
        host.bridge.map_init(valid_init());

        host.bridge.draw_completed(ShapeKind::Polygon, triangle());

        let payloads = host.polygons.payloads.lock().unwrap();
        assert_eq!(payloads.len(), 1);
        assert_eq!(host.bridge.drawn_shape_count(), 1);

        let GeoJson::Feature(feature) = GeoJson::from_str(&payloads[0]).unwrap() else {
            panic!("expected a feature");
        };
        let Value::Polygon(rings) = feature.geometry.unwrap().value else {
            panic!("expected a polygon");
        };
        assert_eq!(rings[0].len(), 4);
        assert_eq!(rings[0][0], vec![114.30, 30.57]);
    }

    #[test]
    fn bad_draw_does_not_block_the_next_one() {
        let host = connected_bridge();
        host.bridge.map_init(valid_init());

        // two vertices cannot form a ring
        host.bridge.draw_completed(
            ShapeKind::Polygon,
            vec![
                LngLat {
                    lng: 114.30,
                    lat: 30.57,
                },
                LngLat {
                    lng: 114.32,
                    lat: 30.57,
                },
            ],
        );
        assert!(host.polygons.payloads.lock().unwrap().is_empty());
        assert_eq!(host.bridge.drawn_shape_count(), 0);

        host.bridge.draw_completed(ShapeKind::Polygon, triangle());
        assert_eq!(host.polygons.payloads.lock().unwrap().len(), 1);
        assert_eq!(host.bridge.drawn_shape_count(), 1);
    }

    #[test]
    fn non_polygon_tools_are_disabled() {
        let host = connected_bridge();
        host.bridge.map_init(valid_init());

        host.bridge.draw_completed(ShapeKind::Marker, triangle());

        assert!(host.polygons.payloads.lock().unwrap().is_empty());
        assert_eq!(host.bridge.drawn_shape_count(), 0);
    }

    #[test]
    fn missing_polygon_and_log_sinks_skip_silently() {
        let corners = Arc::new(CornerRecorder::default());
        let bridge = MapBridge::new(None, None, Some(corners.clone()));

        bridge.map_init(valid_init());
        bridge.draw_completed(ShapeKind::Polygon, triangle());

        // shape retained visually even though no host sink consumed it
        assert_eq!(bridge.drawn_shape_count(), 1);
        assert_eq!(corners.payloads.lock().unwrap().len(), 1);
    }

    #[test]
    fn missing_corner_sink_skips_without_error() {
        let log = Arc::new(LogRecorder::default());
        let polygons = Arc::new(PolygonRecorder::default());
        let bridge = MapBridge::new(Some(log), Some(polygons), None);

        bridge.map_init(valid_init());
        bridge.pan_ended(LngLat {
            lng: 114.0,
            lat: 30.0,
        });

        assert!(bridge.corner_coordinates().is_some());
    }

    #[test]
    fn notification_is_idempotent_without_view_changes() {
        let host = connected_bridge();
        host.bridge.map_init(valid_init());

        // settle events that do not move the view
        host.bridge.pan_ended(LngLat {
            lng: 114.3055,
            lat: 30.5728,
        });
        host.bridge.zoom_ended(13);

        let payloads = host.corners.payloads.lock().unwrap();
        assert_eq!(payloads.len(), 3);
        assert_eq!(payloads[0], payloads[1]);
        assert_eq!(payloads[1], payloads[2]);
    }

    #[test]
    fn pan_shifts_the_corner_set() {
        let host = connected_bridge();
        host.bridge.map_init(valid_init());

        host.bridge.pan_ended(LngLat {
            lng: 114.5,
            lat: 30.5728,
        });

        let payloads = host.corners.payloads.lock().unwrap();
        assert_eq!(payloads.len(), 2);
        assert!(payloads[1].top_left.lng > payloads[0].top_left.lng);
        assert_eq!(payloads[1].top_left.lat, payloads[0].top_left.lat);
    }

    #[test]
    fn zoom_out_widens_the_viewport() {
        let host = connected_bridge();
        host.bridge.map_init(valid_init());

        // 11 clamps to the source minimum of 12
        host.bridge.zoom_ended(11);

        let payloads = host.corners.payloads.lock().unwrap();
        let span_before = payloads[0].top_right.lng - payloads[0].top_left.lng;
        let span_after = payloads[1].top_right.lng - payloads[1].top_left.lng;
        assert!(span_after > span_before);
    }

    #[test]
    fn resize_widens_the_viewport() {
        let host = connected_bridge();
        host.bridge.map_init(valid_init());

        host.bridge.viewport_resized(2048, 768);

        let payloads = host.corners.payloads.lock().unwrap();
        let span_before = payloads[0].top_right.lng - payloads[0].top_left.lng;
        let span_after = payloads[1].top_right.lng - payloads[1].top_left.lng;
        assert!(span_after > span_before);
    }
}
