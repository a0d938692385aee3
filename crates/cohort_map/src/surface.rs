use std::collections::BTreeMap;

use foundation::{LatLng, LatLngBounds, Padding};
use layers::{LayerId, MapLayer};

/// The viewport the controller draws on.
///
/// Implemented by the host's map engine. The controller is the only caller
/// that adds or removes layers; the host may move the viewport.
pub trait RenderSurface: Send {
    fn add_layer(&mut self, layer: MapLayer) -> LayerId;

    /// Returns false if `id` was not on the surface.
    fn remove_layer(&mut self, id: LayerId) -> bool;

    fn layer_ids(&self) -> Vec<LayerId>;

    /// Currently visible window.
    fn bounds(&self) -> LatLngBounds;

    fn fit_bounds(&mut self, bounds: LatLngBounds, padding: Padding);

    fn zoom(&self) -> f64;

    fn set_view(&mut self, center: LatLng, zoom: f64);
}

const WORLD: LatLngBounds = LatLngBounds::new(LatLng::new(-85.0, -180.0), LatLng::new(85.0, 180.0));

/// In-memory surface with no drawing.
///
/// The visible window is kept in degrees: fitting adopts the requested
/// bounds, and each zoom step halves the window around the new center.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    container: String,
    layers: BTreeMap<LayerId, MapLayer>,
    next_id: u64,
    bounds: LatLngBounds,
    zoom: f64,
    max_zoom: f64,
    last_fit: Option<(LatLngBounds, Padding)>,
}

impl HeadlessSurface {
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            layers: BTreeMap::new(),
            next_id: 1,
            bounds: WORLD,
            zoom: 0.0,
            max_zoom: layers::raster::BASEMAP_MAX_ZOOM as f64,
            last_fit: None,
        }
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn layer(&self, id: LayerId) -> Option<&MapLayer> {
        self.layers.get(&id)
    }

    pub fn layers(&self) -> impl Iterator<Item = (LayerId, &MapLayer)> {
        self.layers.iter().map(|(id, layer)| (*id, layer))
    }

    pub fn last_fit(&self) -> Option<(LatLngBounds, Padding)> {
        self.last_fit
    }

    /// Pans without changing zoom, as a user drag would.
    pub fn pan_to(&mut self, bounds: LatLngBounds) {
        self.bounds = bounds;
    }
}

impl RenderSurface for HeadlessSurface {
    fn add_layer(&mut self, layer: MapLayer) -> LayerId {
        if let MapLayer::Tiles(tiles) = &layer {
            self.max_zoom = tiles.max_zoom as f64;
        }
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers.insert(id, layer);
        id
    }

    fn remove_layer(&mut self, id: LayerId) -> bool {
        self.layers.remove(&id).is_some()
    }

    fn layer_ids(&self) -> Vec<LayerId> {
        self.layers.keys().copied().collect()
    }

    fn bounds(&self) -> LatLngBounds {
        self.bounds
    }

    fn fit_bounds(&mut self, bounds: LatLngBounds, padding: Padding) {
        let span = (bounds.north_east.lng - bounds.south_west.lng).abs().max(1e-9);
        self.zoom = (360.0 / span).log2().floor().clamp(0.0, self.max_zoom);
        self.bounds = bounds;
        self.last_fit = Some((bounds, padding));
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn set_view(&mut self, center: LatLng, zoom: f64) {
        let zoom = zoom.clamp(0.0, self.max_zoom);
        let scale = 2f64.powf(self.zoom - zoom);
        let half_lat = (self.bounds.north_east.lat - self.bounds.south_west.lat) / 2.0 * scale;
        let half_lng = (self.bounds.north_east.lng - self.bounds.south_west.lng) / 2.0 * scale;
        self.bounds = LatLngBounds::new(
            LatLng::new(center.lat - half_lat, center.lng - half_lng),
            LatLng::new(center.lat + half_lat, center.lng + half_lng),
        );
        self.zoom = zoom;
    }
}

#[cfg(test)]
mod tests {
    use super::{HeadlessSurface, RenderSurface};
    use foundation::{LatLng, LatLngBounds, Padding};
    use layers::MapLayer;
    use layers::raster::RasterLayer;
    use pretty_assertions::assert_eq;

    #[test]
    fn zooming_in_halves_window_around_center() {
        let mut s = HeadlessSurface::new("map");
        s.fit_bounds(
            LatLngBounds::new(LatLng::new(0.0, 0.0), LatLng::new(10.0, 20.0)),
            Padding::uniform(50.0),
        );
        let z = s.zoom();
        s.set_view(LatLng::new(4.0, 6.0), z + 1.0);
        assert_eq!(s.zoom(), z + 1.0);
        assert_eq!(
            s.bounds(),
            LatLngBounds::new(LatLng::new(1.5, 1.0), LatLng::new(6.5, 11.0))
        );
    }

    #[test]
    fn zoom_is_capped_by_basemap() {
        let mut s = HeadlessSurface::new("map");
        s.add_layer(MapLayer::Tiles(RasterLayer::basemap("http://t")));
        s.set_view(LatLng::new(0.0, 0.0), 40.0);
        assert_eq!(s.zoom(), 18.0);
    }

    #[test]
    fn layer_ids_are_unique() {
        let mut s = HeadlessSurface::new("map");
        let a = s.add_layer(MapLayer::Tiles(RasterLayer::basemap("http://t")));
        let b = s.add_layer(MapLayer::Tiles(RasterLayer::basemap("http://t")));
        assert_ne!(a, b);
        assert!(s.remove_layer(a));
        assert!(!s.remove_layer(a));
        assert_eq!(s.layer_ids(), vec![b]);
    }
}
