use crate::objects::ObjectsLayer;
use crate::raster::RasterLayer;
use crate::vector::VectorLayer;

/// Handle assigned by a rendering surface when a layer is added.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(pub u64);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Tiles,
    Density,
    Clusters,
}

/// Everything the controller can place on a rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub enum MapLayer {
    Tiles(RasterLayer),
    Density(VectorLayer),
    Clusters(ObjectsLayer),
}

impl MapLayer {
    pub fn kind(&self) -> LayerKind {
        match self {
            MapLayer::Tiles(_) => LayerKind::Tiles,
            MapLayer::Density(_) => LayerKind::Density,
            MapLayer::Clusters(_) => LayerKind::Clusters,
        }
    }

    /// Number of drawn items; tiles count as one.
    pub fn item_count(&self) -> usize {
        match self {
            MapLayer::Tiles(_) => 1,
            MapLayer::Density(layer) => layer.regions.len(),
            MapLayer::Clusters(layer) => layer.markers.len(),
        }
    }
}
