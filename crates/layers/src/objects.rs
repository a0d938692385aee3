use foundation::LatLng;
use geojson::{Feature, FeatureCollection};
use serde_json::Value as JsonValue;

use crate::labels::compact_count;
use crate::vector::numeric;

pub const CLUSTER_ICON_SIZE_PX: [u32; 2] = [35, 35];
pub const CLUSTER_ICON_CLASS: &str = "cluster-icon";

/// HTML icon drawn for an aggregated cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct DivIcon {
    pub size_px: [u32; 2],
    pub class_name: &'static str,
    pub html: String,
}

impl DivIcon {
    pub fn cluster(size: f64) -> Self {
        Self {
            size_px: CLUSTER_ICON_SIZE_PX,
            class_name: CLUSTER_ICON_CLASS,
            html: format!(r#"<span class="cluster-label">{}</span>"#, compact_count(size)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MarkerKind {
    /// A single record, shown with the default icon and a profile popup.
    Subject {
        subject_id: String,
        popup_html: String,
    },
    /// Several records; clicking zooms in and re-aggregates.
    Cluster { size: f64, icon: DivIcon },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: LatLng,
    pub kind: MarkerKind,
}

impl Marker {
    pub fn is_cluster(&self) -> bool {
        matches!(self.kind, MarkerKind::Cluster { .. })
    }
}

/// Point markers built from a cluster feature collection.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ObjectsLayer {
    pub markers: Vec<Marker>,
}

impl ObjectsLayer {
    pub fn clusters(collection: &FeatureCollection, source_key: &str) -> Self {
        let markers = collection
            .features
            .iter()
            .filter_map(|feature| cluster_marker(feature, source_key))
            .collect();
        Self { markers }
    }

    pub fn clusters_iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(|m| m.is_cluster())
    }
}

fn cluster_marker(feature: &Feature, source_key: &str) -> Option<Marker> {
    let position = point_position(feature)?;
    let size = feature.property("size").and_then(numeric).unwrap_or(0.0);

    let kind = if size <= 1.0 {
        let subject_id = feature
            .property("subject_id")
            .and_then(subject_id_text)
            .unwrap_or_default();
        MarkerKind::Subject {
            popup_html: profile_popup(source_key, &subject_id),
            subject_id,
        }
    } else {
        MarkerKind::Cluster {
            size,
            icon: DivIcon::cluster(size),
        }
    };
    Some(Marker { position, kind })
}

pub fn profile_popup(source_key: &str, subject_id: &str) -> String {
    format!(
        r##"Person ID: <a href="#/profiles/{source_key}/{subject_id}">{subject_id}</a>"##
    )
}

// GeoJSON positions are [lng, lat].
fn point_position(feature: &Feature) -> Option<LatLng> {
    let geometry = feature.geometry.as_ref()?;
    match &geometry.value {
        geojson::Value::Point(pos) => Some(LatLng::new(*pos.get(1)?, *pos.first()?)),
        _ => None,
    }
}

fn subject_id_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
