use geojson::{Feature, FeatureCollection, Geometry};
use serde_json::Value as JsonValue;

use crate::symbology::RegionStyle;

/// One filled density region.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRegion {
    pub geometry: Geometry,
    pub level: f64,
    pub style: RegionStyle,
}

/// Density regions built from a single feature collection.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct VectorLayer {
    pub regions: Vec<StyledRegion>,
}

impl VectorLayer {
    pub fn density(collection: &FeatureCollection) -> Self {
        let regions = collection
            .features
            .iter()
            .filter_map(|feature| {
                // Features without geometry have nothing to draw.
                let geometry = feature.geometry.clone()?;
                let level = feature_level(feature);
                Some(StyledRegion {
                    geometry,
                    level,
                    style: RegionStyle::density(level),
                })
            })
            .collect();
        Self { regions }
    }
}

/// Reads the `level` property, accepting numbers and numeric strings.
///
/// Anything else yields NaN, which the color scale treats as empty.
pub fn feature_level(feature: &Feature) -> f64 {
    match feature.property("level") {
        Some(value) => numeric(value).unwrap_or(f64::NAN),
        None => f64::NAN,
    }
}

pub(crate) fn numeric(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{VectorLayer, feature_level};
    use crate::symbology::TRANSPARENT;
    use geojson::FeatureCollection;
    use pretty_assertions::assert_eq;

    fn collection(json: &str) -> FeatureCollection {
        serde_json::from_str(json).unwrap()
    }

    const SQUARE: &str = r#"{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,1],[0,0]]]}"#;

    #[test]
    fn styles_each_region_by_level() {
        let fc = collection(&format!(
            r#"{{"type":"FeatureCollection","features":[
                {{"type":"Feature","geometry":{SQUARE},"properties":{{"level":150}}}},
                {{"type":"Feature","geometry":{SQUARE},"properties":{{"level":"0.5"}}}}
            ]}}"#
        ));
        let layer = VectorLayer::density(&fc);
        assert_eq!(layer.regions.len(), 2);
        assert_eq!(layer.regions[0].style.fill_color, "#E31A1C");
        assert_eq!(layer.regions[1].level, 0.5);
        assert_eq!(layer.regions[1].style.fill_color, "#FEB24C");
    }

    #[test]
    fn missing_or_garbage_level_is_transparent() {
        let fc = collection(&format!(
            r#"{{"type":"FeatureCollection","features":[
                {{"type":"Feature","geometry":{SQUARE},"properties":{{"level":"n/a"}}}},
                {{"type":"Feature","geometry":{SQUARE},"properties":{{}}}}
            ]}}"#
        ));
        assert!(feature_level(&fc.features[0]).is_nan());
        let layer = VectorLayer::density(&fc);
        assert!(layer.regions.iter().all(|r| r.style.fill_color == TRANSPARENT));
    }

    #[test]
    fn skips_features_without_geometry() {
        let fc = collection(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":null,"properties":{"level":3}}
            ]}"#,
        );
        assert!(VectorLayer::density(&fc).regions.is_empty());
    }
}
