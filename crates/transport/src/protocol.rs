//! Endpoint paths and payloads of the cohort geodata API.
//!
//! - `GET {base}/source/check/{source}`: 200 when the source has geodata
//! - `GET {base}/cohort/{id}/bounds/{source}`: a `BoundingBox`
//! - `GET {base}/cohort/{id}/density/{source}?<bounds>`: FeatureCollection
//!   with a numeric `level` per feature
//! - `GET {base}/cohort/{id}/clusters/{source}?<bounds>`: FeatureCollection
//!   with `size`, and `subject_id` when `size <= 1`

use foundation::BoundingBox;

use crate::query::add_params;

/// The two feature layers the service aggregates per viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    Density,
    Clusters,
}

impl FeatureKind {
    pub fn path_segment(&self) -> &'static str {
        match self {
            FeatureKind::Density => "density",
            FeatureKind::Clusters => "clusters",
        }
    }
}

/// Builds URLs against one GIS service base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GisEndpoints {
    base: String,
}

impl GisEndpoints {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn source_check(&self, source_key: &str) -> String {
        format!("{}/source/check/{source_key}", self.base)
    }

    pub fn cohort_bounds(&self, cohort_id: i64, source_key: &str) -> String {
        format!("{}/cohort/{cohort_id}/bounds/{source_key}", self.base)
    }

    pub fn features(
        &self,
        kind: FeatureKind,
        cohort_id: i64,
        source_key: &str,
        bounds: &BoundingBox,
    ) -> String {
        let path = format!(
            "{}/cohort/{cohort_id}/{}/{source_key}",
            self.base,
            kind.path_segment()
        );
        add_params(&path, bounds.query_params())
    }
}
