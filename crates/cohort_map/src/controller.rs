use std::collections::BTreeSet;
use std::sync::Arc;

use foundation::{BoundingBox, LatLng, Padding};
use geojson::FeatureCollection;
use layers::objects::ObjectsLayer;
use layers::raster::RasterLayer;
use layers::vector::VectorLayer;
use layers::{LayerId, MapLayer};
use parking_lot::Mutex;
use tracing::{debug, info, warn};
use transport::{FeatureKind, GisEndpoints, GisFetch, query_as};

use crate::config::{FIT_PADDING_PX, MapOptions};
use crate::error::{MapError, Result};
use crate::events::{MapObserver, Notice};
use crate::state::{CohortSelection, MapPhase, PhaseChange, RequestToken};
use crate::surface::RenderSurface;

type SurfaceFactory<S> = Box<dyn Fn(&str) -> S + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// The viewport was fitted to the cohort. `first_fit` is true when this
    /// call created the surface.
    Fitted {
        bounds: BoundingBox,
        first_fit: bool,
    },
    NoGeodata,
    /// A newer operation started before this one resolved.
    Superseded,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Rendered { layer: LayerId, features: usize },
    /// Zero features: layers were cleared and a notice raised.
    Empty,
    Superseded,
}

struct Inner<S> {
    selection: Option<CohortSelection>,
    phase: MapPhase,
    token: RequestToken,
    surface: Option<S>,
    basemap: Option<LayerId>,
    current_layers: BTreeSet<LayerId>,
}

impl<S: RenderSurface> Inner<S> {
    fn next_token(&mut self) -> RequestToken {
        self.token = self.token.next();
        self.token
    }

    fn set_phase(&mut self, phase: MapPhase) -> PhaseChange {
        let before = std::mem::replace(&mut self.phase, phase);
        PhaseChange {
            before,
            after: phase,
        }
    }

    /// Phase to rest in once nothing is in flight.
    fn settled_phase(&self) -> MapPhase {
        if self.surface.is_some() {
            MapPhase::Rendered
        } else {
            MapPhase::Idle
        }
    }

    // Removes everything on the surface except the basemap, including layers
    // the controller did not add itself.
    fn clear_layers(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            for id in surface.layer_ids() {
                if Some(id) != self.basemap {
                    surface.remove_layer(id);
                }
            }
        }
        self.current_layers.clear();
    }
}

struct Fetched {
    token: RequestToken,
    selection: CohortSelection,
    collection: FeatureCollection,
}

/// Owns one map view: selection, phase, surface and feature layers.
///
/// All methods take `&self`; the internal lock is never held across a fetch,
/// so overlapping calls are allowed and resolved by `RequestToken`: only the
/// most recently started operation may change layers, viewport or phase.
pub struct CohortMap<S> {
    options: MapOptions,
    endpoints: GisEndpoints,
    fetch: Arc<dyn GisFetch>,
    observer: Arc<dyn MapObserver>,
    surface_factory: SurfaceFactory<S>,
    inner: Mutex<Inner<S>>,
}

impl<S: RenderSurface> CohortMap<S> {
    /// Binds collaborators. No surface is created until the first
    /// successful `refresh`.
    pub fn configure(
        options: MapOptions,
        fetch: Arc<dyn GisFetch>,
        observer: Arc<dyn MapObserver>,
        surface_factory: impl Fn(&str) -> S + Send + Sync + 'static,
    ) -> Self {
        Self {
            endpoints: GisEndpoints::new(options.service_url.clone()),
            options,
            fetch,
            observer,
            surface_factory: Box::new(surface_factory),
            inner: Mutex::new(Inner {
                selection: None,
                phase: MapPhase::Idle,
                token: RequestToken::default(),
                surface: None,
                basemap: None,
                current_layers: BTreeSet::new(),
            }),
        }
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Selects the cohort and source to show. Fetches nothing, but any
    /// operation still in flight for the previous selection is discarded.
    pub fn set_params(&self, cohort_id: i64, source_key: impl Into<String>) {
        let selection = CohortSelection::new(cohort_id, source_key);
        debug!(?selection, "cohort selected");
        let change = {
            let mut inner = self.inner.lock();
            inner.selection = Some(selection);
            inner.next_token();
            inner.set_phase(MapPhase::Idle)
        };
        self.notify(change);
    }

    pub fn selection(&self) -> Option<CohortSelection> {
        self.inner.lock().selection.clone()
    }

    pub fn phase(&self) -> MapPhase {
        self.inner.lock().phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase().is_loading()
    }

    pub fn has_no_geodata(&self) -> bool {
        self.phase().is_no_geodata()
    }

    pub fn is_initiated(&self) -> bool {
        self.inner.lock().surface.is_some()
    }

    pub fn basemap_layer(&self) -> Option<LayerId> {
        self.inner.lock().basemap
    }

    /// Feature layers added by the controller; never includes the basemap.
    pub fn current_layers(&self) -> Vec<LayerId> {
        self.inner.lock().current_layers.iter().copied().collect()
    }

    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R> {
        self.inner.lock().surface.as_ref().map(f)
    }

    /// For viewport interaction by the host (pan, resize). Layers belong to
    /// the controller and should not be changed here.
    pub fn with_surface_mut<R>(&self, f: impl FnOnce(&mut S) -> R) -> Option<R> {
        self.inner.lock().surface.as_mut().map(f)
    }

    /// Checks the source for geodata, then fits the viewport to the
    /// cohort's bounds, creating the surface on first use.
    pub async fn refresh(&self) -> Result<RefreshOutcome> {
        let (token, selection, change) = {
            let mut inner = self.inner.lock();
            let selection = inner.selection.clone().ok_or(MapError::NoSelection)?;
            let token = inner.next_token();
            (token, selection, inner.set_phase(MapPhase::Checking))
        };
        self.notify(change);

        let result = self.run_refresh(token, &selection).await;
        if let Err(err) = &result {
            warn!(%err, cohort = selection.cohort_id, source = %selection.source_key, "refresh failed");
            self.settle(token);
        }
        result
    }

    async fn run_refresh(
        &self,
        token: RequestToken,
        selection: &CohortSelection,
    ) -> Result<RefreshOutcome> {
        let check_url = self.endpoints.source_check(&selection.source_key);
        let has_geodata = self.fetch.check_status(&check_url).await?;

        if !has_geodata {
            if !self.advance(token, MapPhase::NoGeodata) {
                return Ok(RefreshOutcome::Superseded);
            }
            info!(source = %selection.source_key, "source has no geodata");
            return Ok(RefreshOutcome::NoGeodata);
        }
        if !self.advance(token, MapPhase::BoundsLoading) {
            return Ok(RefreshOutcome::Superseded);
        }

        let bounds_url = self
            .endpoints
            .cohort_bounds(selection.cohort_id, &selection.source_key);
        let bounds: BoundingBox = query_as(self.fetch.as_ref(), &bounds_url).await?;
        if !bounds.is_well_formed() {
            return Err(MapError::InvalidPayload(format!(
                "cohort bounds {bounds:?}"
            )));
        }

        let (first_fit, change) = {
            let mut inner = self.inner.lock();
            if inner.token != token {
                debug!(?token, "discarding superseded cohort bounds");
                return Ok(RefreshOutcome::Superseded);
            }
            let first_fit = inner.surface.is_none();
            if first_fit {
                let mut surface = (self.surface_factory)(&self.options.container);
                let basemap = surface.add_layer(MapLayer::Tiles(RasterLayer::basemap(
                    &self.options.tile_url,
                )));
                inner.surface = Some(surface);
                inner.basemap = Some(basemap);
                info!(container = %self.options.container, "map initiated");
            }
            if let Some(surface) = inner.surface.as_mut() {
                surface.fit_bounds(bounds.to_corners(), Padding::uniform(FIT_PADDING_PX));
            }
            (first_fit, inner.set_phase(MapPhase::Rendered))
        };
        self.notify(change);

        Ok(RefreshOutcome::Fitted { bounds, first_fit })
    }

    /// Fetches density features for the visible window.
    pub async fn load_density_map(&self) -> Result<FeatureCollection> {
        Ok(self.load_features(FeatureKind::Density).await?.collection)
    }

    /// Fetches cluster features for the visible window.
    pub async fn load_clusters(&self) -> Result<FeatureCollection> {
        Ok(self.load_features(FeatureKind::Clusters).await?.collection)
    }

    async fn load_features(&self, kind: FeatureKind) -> Result<Fetched> {
        let (token, selection, url, change) = {
            let mut inner = self.inner.lock();
            let selection = inner.selection.clone().ok_or(MapError::NoSelection)?;
            let surface = inner.surface.as_ref().ok_or(MapError::NotInitiated)?;
            let viewport = BoundingBox::from_corners(&surface.bounds());
            let url = self.endpoints.features(
                kind,
                selection.cohort_id,
                &selection.source_key,
                &viewport,
            );
            let token = inner.next_token();
            (token, selection, url, inner.set_phase(MapPhase::Loading))
        };
        self.notify(change);

        debug!(%url, ?kind, "loading features");
        let result = query_as::<FeatureCollection>(self.fetch.as_ref(), &url).await;
        self.settle(token);

        let collection = result.inspect_err(|err| warn!(%err, ?kind, "feature load failed"))?;
        Ok(Fetched {
            token,
            selection,
            collection,
        })
    }

    /// Replaces feature layers with density regions for the visible window.
    pub async fn update_density_map(&self) -> Result<UpdateOutcome> {
        let fetched = self.load_features(FeatureKind::Density).await?;
        self.replace_layers(&fetched, || {
            MapLayer::Density(VectorLayer::density(&fetched.collection))
        })
    }

    /// Replaces feature layers with cluster markers for the visible window.
    pub async fn update_cluster_map(&self) -> Result<UpdateOutcome> {
        let fetched = self.load_features(FeatureKind::Clusters).await?;
        self.replace_layers(&fetched, || {
            MapLayer::Clusters(ObjectsLayer::clusters(
                &fetched.collection,
                &fetched.selection.source_key,
            ))
        })
    }

    /// Cluster click: zoom in one level centered on the cluster, then
    /// re-fetch clusters for the new window.
    pub async fn expand_cluster(&self, center: LatLng) -> Result<UpdateOutcome> {
        {
            let mut inner = self.inner.lock();
            let surface = inner.surface.as_mut().ok_or(MapError::NotInitiated)?;
            let zoom = surface.zoom() + 1.0;
            debug!(?center, zoom, "expanding cluster");
            surface.set_view(center, zoom);
        }
        self.update_cluster_map().await
    }

    /// Removes every layer except the basemap.
    pub fn clear_layers(&self) {
        self.inner.lock().clear_layers();
    }

    fn replace_layers(
        &self,
        fetched: &Fetched,
        build: impl FnOnce() -> MapLayer,
    ) -> Result<UpdateOutcome> {
        let features = fetched.collection.features.len();
        {
            let mut inner = self.inner.lock();
            if inner.token != fetched.token {
                debug!(token = ?fetched.token, "discarding superseded features");
                return Ok(UpdateOutcome::Superseded);
            }
            inner.clear_layers();

            if features > 0 {
                let surface = inner.surface.as_mut().ok_or(MapError::NotInitiated)?;
                let layer = surface.add_layer(build());
                inner.current_layers.insert(layer);
                return Ok(UpdateOutcome::Rendered { layer, features });
            }
        }

        info!(selection = ?fetched.selection, "no geo-location data in view");
        self.observer.notice(Notice::NoGeoLocationData);
        Ok(UpdateOutcome::Empty)
    }

    /// Moves to `phase` if `token` is still current.
    fn advance(&self, token: RequestToken, phase: MapPhase) -> bool {
        let change = {
            let mut inner = self.inner.lock();
            if inner.token != token {
                return false;
            }
            inner.set_phase(phase)
        };
        self.notify(change);
        true
    }

    /// Ends the operation holding `token`, on success or failure.
    fn settle(&self, token: RequestToken) {
        let change = {
            let mut inner = self.inner.lock();
            if inner.token != token {
                return;
            }
            let phase = inner.settled_phase();
            inner.set_phase(phase)
        };
        self.notify(change);
    }

    fn notify(&self, change: PhaseChange) {
        if let Some(loading) = change.loading_changed() {
            self.observer.loading_changed(loading);
        }
        if let Some(no_geodata) = change.no_geodata_changed() {
            self.observer.no_geodata_changed(no_geodata);
        }
    }
}
