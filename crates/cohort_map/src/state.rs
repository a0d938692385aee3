/// Cohort and source whose geodata the map shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CohortSelection {
    pub cohort_id: i64,
    pub source_key: String,
}

impl CohortSelection {
    pub fn new(cohort_id: i64, source_key: impl Into<String>) -> Self {
        Self {
            cohort_id,
            source_key: source_key.into(),
        }
    }
}

/// Where the controller is for the current selection.
///
/// ```text
/// Idle -> Checking -> NoGeodata
///                  -> BoundsLoading -> Rendered <-> Loading
/// ```
///
/// A new selection returns to `Idle`. A failed operation settles back to
/// `Rendered` when a surface exists, `Idle` otherwise.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum MapPhase {
    #[default]
    Idle,
    Checking,
    NoGeodata,
    BoundsLoading,
    Rendered,
    Loading,
}

impl MapPhase {
    pub fn is_loading(self) -> bool {
        matches!(
            self,
            MapPhase::Checking | MapPhase::BoundsLoading | MapPhase::Loading
        )
    }

    pub fn is_no_geodata(self) -> bool {
        self == MapPhase::NoGeodata
    }
}

/// Identifies the most recently started operation.
///
/// Every refresh, load and re-selection takes a fresh token; a fetch whose
/// token is no longer current when it resolves is discarded.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestToken(pub u64);

impl RequestToken {
    pub fn next(self) -> Self {
        RequestToken(self.0 + 1)
    }
}

/// Old and new phase of a transition, for observer notification.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PhaseChange {
    pub before: MapPhase,
    pub after: MapPhase,
}

impl PhaseChange {
    pub fn loading_changed(&self) -> Option<bool> {
        let now = self.after.is_loading();
        (self.before.is_loading() != now).then_some(now)
    }

    pub fn no_geodata_changed(&self) -> Option<bool> {
        let now = self.after.is_no_geodata();
        (self.before.is_no_geodata() != now).then_some(now)
    }
}
