use std::sync::Arc;

use parking_lot::Mutex;

/// Non-blocking user notice raised by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// A density or cluster fetch returned zero features.
    NoGeoLocationData,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::NoGeoLocationData => "No geo-location data available",
        }
    }
}

/// Receives state the hosting view renders: the loading indicator, the
/// "source has no geodata" banner and notices.
///
/// Called synchronously from the controller, never while it holds its lock.
pub trait MapObserver: Send + Sync {
    fn loading_changed(&self, _loading: bool) {}
    fn no_geodata_changed(&self, _no_geodata: bool) {}
    fn notice(&self, _notice: Notice) {}
}

impl<T: MapObserver + ?Sized> MapObserver for Arc<T> {
    fn loading_changed(&self, loading: bool) {
        (**self).loading_changed(loading)
    }
    fn no_geodata_changed(&self, no_geodata: bool) {
        (**self).no_geodata_changed(no_geodata)
    }
    fn notice(&self, notice: Notice) {
        (**self).notice(notice)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapEvent {
    LoadingChanged(bool),
    NoGeodataChanged(bool),
    Notice(Notice),
}

/// Observer that records every event in order until drained.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<MapEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<MapEvent> {
        self.events.lock().clone()
    }

    pub fn drain(&self) -> Vec<MapEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                MapEvent::Notice(n) => Some(*n),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: MapEvent) {
        self.events.lock().push(event);
    }
}

impl MapObserver for EventLog {
    fn loading_changed(&self, loading: bool) {
        self.push(MapEvent::LoadingChanged(loading));
    }
    fn no_geodata_changed(&self, no_geodata: bool) {
        self.push(MapEvent::NoGeodataChanged(no_geodata));
    }
    fn notice(&self, notice: Notice) {
        self.push(MapEvent::Notice(notice));
    }
}
