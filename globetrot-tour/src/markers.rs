//! Marker presentation sync.
//!
//! Each location gets one persistent visual handle for the lifetime of the map
//! view. Sync only mutates a handle's highlight and swaps its click callback;
//! handles are never replaced, since map engines track marker position by
//! identity.
use std::fmt;
use std::rc::Rc;

use crate::tour::TourSnapshot;

/// Callback invoked when a marker is clicked.
pub type ClickHandler = Rc<dyn Fn()>;

/// Routes a marker click to manual selection of the given slug.
pub type SelectionDispatch = Rc<dyn Fn(&str)>;

/// Imperative handle onto one marker's visuals.
pub trait MarkerHandle {
    fn set_active(&mut self, active: bool);
    fn set_click_handler(&mut self, handler: ClickHandler);
}

struct MarkerEntry {
    slug: String,
    handle: Box<dyn MarkerHandle>,
    active: bool,
}

/// Owns the marker handles and reconciles them against tour snapshots.
pub struct MarkerSync {
    entries: Vec<MarkerEntry>,
    dispatch: SelectionDispatch,
}

impl Default for MarkerSync {
    fn default() -> Self {
        Self::new(|_| {})
    }
}

impl fmt::Debug for MarkerSync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkerSync")
            .field(
                "markers",
                &self.entries.iter().map(|e| e.slug.as_str()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl MarkerSync {
    pub fn new(dispatch: impl Fn(&str) + 'static) -> Self {
        Self {
            entries: Vec::new(),
            dispatch: Rc::new(dispatch),
        }
    }

    /// Take ownership of the handle for `slug`.
    ///
    /// A slug that already has a handle keeps the original one and the new
    /// handle is dropped; returns `false` in that case.
    pub fn register(&mut self, slug: impl Into<String>, handle: Box<dyn MarkerHandle>) -> bool {
        let slug = slug.into();
        if self.entries.iter().any(|entry| entry.slug == slug) {
            log::warn!("marker for `{slug}` already registered; keeping the existing handle");
            return false;
        }
        self.entries.push(MarkerEntry {
            slug,
            handle,
            active: false,
        });
        true
    }

    /// Restyle every handle for `snapshot` and rebind its click target.
    pub fn sync(&mut self, snapshot: &TourSnapshot) {
        let active_slug = snapshot.active_slug();
        for entry in &mut self.entries {
            let active = active_slug == Some(entry.slug.as_str());
            entry.handle.set_active(active);
            entry.active = active;

            let dispatch = Rc::clone(&self.dispatch);
            let slug = entry.slug.clone();
            entry
                .handle
                .set_click_handler(Rc::new(move || dispatch(&slug)));
        }
    }

    /// Slug currently rendered as active, if any.
    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.active)
            .map(|entry| entry.slug.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Release all handles on teardown.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::MapLayer;
    use crate::testing::{RecordingMarker, location_at};
    use crate::tour::TourPhase;
    use std::cell::RefCell;

    fn snapshot_showing(slug: &str) -> TourSnapshot {
        TourSnapshot {
            phase: TourPhase::Showing,
            current_index: Some(0),
            target: Some(location_at(slug, 0.0, 0.0)),
            selected: Some(location_at(slug, 0.0, 0.0)),
            paused: false,
            user_interacting: false,
            started: true,
            layer: MapLayer::Satellite,
            tour_len: 2,
        }
    }

    #[test]
    fn sync_highlights_only_the_active_marker() {
        let mut sync = MarkerSync::default();
        let a = RecordingMarker::default();
        let b = RecordingMarker::default();
        assert!(sync.register("a", Box::new(a.clone())));
        assert!(sync.register("b", Box::new(b.clone())));

        sync.sync(&snapshot_showing("b"));
        assert!(!a.is_active());
        assert!(b.is_active());
        assert_eq!(sync.active(), Some("b"));

        sync.sync(&snapshot_showing("a"));
        assert!(a.is_active());
        assert!(!b.is_active());
    }

    #[test]
    fn click_handlers_dispatch_their_own_slug() {
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&clicks);
        let mut sync = MarkerSync::new(move |slug| sink.borrow_mut().push(slug.to_string()));
        let a = RecordingMarker::default();
        let b = RecordingMarker::default();
        sync.register("a", Box::new(a.clone()));
        sync.register("b", Box::new(b.clone()));
        sync.sync(&snapshot_showing("a"));

        b.click();
        a.click();
        assert_eq!(*clicks.borrow(), ["b", "a"]);
        assert_eq!(a.handler_swaps(), 1);
    }

    #[test]
    fn duplicate_registration_keeps_original_handle() {
        let mut sync = MarkerSync::default();
        let original = RecordingMarker::default();
        let impostor = RecordingMarker::default();
        assert!(sync.register("a", Box::new(original.clone())));
        assert!(!sync.register("a", Box::new(impostor.clone())));
        sync.sync(&snapshot_showing("a"));
        assert!(original.is_active());
        assert!(!impostor.is_active());
        assert_eq!(sync.len(), 1);
    }
}
