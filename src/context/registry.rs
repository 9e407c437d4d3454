//! A registry of windows known to an `XContext`.
//!
//! The registry holds the last geometry and border width this layer
//! sent for each window, which is what the geometry configurator
//! compares against to decide whether the server will produce a
//! notification by itself.
//!
//! Windows are destroyed by their clients, and the news arrives as
//! an event some time later. When that happens the slot is
//! invalidated rather than removed, so operations already underway
//! on that window see a dead handle and fall back to their defaults.
//! Invalidated slots are only dropped by [`WindowRegistry::purge`].

use std::collections::HashMap;

use crate::types::Geometry;
use crate::x::XWindowID;

/// Whether a registered window still exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    /// The window exists as far as this layer knows.
    Live,
    /// The server has reported the window destroyed.
    Destroyed,
}

/// What is recorded about a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSlot {
    /// The last geometry sent to the server.
    pub geom: Geometry,
    /// The last border width sent to the server.
    pub border: u32,
    /// Whether the window still exists.
    pub status: Liveness,
}

impl WindowSlot {
    fn new(geom: Geometry, border: u32) -> Self {
        Self {
            geom,
            border,
            status: Liveness::Live,
        }
    }

    /// Whether the window still exists.
    pub fn is_live(&self) -> bool {
        self.status == Liveness::Live
    }
}

/// Storage for window slots, keyed by window ID.
#[derive(Debug, Clone, Default)]
pub struct WindowRegistry {
    slots: HashMap<XWindowID, WindowSlot>,
}

impl WindowRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a window with its current geometry.
    ///
    /// A destroyed slot with the same ID is replaced, since the
    /// server is free to reuse IDs once a window is gone.
    pub fn insert(&mut self, window: XWindowID, geom: Geometry, border: u32) {
        self.slots.insert(window, WindowSlot::new(geom, border));
    }

    /// Returns the slot of a window.
    pub fn get(&self, window: XWindowID) -> Option<&WindowSlot> {
        self.slots.get(&window)
    }

    /// Updates the recorded geometry of a live window.
    ///
    /// Returns false if the window is unknown or dead.
    pub fn update(&mut self, window: XWindowID, geom: Geometry, border: u32) -> bool {
        match self.slots.get_mut(&window) {
            Some(slot) if slot.is_live() => {
                slot.geom = geom;
                slot.border = border;
                true
            }
            _ => false,
        }
    }

    /// Marks a window as destroyed.
    ///
    /// Returns false if the window was never registered.
    pub fn invalidate(&mut self, window: XWindowID) -> bool {
        match self.slots.get_mut(&window) {
            Some(slot) => {
                slot.status = Liveness::Destroyed;
                true
            }
            None => false,
        }
    }

    /// Whether operations on `window` should go to the server.
    ///
    /// Windows that were never registered are assumed to exist.
    pub fn is_live(&self, window: XWindowID) -> bool {
        self.slots.get(&window).map_or(true, |s| s.is_live())
    }

    /// Drops every destroyed slot, returning how many were dropped.
    pub fn purge(&mut self) -> usize {
        let before = self.slots.len();
        self.slots.retain(|_, slot| slot.is_live());
        before - self.slots.len()
    }

    /// The number of slots, live or not.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether there are no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::x::Xid;

    #[test]
    fn test_invalidate_keeps_slot() {
        let mut reg = WindowRegistry::new();
        let geom = Geometry::new(0, 0, 100, 100);
        reg.insert(Xid(5), geom, 2);

        assert!(reg.invalidate(Xid(5)));
        assert!(!reg.is_live(Xid(5)));
        assert_eq!(reg.get(Xid(5)).map(|s| s.status), Some(Liveness::Destroyed));

        // dead slots do not take updates
        assert!(!reg.update(Xid(5), Geometry::new(1, 1, 1, 1), 0));
        assert_eq!(reg.get(Xid(5)).map(|s| s.geom), Some(geom));

        assert_eq!(reg.purge(), 1);
        assert!(reg.is_empty());
    }

    #[test]
    fn test_unknown_windows_are_live() {
        let mut reg = WindowRegistry::new();
        assert!(reg.is_live(Xid(9)));
        assert!(!reg.invalidate(Xid(9)));
        assert!(!reg.update(Xid(9), Geometry::zeroed(), 0));
    }

    #[test]
    fn test_reused_id_replaces_dead_slot() {
        let mut reg = WindowRegistry::new();
        reg.insert(Xid(5), Geometry::new(0, 0, 10, 10), 0);
        reg.invalidate(Xid(5));
        reg.insert(Xid(5), Geometry::new(0, 0, 20, 20), 1);

        assert!(reg.is_live(Xid(5)));
        assert_eq!(reg.purge(), 0);
        assert_eq!(reg.len(), 1);
    }
}
