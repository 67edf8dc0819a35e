//! Deferred pane release.
//!
//! A closed pane may still be on the call stack of the input event that
//! closed it, so it is parked here and dropped on a later turn of the event
//! loop.

use crate::pane::{Pane, PaneId};

/// Panes waiting to be dropped
#[derive(Default)]
pub struct DeferredRelease {
    pending: Vec<(PaneId, Box<dyn Pane>)>,
}

impl DeferredRelease {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `pane` for release
    pub fn defer(&mut self, id: PaneId, pane: Box<dyn Pane>) {
        log::debug!("Pane {} scheduled for release", id);
        self.pending.push((id, pane));
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn contains(&self, id: PaneId) -> bool {
        self.pending.iter().any(|(pending, _)| *pending == id)
    }

    /// Drop every queued pane and return how many were released
    pub fn release_all(&mut self) -> usize {
        let released = std::mem::take(&mut self.pending);
        let count = released.len();
        for (id, pane) in released {
            log::debug!("Releasing pane {}", id);
            drop(pane);
        }
        count
    }
}

impl std::fmt::Debug for DeferredRelease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<PaneId> = self.pending.iter().map(|(id, _)| *id).collect();
        f.debug_struct("DeferredRelease")
            .field("pending", &ids)
            .finish()
    }
}
