//! Content shown inside a tab.
//!
//! The tab container does not know what a pane displays. It only needs a
//! fallback title for the label, a size hint for minimum-size propagation, and
//! a few lifecycle hooks.

use winit::dpi::PhysicalSize;

/// Identifier the tab container assigns to a pane when it is attached
pub type PaneId = u64;

/// A UI element hosted in one tab slot.
///
/// Panes are handed to the container by value, so a pane can never be
/// attached to two slots or two containers at the same time.
pub trait Pane {
    /// Title used as the tab label when the host adds the pane with an
    /// empty one
    fn title(&self) -> String;

    /// Preferred size of the pane content, `None` when the pane has no
    /// meaningful preference
    fn size_hint(&self) -> Option<PhysicalSize<u32>>;

    /// Called once the container has taken ownership
    fn on_attach(&mut self, _id: PaneId) {}

    /// Called when the pane is removed from its slot, before it is queued for
    /// deferred release
    fn on_detach(&mut self) {}

    /// Called when the container resizes the content area
    fn on_resize(&mut self, _size: PhysicalSize<u32>) {}
}

/// Placeholder pane for a session that has not connected yet.
#[derive(Debug, Clone)]
pub struct SessionPane {
    title: String,
    preferred: PhysicalSize<u32>,
    size: PhysicalSize<u32>,
    id: Option<PaneId>,
}

impl SessionPane {
    pub fn new(title: &str, preferred: PhysicalSize<u32>) -> Self {
        Self {
            title: title.to_string(),
            preferred,
            size: PhysicalSize::new(0, 0),
            id: None,
        }
    }

    /// Current content size as last reported by the container
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Id assigned by the container, if attached
    pub fn id(&self) -> Option<PaneId> {
        self.id
    }
}

impl Pane for SessionPane {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn size_hint(&self) -> Option<PhysicalSize<u32>> {
        Some(self.preferred)
    }

    fn on_attach(&mut self, id: PaneId) {
        self.id = Some(id);
    }

    fn on_detach(&mut self) {
        log::debug!("Session pane '{}' detached", self.title);
    }

    fn on_resize(&mut self, size: PhysicalSize<u32>) {
        self.size = size;
    }
}

impl Drop for SessionPane {
    fn drop(&mut self) {
        log::debug!("Releasing session pane '{}' ({:?})", self.title, self.id);
    }
}
