//! Shared integration test helpers for Qelly.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{TrackedPane, widget_with_tabs};
//! ```

#![allow(dead_code)]

use qelly::config::Config;
use qelly::pane::Pane;
use qelly::tab_widget::{LabelScheme, TabWidget};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tempfile::TempDir;
use winit::dpi::PhysicalSize;

/// Pane that reports when it is dropped
pub struct TrackedPane {
    title: String,
    hint: Option<PhysicalSize<u32>>,
    dropped: Rc<Cell<bool>>,
}

impl TrackedPane {
    /// Create a pane and the flag that flips once it is dropped
    pub fn new(title: &str) -> (Box<dyn Pane>, Rc<Cell<bool>>) {
        Self::with_hint(title, Some(PhysicalSize::new(640, 400)))
    }

    pub fn with_hint(
        title: &str,
        hint: Option<PhysicalSize<u32>>,
    ) -> (Box<dyn Pane>, Rc<Cell<bool>>) {
        let dropped = Rc::new(Cell::new(false));
        let pane = TrackedPane {
            title: title.to_string(),
            hint,
            dropped: Rc::clone(&dropped),
        };
        (Box::new(pane), dropped)
    }
}

impl Pane for TrackedPane {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn size_hint(&self) -> Option<PhysicalSize<u32>> {
        self.hint
    }
}

impl Drop for TrackedPane {
    fn drop(&mut self) {
        self.dropped.set(true);
    }
}

/// Label scheme that records every position it labels
pub struct RecordingLabels {
    pub calls: Rc<RefCell<Vec<usize>>>,
}

impl LabelScheme for RecordingLabels {
    fn label(&self, title: &str, index: usize) -> String {
        self.calls.borrow_mut().push(index);
        format!("{}:{}", index, title)
    }
}

/// Config with deterministic shortcuts on every platform
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.tab_shortcut_modifier = "Ctrl".to_string();
    config
}

/// Container with `n` tabs titled "tab 0" .. "tab n-1", events drained
pub fn widget_with_tabs(n: usize) -> TabWidget {
    let mut widget = TabWidget::new(&test_config());
    for i in 0..n {
        let (pane, _) = TrackedPane::new(&format!("tab {}", i));
        widget.add_tab(pane, &format!("tab {}", i));
    }
    widget.take_events();
    widget
}

/// Temporary directory for config file tests. Keep it alive until all I/O
/// has completed.
pub fn config_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}
