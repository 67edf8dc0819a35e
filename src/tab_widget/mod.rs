//! Tabbed container for session panes.
//!
//! [`TabWidget`] wraps the [`TabBar`] primitive and owns the attached panes.
//! On top of the strip's own behaviour it adds:
//!
//! - middle-click to close (press and release on the same tab)
//! - `<modifier>+digit` shortcuts that jump to a tab
//! - minimum-size propagation from the resized pane's size hint
//! - label refresh whenever slot positions change
//! - deferred release of closed panes
//!
//! The container only ever *requests* closes ([`TabEvent::CloseRequested`]).
//! The host decides and calls [`TabWidget::close_tab`], which is the single
//! place a pane is detached and queued for release.

pub mod filter;
pub mod labels;
pub mod release;
pub mod shortcuts;
pub mod tab_bar;

pub use filter::{EventTarget, FilterAction, InputEvent, InputObserver};
pub use labels::{LabelScheme, NumberedLabels, TitleLabels};
pub use shortcuts::{TabShortcuts, index_for_digit};
pub use tab_bar::{TabBar, TabBarSignal, TabSlot};

use crate::config::Config;
use crate::pane::{Pane, PaneId};
use filter::{FilterContext, MiddleClickClose, PaneMinimumSize};
use qelly_keybindings::KeybindingMatcher;
use release::DeferredRelease;
use std::collections::HashMap;
use winit::dpi::PhysicalSize;
use winit::keyboard::{Key, ModifiersState, PhysicalKey};

/// Errors returned by tab operations that take a slot index
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TabError {
    #[error("tab index {index} out of range (count {count})")]
    IndexOutOfRange { index: usize, count: usize },
}

/// Notifications for the host, drained with [`TabWidget::take_events`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabEvent {
    /// The user asked to close a tab (middle click or close button).
    ///
    /// `index` is the slot at emission time and goes stale once earlier
    /// events are applied; close by `pane` via [`TabWidget::close_pane`].
    CloseRequested { index: usize, pane: PaneId },
    /// The current slot changed
    CurrentChanged(Option<usize>),
    /// A slot moved from one position to another
    Moved { from: usize, to: usize },
}

/// Tab container
pub struct TabWidget {
    tab_bar: TabBar,
    panes: HashMap<PaneId, Box<dyn Pane>>,
    next_pane_id: PaneId,
    labels: Box<dyn LabelScheme>,
    shortcuts: TabShortcuts,
    middle_click: MiddleClickClose,
    pane_min_size: PaneMinimumSize,
    release: DeferredRelease,
    events: Vec<TabEvent>,
    background: [u8; 3],
    minimum_size: PhysicalSize<u32>,
    content_size: Option<PhysicalSize<u32>>,
    updates_enabled: bool,
    repaint_deferred: bool,
    needs_repaint: bool,
}

impl TabWidget {
    /// Create a container configured from the preferences
    pub fn new(config: &Config) -> Self {
        Self::with_label_scheme(config, labels::scheme_for(config.tab_label_style))
    }

    /// Create a container with a custom label scheme
    pub fn with_label_scheme(config: &Config, labels: Box<dyn LabelScheme>) -> Self {
        let mut widget = Self {
            tab_bar: TabBar::new(config.tab_width, config.tab_bar_height),
            panes: HashMap::new(),
            next_pane_id: 1,
            labels,
            shortcuts: TabShortcuts::new_or_default(&config.tab_shortcut_modifier),
            middle_click: MiddleClickClose::default(),
            pane_min_size: PaneMinimumSize,
            release: DeferredRelease::new(),
            events: Vec::new(),
            background: config.background_color,
            minimum_size: PhysicalSize::new(0, 0),
            content_size: None,
            updates_enabled: true,
            repaint_deferred: false,
            needs_repaint: false,
        };
        widget.configure(config);
        widget
    }

    /// One-time presentation setup
    fn configure(&mut self, config: &Config) {
        self.tab_bar.set_document_mode(true);
        self.tab_bar.set_tabs_closable(true);
        self.tab_bar.set_movable(true);
        self.tab_bar.set_uses_scroll_buttons(true);
        self.update_background(config);
        log::debug!(
            "Tab widget configured (tab width {}, strip height {}, shortcuts {})",
            config.tab_width,
            config.tab_bar_height,
            config.tab_shortcut_modifier
        );
    }

    /// Re-read the background color from the preferences
    pub fn update_background(&mut self, config: &Config) {
        self.background = config.background_color;
        self.request_repaint();
    }

    pub fn background(&self) -> [u8; 3] {
        self.background
    }

    // ---------------------------------------------------------------------
    // Slots
    // ---------------------------------------------------------------------

    /// Attach `pane` in a new slot at the end and make it current. An empty
    /// `label` falls back to the pane's own title.
    ///
    /// Returns the index of the new slot.
    pub fn add_tab(&mut self, pane: Box<dyn Pane>, label: &str) -> usize {
        self.insert_pane(pane, label, None)
    }

    /// Like [`add_tab`](Self::add_tab) with an icon drawn before the label
    pub fn add_tab_with_icon(&mut self, pane: Box<dyn Pane>, icon: &str, label: &str) -> usize {
        self.insert_pane(pane, label, Some(icon.to_string()))
    }

    fn insert_pane(&mut self, mut pane: Box<dyn Pane>, label: &str, icon: Option<String>) -> usize {
        self.set_updates_enabled(false);

        let label = if label.is_empty() {
            pane.title()
        } else {
            label.to_string()
        };

        let id = self.next_pane_id;
        self.next_pane_id += 1;
        pane.on_attach(id);
        self.panes.insert(id, pane);

        let index = self.tab_bar.add_tab(id, &label, icon);
        self.set_tab_title(index, &label);
        self.set_current_index(index);

        if let Some(size) = self.content_size {
            self.handle_input(EventTarget::Pane(id), &InputEvent::Resize { size });
        }

        self.dispatch_tab_bar_signals();
        self.set_updates_enabled(true);

        log::info!("Added tab {} for pane {} (total: {})", index, id, self.count());
        index
    }

    /// Close the slot at `index`.
    ///
    /// The slot disappears immediately; its pane is detached and kept alive
    /// until [`release_deferred`](Self::release_deferred) runs.
    pub fn close_tab(&mut self, index: usize) -> Result<PaneId, TabError> {
        let count = self.count();
        let slot = self
            .tab_bar
            .remove_tab(index)
            .ok_or(TabError::IndexOutOfRange { index, count })?;

        self.refresh_tab_text(index, None);
        self.middle_click.reset();

        if let Some(mut pane) = self.panes.remove(&slot.pane) {
            pane.on_detach();
            self.release.defer(slot.pane, pane);
        }

        self.dispatch_tab_bar_signals();
        self.request_repaint();

        log::info!(
            "Closed tab {} (pane {}, remaining: {})",
            index,
            slot.pane,
            self.count()
        );
        Ok(slot.pane)
    }

    /// Close the slot currently holding `pane`.
    ///
    /// Returns `None` when the pane is no longer attached, for example when
    /// an earlier request already closed it.
    pub fn close_pane(&mut self, pane: PaneId) -> Option<usize> {
        let index = self.index_of(pane)?;
        self.close_tab(index).ok().map(|_| index)
    }

    /// Move the slot at `from` to `to`
    pub fn move_tab(&mut self, from: usize, to: usize) -> Result<(), TabError> {
        let count = self.count();
        for index in [from, to] {
            if index >= count {
                return Err(TabError::IndexOutOfRange { index, count });
            }
        }
        if self.tab_bar.move_tab(from, to) {
            self.dispatch_tab_bar_signals();
            self.request_repaint();
        }
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.tab_bar.count()
    }

    pub fn is_empty(&self) -> bool {
        self.tab_bar.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.tab_bar.current_index()
    }

    /// Make `index` current; out-of-range indices are ignored
    pub fn set_current_index(&mut self, index: usize) {
        if self.tab_bar.set_current_index(index) {
            self.dispatch_tab_bar_signals();
            self.request_repaint();
        }
    }

    /// Select the next slot, wrapping around
    pub fn next_tab(&mut self) {
        let count = self.count();
        if let Some(current) = self.current_index()
            && count > 1
        {
            self.set_current_index((current + 1) % count);
        }
    }

    /// Select the previous slot, wrapping around
    pub fn prev_tab(&mut self) {
        let count = self.count();
        if let Some(current) = self.current_index()
            && count > 1
        {
            self.set_current_index((current + count - 1) % count);
        }
    }

    /// Displayed label of slot `index`
    pub fn tab_text(&self, index: usize) -> Option<&str> {
        self.tab_bar.tab_text(index)
    }

    /// Title the label of slot `index` is derived from
    pub fn tab_title(&self, index: usize) -> Option<&str> {
        self.tab_bar.tab(index).map(|t| t.title.as_str())
    }

    pub fn tab_icon(&self, index: usize) -> Option<&str> {
        self.tab_bar.tab(index).and_then(|t| t.icon.as_deref())
    }

    /// Change the title of slot `index` and recompute its label
    pub fn set_tab_title(&mut self, index: usize, title: &str) {
        if self.tab_bar.set_tab_title(index, title) {
            self.refresh_tab_text(index, Some(index + 1));
        }
    }

    /// Recompute the labels of slots `start..end`; `None` (or an end before
    /// the start) means "to the end of the strip"
    pub fn refresh_tab_text(&mut self, start: usize, end: Option<usize>) {
        let count = self.count();
        let end = match end {
            Some(end) if end >= start => end.min(count),
            _ => count,
        };
        for index in start..end {
            let Some(title) = self.tab_title(index).map(str::to_string) else {
                continue;
            };
            let text = self.labels.label(&title, index);
            self.tab_bar.set_tab_text(index, text);
        }
        if start < end {
            self.request_repaint();
        }
    }

    pub fn pane_id(&self, index: usize) -> Option<PaneId> {
        self.tab_bar.pane_at(index)
    }

    pub fn index_of(&self, id: PaneId) -> Option<usize> {
        self.tab_bar.position_of(id)
    }

    pub fn is_attached(&self, id: PaneId) -> bool {
        self.panes.contains_key(&id)
    }

    pub fn pane(&self, index: usize) -> Option<&dyn Pane> {
        let id = self.pane_id(index)?;
        self.panes.get(&id).map(|pane| pane.as_ref())
    }

    pub fn pane_mut(&mut self, index: usize) -> Option<&mut (dyn Pane + 'static)> {
        let id = self.pane_id(index)?;
        self.panes.get_mut(&id).map(|pane| pane.as_mut())
    }

    pub fn current_pane(&self) -> Option<&dyn Pane> {
        self.pane(self.current_index()?)
    }

    pub fn tab_bar(&self) -> &TabBar {
        &self.tab_bar
    }

    // ---------------------------------------------------------------------
    // Input
    // ---------------------------------------------------------------------

    /// Deliver an input event to the container.
    ///
    /// Observers run first and never swallow the event; the strip (or the
    /// pane) then gets its default handling.
    pub fn handle_input(&mut self, target: EventTarget, event: &InputEvent) {
        self.event_filter(target, event);

        match (target, *event) {
            (EventTarget::TabBar, InputEvent::MousePress { button, position }) => {
                self.tab_bar.handle_press(button, position);
            }
            (EventTarget::TabBar, InputEvent::MouseRelease { button, position }) => {
                self.tab_bar.handle_release(button, position);
            }
            (EventTarget::TabBar, InputEvent::MouseMove { position }) => {
                self.tab_bar.handle_move(position);
            }
            (EventTarget::TabBar, InputEvent::Wheel { delta }) => {
                self.tab_bar.scroll_by(delta);
                self.request_repaint();
            }
            (EventTarget::Pane(id), InputEvent::Resize { size }) => {
                if let Some(pane) = self.panes.get_mut(&id) {
                    pane.on_resize(size);
                }
            }
            _ => {}
        }

        self.dispatch_tab_bar_signals();
    }

    /// Run the observers over `event`. Always returns false: observation
    /// never consumes input.
    fn event_filter(&mut self, target: EventTarget, event: &InputEvent) -> bool {
        let ctx = FilterContext {
            tab_bar: &self.tab_bar,
            panes: &self.panes,
        };
        let observers: [&mut dyn InputObserver; 2] =
            [&mut self.middle_click, &mut self.pane_min_size];
        let actions: Vec<FilterAction> = observers
            .into_iter()
            .filter_map(|observer| observer.observe(target, event, &ctx))
            .collect();

        for action in actions {
            match action {
                FilterAction::RequestClose(pane) => {
                    if let Some(index) = self.index_of(pane) {
                        crate::debug_info!("TAB", "Middle click requested close of tab {}", index);
                        self.events.push(TabEvent::CloseRequested { index, pane });
                    }
                }
                FilterAction::SetMinimumSize(size) => {
                    self.set_minimum_size(size);
                }
            }
        }
        false
    }

    /// Handle a key press. Returns true when it activated a tab shortcut.
    pub fn handle_key(
        &mut self,
        logical_key: &Key,
        physical_key: PhysicalKey,
        modifiers: ModifiersState,
    ) -> bool {
        let matcher = KeybindingMatcher::new(logical_key, physical_key, modifiers);
        match self.shortcuts.digit_for(&matcher) {
            Some(digit) => {
                self.go_to_tab_for_key(digit);
                true
            }
            None => false,
        }
    }

    /// Select the tab for a pressed digit (`1` is the first tab, `0` the tenth)
    pub fn go_to_tab_for_key(&mut self, digit: u8) {
        if let Some(index) = index_for_digit(digit) {
            log::debug!("Shortcut digit {} -> tab {}", digit, index);
            self.set_current_index(index);
        }
    }

    pub fn shortcuts(&self) -> &TabShortcuts {
        &self.shortcuts
    }

    /// Resize the container; panes receive the area below the tab strip
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.tab_bar.set_width(size.width as f32);
        let strip = self.tab_bar.height().round() as u32;
        let content = PhysicalSize::new(size.width, size.height.saturating_sub(strip));
        self.content_size = Some(content);

        let ids: Vec<PaneId> = self.tab_bar.tabs().iter().map(|t| t.pane).collect();
        for id in ids {
            self.handle_input(EventTarget::Pane(id), &InputEvent::Resize { size: content });
        }
        self.request_repaint();
    }

    pub fn minimum_size(&self) -> PhysicalSize<u32> {
        self.minimum_size
    }

    fn set_minimum_size(&mut self, size: PhysicalSize<u32>) {
        if self.minimum_size != size {
            log::debug!("Tab widget minimum size -> {}x{}", size.width, size.height);
            self.minimum_size = size;
        }
    }

    // ---------------------------------------------------------------------
    // Host plumbing
    // ---------------------------------------------------------------------

    fn dispatch_tab_bar_signals(&mut self) {
        for signal in self.tab_bar.take_signals() {
            match signal {
                TabBarSignal::CurrentChanged(index) => {
                    self.events.push(TabEvent::CurrentChanged(index));
                }
                TabBarSignal::CloseRequested(index) => {
                    if let Some(pane) = self.pane_id(index) {
                        self.events.push(TabEvent::CloseRequested { index, pane });
                    }
                }
                TabBarSignal::Moved { from, to } => {
                    self.on_tab_moved(from, to);
                    self.events.push(TabEvent::Moved { from, to });
                }
            }
        }
    }

    /// Relabel the span of slots displaced by a move
    fn on_tab_moved(&mut self, from: usize, to: usize) {
        let (start, end) = if from <= to { (from, to) } else { (to, from) };
        self.refresh_tab_text(start, Some(end + 1));
    }

    /// Drain host notifications in emission order
    pub fn take_events(&mut self) -> Vec<TabEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drop panes closed during earlier event handling.
    ///
    /// Call once per event-loop turn, after input has been processed.
    pub fn release_deferred(&mut self) -> usize {
        self.release.release_all()
    }

    pub fn pending_release_count(&self) -> usize {
        self.release.len()
    }

    pub fn is_release_pending(&self, id: PaneId) -> bool {
        self.release.contains(id)
    }

    /// Suspend or resume repaint requests; resuming flushes one repaint if
    /// anything changed meanwhile
    pub fn set_updates_enabled(&mut self, enabled: bool) {
        self.updates_enabled = enabled;
        if enabled && self.repaint_deferred {
            self.repaint_deferred = false;
            self.needs_repaint = true;
        }
    }

    pub fn updates_enabled(&self) -> bool {
        self.updates_enabled
    }

    fn request_repaint(&mut self) {
        if self.updates_enabled {
            self.needs_repaint = true;
        } else {
            self.repaint_deferred = true;
        }
    }

    /// Returns true (once) when the container needs to be redrawn
    pub fn take_repaint_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_repaint)
    }
}

impl std::fmt::Debug for TabWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabWidget")
            .field("tab_bar", &self.tab_bar)
            .field("release", &self.release)
            .field("minimum_size", &self.minimum_size)
            .finish_non_exhaustive()
    }
}
