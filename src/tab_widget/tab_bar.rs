//! Tab strip primitive.
//!
//! Holds the ordered slots, the current index and the strip geometry, and
//! implements the behaviours every tab strip has on its own: left click to
//! select, close buttons, drag to reorder, and scroll buttons when the tabs
//! overflow. Anything beyond that (middle-click close, shortcuts, label
//! refresh) belongs to [`TabWidget`](super::TabWidget).

use crate::pane::PaneId;
use crate::ui_constants::{
    TAB_CLOSE_BUTTON_MARGIN, TAB_CLOSE_BUTTON_SIZE, TAB_DRAG_THRESHOLD, TAB_SCROLL_BUTTON_WIDTH,
};
use winit::dpi::PhysicalPosition;
use winit::event::MouseButton;

/// One position in the tab strip
#[derive(Debug, Clone, PartialEq)]
pub struct TabSlot {
    /// Pane shown when this slot is current
    pub pane: PaneId,
    /// Title the label is derived from
    pub title: String,
    /// Label text currently displayed
    pub text: String,
    /// Optional icon (emoji or icon name) drawn before the label
    pub icon: Option<String>,
}

/// Notifications produced by the strip, drained by the owning container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabBarSignal {
    /// The current index changed (None when the strip became empty)
    CurrentChanged(Option<usize>),
    /// A close button was clicked
    CloseRequested(usize),
    /// A slot moved from one position to another
    Moved { from: usize, to: usize },
}

/// Axis-aligned rectangle in strip coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl TabRect {
    pub fn contains(&self, pos: PhysicalPosition<f64>) -> bool {
        let (px, py) = (pos.x as f32, pos.y as f32);
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// Scroll button shown at the right end of an overflowing strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollButton {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
struct PressState {
    index: usize,
    on_close_button: bool,
    origin_x: f64,
    dragging: bool,
}

/// Tab strip state
#[derive(Debug)]
pub struct TabBar {
    tabs: Vec<TabSlot>,
    current: Option<usize>,
    tab_width: f32,
    height: f32,
    /// Viewport width; zero until the first layout, meaning "unbounded"
    width: f32,
    scroll_offset: f32,
    tabs_closable: bool,
    movable: bool,
    uses_scroll_buttons: bool,
    document_mode: bool,
    press: Option<PressState>,
    signals: Vec<TabBarSignal>,
}

impl TabBar {
    pub fn new(tab_width: f32, height: f32) -> Self {
        Self {
            tabs: Vec::new(),
            current: None,
            tab_width,
            height,
            width: 0.0,
            scroll_offset: 0.0,
            tabs_closable: false,
            movable: false,
            uses_scroll_buttons: false,
            document_mode: false,
            press: None,
            signals: Vec::new(),
        }
    }

    pub fn set_tabs_closable(&mut self, closable: bool) {
        self.tabs_closable = closable;
    }

    pub fn tabs_closable(&self) -> bool {
        self.tabs_closable
    }

    pub fn set_movable(&mut self, movable: bool) {
        self.movable = movable;
    }

    pub fn is_movable(&self) -> bool {
        self.movable
    }

    pub fn set_uses_scroll_buttons(&mut self, enabled: bool) {
        self.uses_scroll_buttons = enabled;
        self.clamp_scroll();
    }

    pub fn uses_scroll_buttons(&self) -> bool {
        self.uses_scroll_buttons
    }

    pub fn set_document_mode(&mut self, enabled: bool) {
        self.document_mode = enabled;
    }

    pub fn document_mode(&self) -> bool {
        self.document_mode
    }

    pub fn set_tab_width(&mut self, tab_width: f32) {
        self.tab_width = tab_width;
        self.clamp_scroll();
    }

    pub fn tab_width(&self) -> f32 {
        self.tab_width
    }

    pub fn set_height(&mut self, height: f32) {
        self.height = height;
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Set the viewport width the strip is laid out in
    pub fn set_width(&mut self, width: f32) {
        self.width = width.max(0.0);
        self.clamp_scroll();
        if let Some(current) = self.current {
            self.ensure_visible(current);
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn count(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn tabs(&self) -> &[TabSlot] {
        &self.tabs
    }

    pub fn tab(&self, index: usize) -> Option<&TabSlot> {
        self.tabs.get(index)
    }

    pub fn tab_text(&self, index: usize) -> Option<&str> {
        self.tabs.get(index).map(|t| t.text.as_str())
    }

    /// Replace the displayed text of a slot. Returns false for a bad index.
    pub fn set_tab_text(&mut self, index: usize, text: String) -> bool {
        match self.tabs.get_mut(index) {
            Some(tab) => {
                tab.text = text;
                true
            }
            None => false,
        }
    }

    pub fn set_tab_title(&mut self, index: usize, title: &str) -> bool {
        match self.tabs.get_mut(index) {
            Some(tab) => {
                tab.title = title.to_string();
                true
            }
            None => false,
        }
    }

    pub fn pane_at(&self, index: usize) -> Option<PaneId> {
        self.tabs.get(index).map(|t| t.pane)
    }

    pub fn position_of(&self, pane: PaneId) -> Option<usize> {
        self.tabs.iter().position(|t| t.pane == pane)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Append a slot and return its index
    pub fn add_tab(&mut self, pane: PaneId, title: &str, icon: Option<String>) -> usize {
        self.insert_tab(self.tabs.len(), pane, title, icon)
    }

    /// Insert a slot at `index` (clamped to the end) and return its index.
    ///
    /// The first slot of an empty strip becomes current.
    pub fn insert_tab(
        &mut self,
        index: usize,
        pane: PaneId,
        title: &str,
        icon: Option<String>,
    ) -> usize {
        let index = index.min(self.tabs.len());
        self.tabs.insert(
            index,
            TabSlot {
                pane,
                title: title.to_string(),
                text: title.to_string(),
                icon,
            },
        );

        match self.current {
            None => {
                self.current = Some(index);
                self.signals.push(TabBarSignal::CurrentChanged(Some(index)));
            }
            Some(current) if index <= current => self.current = Some(current + 1),
            Some(_) => {}
        }
        if let Some(press) = self.press.as_mut()
            && index <= press.index
        {
            press.index += 1;
        }

        self.clamp_scroll();
        index
    }

    /// Remove the slot at `index`, returning it, or None for a bad index.
    ///
    /// When the current slot is removed the slot that takes its position
    /// becomes current (or the new last slot when it was at the end).
    pub fn remove_tab(&mut self, index: usize) -> Option<TabSlot> {
        if index >= self.tabs.len() {
            return None;
        }
        let slot = self.tabs.remove(index);
        self.press = None;

        if let Some(current) = self.current {
            if index < current {
                self.current = Some(current - 1);
            } else if index == current {
                self.current = if self.tabs.is_empty() {
                    None
                } else {
                    Some(index.min(self.tabs.len() - 1))
                };
                self.signals.push(TabBarSignal::CurrentChanged(self.current));
            }
        }

        self.clamp_scroll();
        if let Some(current) = self.current {
            self.ensure_visible(current);
        }
        Some(slot)
    }

    /// Move a slot. Returns false when either index is out of range or they
    /// are equal.
    pub fn move_tab(&mut self, from: usize, to: usize) -> bool {
        let len = self.tabs.len();
        if from >= len || to >= len || from == to {
            return false;
        }

        let slot = self.tabs.remove(from);
        self.tabs.insert(to, slot);

        if let Some(current) = self.current {
            let moved = if current == from {
                to
            } else if from < current && current <= to {
                current - 1
            } else if to <= current && current < from {
                current + 1
            } else {
                current
            };
            self.current = Some(moved);
        }

        log::debug!("Tab bar moved slot {} -> {}", from, to);
        self.signals.push(TabBarSignal::Moved { from, to });
        true
    }

    /// Make `index` current. Out-of-range indices are ignored.
    ///
    /// Returns true when the current index changed.
    pub fn set_current_index(&mut self, index: usize) -> bool {
        if index >= self.tabs.len() || self.current == Some(index) {
            return false;
        }
        self.current = Some(index);
        self.ensure_visible(index);
        self.signals.push(TabBarSignal::CurrentChanged(Some(index)));
        true
    }

    /// Drain pending signals in emission order
    pub fn take_signals(&mut self) -> Vec<TabBarSignal> {
        std::mem::take(&mut self.signals)
    }

    // ---------------------------------------------------------------------
    // Geometry
    // ---------------------------------------------------------------------

    fn content_width(&self) -> f32 {
        self.tabs.len() as f32 * self.tab_width
    }

    /// Whether the tabs do not fit and the scroll buttons are shown
    pub fn scroll_buttons_visible(&self) -> bool {
        self.uses_scroll_buttons && self.width > 0.0 && self.content_width() > self.width
    }

    /// Width available for tabs, excluding the scroll buttons
    fn tab_area_width(&self) -> f32 {
        if self.width <= 0.0 {
            f32::INFINITY
        } else if self.scroll_buttons_visible() {
            (self.width - 2.0 * TAB_SCROLL_BUTTON_WIDTH).max(0.0)
        } else {
            self.width
        }
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn max_scroll(&self) -> f32 {
        if !self.scroll_buttons_visible() {
            return 0.0;
        }
        (self.content_width() - self.tab_area_width()).max(0.0)
    }

    /// Scroll the strip by `delta` pixels (positive scrolls toward the end)
    pub fn scroll_by(&mut self, delta: f32) {
        self.scroll_offset += delta;
        self.clamp_scroll();
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.max_scroll());
    }

    /// Adjust the scroll offset so the whole of slot `index` is visible
    pub fn ensure_visible(&mut self, index: usize) {
        if !self.scroll_buttons_visible() || index >= self.tabs.len() {
            return;
        }
        let left = index as f32 * self.tab_width;
        let right = left + self.tab_width;
        let area = self.tab_area_width();
        if left < self.scroll_offset {
            self.scroll_offset = left;
        } else if right > self.scroll_offset + area {
            self.scroll_offset = right - area;
        }
        self.clamp_scroll();
    }

    /// Rectangle of slot `index` in strip coordinates (may be partly scrolled out)
    pub fn tab_rect(&self, index: usize) -> Option<TabRect> {
        if index >= self.tabs.len() {
            return None;
        }
        Some(TabRect {
            x: index as f32 * self.tab_width - self.scroll_offset,
            y: 0.0,
            width: self.tab_width,
            height: self.height,
        })
    }

    /// Rectangle of the close button of slot `index`, if tabs are closable
    pub fn close_button_rect(&self, index: usize) -> Option<TabRect> {
        if !self.tabs_closable {
            return None;
        }
        let tab = self.tab_rect(index)?;
        Some(TabRect {
            x: tab.x + tab.width - TAB_CLOSE_BUTTON_MARGIN - TAB_CLOSE_BUTTON_SIZE,
            y: tab.y + (tab.height - TAB_CLOSE_BUTTON_SIZE) / 2.0,
            width: TAB_CLOSE_BUTTON_SIZE,
            height: TAB_CLOSE_BUTTON_SIZE,
        })
    }

    /// Index of the tab under `pos`, or None over empty strip space, the
    /// scroll buttons, or outside the strip
    pub fn tab_at(&self, pos: PhysicalPosition<f64>) -> Option<usize> {
        let (x, y) = (pos.x as f32, pos.y as f32);
        if x < 0.0 || y < 0.0 || y >= self.height || x >= self.tab_area_width() {
            return None;
        }
        let index = ((x + self.scroll_offset) / self.tab_width).floor() as usize;
        (index < self.tabs.len()).then_some(index)
    }

    /// Scroll button under `pos`, if the buttons are visible
    pub fn scroll_button_at(&self, pos: PhysicalPosition<f64>) -> Option<ScrollButton> {
        if !self.scroll_buttons_visible() {
            return None;
        }
        let (x, y) = (pos.x as f32, pos.y as f32);
        if y < 0.0 || y >= self.height {
            return None;
        }
        let start = self.tab_area_width();
        if x >= start && x < start + TAB_SCROLL_BUTTON_WIDTH {
            Some(ScrollButton::Left)
        } else if x >= start + TAB_SCROLL_BUTTON_WIDTH && x < self.width {
            Some(ScrollButton::Right)
        } else {
            None
        }
    }

    /// Slot a drag at horizontal position `x` should land on
    fn drag_target(&self, x: f64) -> usize {
        let content_x = (x as f32 + self.scroll_offset).max(0.0);
        let index = (content_x / self.tab_width).floor() as usize;
        index.min(self.tabs.len().saturating_sub(1))
    }

    // ---------------------------------------------------------------------
    // Pointer handling
    // ---------------------------------------------------------------------

    pub fn handle_press(&mut self, button: MouseButton, pos: PhysicalPosition<f64>) {
        if button != MouseButton::Left {
            return;
        }

        if let Some(scroll) = self.scroll_button_at(pos) {
            let delta = match scroll {
                ScrollButton::Left => -self.tab_width,
                ScrollButton::Right => self.tab_width,
            };
            self.scroll_by(delta);
            return;
        }

        let Some(index) = self.tab_at(pos) else {
            return;
        };
        let on_close_button = self
            .close_button_rect(index)
            .is_some_and(|rect| rect.contains(pos));
        if !on_close_button {
            self.set_current_index(index);
        }
        self.press = Some(PressState {
            index,
            on_close_button,
            origin_x: pos.x,
            dragging: false,
        });
    }

    pub fn handle_release(&mut self, button: MouseButton, pos: PhysicalPosition<f64>) {
        if button != MouseButton::Left {
            return;
        }
        let Some(press) = self.press.take() else {
            return;
        };
        if press.on_close_button
            && self.tab_at(pos) == Some(press.index)
            && self
                .close_button_rect(press.index)
                .is_some_and(|rect| rect.contains(pos))
        {
            self.signals.push(TabBarSignal::CloseRequested(press.index));
        }
    }

    pub fn handle_move(&mut self, pos: PhysicalPosition<f64>) {
        if !self.movable {
            return;
        }
        let Some(mut press) = self.press else {
            return;
        };
        if press.on_close_button {
            return;
        }
        if !press.dragging && (pos.x - press.origin_x).abs() >= TAB_DRAG_THRESHOLD {
            press.dragging = true;
        }
        if press.dragging {
            let target = self.drag_target(pos.x);
            if target != press.index {
                let from = press.index;
                press.index = target;
                self.press = Some(press);
                self.move_tab(from, target);
                return;
            }
        }
        self.press = Some(press);
    }

    /// Whether a left-button drag is currently moving a tab
    pub fn is_dragging(&self) -> bool {
        self.press.is_some_and(|p| p.dragging)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(n: usize) -> TabBar {
        let mut bar = TabBar::new(100.0, 30.0);
        bar.set_tabs_closable(true);
        bar.set_movable(true);
        bar.set_uses_scroll_buttons(true);
        for i in 0..n {
            bar.add_tab(i as PaneId, &format!("t{}", i), None);
        }
        bar.take_signals();
        bar
    }

    fn pos(x: f64, y: f64) -> PhysicalPosition<f64> {
        PhysicalPosition::new(x, y)
    }

    #[test]
    fn test_first_tab_becomes_current() {
        let mut bar = TabBar::new(100.0, 30.0);
        assert_eq!(bar.current_index(), None);
        bar.add_tab(7, "a", None);
        assert_eq!(bar.current_index(), Some(0));
        assert_eq!(
            bar.take_signals(),
            vec![TabBarSignal::CurrentChanged(Some(0))]
        );
        bar.add_tab(8, "b", None);
        assert_eq!(bar.current_index(), Some(0));
        assert!(bar.take_signals().is_empty());
    }

    #[test]
    fn test_tab_at() {
        let bar = strip(3);
        assert_eq!(bar.tab_at(pos(10.0, 5.0)), Some(0));
        assert_eq!(bar.tab_at(pos(150.0, 5.0)), Some(1));
        assert_eq!(bar.tab_at(pos(299.0, 29.0)), Some(2));
        assert_eq!(bar.tab_at(pos(300.0, 5.0)), None);
        assert_eq!(bar.tab_at(pos(10.0, 30.0)), None);
        assert_eq!(bar.tab_at(pos(-1.0, 5.0)), None);
    }

    #[test]
    fn test_remove_current_selects_neighbour() {
        let mut bar = strip(3);
        bar.set_current_index(1);
        bar.take_signals();

        bar.remove_tab(1);
        assert_eq!(bar.current_index(), Some(1));
        assert_eq!(bar.pane_at(1), Some(2));

        bar.remove_tab(1);
        assert_eq!(bar.current_index(), Some(0));

        bar.remove_tab(0);
        assert_eq!(bar.current_index(), None);
        assert_eq!(
            bar.take_signals(),
            vec![
                TabBarSignal::CurrentChanged(Some(1)),
                TabBarSignal::CurrentChanged(Some(0)),
                TabBarSignal::CurrentChanged(None),
            ]
        );
        assert!(bar.remove_tab(0).is_none());
    }

    #[test]
    fn test_remove_before_current_keeps_same_tab() {
        let mut bar = strip(3);
        bar.set_current_index(2);
        bar.take_signals();
        bar.remove_tab(0);
        assert_eq!(bar.current_index(), Some(1));
        assert_eq!(bar.pane_at(1), Some(2));
        assert!(bar.take_signals().is_empty());
    }

    #[test]
    fn test_move_tracks_current() {
        let mut bar = strip(4);
        // current is slot 0 (pane 0)
        assert!(bar.move_tab(0, 2));
        assert_eq!(bar.current_index(), Some(2));
        assert_eq!(bar.pane_at(2), Some(0));

        bar.set_current_index(1);
        assert!(bar.move_tab(3, 0));
        assert_eq!(bar.current_index(), Some(2));

        assert!(!bar.move_tab(1, 1));
        assert!(!bar.move_tab(0, 4));
    }

    #[test]
    fn test_left_click_selects() {
        let mut bar = strip(3);
        bar.handle_press(MouseButton::Left, pos(150.0, 10.0));
        bar.handle_release(MouseButton::Left, pos(150.0, 10.0));
        assert_eq!(bar.current_index(), Some(1));
        assert_eq!(
            bar.take_signals(),
            vec![TabBarSignal::CurrentChanged(Some(1))]
        );
    }

    #[test]
    fn test_close_button_click() {
        let mut bar = strip(2);
        let rect = bar.close_button_rect(1).unwrap();
        let inside = pos((rect.x + 2.0) as f64, (rect.y + 2.0) as f64);

        bar.handle_press(MouseButton::Left, inside);
        bar.handle_release(MouseButton::Left, inside);
        assert_eq!(bar.take_signals(), vec![TabBarSignal::CloseRequested(1)]);
        // Clicking a close button does not select the tab
        assert_eq!(bar.current_index(), Some(0));
    }

    #[test]
    fn test_close_button_release_elsewhere_cancels() {
        let mut bar = strip(2);
        let rect = bar.close_button_rect(1).unwrap();
        let inside = pos((rect.x + 2.0) as f64, (rect.y + 2.0) as f64);

        bar.handle_press(MouseButton::Left, inside);
        bar.handle_release(MouseButton::Left, pos(110.0, 10.0));
        assert!(bar.take_signals().is_empty());
    }

    #[test]
    fn test_drag_reorders() {
        let mut bar = strip(3);
        bar.handle_press(MouseButton::Left, pos(20.0, 10.0));
        bar.handle_move(pos(22.0, 10.0));
        assert!(!bar.is_dragging());

        bar.handle_move(pos(120.0, 10.0));
        assert!(bar.is_dragging());
        bar.handle_move(pos(250.0, 10.0));
        bar.handle_release(MouseButton::Left, pos(250.0, 10.0));

        assert_eq!(bar.pane_at(2), Some(0));
        assert_eq!(bar.current_index(), Some(2));
        assert_eq!(
            bar.take_signals(),
            vec![
                TabBarSignal::Moved { from: 0, to: 1 },
                TabBarSignal::Moved { from: 1, to: 2 },
            ]
        );
    }

    #[test]
    fn test_scroll_buttons_on_overflow() {
        let mut bar = strip(5);
        bar.set_width(300.0);
        assert!(bar.scroll_buttons_visible());
        // 500 px of tabs in a 260 px tab area
        assert_eq!(bar.max_scroll(), 240.0);
        assert_eq!(bar.tab_at(pos(270.0, 10.0)), None);
        assert_eq!(bar.scroll_button_at(pos(270.0, 10.0)), Some(ScrollButton::Left));
        assert_eq!(bar.scroll_button_at(pos(290.0, 10.0)), Some(ScrollButton::Right));

        bar.handle_press(MouseButton::Left, pos(290.0, 10.0));
        assert_eq!(bar.scroll_offset(), 100.0);
        assert_eq!(bar.tab_at(pos(10.0, 10.0)), Some(1));

        bar.scroll_by(1000.0);
        assert_eq!(bar.scroll_offset(), 240.0);

        // Selecting a tab scrolls it into view from either side
        bar.set_current_index(1);
        assert_eq!(bar.scroll_offset(), 100.0);
        bar.set_current_index(4);
        assert_eq!(bar.scroll_offset(), 240.0);
    }

    #[test]
    fn test_no_scroll_buttons_when_disabled() {
        let mut bar = strip(5);
        bar.set_uses_scroll_buttons(false);
        bar.set_width(300.0);
        assert!(!bar.scroll_buttons_visible());
        assert_eq!(bar.max_scroll(), 0.0);
    }
}
