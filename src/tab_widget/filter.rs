//! Input observation for the tab container.
//!
//! The container sees every pointer event on its tab strip and every resize
//! of an attached pane before the default handling runs. Observers never
//! consume events; they only report follow-up actions for the container to
//! apply. Each rule is its own [`InputObserver`] so they can be tested apart.

use super::tab_bar::TabBar;
use crate::pane::{Pane, PaneId};
use std::collections::HashMap;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::MouseButton;

/// Input delivered to the container
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    MousePress {
        button: MouseButton,
        position: PhysicalPosition<f64>,
    },
    MouseRelease {
        button: MouseButton,
        position: PhysicalPosition<f64>,
    },
    MouseMove {
        position: PhysicalPosition<f64>,
    },
    /// Horizontal scroll in pixels, positive toward the end of the strip
    Wheel {
        delta: f32,
    },
    Resize {
        size: PhysicalSize<u32>,
    },
}

/// What an event was delivered to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    /// The tab strip (positions are strip-relative)
    TabBar,
    /// One pane, attached or not
    Pane(PaneId),
}

/// Follow-up requested by an observer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterAction {
    /// Emit a close request for this pane's slot
    RequestClose(PaneId),
    /// Set the container's minimum size
    SetMinimumSize(PhysicalSize<u32>),
}

/// Read-only view of the container state observers may inspect
pub struct FilterContext<'a> {
    pub tab_bar: &'a TabBar,
    pub panes: &'a HashMap<PaneId, Box<dyn Pane>>,
}

impl FilterContext<'_> {
    pub fn is_attached(&self, id: PaneId) -> bool {
        self.panes.contains_key(&id)
    }

    /// Pane whose tab is under `position` on the strip
    pub fn pane_under(&self, position: PhysicalPosition<f64>) -> Option<PaneId> {
        self.tab_bar
            .tab_at(position)
            .and_then(|index| self.tab_bar.pane_at(index))
    }

    pub fn size_hint(&self, id: PaneId) -> Option<PhysicalSize<u32>> {
        self.panes.get(&id).and_then(|pane| pane.size_hint())
    }
}

/// A rule that watches container input
pub trait InputObserver {
    fn observe(
        &mut self,
        target: EventTarget,
        event: &InputEvent,
        ctx: &FilterContext<'_>,
    ) -> Option<FilterAction>;
}

/// Closes a tab when the middle button is pressed and released over it.
///
/// Press and release must land on the same tab, so a middle-button drag that
/// ends elsewhere closes nothing. The press is tracked by pane rather than by
/// slot, so a slot that shifts under the pointer between press and release
/// does not count as the same tab.
#[derive(Debug, Default)]
pub struct MiddleClickClose {
    pressed_pane: Option<PaneId>,
}

impl MiddleClickClose {
    /// Pane under the outstanding middle press, if any
    pub fn pressed_pane(&self) -> Option<PaneId> {
        self.pressed_pane
    }

    /// Forget the outstanding press
    pub fn reset(&mut self) {
        self.pressed_pane = None;
    }
}

impl InputObserver for MiddleClickClose {
    fn observe(
        &mut self,
        target: EventTarget,
        event: &InputEvent,
        ctx: &FilterContext<'_>,
    ) -> Option<FilterAction> {
        if target != EventTarget::TabBar {
            return None;
        }
        match *event {
            InputEvent::MousePress {
                button: MouseButton::Middle,
                position,
            } => {
                self.pressed_pane = ctx.pane_under(position);
                None
            }
            InputEvent::MouseRelease {
                button: MouseButton::Middle,
                position,
            } => {
                let pressed = self.pressed_pane.take();
                match ctx.pane_under(position) {
                    Some(pane) if pressed == Some(pane) => Some(FilterAction::RequestClose(pane)),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

/// Keeps the container at least as large as a resized pane's size hint plus
/// the tab strip height.
#[derive(Debug, Default)]
pub struct PaneMinimumSize;

impl InputObserver for PaneMinimumSize {
    fn observe(
        &mut self,
        target: EventTarget,
        event: &InputEvent,
        ctx: &FilterContext<'_>,
    ) -> Option<FilterAction> {
        let EventTarget::Pane(id) = target else {
            return None;
        };
        if !matches!(event, InputEvent::Resize { .. }) || !ctx.is_attached(id) {
            return None;
        }
        let hint = ctx.size_hint(id)?;
        let strip_height = ctx.tab_bar.height().round() as u32;
        Some(FilterAction::SetMinimumSize(PhysicalSize::new(
            hint.width,
            hint.height.saturating_add(strip_height),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPane(Option<PhysicalSize<u32>>);

    impl Pane for FixedPane {
        fn title(&self) -> String {
            "fixed".to_string()
        }

        fn size_hint(&self) -> Option<PhysicalSize<u32>> {
            self.0
        }
    }

    fn bar_with(n: usize) -> TabBar {
        let mut bar = TabBar::new(100.0, 30.0);
        for i in 0..n {
            bar.add_tab(10 + i as PaneId, "t", None);
        }
        bar
    }

    fn press(x: f64) -> InputEvent {
        InputEvent::MousePress {
            button: MouseButton::Middle,
            position: PhysicalPosition::new(x, 10.0),
        }
    }

    fn release(x: f64) -> InputEvent {
        InputEvent::MouseRelease {
            button: MouseButton::Middle,
            position: PhysicalPosition::new(x, 10.0),
        }
    }

    #[test]
    fn test_middle_click_same_tab() {
        let bar = bar_with(3);
        let panes = HashMap::new();
        let ctx = FilterContext {
            tab_bar: &bar,
            panes: &panes,
        };
        let mut rule = MiddleClickClose::default();

        assert_eq!(rule.observe(EventTarget::TabBar, &press(150.0), &ctx), None);
        assert_eq!(rule.pressed_pane(), Some(11));
        assert_eq!(
            rule.observe(EventTarget::TabBar, &release(160.0), &ctx),
            Some(FilterAction::RequestClose(11))
        );
        assert_eq!(rule.pressed_pane(), None);
    }

    #[test]
    fn test_middle_click_slot_shifted_before_release() {
        let mut bar = bar_with(3);
        let panes = HashMap::new();
        let mut rule = MiddleClickClose::default();
        {
            let ctx = FilterContext {
                tab_bar: &bar,
                panes: &panes,
            };
            rule.observe(EventTarget::TabBar, &press(150.0), &ctx);
        }
        assert_eq!(rule.pressed_pane(), Some(11));

        // Slot 1 now holds the pane that used to sit in slot 2
        bar.remove_tab(1);
        let ctx = FilterContext {
            tab_bar: &bar,
            panes: &panes,
        };
        assert_eq!(rule.observe(EventTarget::TabBar, &release(150.0), &ctx), None);
    }

    #[test]
    fn test_middle_click_reset() {
        let bar = bar_with(2);
        let panes = HashMap::new();
        let ctx = FilterContext {
            tab_bar: &bar,
            panes: &panes,
        };
        let mut rule = MiddleClickClose::default();
        rule.observe(EventTarget::TabBar, &press(10.0), &ctx);
        rule.reset();
        assert_eq!(rule.observe(EventTarget::TabBar, &release(10.0), &ctx), None);
    }

    #[test]
    fn test_middle_click_release_on_empty_strip() {
        let bar = bar_with(2);
        let panes = HashMap::new();
        let ctx = FilterContext {
            tab_bar: &bar,
            panes: &panes,
        };
        let mut rule = MiddleClickClose::default();

        rule.observe(EventTarget::TabBar, &press(250.0), &ctx);
        assert_eq!(rule.pressed_pane(), None);
        // Both ends over no tab must not close anything
        assert_eq!(rule.observe(EventTarget::TabBar, &release(250.0), &ctx), None);
    }

    #[test]
    fn test_left_button_ignored() {
        let bar = bar_with(2);
        let panes = HashMap::new();
        let ctx = FilterContext {
            tab_bar: &bar,
            panes: &panes,
        };
        let mut rule = MiddleClickClose::default();
        let left = InputEvent::MousePress {
            button: MouseButton::Left,
            position: PhysicalPosition::new(10.0, 10.0),
        };
        rule.observe(EventTarget::TabBar, &left, &ctx);
        assert_eq!(rule.pressed_pane(), None);
    }

    #[test]
    fn test_pane_events_ignored_by_middle_click() {
        let bar = bar_with(2);
        let panes = HashMap::new();
        let ctx = FilterContext {
            tab_bar: &bar,
            panes: &panes,
        };
        let mut rule = MiddleClickClose::default();
        rule.observe(EventTarget::Pane(0), &press(10.0), &ctx);
        assert_eq!(rule.pressed_pane(), None);
    }

    #[test]
    fn test_minimum_size_for_attached_pane() {
        let bar = bar_with(1);
        let mut panes: HashMap<PaneId, Box<dyn Pane>> = HashMap::new();
        panes.insert(0, Box::new(FixedPane(Some(PhysicalSize::new(640, 400)))));
        panes.insert(1, Box::new(FixedPane(None)));
        let ctx = FilterContext {
            tab_bar: &bar,
            panes: &panes,
        };
        let mut rule = PaneMinimumSize;
        let resize = InputEvent::Resize {
            size: PhysicalSize::new(800, 600),
        };

        assert_eq!(
            rule.observe(EventTarget::Pane(0), &resize, &ctx),
            Some(FilterAction::SetMinimumSize(PhysicalSize::new(640, 430)))
        );
        // Invalid hint
        assert_eq!(rule.observe(EventTarget::Pane(1), &resize, &ctx), None);
        // Not attached
        assert_eq!(rule.observe(EventTarget::Pane(9), &resize, &ctx), None);
        // Not a resize
        assert_eq!(rule.observe(EventTarget::Pane(0), &press(1.0), &ctx), None);
        // Strip target
        assert_eq!(rule.observe(EventTarget::TabBar, &resize, &ctx), None);
    }
}
