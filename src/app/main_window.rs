//! The main window's content: one tab container plus the input routing and
//! key bindings around it.
//!
//! `MainWindow` holds no native window handle. The winit handler forwards
//! window events here and applies the results (title, minimum size, redraw,
//! close) to the real window, which keeps this type usable in tests.

use crate::config::Config;
use crate::pane::SessionPane;
use crate::tab_widget::{EventTarget, InputEvent, TabEvent, TabWidget};
use crate::ui_constants::TAB_WHEEL_LINE_PIXELS;
use qelly_keybindings::{KeybindingMatcher, KeybindingRegistry};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{Key, ModifiersState, PhysicalKey};

/// Per-window state
pub struct MainWindow {
    pub(crate) config: Config,
    tabs: TabWidget,
    keybindings: KeybindingRegistry,
    modifiers: ModifiersState,
    cursor: PhysicalPosition<f64>,
    /// A button went down over the tab strip; keep routing to the strip
    /// until it is released
    strip_grab: bool,
    sessions_opened: usize,
    /// Set when the last tab closed; the handler closes the window
    pub(crate) is_shutting_down: bool,
}

impl MainWindow {
    pub fn new(config: Config) -> Self {
        let tabs = TabWidget::new(&config);
        let keybindings = KeybindingRegistry::from_config(&config.keybindings);
        Self {
            config,
            tabs,
            keybindings,
            modifiers: ModifiersState::empty(),
            cursor: PhysicalPosition::new(0.0, 0.0),
            strip_grab: false,
            sessions_opened: 0,
            is_shutting_down: false,
        }
    }

    pub fn tabs(&self) -> &TabWidget {
        &self.tabs
    }

    pub fn tabs_mut(&mut self) -> &mut TabWidget {
        &mut self.tabs
    }

    /// Open a new session tab and return its index
    pub fn open_session(&mut self) -> usize {
        self.sessions_opened += 1;
        let title = format!("Session {}", self.sessions_opened);
        let preferred = PhysicalSize::new(self.config.pane_width, self.config.pane_height);
        let pane = SessionPane::new(&title, preferred);
        self.tabs.add_tab(Box::new(pane), &title)
    }

    /// Close the current tab, if any
    pub fn close_current_tab(&mut self) {
        if let Some(index) = self.tabs.current_index()
            && let Err(e) = self.tabs.close_tab(index)
        {
            log::error!("Failed to close current tab: {}", e);
        }
    }

    /// Window title reflecting the current tab
    pub fn title(&self) -> String {
        match self.tabs.current_index().and_then(|i| self.tabs.tab_title(i)) {
            Some(tab) => format!("{} - {}", self.config.window_title, tab),
            None => self.config.window_title.clone(),
        }
    }

    pub fn minimum_size(&self) -> PhysicalSize<u32> {
        self.tabs.minimum_size()
    }

    fn in_strip(&self, pos: PhysicalPosition<f64>) -> bool {
        pos.y >= 0.0 && pos.y < self.tabs.tab_bar().height() as f64
    }

    // ---------------------------------------------------------------------
    // Input
    // ---------------------------------------------------------------------

    /// Route a window event. Returns true when the window should close.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested for main window");
                return true;
            }
            WindowEvent::Resized(size) => self.resized(*size),
            WindowEvent::CursorMoved { position, .. } => self.cursor_moved(*position),
            WindowEvent::MouseInput { state, button, .. } => self.mouse_input(*state, *button),
            WindowEvent::MouseWheel { delta, .. } => self.mouse_wheel(*delta),
            WindowEvent::ModifiersChanged(modifiers) => self.modifiers = modifiers.state(),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    self.key_pressed(&event.logical_key, event.physical_key);
                }
            }
            _ => {}
        }
        self.is_shutting_down
    }

    pub fn resized(&mut self, size: PhysicalSize<u32>) {
        log::debug!("Main window resized to {}x{}", size.width, size.height);
        self.tabs.resize(size);
    }

    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.cursor = position;
        if self.strip_grab || self.in_strip(position) {
            self.tabs
                .handle_input(EventTarget::TabBar, &InputEvent::MouseMove { position });
        }
    }

    pub fn mouse_input(&mut self, state: ElementState, button: MouseButton) {
        let position = self.cursor;
        match state {
            ElementState::Pressed => {
                if !self.in_strip(position) {
                    return;
                }
                self.strip_grab = true;
                self.tabs
                    .handle_input(EventTarget::TabBar, &InputEvent::MousePress { button, position });
            }
            ElementState::Released => {
                if !std::mem::take(&mut self.strip_grab) && !self.in_strip(position) {
                    return;
                }
                self.tabs.handle_input(
                    EventTarget::TabBar,
                    &InputEvent::MouseRelease { button, position },
                );
            }
        }
    }

    pub fn mouse_wheel(&mut self, delta: MouseScrollDelta) {
        if !self.in_strip(self.cursor) {
            return;
        }
        let delta = match delta {
            MouseScrollDelta::LineDelta(x, y) => {
                let lines = if x.abs() > y.abs() { x } else { -y };
                lines * TAB_WHEEL_LINE_PIXELS
            }
            MouseScrollDelta::PixelDelta(pos) => {
                let pixels = if pos.x.abs() > pos.y.abs() { pos.x } else { -pos.y };
                pixels as f32
            }
        };
        self.tabs
            .handle_input(EventTarget::TabBar, &InputEvent::Wheel { delta });
    }

    pub fn modifiers_changed(&mut self, modifiers: ModifiersState) {
        self.modifiers = modifiers;
    }

    /// Handle a key press. Tab shortcuts take precedence over bindings.
    /// Returns true when the key was used.
    pub fn key_pressed(&mut self, logical_key: &Key, physical_key: PhysicalKey) -> bool {
        if self.tabs.handle_key(logical_key, physical_key, self.modifiers) {
            return true;
        }
        let matcher = KeybindingMatcher::new(logical_key, physical_key, self.modifiers);
        match self.keybindings.lookup(&matcher).map(str::to_string) {
            Some(action) => self.execute_action(&action),
            None => false,
        }
    }

    /// Run a key binding action by name
    pub fn execute_action(&mut self, action: &str) -> bool {
        crate::debug_info!("KEYBINDING", "Executing action '{}'", action);
        match action {
            "new_tab" => {
                self.open_session();
            }
            "close_tab" => self.close_current_tab(),
            "next_tab" => self.tabs.next_tab(),
            "prev_tab" => self.tabs.prev_tab(),
            _ => {
                log::warn!("Unknown keybinding action '{}'", action);
                return false;
            }
        }
        true
    }

    // ---------------------------------------------------------------------
    // Event-loop turn
    // ---------------------------------------------------------------------

    /// React to the container's notifications
    pub fn process_tab_events(&mut self) {
        for event in self.tabs.take_events() {
            match event {
                TabEvent::CloseRequested { index, pane } => {
                    if self.tabs.close_pane(pane).is_none() {
                        log::warn!(
                            "Ignoring close request for pane {} (was tab {}): already closed",
                            pane,
                            index
                        );
                    }
                }
                TabEvent::CurrentChanged(index) => {
                    log::debug!("Current tab -> {:?}", index);
                }
                TabEvent::Moved { from, to } => {
                    log::debug!("Tab moved {} -> {}", from, to);
                }
            }
        }
        if self.tabs.is_empty() && !self.is_shutting_down {
            log::info!("Last tab closed, shutting down main window");
            self.is_shutting_down = true;
        }
    }

    /// End of an event-loop turn: apply close requests, release closed panes
    /// and report whether a redraw is needed
    pub fn about_to_wait(&mut self) -> bool {
        self.process_tab_events();
        let released = self.tabs.release_deferred();
        if released > 0 {
            crate::debug_log!("TAB", "Released {} closed pane(s)", released);
        }
        self.tabs.take_repaint_request()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qelly_config::KeyBinding;
    use winit::keyboard::KeyCode;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.tab_shortcut_modifier = "Ctrl".to_string();
        config.keybindings = vec![
            KeyBinding::new("Ctrl+T", "new_tab"),
            KeyBinding::new("Ctrl+W", "close_tab"),
        ];
        config
    }

    fn window_with(n: usize) -> MainWindow {
        let mut window = MainWindow::new(test_config());
        window.resized(PhysicalSize::new(800, 600));
        for _ in 0..n {
            window.open_session();
        }
        window.about_to_wait();
        window
    }

    #[test]
    fn test_open_session_titles() {
        let window = window_with(2);
        assert_eq!(window.tabs().count(), 2);
        assert_eq!(window.tabs().tab_text(0), Some("Session 1"));
        assert_eq!(window.tabs().current_index(), Some(1));
        assert_eq!(window.title(), "Qelly - Session 2");
    }

    #[test]
    fn test_middle_click_closes_tab() {
        let mut window = window_with(3);
        window.cursor_moved(PhysicalPosition::new(160.0, 10.0));
        window.mouse_input(ElementState::Pressed, MouseButton::Middle);
        window.mouse_input(ElementState::Released, MouseButton::Middle);
        assert_eq!(window.tabs().count(), 3);

        window.about_to_wait();
        assert_eq!(window.tabs().count(), 2);
        assert_eq!(window.tabs().tab_text(1), Some("Session 3"));
        assert_eq!(window.tabs().pending_release_count(), 0);
    }

    fn middle_click_at(window: &mut MainWindow, x: f64) {
        window.cursor_moved(PhysicalPosition::new(x, 10.0));
        window.mouse_input(ElementState::Pressed, MouseButton::Middle);
        window.mouse_input(ElementState::Released, MouseButton::Middle);
    }

    fn titles(window: &MainWindow) -> Vec<&str> {
        (0..window.tabs().count())
            .filter_map(|i| window.tabs().tab_title(i))
            .collect()
    }

    #[test]
    fn test_two_close_requests_in_one_turn() {
        let mut window = window_with(3);
        middle_click_at(&mut window, 10.0);
        middle_click_at(&mut window, 160.0);

        window.about_to_wait();
        assert_eq!(titles(&window), vec!["Session 3"]);
        assert_eq!(window.tabs().pending_release_count(), 0);
    }

    #[test]
    fn test_same_tab_requested_twice_closes_once() {
        let mut window = window_with(3);
        middle_click_at(&mut window, 160.0);
        middle_click_at(&mut window, 160.0);

        window.about_to_wait();
        assert_eq!(titles(&window), vec!["Session 1", "Session 3"]);
    }

    #[test]
    fn test_close_request_then_move_in_one_turn() {
        let mut window = window_with(3);
        middle_click_at(&mut window, 10.0);
        window.tabs_mut().move_tab(0, 2).unwrap();

        window.about_to_wait();
        assert_eq!(titles(&window), vec!["Session 2", "Session 3"]);
    }

    #[test]
    fn test_keyboard_close_between_middle_press_and_release() {
        let mut window = window_with(3);
        window.tabs_mut().set_current_index(0);
        window.cursor_moved(PhysicalPosition::new(10.0, 10.0));
        window.mouse_input(ElementState::Pressed, MouseButton::Middle);
        window.close_current_tab();
        window.mouse_input(ElementState::Released, MouseButton::Middle);

        window.about_to_wait();
        assert_eq!(titles(&window), vec!["Session 2", "Session 3"]);
    }

    #[test]
    fn test_press_below_strip_ignored() {
        let mut window = window_with(2);
        window.cursor_moved(PhysicalPosition::new(10.0, 200.0));
        window.mouse_input(ElementState::Pressed, MouseButton::Left);
        assert_eq!(window.tabs().current_index(), Some(1));
    }

    #[test]
    fn test_keybindings_and_shortcuts() {
        let mut window = window_with(1);
        window.modifiers_changed(ModifiersState::CONTROL);

        assert!(window.key_pressed(&Key::Character("t".into()), PhysicalKey::Code(KeyCode::KeyT)));
        assert_eq!(window.tabs().count(), 2);

        assert!(window.key_pressed(&Key::Character("1".into()), PhysicalKey::Code(KeyCode::Digit1)));
        assert_eq!(window.tabs().current_index(), Some(0));

        assert!(window.key_pressed(&Key::Character("w".into()), PhysicalKey::Code(KeyCode::KeyW)));
        assert_eq!(window.tabs().count(), 1);

        window.modifiers_changed(ModifiersState::empty());
        assert!(!window.key_pressed(&Key::Character("t".into()), PhysicalKey::Code(KeyCode::KeyT)));
    }

    #[test]
    fn test_closing_last_tab_shuts_down() {
        let mut window = window_with(1);
        window.close_current_tab();
        window.about_to_wait();
        assert!(window.is_shutting_down);
        assert_eq!(window.title(), "Qelly");
    }

    #[test]
    fn test_unknown_action() {
        let mut window = window_with(1);
        assert!(!window.execute_action("toggle_fullscreen"));
        assert!(window.execute_action("next_tab"));
    }
}
