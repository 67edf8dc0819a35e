//! `ApplicationHandler` implementation.
//!
//! Owns the native window and forwards its events to [`MainWindow`]. At the
//! end of every event-loop turn (`about_to_wait`) it releases closed panes and
//! applies title, minimum size and redraw requests to the window.

use crate::app::main_window::MainWindow;
use crate::cli::RuntimeOptions;
use crate::config::Config;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::{Window, WindowId};

pub(crate) struct AppHandler {
    config: Config,
    runtime_options: RuntimeOptions,
    window: Option<Window>,
    main_window: Option<MainWindow>,
    start_time: Option<Instant>,
    applied_min_size: PhysicalSize<u32>,
    applied_title: String,
    should_exit: bool,
}

impl AppHandler {
    pub(crate) fn new(config: Config, runtime_options: RuntimeOptions) -> Self {
        Self {
            config,
            runtime_options,
            window: None,
            main_window: None,
            start_time: None,
            applied_min_size: PhysicalSize::new(0, 0),
            applied_title: String::new(),
            should_exit: false,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) {
        let attrs = Window::default_attributes()
            .with_title(&self.config.window_title)
            .with_inner_size(LogicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => window,
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let mut main_window = MainWindow::new(self.config.clone());
        main_window.resized(window.inner_size());
        for _ in 0..self.runtime_options.initial_tabs.max(1) {
            main_window.open_session();
        }
        log::info!(
            "Main window created with {} tab(s)",
            main_window.tabs().count()
        );

        window.request_redraw();
        self.window = Some(window);
        self.main_window = Some(main_window);
        self.start_time = Some(Instant::now());
    }

    fn exit_deadline(&self) -> Option<Instant> {
        let start = self.start_time?;
        let seconds = self.runtime_options.exit_after?;
        Some(start + Duration::from_secs_f64(seconds.max(0.0)))
    }

    fn check_cli_timers(&mut self) {
        if let Some(deadline) = self.exit_deadline()
            && Instant::now() >= deadline
        {
            log::info!("Exit-after timer expired, exiting");
            self.should_exit = true;
        }
    }

    /// Push state changed during this turn to the native window
    fn sync_window(&mut self) {
        let (Some(window), Some(main_window)) = (&self.window, &mut self.main_window) else {
            return;
        };

        if main_window.about_to_wait() {
            window.request_redraw();
        }

        let min_size = main_window.minimum_size();
        if min_size != self.applied_min_size && min_size.width > 0 && min_size.height > 0 {
            window.set_min_inner_size(Some(min_size));
            self.applied_min_size = min_size;
        }

        let title = main_window.title();
        if title != self.applied_title {
            window.set_title(&title);
            self.applied_title = title;
        }

        if main_window.is_shutting_down {
            self.should_exit = true;
        }
    }
}

impl ApplicationHandler for AppHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            self.create_window(event_loop);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.window.as_ref().map(Window::id) != Some(window_id) {
            return;
        }
        let Some(main_window) = &mut self.main_window else {
            return;
        };

        if let WindowEvent::RedrawRequested = event {
            crate::debug_trace!("RENDER", "Redraw requested ({} tabs)", main_window.tabs().count());
            return;
        }

        if main_window.handle_window_event(&event) {
            self.should_exit = true;
        }

        if self.should_exit {
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.check_cli_timers();
        self.sync_window();

        if self.should_exit {
            // Drop the window content before the window itself
            self.main_window = None;
            self.window = None;
            event_loop.exit();
            return;
        }

        match self.exit_deadline() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}
