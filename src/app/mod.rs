//! Application module for Qelly
//!
//! - `App`: entry point that loads the config and runs the event loop
//! - `MainWindow`: the window content, one tab container and its input routing

use crate::cli::RuntimeOptions;
use crate::config::Config;
use anyhow::Result;
use winit::event_loop::{ControlFlow, EventLoop};

mod handler;
pub mod main_window;

pub use main_window::MainWindow;

/// Main application entry point
pub struct App {
    config: Config,
    runtime_options: RuntimeOptions,
}

impl App {
    /// Create a new application
    pub fn new(runtime_options: RuntimeOptions) -> Result<Self> {
        let config = match &runtime_options.config_path {
            Some(path) => {
                log::info!("CLI override: using config '{}'", path.display());
                Config::load_from(path)?
            }
            None => Config::load()?,
        };
        crate::debug::apply_config_log_level(config.log_level.to_level_filter());

        Ok(Self {
            config,
            runtime_options,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the application
    pub fn run(self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut handler = handler::AppHandler::new(self.config, self.runtime_options);
        event_loop.run_app(&mut handler)?;

        log::info!("Event loop finished");
        Ok(())
    }
}
