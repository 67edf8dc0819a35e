// Hide console window on Windows release builds
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use anyhow::Result;
use qelly::app::App;
use qelly::cli;

fn main() -> Result<()> {
    // Process CLI arguments first (before logging init for cleaner output)
    let runtime_options = cli::process_cli();

    // CLI --log-level takes precedence, then RUST_LOG, then config (applied in App::new)
    qelly::debug::init_log_bridge(runtime_options.log_level);

    log::info!("Starting Qelly {}", qelly::VERSION);

    let app = App::new(runtime_options)?;
    let result = app.run();

    if let Err(ref e) = result {
        eprintln!("qelly: error: {e:#}");
        #[cfg(target_os = "linux")]
        {
            let msg = format!("{e:?}").to_lowercase();
            if msg.contains("display") || msg.contains("wayland") || msg.contains("x server") {
                eprintln!(
                    "qelly: hint: no display server found; ensure DISPLAY (X11) or \
                     WAYLAND_DISPLAY (Wayland) is set"
                );
            }
        }
    }
    result
}
