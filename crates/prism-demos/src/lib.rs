//! Geometry, layout and state shared by the tutorial programs.

pub mod patterns;
pub mod shapes;
pub mod speed;

use anyhow::Result;
use prism_engine::core::App;
use prism_engine::device::GpuInit;
use prism_engine::logging::{init_logging, LoggingConfig};
use prism_engine::window::{Runtime, RuntimeConfig};

/// Runs one program: sets up logging, writes the start/end banners and
/// drives `app` until the window closes.
pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
where
    A: App + 'static,
{
    init_logging(LoggingConfig::with_debug_file())?;
    log::info!("---- {} : log start ----", config.title);

    let title = config.title.clone();
    let result = Runtime::run(config, GpuInit::default(), app);

    match &result {
        Ok(()) => log::info!("---- {title} : log end ----"),
        Err(e) => log::error!("---- {title} : failed: {e:#} ----"),
    }
    result
}
