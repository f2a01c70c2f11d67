mod app;
mod args;

use anyhow::{Context, Result};

use n3v_engine::device::GpuInit;
use n3v_engine::input::KeyBindings;
use n3v_engine::logging::{init_logging, LoggingConfig};
use n3v_engine::window::{Runtime, RuntimeConfig};

use app::ViewerApp;
use args::{ViewerArgs, USAGE};

fn main() -> Result<()> {
    let args = ViewerArgs::parse(std::env::args().skip(1))?;

    if args.help {
        print!("{USAGE}");
        return Ok(());
    }

    init_logging(match args.log_filter.clone() {
        Some(filter) => LoggingConfig::with_filter(filter),
        None => LoggingConfig::default(),
    });

    if let Some(path) = &args.write_cube {
        app::demo_cube()
            .save(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("wrote demo cube to {}", path.display());
        return Ok(());
    }

    let title = match &args.mesh {
        Some(path) => format!("n3v - {}", path.display()),
        None => "n3v".to_string(),
    };

    let config = RuntimeConfig {
        title,
        ..RuntimeConfig::default()
    };

    let app = ViewerApp::new(args.mesh, KeyBindings::new(args.step));
    Runtime::run(config, GpuInit::default(), app)
}
