use anyhow::Result;
use clap::Parser;
use shapeyard_demo::ShapesApp;
use shapeyard_engine::{DisplayMode, EngineConfig};
use shapeyard_engine_wgpu::WgpuEngine;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shapeyard-desktop", about = "Desktop preview of the shape sandbox")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Window width in physical pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Window height in physical pixels
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Simulate a passthrough display; the demo skips its floor
    #[arg(long)]
    passthrough: bool,

    /// Directory shader files resolve against
    #[arg(long, default_value = "assets")]
    assets_dir: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("shapeyard-desktop starting");

    let config = EngineConfig {
        app_name: "shapeyard".to_string(),
        assets_dir: cli.assets_dir.into(),
    };
    let mut engine = WgpuEngine::init(config)?;
    engine.set_window_size(cli.width, cli.height);
    if cli.passthrough {
        engine.set_display_mode(DisplayMode::Passthrough);
    }

    let mut app = ShapesApp::new(&mut engine)?;
    shapeyard_demo::run(&mut engine, &mut app)?;
    Ok(())
}
