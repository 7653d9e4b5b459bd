use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shapeyard_demo::ShapesApp;
use shapeyard_engine::{DisplayMode, EngineConfig, HeadlessEngine};
use shapeyard_input::ScriptedControllers;
use shapeyard_scene::ShapeKind;
use shapeyard_tools::{SceneInspector, dump_frame};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shapeyard-cli", about = "Headless shapeyard runs and scene inspection")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions
    Info,
    /// Run the demo headlessly and report what it drew
    Run {
        /// Frames to step before exiting
        #[arg(long, default_value_t = 10)]
        frames: u64,
        /// Cubes to spawn before the run
        #[arg(long, default_value_t = 0)]
        cubes: usize,
        /// Balls to spawn before the run
        #[arg(long, default_value_t = 0)]
        balls: usize,
        /// Cylinders to spawn before the run
        #[arg(long, default_value_t = 0)]
        cylinders: usize,
        /// Controller script to play back (JSON)
        #[arg(long)]
        script: Option<PathBuf>,
        /// Report a passthrough display; the demo skips its floor
        #[arg(long)]
        passthrough: bool,
        /// Print the last frame's draw records
        #[arg(long)]
        dump: bool,
    },
    /// Spawn shapes and print what the registry holds
    Inspect {
        #[arg(long, default_value_t = 1)]
        cubes: usize,
        #[arg(long, default_value_t = 1)]
        balls: usize,
        #[arg(long, default_value_t = 1)]
        cylinders: usize,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("shapeyard-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", shapeyard_common::crate_info());
            println!("scene: {}", shapeyard_scene::crate_info());
            println!("input: {}", shapeyard_input::crate_info());
            println!("engine: {}", shapeyard_engine::crate_info());
            println!("demo: {}", shapeyard_demo::crate_info());
            println!("tools: {}", shapeyard_tools::crate_info());
        }
        Commands::Run {
            frames,
            cubes,
            balls,
            cylinders,
            script,
            passthrough,
            dump,
        } => {
            let mut engine = HeadlessEngine::init(EngineConfig::default())?;
            if passthrough {
                engine.set_display_mode(DisplayMode::Passthrough);
            }
            if let Some(path) = script {
                let text = std::fs::read_to_string(&path)?;
                let script: ScriptedControllers = serde_json::from_str(&text)?;
                println!("Script: {} frames from {}", script.len(), path.display());
                engine.set_controllers(script);
            }

            let mut app = ShapesApp::new(&mut engine)?;
            spawn_shapes(&mut app, cubes, balls, cylinders);
            engine.exit_after(frames);

            let summary = shapeyard_demo::run(&mut engine, &mut app)?;
            println!("Run: {summary}");
            println!("{}", SceneInspector::summary(app.registry()));

            if dump {
                if let Some(frame) = engine.last_frame() {
                    println!("--- last frame ---");
                    println!("{}", dump_frame(frame));
                }
            }
        }
        Commands::Inspect {
            cubes,
            balls,
            cylinders,
            json,
        } => {
            let mut engine = HeadlessEngine::init(EngineConfig::default())?;
            let mut app = ShapesApp::new(&mut engine)?;
            spawn_shapes(&mut app, cubes, balls, cylinders);

            let entities: Vec<_> = SceneInspector::list_entities(app.registry())
                .into_iter()
                .filter_map(|id| SceneInspector::inspect_entity(app.registry(), id))
                .collect();
            if json {
                let doc = serde_json::json!({
                    "summary": SceneInspector::summary(app.registry()),
                    "entities": entities,
                });
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                println!("{}", SceneInspector::summary(app.registry()));
                for info in entities {
                    println!("{info}");
                }
            }
        }
    }

    Ok(())
}

fn spawn_shapes(app: &mut ShapesApp, cubes: usize, balls: usize, cylinders: usize) {
    for _ in 0..cubes {
        app.spawn(ShapeKind::Cube);
    }
    for _ in 0..balls {
        app.spawn(ShapeKind::Ball);
    }
    for _ in 0..cylinders {
        app.spawn(ShapeKind::Cylinder);
    }
}
