//! Gaze-driven pointer control with double-blink selection.

use anyhow::{Context, Result};
use clap::Parser;
use gaze_select::{
    app::GazeSelectApp,
    config::{Config, EXAMPLE_CONFIG},
    cursor_control::{CursorController, PointerSink},
    landmarks::GazeStrategy,
    source::ReplaySource,
};
use log::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Landmark stream (JSON Lines); "-" reads a live stream from stdin
    #[arg(short, long, default_value = "-")]
    landmarks: String,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Gaze smoothing filter, e.g. "median:5" (overrides the config file)
    #[arg(short, long)]
    filter: Option<String>,

    /// Gaze strategy: iris, eye_corners, prefer_iris (overrides the config file)
    #[arg(short, long)]
    strategy: Option<GazeStrategy>,

    /// Do not move the system pointer
    #[arg(long)]
    no_cursor: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Print an annotated example configuration and exit
    #[arg(long)]
    example_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.example_config {
        print!("{}", EXAMPLE_CONFIG);
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path);
            Config::from_file(path).with_context(|| format!("loading {path}"))?
        }
        None => Config::default(),
    };
    if let Some(filter) = args.filter {
        config.gaze.filter = filter;
    }
    if let Some(strategy) = args.strategy {
        config.gaze.strategy = strategy;
    }
    config.validate()?;

    if args.print_config {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    let pointer: Option<Box<dyn PointerSink>> = if config.cursor.enabled && !args.no_cursor {
        match CursorController::new() {
            Ok(controller) => Some(Box::new(controller)),
            Err(e) => {
                warn!("Failed to initialize cursor control: {}", e);
                None
            }
        }
    } else {
        None
    };

    let mut app = GazeSelectApp::new(&config, pointer)?;
    let stats = if args.landmarks == "-" {
        info!("Reading live landmarks from stdin");
        app.run_threaded(ReplaySource::from_stdin())?
    } else {
        info!("Replaying landmarks from: {}", args.landmarks);
        let source = ReplaySource::from_file(&args.landmarks)
            .with_context(|| format!("opening {}", args.landmarks))?;
        app.run(source)?
    };

    match stats.final_selection {
        Some(id) => info!("Final selection: region {}", id),
        None => info!("No region selected"),
    }

    Ok(())
}
