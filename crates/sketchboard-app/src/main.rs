//! Main application entry point.

use clap::Parser;
use sketchboard_app::{AppConfig, LogPainter, Script, ScriptError, Session};
use sketchboard_core::{ConfigError, EngineConfig};
use sketchboard_render::RendererError;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to load config: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to load script: {0}")]
    Script(#[from] ScriptError),
    #[error("render failed: {0}")]
    Render(#[from] RendererError),
}

#[derive(Parser, Debug)]
#[command(name = "sketchboard", about = "Replay a Sketchboard session script")]
struct Cli {
    /// Session script (JSON).
    script: PathBuf,

    /// Engine configuration (JSON).
    #[arg(long, env = "SKETCHBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Directory for relative image paths; defaults to the script's directory.
    #[arg(long)]
    image_dir: Option<PathBuf>,
}

fn run(cli: Cli) -> Result<(), CliError> {
    let engine = match &cli.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    let script = Script::from_path(&cli.script)?;
    let image_dir = cli
        .image_dir
        .or_else(|| cli.script.parent().map(PathBuf::from));

    let mut session = Session::new(AppConfig { engine, image_dir }, script.viewport);
    let mut painter = LogPainter::new();
    session.run(&script, &mut painter)?;

    let document = session.canvas().document();
    log::info!(
        "Replayed {} steps: {} shapes, {} tables, zoom {:.2}",
        script.steps.len(),
        document.shapes().len(),
        document.tables().len(),
        session.canvas().camera().zoom
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting Sketchboard");

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
