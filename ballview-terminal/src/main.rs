/// Ballview - Interactive 3D ball viewer for the terminal
///
/// Loads a glTF model, lights it with a fixed rig, and renders it with a
/// slow floating/spinning animation. Controls:
///   - Mouse drag / Arrow Keys: Orbit the camera
///   - Q/ESC: Quit
///
/// Usage: ballview [MODEL] [--no-recenter]
use std::env;
use std::io;
use std::path::PathBuf;

use ballview_terminal::{ViewerApp, ViewerConfig};

fn parse_args() -> Result<ViewerConfig, String> {
    let mut config = ViewerConfig::default();
    let mut model: Option<PathBuf> = None;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--no-recenter" => config.recenter = false,
            "--help" | "-h" => {
                return Err(format!(
                    "Usage: {} [MODEL] [--no-recenter]",
                    env::args().next().unwrap_or_else(|| "ballview".into())
                ));
            }
            flag if flag.starts_with('-') => {
                return Err(format!("Unknown flag: {}", flag));
            }
            path => {
                if model.replace(PathBuf::from(path)).is_some() {
                    return Err("More than one model path given".into());
                }
            }
        }
    }

    if let Some(path) = model {
        config.model_path = path;
    }
    Ok(config)
}

fn main() -> io::Result<()> {
    ballview_core::logging::init_logging();

    let config = match parse_args() {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{}", message);
            return Ok(());
        }
    };

    tracing::info!(model = %config.model_path.display(), "starting viewer");

    let mut app = ViewerApp::new(&config)?;
    app.run()?;

    Ok(())
}
