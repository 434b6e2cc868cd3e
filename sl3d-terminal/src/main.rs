/// SL3D Terminal Viewer
///
/// Renders a quad mesh with the software scanline pipeline and shows it as
/// ASCII art.
/// Controls:
///   - Arrow Keys: Rotate about X / Y
///   - A/D, W/S, Z/X: Move along X, Y, Z
///   - T: Toggle wireframe
///   - Q/ESC: Quit

use anyhow::Context;
use clap::Parser;
use sl3d_core::{obj, Compositor, Mesh, RenderConfig, RenderMode, RenderState};
use sl3d_terminal::logging::{init_logging, LoggingConfig};
use sl3d_terminal::TerminalApp;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sl3d-terminal", version, about = "Software scanline renderer in the terminal")]
struct Cli {
    /// Mesh file with `v` and `f` lines; the sample cube is used when omitted
    #[arg(short, long)]
    mesh: Option<PathBuf>,

    /// TOML render config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start in wireframe mode
    #[arg(long)]
    wireframe: bool,

    /// Frame rate cap
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Log filter, e.g. `sl3d_core=trace`
    #[arg(long)]
    log: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
        ..LoggingConfig::default()
    });

    let config = match &cli.config {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RenderConfig::default(),
    };

    let mesh = match &cli.mesh {
        Some(path) => obj::load_obj(path)
            .with_context(|| format!("loading mesh {}", path.display()))?,
        None => Mesh::sample_cube(),
    };
    log::info!(
        "mesh ready: {} vertices, {} faces",
        mesh.vertices.len(),
        mesh.faces.len()
    );

    let mut state = RenderState::new(mesh, &config);
    if cli.wireframe {
        state.mode = RenderMode::Wireframe;
    }

    let mut app = TerminalApp::new(state, Compositor::new(&config), cli.fps)
        .context("initialising terminal")?;
    app.run().context("terminal session failed")?;

    Ok(())
}
