//! hand-pointer - drive a pointer from hand keypoints.
//!
//! Reads frame and control messages on stdin, writes pointer events and
//! responses on stdout.  Logs go to stderr.

use anyhow::bail;
use clap::Parser;
use tracing::{info, warn};

use hand_pointer::driver::{self, EventWriter};
use hand_pointer::{EngineConfig, PointerEngine, ScreenGeometry};

#[derive(Parser, Debug)]
#[command(name = "hand-pointer", about = "Hand-gesture pointer control engine")]
struct Cli {
    /// Screen size in pixels, WIDTHxHEIGHT
    #[arg(long, default_value = "1920x1080")]
    screen: String,

    /// Moving-average window in frames (1-30)
    #[arg(long)]
    smoothing_window: Option<usize>,

    /// Cursor sensitivity multiplier (0.01-3.0)
    #[arg(long)]
    sensitivity: Option<f32>,

    /// Left pinch clicks instead of holding the button
    #[arg(long)]
    no_drag: bool,

    /// Log all protocol messages to stderr
    #[arg(long)]
    trace: bool,

    /// Show version and exit
    #[arg(long)]
    version: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("hand-pointer {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Initialize tracing; stdout carries the protocol.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hand_pointer=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(screen) = ScreenGeometry::parse_resolution(&cli.screen) else {
        bail!("invalid --screen {:?}, expected WIDTHxHEIGHT", cli.screen);
    };

    let mut config = EngineConfig::default();
    if let Some(window) = cli.smoothing_window {
        config.smoothing_window = window;
    }
    if let Some(sensitivity) = cli.sensitivity {
        config.sensitivity = sensitivity;
    }
    config.drag_mode_enabled = !cli.no_drag;
    for fix in config.clamp_to_bounds() {
        warn!(%fix, "config value out of range");
    }

    info!("hand-pointer v{} starting", env!("CARGO_PKG_VERSION"));
    info!(width = screen.width, height = screen.height, "screen");

    let mut engine = PointerEngine::new(screen, config);
    let stdin = std::io::stdin();
    let mut writer = EventWriter::new(std::io::stdout().lock(), cli.trace);
    driver::run(&mut engine, stdin.lock(), &mut writer, cli.trace)?;

    let stats = engine.timing().stats();
    info!(
        frames = stats.total_frames,
        p95_ms = stats.p95,
        missed_pct = stats.missed_pct,
        "shutdown"
    );
    Ok(())
}
