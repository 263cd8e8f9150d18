//! scrcpy launcher - a terminal front end for scrcpy and adb
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;

use scrl_app::config::{default_config_path, load_settings};
use scrl_app::{AdbBridge, Engine, ToolPaths};

/// scrcpy launcher - device hotplug, wireless adb and parameter presets for scrcpy
#[derive(Parser, Debug)]
#[command(name = "scrl", version)]
#[command(about = "A terminal launcher for scrcpy", long_about = None)]
struct Args {
    /// Directory containing adb and scrcpy, searched before PATH
    #[arg(long, value_name = "DIR")]
    tools_dir: Option<PathBuf>,

    /// Settings file (defaults to the platform config directory)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    scrl_core::logging::init()?;

    let config_path = args.config.unwrap_or_else(default_config_path);
    let settings = load_settings(&config_path);
    info!("Settings: {}", config_path.display());

    let tools_dir = args.tools_dir.or_else(|| settings.tools.dir.clone());
    let tools = ToolPaths::resolve(tools_dir.as_deref());

    let bridge = AdbBridge::new(tools.adb.clone());
    let engine = Engine::new(bridge, tools, settings, config_path);

    scrl_tui::run(engine).await?;
    Ok(())
}
