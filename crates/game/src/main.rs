//! Headless character controller demo.
//!
//! Builds a small level, spawns a capsule character and plays back a
//! scripted input sequence at a fixed tick rate, logging the character's
//! state as it walks, jumps and rides the camera around.

mod camera;
mod character;
mod config;
mod demo;
mod level;
mod script;
mod systems;

use anyhow::{Context, Result};
use config::GameConfig;
use demo::Demo;
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                     Character Controller                         ║");
    println!("╠══════════════════════════════════════════════════════════════════╣");
    println!("║  CONTROLS (scripted, see config.ron):                            ║");
    println!("║    WASD       - Move           │  Left Drag  - Orbit camera      ║");
    println!("║    Space      - Jump           │                                 ║");
    println!("╠══════════════════════════════════════════════════════════════════╣");
    println!("║  RUST_LOG=debug shows state transitions                          ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(config::default_config_path);
    let config = GameConfig::load(&path);
    log::info!(
        "Starting: {} ticks at {} Hz, {} scripted events",
        config.ticks,
        config.tick_rate,
        config.script.len()
    );

    let mut demo = Demo::new(&config).context("failed to build the demo")?;
    demo.run(config.ticks)?;

    Ok(())
}
