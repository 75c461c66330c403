// main.rs
//
// Generates a movement tray and writes it as binary STL.
//
//   movetray [config.toml] [output.stl]

use movetray::{generate, SceneConfig, TrayError};
use std::fs;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), TrayError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SceneConfig::from_toml_str(&fs::read_to_string(&path)?)?,
        None => SceneConfig::default(),
    };
    let output = args.next().unwrap_or_else(|| "movement_tray.stl".to_string());

    if let Err(e) = config.validate() {
        warn!("{e}; generating anyway");
    }

    let scene = generate(&config)?;
    if scene.layout.is_under_capacity() {
        info!(
            achieved = scene.layout.achieved(),
            requested = scene.layout.requested,
            "not every requested slot fit"
        );
    }

    fs::write(&output, scene.group.to_stl_binary()?)?;
    info!(
        path = %output,
        triangles = scene.group.triangle_count(),
        "wrote tray"
    );
    Ok(())
}
