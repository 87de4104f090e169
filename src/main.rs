use std::{env, error::Error};

use application::Application;
use config::WorldConfig;
use log::info;
use scenes::GameScene;
use voxels::{
    VoxelWorld, WorldError,
    generators::{TerrainGenerator, height_field_from_config},
};

mod application;
mod cameras;
mod config;
mod input;
mod player;
mod renderer;
mod scenes;
mod voxels;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let config = match config_path(&args)? {
        Some(path) => {
            info!("Loading config from {path}");
            WorldConfig::load(path)?
        }
        None => {
            info!("No --config given, using built-in defaults");
            WorldConfig::default()
        }
    };

    // The world is complete before the first frame queries it
    let world = build_world(&config)?;

    // Setup application
    let mut app = Application::new("Blockwalk")?;
    let gl_ctx = app.gl_context().clone();
    let scene = GameScene::new(&gl_ctx, world, &config)?;

    app.run(Box::new(scene))
}

fn config_path(args: &[String]) -> Result<Option<&str>, Box<dyn Error>> {
    match args.iter().position(|arg| arg == "--config" || arg == "-c") {
        Some(idx) => args
            .get(idx + 1)
            .map(|path| Some(path.as_str()))
            .ok_or_else(|| "--config expects a path".into()),
        None => Ok(None),
    }
}

fn build_world(config: &WorldConfig) -> Result<VoxelWorld, WorldError> {
    let generator = TerrainGenerator::new(
        config.chunk_size as usize,
        height_field_from_config(&config.terrain),
    );
    VoxelWorld::generate(config.world_radius_chunks, &generator)
}

#[cfg(test)]
mod tests {
    use crate::config::{TerrainConfig, WorldConfig};

    use super::{build_world, config_path};

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_config_flag() {
        assert_eq!(config_path(&args(&[])).unwrap(), None);
        assert_eq!(
            config_path(&args(&["--config", "world.json"])).unwrap(),
            Some("world.json")
        );
        assert_eq!(
            config_path(&args(&["-v", "-c", "other.json"])).unwrap(),
            Some("other.json")
        );
        assert!(config_path(&args(&["--config"])).is_err());
    }

    #[test]
    fn builds_world_from_config() {
        let config = WorldConfig {
            chunk_size: 8,
            world_radius_chunks: 2,
            terrain: TerrainConfig::Flat { height: 3 },
            ..Default::default()
        };
        let world = build_world(&config).unwrap();
        assert_eq!(world.chunk_count(), 25);
        assert_eq!(world.chunk_size(), 8);
        // Rows 0..=3 of every column
        assert_eq!(world.solid_count(), 25 * 8 * 8 * 4);
    }
}
