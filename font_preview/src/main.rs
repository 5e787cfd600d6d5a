//! Font preview
//!
//! Renders the text items of a preview config with the software renderer and
//! writes the result as a PNG.
//!
//! ```text
//! font_preview [config.toml|config.ron]
//! ```

mod config;

use std::path::PathBuf;

use hge_font::prelude::*;
use log::{error, info};
use thiserror::Error;

use config::{parse_alignment, PreviewConfig};

const DEFAULT_CONFIG: &str = "font_preview.toml";

#[derive(Debug, Error)]
enum PreviewError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Font(#[from] FontError),

    #[error("output: {0}")]
    Output(#[from] AssetError),
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    if let Err(e) = run(&config_path) {
        error!("font_preview failed: {}", e);
        std::process::exit(1);
    }
}

fn run(config_path: &str) -> Result<(), PreviewError> {
    let config = PreviewConfig::load_from_file(config_path)?;
    info!("Loaded preview config from {}", config_path);

    let loader = FileResourceLoader::new(vec![PathBuf::from(&config.asset_root)]);
    let mut renderer = SoftwareRenderer::new(config.width, config.height, &loader);
    renderer.clear(config.background);

    let mut font = Font::load(&config.font, &loader, &mut renderer, config.defaults.texture_options())?;
    font.apply_settings(&config.defaults);
    info!(
        "Font {}: {} glyphs, line height {}",
        font.name(),
        font.glyphs().len(),
        font.height()
    );

    for item in &config.items {
        let settings = item.font.as_ref().unwrap_or(&config.defaults);
        font.apply_settings(settings);

        let align = parse_alignment(&item.align);
        match item.bounds {
            Some(bounds) => font.render_in_box(&mut renderer, item.x, item.y, bounds.width, bounds.height, align, &item.text),
            None => font.render(&mut renderer, item.x, item.y, align, &item.text),
        }
    }

    renderer.save_png(&config.output)?;
    info!("Wrote {} ({} items)", config.output, config.items.len());
    Ok(())
}
