// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::ViewerConfig;

#[derive(Parser, Debug, Clone)]
#[command(name = "orbit-viewer")]
#[command(about = "Textured scene with an orbit/pan camera", long_about = None)]
pub struct Cli {
    /// Disable the HUD overlay
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding the texture images
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Initial window width
    #[arg(long)]
    pub width: Option<u32>,

    /// Initial window height
    #[arg(long)]
    pub height: Option<u32>,
}

impl Cli {
    /// Load the config file if one was given, then apply flag overrides
    pub fn resolve_config(&self) -> Result<ViewerConfig> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::load(path)?,
            None => ViewerConfig::default(),
        };

        if let Some(assets) = &self.assets {
            config.assets_dir = assets.clone();
        }
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from(["orbit-viewer", "--assets", "textures", "--width", "1024"]);
        let config = cli.resolve_config().unwrap();

        assert_eq!(config.assets_dir, PathBuf::from("textures"));
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 480);
        assert!(!cli.no_ui);
    }

    #[test]
    fn zero_height_flag_is_rejected() {
        let cli = Cli::parse_from(["orbit-viewer", "--height", "0"]);
        assert!(cli.resolve_config().is_err());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::parse_from(["orbit-viewer", "--config", "/nonexistent/viewer.json"]);
        assert!(cli.resolve_config().is_err());
    }
}
