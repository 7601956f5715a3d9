//! Pipeline configuration loaded from an optional `spritemill.toml`.
//!
//! Every field has a default matching the layout the pipeline was built
//! around, so a missing config file means:
//!
//! ```toml
//! input = "raw_assets"
//! output = "public/assets/img"
//! textures = "textures"
//! sprites = "sprites"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::asset::AssetKind;
use crate::cli::Cli;
use crate::debug;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Raw asset root. The run is a no-op if it does not exist.
    pub input: PathBuf,
    /// Published asset root. Created on demand.
    pub output: PathBuf,
    /// Textures subdirectory name, under both roots.
    pub textures: String,
    /// Sprites subdirectory name, under both roots.
    pub sprites: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("raw_assets"),
            output: PathBuf::from("public/assets/img"),
            textures: "textures".to_string(),
            sprites: "sprites".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Load config from the CLI-selected file, falling back to defaults when
    /// the file does not exist. Relative paths are rebased onto `--root`.
    pub fn load(cli: &Cli) -> Result<Self> {
        let path = cli.root.join(&cli.config);
        let mut config = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let config: Self = toml::from_str(&raw)
                .with_context(|| format!("invalid config {}", path.display()))?;
            debug!("config"; "loaded {}", path.display());
            config
        } else {
            Self::default()
        };

        config.input = rebase(&cli.root, &config.input);
        config.output = rebase(&cli.root, &config.output);
        Ok(config)
    }

    /// Subdirectory name for an asset kind.
    pub fn subdir(&self, kind: AssetKind) -> &str {
        match kind {
            AssetKind::Texture => &self.textures,
            AssetKind::Sprite => &self.sprites,
        }
    }

    /// Input directory for an asset kind.
    pub fn input_dir(&self, kind: AssetKind) -> PathBuf {
        self.input.join(self.subdir(kind))
    }

    /// Output directory for an asset kind.
    pub fn output_dir(&self, kind: AssetKind) -> PathBuf {
        self.output.join(self.subdir(kind))
    }
}

fn rebase(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_original_constants() {
        let config = PipelineConfig::default();
        assert_eq!(config.input, PathBuf::from("raw_assets"));
        assert_eq!(config.output, PathBuf::from("public/assets/img"));
        assert_eq!(
            config.input_dir(AssetKind::Sprite),
            PathBuf::from("raw_assets/sprites")
        );
        assert_eq!(
            config.output_dir(AssetKind::Texture),
            PathBuf::from("public/assets/img/textures")
        );
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: PipelineConfig = toml::from_str(r#"input = "art/raw""#).unwrap();
        assert_eq!(config.input, PathBuf::from("art/raw"));
        assert_eq!(config.output, PathBuf::from("public/assets/img"));
        assert_eq!(config.textures, "textures");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<PipelineConfig, _> = toml::from_str(r#"inptu = "typo""#);
        assert!(result.is_err());
    }

    #[test]
    fn rebase_leaves_absolute_paths_alone() {
        let abs = if cfg!(windows) { r"C:\art" } else { "/art" };
        assert_eq!(
            rebase(Path::new("project"), Path::new(abs)),
            PathBuf::from(abs)
        );
        assert_eq!(
            rebase(Path::new("project"), Path::new("raw_assets")),
            PathBuf::from("project").join("raw_assets")
        );
    }
}
