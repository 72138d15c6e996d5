//! Configuration loading
//!
//! `defaults/chatmark.default.toml` is embedded into the crate so the documented defaults
//! and the runtime behavior cannot drift apart. Callers layer their own files and single
//! key overrides on top with [`Loader`] before deserializing into [`ChatmarkConfig`].

use crate::formats::{Format, RenderOptions};
use crate::parsing::ParseOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/chatmark.default.toml");

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatmarkConfig {
    pub limits: LimitsConfig,
    pub render: RenderConfig,
}

/// Resource ceilings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LimitsConfig {
    pub max_nesting_depth: usize,
    pub max_input_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RenderConfig {
    pub default_format: Format,
    pub bullet: String,
}

impl ChatmarkConfig {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_nesting_depth: self.limits.max_nesting_depth,
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            bullet: self.render.bullet.clone(),
        }
    }
}

/// Stacks configuration sources; later sources win key by key.
///
/// The embedded defaults are always the bottom layer, so a user file only needs the
/// keys it changes.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            builder: Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    /// Adds a TOML file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Adds a TOML file that may be missing.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    /// Sets one dotted key, such as `limits.max_input_bytes`, above every file layer.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merges the layers and deserializes them. Unknown format names fail here.
    pub fn build(self) -> Result<ChatmarkConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let file = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(file);
        self
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<ChatmarkConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.limits.max_nesting_depth, 100);
        assert_eq!(config.limits.max_input_bytes, 1_048_576);
        assert_eq!(config.render.default_format, Format::Strict);
        assert_eq!(config.render.bullet, "•");
        assert_eq!(config.parse_options(), ParseOptions::default());
        assert_eq!(config.render_options(), RenderOptions::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("render.default_format", "html")
            .expect("override to apply")
            .set_override("limits.max_nesting_depth", 8_i64)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.render.default_format, Format::Rich);
        assert_eq!(config.parse_options().max_nesting_depth, 8);
    }

    #[test]
    fn rejects_unknown_format() {
        let result = Loader::new()
            .set_override("render.default_format", "latex")
            .expect("override to apply")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn layers_user_file() {
        let dir = std::env::temp_dir().join(format!("chatmark-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("user.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[render]\nbullet = \"-\"").unwrap();

        let config = Loader::new().with_file(&path).build().unwrap();
        assert_eq!(config.render.bullet, "-");
        assert_eq!(config.limits.max_nesting_depth, 100);

        let missing = Loader::new().with_optional_file(dir.join("absent.toml")).build();
        assert!(missing.is_ok());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn override_outranks_file_layer() {
        let dir = std::env::temp_dir().join(format!("chatmark-layers-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("limits.toml");
        std::fs::write(&path, "[limits]\nmax_input_bytes = 64\nmax_nesting_depth = 4\n").unwrap();

        let config = Loader::new()
            .set_override("limits.max_input_bytes", 32_i64)
            .unwrap()
            .with_file(&path)
            .build()
            .unwrap();
        assert_eq!(config.limits.max_input_bytes, 32);
        assert_eq!(config.limits.max_nesting_depth, 4);
        std::fs::remove_dir_all(&dir).ok();
    }
}
