//! Shared configuration loader for the mdpage toolchain.
//!
//! `defaults/mdpage.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`MdpageConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mdpage::{LinkPolicy, TransformOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/mdpage.default.toml");

/// Top-level configuration consumed by mdpage applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MdpageConfig {
    pub content: ContentConfig,
    pub links: LinksConfig,
    pub markdown: MarkdownConfig,
    #[serde(default)]
    pub template: TemplateConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
}

/// Where pages live and how they are arranged.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    pub root: PathBuf,
    #[serde(default)]
    pub path_prefix: Option<String>,
    #[serde(default)]
    pub order: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinksConfig {
    pub policy: LinkPolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateConfig {
    #[serde(default)]
    pub default: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetsConfig {
    #[serde(default)]
    pub public_prefix: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|value| !value.is_empty()).cloned()
}

impl From<&MdpageConfig> for TransformOptions {
    fn from(config: &MdpageConfig) -> Self {
        TransformOptions {
            content_root: config.content.root.clone(),
            path_prefix: non_empty(&config.content.path_prefix),
            order: config.content.order.clone(),
            link_policy: config.links.policy,
            extensions: config.markdown.extensions.clone(),
            default_template: non_empty(&config.template.default),
            public_prefix: non_empty(&config.assets.public_prefix),
        }
    }
}

impl From<MdpageConfig> for TransformOptions {
    fn from(config: MdpageConfig) -> Self {
        TransformOptions::from(&config)
    }
}

/// Builds an [`MdpageConfig`] from the embedded defaults plus site files and flags.
///
/// Later layers win key by key: `mdpage.toml` in the site, then an explicit file,
/// then single-key overrides such as `links.policy` from the command line.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Loader holding only `defaults/mdpage.default.toml`.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a site configuration the user pointed at explicitly; it must exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a conventional file such as `./mdpage.toml`, skipped when absent.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Pin one dotted key (`content.root`, `links.policy`, ...) above every file.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge the layers and check them against the [`MdpageConfig`] schema.
    pub fn build(self) -> Result<MdpageConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration of a site with no `mdpage.toml`.
pub fn load_defaults() -> Result<MdpageConfig, ConfigError> {
    Loader::new().build()
}
