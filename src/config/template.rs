//! Template location settings, from code or from the environment.

use crate::error::ConfigError;
use std::path::PathBuf;

pub const DEFAULT_TEMPLATE_EXT: &str = "html";
pub const DEFAULT_TEMPLATE_DIR: &str = "templates";

/// Env var with template directories, separated like `PATH`. App dirs first.
pub const TEMPLATE_DIRS_ENV: &str = "PAGEKIT_TEMPLATE_DIRS";
pub const TEMPLATE_EXT_ENV: &str = "PAGEKIT_TEMPLATE_EXT";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateConfig {
    /// Searched in order; the first directory holding a template wins.
    pub dirs: Vec<PathBuf>,
    /// Appended to template file names, without the dot.
    pub extension: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        TemplateConfig {
            dirs: vec![PathBuf::from(DEFAULT_TEMPLATE_DIR)],
            extension: DEFAULT_TEMPLATE_EXT.to_string(),
        }
    }
}

impl TemplateConfig {
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        TemplateConfig {
            dirs: dirs.into_iter().map(Into::into).collect(),
            extension: DEFAULT_TEMPLATE_EXT.to_string(),
        }
    }

    /// Read `PAGEKIT_TEMPLATE_DIRS` and `PAGEKIT_TEMPLATE_EXT`, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = TemplateConfig::default();
        if let Some(raw) = lookup(TEMPLATE_DIRS_ENV).filter(|s| !s.trim().is_empty()) {
            config.dirs = std::env::split_paths(&raw).filter(|p| !p.as_os_str().is_empty()).collect();
        }
        if let Some(ext) = lookup(TEMPLATE_EXT_ENV) {
            config.extension = parse_extension(&ext)?;
        }
        Ok(config)
    }
}

fn parse_extension(raw: &str) -> Result<String, ConfigError> {
    let ext = raw.trim().trim_start_matches('.');
    if ext.is_empty() || ext.contains(['/', '\\']) {
        return Err(ConfigError::Invalid {
            key: TEMPLATE_EXT_ENV,
            message: format!("'{}' is not a file extension", raw),
        });
    }
    Ok(ext.to_string())
}
