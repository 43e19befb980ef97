//! Category configuration.
//!
//! The extension-to-category mapping can be replaced wholesale by a TOML file
//! read once at startup. Each key under `[categories]` is a category folder
//! name, and its value lists the extensions that belong to it:
//!
//! ```toml
//! [categories]
//! images = ["jpg", "jpeg", "png"]
//! docs = ["txt", "pdf"]
//! ```
//!
//! Without a file, the built-in [`CategoryMap::default`] table is used.

use crate::file_category::CategoryMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-directory configuration file.
pub const LOCAL_CONFIG_FILE: &str = ".sortdir.toml";

/// Errors that can occur while loading category configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),
    /// IO error while reading configuration.
    #[error("IO error reading configuration {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Invalid TOML syntax or structure.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] toml::de::Error),
    /// The same extension is listed under two categories.
    #[error("Extension '{extension}' is listed under both '{first}' and '{second}'")]
    DuplicateExtension {
        extension: String,
        first: String,
        second: String,
    },
    /// A category name that cannot be used as a folder name.
    #[error("Invalid category name '{0}': must be a plain, non-empty folder name")]
    InvalidCategoryName(String),
}

/// Category configuration as written in TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Category name to the extensions it collects.
    #[serde(default)]
    pub categories: BTreeMap<String, Vec<String>>,
}

impl CategoryConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!(path = %path.display(), "Loaded category configuration");
        Self::from_toml(&content)
    }

    /// Validates the configuration and builds the lookup map.
    ///
    /// # Errors
    ///
    /// Returns an error if a category name is empty, is `.`/`..`, or contains
    /// a path separator, or if an extension appears under two categories.
    pub fn into_category_map(self) -> Result<CategoryMap, ConfigError> {
        let mut extensions: HashMap<String, String> = HashMap::new();

        for (category, exts) in self.categories {
            if !is_plain_folder_name(&category) {
                return Err(ConfigError::InvalidCategoryName(category));
            }

            for ext in exts {
                let ext = ext.strip_prefix('.').unwrap_or(&ext).to_string();
                if let Some(first) = extensions.get(&ext) {
                    if *first == category {
                        continue;
                    }
                    return Err(ConfigError::DuplicateExtension {
                        extension: ext,
                        first: first.clone(),
                        second: category,
                    });
                }
                extensions.insert(ext, category.clone());
            }
        }

        Ok(CategoryMap::new(extensions))
    }
}

/// Resolves the category map for a run.
///
/// Looks in this order:
/// 1. `config_path`, if given (it must exist)
/// 2. `.sortdir.toml` in the current directory
/// 3. `sortdir/config.toml` in the user's configuration directory
/// 4. the built-in defaults
pub fn load(config_path: Option<&Path>) -> Result<CategoryMap, ConfigError> {
    if let Some(path) = config_path {
        return CategoryConfig::load_from_file(path)?.into_category_map();
    }

    let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
    if local_config.exists() {
        return CategoryConfig::load_from_file(&local_config)?.into_category_map();
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join("sortdir").join("config.toml");
        if user_config.exists() {
            return CategoryConfig::load_from_file(&user_config)?.into_category_map();
        }
    }

    Ok(CategoryMap::default())
}

fn is_plain_folder_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}
