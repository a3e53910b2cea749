//! # Cosmetics Settings
//!
//! Where to find the customization document and the models, read once at
//! startup from TOML.
//!
//! ```toml
//! application_root = "/opt/ksp"
//! module_dir = "/opt/ksp/GameData/KerbonautRedux/Plugins"
//! fallback_shader = "KSP/Bumped"
//! ```
//!
//! Every key is optional.

use std::path::{Path, PathBuf};

use kerbonaut_shared::{CONFIG_FILE_NAME, DEFAULT_SHADER, MODELS_DIR, MOD_DIR, TEXTURE_DIR};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reading a settings file.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The file could not be read.
    #[error("failed to read settings {path:?}: {source}")]
    Io {
        /// Settings file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid settings TOML.
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for settings.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Paths and names the context loads from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CosmeticsSettings {
    /// File name of the customization document.
    pub config_file_name: String,
    /// Directory of the loaded module. The document is looked up here first.
    pub module_dir: Option<PathBuf>,
    /// Host application root.
    pub application_root: PathBuf,
    /// Models directory, relative to `application_root` unless absolute.
    pub models_dir: PathBuf,
    /// Prefix the host registers this mod's textures under.
    pub texture_prefix: String,
    /// Shader used when a requested one is missing.
    pub fallback_shader: String,
}

impl Default for CosmeticsSettings {
    fn default() -> Self {
        Self {
            config_file_name: CONFIG_FILE_NAME.to_owned(),
            module_dir: None,
            application_root: PathBuf::from("."),
            models_dir: PathBuf::from(MODELS_DIR),
            texture_prefix: TEXTURE_DIR.to_owned(),
            fallback_shader: DEFAULT_SHADER.to_owned(),
        }
    }
}

impl CosmeticsSettings {
    /// Parses settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns error if the text is not valid TOML or a key has the wrong type.
    pub fn from_toml_str(text: &str) -> SettingsResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> SettingsResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&text)?;
        tracing::info!("Loaded cosmetics settings from {:?}", path);
        Ok(settings)
    }

    /// Settings rooted at `application_root`, everything else default.
    #[must_use]
    pub fn with_root(application_root: impl Into<PathBuf>) -> Self {
        Self {
            application_root: application_root.into(),
            ..Self::default()
        }
    }

    /// Document path: next to the module if its directory is known, else
    /// under `<application_root>/GameData/KerbonautRedux/`.
    #[must_use]
    pub fn resolve_config_path(&self) -> PathBuf {
        match &self.module_dir {
            Some(dir) => dir.join(&self.config_file_name),
            None => self
                .application_root
                .join("GameData")
                .join(MOD_DIR)
                .join(&self.config_file_name),
        }
    }

    /// Absolute (or root-relative) models directory.
    #[must_use]
    pub fn models_path(&self) -> PathBuf {
        self.application_root.join(&self.models_dir)
    }
}
