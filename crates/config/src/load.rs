use crate::error::{ErrorKind, Result};
use crate::settings::Config;
use directories::ProjectDirs;
use exn::{OptionExt, ResultExt};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Prefix of environment variables that override settings, e.g.
/// `MINUP_WEBP_QUALITY=0.6`.
pub const ENV_PREFIX: &str = "MINUP_";

/// `<config dir>/mini-uploader/config.toml` for the current platform.
pub fn default_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", crate::APP_NAME).ok_or_raise(|| ErrorKind::NoConfigDir)?;
    Ok(dirs.config_dir().join("config.toml"))
}

impl Config {
    /// Load the configuration from (in increasing priority) defaults, a
    /// file and `MINUP_` environment variables, then validate it.
    ///
    /// An explicit `path` must exist. Without one, the file at
    /// [`default_path`] is used if it exists. Platforms without a
    /// configuration directory get defaults and environment overrides only.
    /// The file format follows the extension: `.yaml`/`.yml`, `.json`,
    /// anything else is TOML.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(path, true),
            None => match default_path() {
                Ok(path) => Self::load_file(&path, false),
                Err(e) => {
                    tracing::debug!(error = %e, "No default configuration file");
                    Self::load_environment()
                },
            },
        }
    }

    fn load_file(path: &Path, required: bool) -> Result<Self> {
        let figment = Self::with_file(Self::defaults(), path, required).merge(Env::prefixed(ENV_PREFIX));
        let config: Config = figment.extract().or_raise(|| ErrorKind::Load(path.to_path_buf()))?;
        config.validate()?;
        tracing::debug!(config = ?config, source = %path.display(), "Configuration loaded");
        Ok(config)
    }

    fn load_environment() -> Result<Self> {
        let figment = Self::defaults().merge(Env::prefixed(ENV_PREFIX));
        let config: Config = figment.extract().or_raise(|| ErrorKind::Environment)?;
        config.validate()?;
        tracing::debug!(config = ?config, "Configuration loaded from environment");
        Ok(config)
    }

    fn defaults() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
    }

    fn with_file(base: Figment, path: &Path, required: bool) -> Figment {
        let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
        match (extension.as_deref(), required) {
            (Some("yaml" | "yml"), true) => base.merge(Yaml::file_exact(path)),
            (Some("yaml" | "yml"), false) => base.merge(Yaml::file(path)),
            (Some("json"), true) => base.merge(Json::file_exact(path)),
            (Some("json"), false) => base.merge(Json::file(path)),
            (_, true) => base.merge(Toml::file_exact(path)),
            (_, false) => base.merge(Toml::file(path)),
        }
    }
}
