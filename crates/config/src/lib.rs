//! Settings for mini-uploader.
//!
//! A [`Config`] is an immutable snapshot taken when the host starts (or when
//! a batch starts); every component receives it rather than reading global
//! state. Values can be read and written by their host-facing keys through
//! [`SettingKey`], and a whole configuration can be [loaded](Config::load)
//! from defaults, a file and the environment.

pub mod error;
mod load;
mod settings;

pub use crate::load::{ENV_PREFIX, default_path};
pub use crate::settings::{Config, DropSource, SettingKey, SettingValue};

/// Identifier used for the configuration directory and the default journal.
pub const APP_NAME: &str = "mini-uploader";
