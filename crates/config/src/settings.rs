use crate::error::{ErrorKind, Result};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::str::FromStr;

const QUALITY_RANGE: RangeInclusive<f32> = 0.1..=1.0;

/// Which surface the drop listener attaches to.
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropSource {
    #[default]
    #[display("canvas")]
    Canvas,
    #[display("document")]
    Document,
}
impl FromStr for DropSource {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "canvas" => Ok(Self::Canvas),
            "document" => Ok(Self::Document),
            other => exn::bail!(ErrorKind::UnknownDropSource(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Folder template for converted images; `{worldId}` is substituted.
    pub upload_folder: String,
    /// Name of the journal that collects one page per uploaded image.
    pub target_journal: String,
    /// WebP quality, `0.1..=1.0`.
    ///
    /// Handed to the converter as is. The built-in converter encodes lossless
    /// WebP only and does not use it.
    pub webp_quality: f32,
    pub show_notifications: bool,
    pub create_journal_if_missing: bool,
    pub drop_source: DropSource,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            upload_folder: "uploads/{worldId}/webp-images".to_string(),
            target_journal: crate::APP_NAME.to_string(),
            webp_quality: 0.85,
            show_notifications: true,
            create_journal_if_missing: true,
            drop_source: DropSource::Canvas,
        }
    }
}

impl Config {
    pub fn get(&self, key: SettingKey) -> SettingValue {
        match key {
            SettingKey::UploadFolder => SettingValue::Text(self.upload_folder.clone()),
            SettingKey::TargetJournal => SettingValue::Text(self.target_journal.clone()),
            SettingKey::WebpQuality => SettingValue::Number(self.webp_quality),
            SettingKey::ShowNotifications => SettingValue::Flag(self.show_notifications),
            SettingKey::CreateJournalIfMissing => SettingValue::Flag(self.create_journal_if_missing),
            SettingKey::DropSource => SettingValue::Text(self.drop_source.to_string()),
        }
    }

    /// Update one setting.
    ///
    /// # Errors
    /// - [`ErrorKind::InvalidType`] if `value` doesn't fit the setting.
    /// - [`ErrorKind::OutOfRange`] for a quality outside `0.1..=1.0`.
    /// - [`ErrorKind::UnknownDropSource`] for a drop source other than
    ///   `canvas` or `document`.
    ///
    /// The configuration is unchanged when an error is returned.
    pub fn set(&mut self, key: SettingKey, value: SettingValue) -> Result<()> {
        match (key, value) {
            (SettingKey::UploadFolder, SettingValue::Text(folder)) => self.upload_folder = folder,
            (SettingKey::TargetJournal, SettingValue::Text(name)) => self.target_journal = name,
            (SettingKey::WebpQuality, SettingValue::Number(quality)) => {
                check_quality(quality)?;
                self.webp_quality = quality;
            },
            (SettingKey::ShowNotifications, SettingValue::Flag(flag)) => self.show_notifications = flag,
            (SettingKey::CreateJournalIfMissing, SettingValue::Flag(flag)) => self.create_journal_if_missing = flag,
            (SettingKey::DropSource, SettingValue::Text(source)) => self.drop_source = source.parse()?,
            (key, _) => exn::bail!(ErrorKind::InvalidType { key: key.as_str(), expected: key.expected() }),
        }
        tracing::debug!(setting = key.as_str(), "Setting updated");
        Ok(())
    }

    /// Checks invariants that serde can't express.
    pub fn validate(&self) -> Result<()> {
        check_quality(self.webp_quality)
    }
}

fn check_quality(quality: f32) -> Result<()> {
    if !QUALITY_RANGE.contains(&quality) {
        exn::bail!(ErrorKind::OutOfRange { key: SettingKey::WebpQuality.as_str(), value: quality.to_string() });
    }
    Ok(())
}

/// Host-facing setting identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    UploadFolder,
    TargetJournal,
    WebpQuality,
    ShowNotifications,
    CreateJournalIfMissing,
    DropSource,
}

impl SettingKey {
    pub const ALL: [SettingKey; 6] = [
        Self::UploadFolder,
        Self::TargetJournal,
        Self::WebpQuality,
        Self::ShowNotifications,
        Self::CreateJournalIfMissing,
        Self::DropSource,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::UploadFolder => "uploadFolder",
            Self::TargetJournal => "targetJournal",
            Self::WebpQuality => "webpQuality",
            Self::ShowNotifications => "showNotifications",
            Self::CreateJournalIfMissing => "createJournalIfMissing",
            Self::DropSource => "dropSource",
        }
    }

    fn expected(self) -> &'static str {
        match self {
            Self::UploadFolder | Self::TargetJournal | Self::DropSource => "a string",
            Self::WebpQuality => "a number",
            Self::ShowNotifications | Self::CreateJournalIfMissing => "a boolean",
        }
    }
}
impl FromStr for SettingKey {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ErrorKind::UnknownSetting(s.to_string()).into())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Text(String),
    Number(f32),
    Flag(bool),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.upload_folder, "uploads/{worldId}/webp-images");
        assert_eq!(config.target_journal, "mini-uploader");
        assert_eq!(config.webp_quality, 0.85);
        assert!(config.show_notifications);
        assert!(config.create_journal_if_missing);
        assert_eq!(config.drop_source, DropSource::Canvas);
        assert!(config.validate().is_ok());
    }

    #[rstest]
    #[case("uploadFolder", SettingKey::UploadFolder)]
    #[case("targetJournal", SettingKey::TargetJournal)]
    #[case("webpQuality", SettingKey::WebpQuality)]
    #[case("showNotifications", SettingKey::ShowNotifications)]
    #[case("createJournalIfMissing", SettingKey::CreateJournalIfMissing)]
    #[case("dropSource", SettingKey::DropSource)]
    fn test_setting_key_parse(#[case] input: &str, #[case] expected: SettingKey) {
        let key: SettingKey = input.parse().unwrap();
        assert_eq!(key, expected);
        assert_eq!(key.as_str(), input);
    }

    #[test]
    fn test_unknown_setting_key() {
        let err = "upload_folder".parse::<SettingKey>().unwrap_err();
        assert!(matches!(&*err, ErrorKind::UnknownSetting(k) if k == "upload_folder"));
    }

    #[test]
    fn test_get_and_set() {
        let mut config = Config::default();
        config.set(SettingKey::UploadFolder, SettingValue::Text("assets/{worldId}".into())).unwrap();
        config.set(SettingKey::WebpQuality, SettingValue::Number(0.5)).unwrap();
        config.set(SettingKey::ShowNotifications, SettingValue::Flag(false)).unwrap();
        config.set(SettingKey::DropSource, SettingValue::Text("document".into())).unwrap();
        assert_eq!(config.get(SettingKey::UploadFolder), SettingValue::Text("assets/{worldId}".into()));
        assert_eq!(config.get(SettingKey::WebpQuality), SettingValue::Number(0.5));
        assert_eq!(config.get(SettingKey::ShowNotifications), SettingValue::Flag(false));
        assert_eq!(config.get(SettingKey::DropSource), SettingValue::Text("document".into()));
        assert_eq!(config.drop_source, DropSource::Document);
    }

    #[rstest]
    #[case(0.1, true)]
    #[case(1.0, true)]
    #[case(0.09, false)]
    #[case(1.01, false)]
    #[case(f32::NAN, false)]
    fn test_quality_range(#[case] quality: f32, #[case] ok: bool) {
        let mut config = Config::default();
        let result = config.set(SettingKey::WebpQuality, SettingValue::Number(quality));
        assert_eq!(result.is_ok(), ok);
        if !ok {
            assert!(matches!(&*result.unwrap_err(), ErrorKind::OutOfRange { .. }));
            assert_eq!(config.webp_quality, 0.85);
        }
    }

    #[test]
    fn test_set_rejects_wrong_type() {
        let mut config = Config::default();
        let err = config.set(SettingKey::ShowNotifications, SettingValue::Text("yes".into())).unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidType { key: "showNotifications", .. }));
        let err = config.set(SettingKey::DropSource, SettingValue::Text("sidebar".into())).unwrap_err();
        assert!(matches!(&*err, ErrorKind::UnknownDropSource(_)));
        assert_eq!(config, Config::default());
    }
}
