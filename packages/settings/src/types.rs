// ABOUTME: Type definitions for the singleton system settings record
// ABOUTME: Wire format matches the console REST API (camelCase JSON)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default language assigned to newly created users.
///
/// Wire values are locale codes. Only `zh_CN` is currently selectable;
/// `en_US` exists on the wire but is not yet offered to operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefaultLanguage {
    #[serde(rename = "zh_CN")]
    ZhCn,
    #[serde(rename = "en_US")]
    EnUs,
}

impl DefaultLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            DefaultLanguage::ZhCn => "zh_CN",
            DefaultLanguage::EnUs => "en_US",
        }
    }

    /// Languages an operator may currently pick.
    pub fn active() -> &'static [DefaultLanguage] {
        &[DefaultLanguage::ZhCn]
    }

    pub fn is_active(&self) -> bool {
        Self::active().contains(self)
    }
}

impl fmt::Display for DefaultLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DefaultLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zh_CN" => Ok(DefaultLanguage::ZhCn),
            "en_US" => Ok(DefaultLanguage::EnUs),
            other => Err(format!("Unknown language code: {}", other)),
        }
    }
}

/// Which of the two console images an upload targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Favicon,
    Logo,
}

impl ImageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageKind::Favicon => "favicon",
            ImageKind::Logo => "logo",
        }
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The singleton system settings record as stored by the console.
///
/// `object_version_number` is an opaque optimistic-concurrency token: the
/// server returns it on read and expects it echoed back on update. It is
/// absent until the record has been created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSetting {
    #[serde(default)]
    pub system_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_title: Option<String>,
    #[serde(default)]
    pub default_password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_language: Option<DefaultLanguage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_version_number: Option<i64>,
}

/// In-memory, possibly-unsaved copy of the settings being edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsDraft {
    pub system_name: String,
    pub system_title: Option<String>,
    pub default_password: String,
    pub default_language: Option<DefaultLanguage>,
    pub favicon: Option<String>,
    pub system_logo: Option<String>,
}

impl SettingsDraft {
    /// Build a draft from a loaded record, image references included.
    pub fn from_record(record: &SystemSetting) -> Self {
        Self {
            system_name: record.system_name.clone(),
            system_title: record.system_title.clone(),
            default_password: record.default_password.clone(),
            default_language: record.default_language,
            favicon: record.favicon.clone(),
            system_logo: record.system_logo.clone(),
        }
    }

    /// Field-by-field comparison against a stored record.
    ///
    /// Drives the no-op submit guard: if nothing differs the editor must not
    /// issue a network call. The version token is deliberately excluded.
    pub fn differs_from(&self, record: &SystemSetting) -> bool {
        self.system_name != record.system_name
            || self.system_title != record.system_title
            || self.default_password != record.default_password
            || self.default_language != record.default_language
            || self.favicon != record.favicon
            || self.system_logo != record.system_logo
    }

    /// Assemble the submit payload, carrying the version token of the record
    /// the draft was loaded from (if any).
    pub fn into_payload(self, object_version_number: Option<i64>) -> SystemSetting {
        SystemSetting {
            system_name: self.system_name,
            system_title: self.system_title,
            default_password: self.default_password,
            default_language: self.default_language,
            favicon: self.favicon,
            system_logo: self.system_logo,
            object_version_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_record() -> SystemSetting {
        SystemSetting {
            system_name: "Console".to_string(),
            system_title: Some("Operations Console".to_string()),
            default_password: "abc123".to_string(),
            default_language: Some(DefaultLanguage::ZhCn),
            favicon: Some("https://cdn.example.com/favicon.png".to_string()),
            system_logo: Some("https://cdn.example.com/logo.png".to_string()),
            object_version_number: Some(3),
        }
    }

    #[test]
    fn draft_from_record_copies_every_field() {
        let record = sample_record();
        let draft = SettingsDraft::from_record(&record);
        assert_eq!(draft.system_name, record.system_name);
        assert_eq!(draft.system_title, record.system_title);
        assert_eq!(draft.default_password, record.default_password);
        assert_eq!(draft.default_language, record.default_language);
        assert_eq!(draft.favicon, record.favicon);
        assert_eq!(draft.system_logo, record.system_logo);
    }

    #[test]
    fn unchanged_draft_does_not_differ() {
        let record = sample_record();
        let draft = SettingsDraft::from_record(&record);
        assert!(!draft.differs_from(&record));
    }

    #[test]
    fn any_field_change_is_a_difference() {
        let record = sample_record();

        let mut draft = SettingsDraft::from_record(&record);
        draft.system_name = "Renamed".to_string();
        assert!(draft.differs_from(&record));

        let mut draft = SettingsDraft::from_record(&record);
        draft.favicon = None;
        assert!(draft.differs_from(&record));

        let mut draft = SettingsDraft::from_record(&record);
        draft.default_password = "xyz789".to_string();
        assert!(draft.differs_from(&record));
    }

    #[test]
    fn payload_carries_the_version_token() {
        let record = sample_record();
        let draft = SettingsDraft::from_record(&record);
        let payload = draft.into_payload(record.object_version_number);
        assert_eq!(payload.object_version_number, Some(3));
        assert_eq!(payload.system_name, record.system_name);
    }

    #[test]
    fn record_serializes_camel_case() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(json["systemName"], "Console");
        assert_eq!(json["defaultLanguage"], "zh_CN");
        assert_eq!(json["objectVersionNumber"], 3);
    }

    #[test]
    fn empty_object_deserializes_to_default() {
        let record: SystemSetting = serde_json::from_str("{}").unwrap();
        assert_eq!(record, SystemSetting::default());
        assert!(record.object_version_number.is_none());
    }

    #[test]
    fn only_zh_cn_is_active() {
        assert!(DefaultLanguage::ZhCn.is_active());
        assert!(!DefaultLanguage::EnUs.is_active());
    }

    #[test]
    fn language_round_trips_through_str() {
        assert_eq!("zh_CN".parse::<DefaultLanguage>().unwrap(), DefaultLanguage::ZhCn);
        assert_eq!("en_US".parse::<DefaultLanguage>().unwrap(), DefaultLanguage::EnUs);
        assert!("fr_FR".parse::<DefaultLanguage>().is_err());
    }
}
