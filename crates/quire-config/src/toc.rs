//! Table-of-contents settings shared by site configuration and frontmatter.
//!
//! Both places accept either a boolean or a heading-level window:
//!
//! ```toml
//! table_of_contents = false
//!
//! [table_of_contents]
//! min_heading_level = 2
//! max_heading_level = 4
//! ```
//!
//! Frontmatter uses the camelCase spelling (`minHeadingLevel`).

use serde::{Deserialize, Serialize, Serializer};

/// Heading-level window for a table of contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TocConfig {
    pub min_heading_level: u8,
    pub max_heading_level: u8,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            min_heading_level: 2,
            max_heading_level: 3,
        }
    }
}

impl TocConfig {
    /// Check that `1 <= min <= max <= 6`.
    pub fn validate(&self) -> Result<(), String> {
        let range = 1..=6;
        if !range.contains(&self.min_heading_level) || !range.contains(&self.max_heading_level) {
            return Err("heading levels must be between 1 and 6".to_owned());
        }
        if self.min_heading_level > self.max_heading_level {
            return Err(format!(
                "min_heading_level ({}) cannot exceed max_heading_level ({})",
                self.min_heading_level, self.max_heading_level
            ));
        }
        Ok(())
    }
}

/// Whether a table of contents is shown, and with which window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "TocSettingRaw")]
pub enum TocSetting {
    Disabled,
    Enabled(TocConfig),
}

impl Default for TocSetting {
    fn default() -> Self {
        Self::Enabled(TocConfig::default())
    }
}

impl TocSetting {
    /// The window when enabled.
    #[must_use]
    pub fn config(&self) -> Option<&TocConfig> {
        match self {
            Self::Disabled => None,
            Self::Enabled(config) => Some(config),
        }
    }
}

impl Serialize for TocSetting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Disabled => serializer.serialize_bool(false),
            Self::Enabled(config) => config.serialize(serializer),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TocSettingRaw {
    Flag(bool),
    Levels(TocLevelsRaw),
}

#[derive(Deserialize)]
struct TocLevelsRaw {
    #[serde(default, alias = "minHeadingLevel")]
    min_heading_level: Option<u8>,
    #[serde(default, alias = "maxHeadingLevel")]
    max_heading_level: Option<u8>,
}

impl From<TocSettingRaw> for TocSetting {
    fn from(raw: TocSettingRaw) -> Self {
        match raw {
            TocSettingRaw::Flag(false) => Self::Disabled,
            TocSettingRaw::Flag(true) => Self::Enabled(TocConfig::default()),
            TocSettingRaw::Levels(levels) => {
                let defaults = TocConfig::default();
                Self::Enabled(TocConfig {
                    min_heading_level: levels
                        .min_heading_level
                        .unwrap_or(defaults.min_heading_level),
                    max_heading_level: levels
                        .max_heading_level
                        .unwrap_or(defaults.max_heading_level),
                })
            }
        }
    }
}
