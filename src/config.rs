/// Sort settings: the persisted schema and the resolved configuration
use crate::error::{Result, TabSortError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Extension id of "The Marvellous Suspender"
pub const DEFAULT_SUSPENDER_EXTENSION_ID: &str = "noogafoofpebimajpfpamcfhoaifemoa";

pub const DEFAULT_AUTO_SORT_INTERVAL_SECONDS: u32 = 300;
pub const MIN_AUTO_SORT_INTERVAL_SECONDS: u32 = 1;
pub const MAX_AUTO_SORT_INTERVAL_SECONDS: u32 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    Url,
    Title,
    Custom,
}

impl FromStr for SortBy {
    type Err = TabSortError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "url" => Ok(SortBy::Url),
            "title" => Ok(SortBy::Title),
            "custom" => Ok(SortBy::Custom),
            other => Err(TabSortError::UnknownSortMode(other.to_string())),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortBy::Url => "url",
            SortBy::Title => "title",
            SortBy::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// Scan direction used to assign group ordinals in custom sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupFrom {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl FromStr for GroupFrom {
    type Err = TabSortError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "leftToRight" => Ok(GroupFrom::LeftToRight),
            "rightToLeft" => Ok(GroupFrom::RightToLeft),
            other => Err(TabSortError::UnknownGroupDirection(other.to_string())),
        }
    }
}

/// Resolved, immutable configuration for one sort invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortConfiguration {
    pub sort_by: SortBy,
    pub group_from: GroupFrom,
    pub preserve_order_within_groups: bool,
    pub group_suspended_tabs: bool,
    pub sort_pinned_tabs: bool,
    pub dedupe_tabs: bool,
    pub suspender_marker_id: String,
}

impl Default for SortConfiguration {
    fn default() -> Self {
        SortConfiguration {
            sort_by: SortBy::default(),
            group_from: GroupFrom::default(),
            preserve_order_within_groups: false,
            group_suspended_tabs: false,
            sort_pinned_tabs: false,
            dedupe_tabs: false,
            suspender_marker_id: DEFAULT_SUSPENDER_EXTENSION_ID.to_string(),
        }
    }
}

/// Auto-sort trigger settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoSortSettings {
    pub enabled: bool,
    pub interval_seconds: u32,
    pub on_tab_create: bool,
    pub on_tab_close: bool,
}

impl Default for AutoSortSettings {
    fn default() -> Self {
        AutoSortSettings {
            enabled: false,
            interval_seconds: DEFAULT_AUTO_SORT_INTERVAL_SECONDS,
            on_tab_create: true,
            on_tab_close: true,
        }
    }
}

/// Settings as stored in `chrome.storage.sync`
///
/// Mode fields stay as raw strings so that a value written by a newer or
/// older options page degrades to the default instead of failing the load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredSettings {
    pub sort_by: String,
    pub group_from: String,
    pub preserve_order_within_groups: bool,
    pub group_suspended_tabs: bool,
    pub tab_suspender_extension_id: String,
    pub sort_pinned_tabs: bool,
    pub dedupe_tabs: bool,
    pub auto_sort_enabled: bool,
    pub auto_sort_interval_seconds: i64,
    pub auto_sort_on_tab_create: bool,
    pub auto_sort_on_tab_close: bool,
}

impl Default for StoredSettings {
    fn default() -> Self {
        StoredSettings {
            sort_by: SortBy::Url.to_string(),
            group_from: "leftToRight".to_string(),
            preserve_order_within_groups: false,
            group_suspended_tabs: false,
            tab_suspender_extension_id: DEFAULT_SUSPENDER_EXTENSION_ID.to_string(),
            sort_pinned_tabs: false,
            dedupe_tabs: false,
            auto_sort_enabled: false,
            auto_sort_interval_seconds: i64::from(DEFAULT_AUTO_SORT_INTERVAL_SECONDS),
            auto_sort_on_tab_create: true,
            auto_sort_on_tab_close: true,
        }
    }
}

impl StoredSettings {
    pub fn from_json(json: &str) -> Result<StoredSettings> {
        serde_json::from_str(json).map_err(|e| TabSortError::InvalidInput(e.to_string()))
    }

    /// Resolve into a configuration, falling back to defaults for unknown modes
    pub fn sort_configuration(&self) -> SortConfiguration {
        let sort_by = self.sort_by.parse::<SortBy>().unwrap_or_else(|e| {
            log::warn!("{}, falling back to {}", e, SortBy::default());
            SortBy::default()
        });
        let group_from = self.group_from.parse::<GroupFrom>().unwrap_or_else(|e| {
            log::warn!("{}, falling back to leftToRight", e);
            GroupFrom::default()
        });
        let suspender_marker_id = if self.tab_suspender_extension_id.trim().is_empty() {
            DEFAULT_SUSPENDER_EXTENSION_ID.to_string()
        } else {
            self.tab_suspender_extension_id.trim().to_string()
        };

        SortConfiguration {
            sort_by,
            group_from,
            preserve_order_within_groups: self.preserve_order_within_groups,
            group_suspended_tabs: self.group_suspended_tabs,
            sort_pinned_tabs: self.sort_pinned_tabs,
            dedupe_tabs: self.dedupe_tabs,
            suspender_marker_id,
        }
    }

    pub fn auto_sort(&self) -> AutoSortSettings {
        let interval = self.auto_sort_interval_seconds.clamp(
            i64::from(MIN_AUTO_SORT_INTERVAL_SECONDS),
            i64::from(MAX_AUTO_SORT_INTERVAL_SECONDS),
        );

        AutoSortSettings {
            enabled: self.auto_sort_enabled,
            interval_seconds: u32::try_from(interval).unwrap_or(DEFAULT_AUTO_SORT_INTERVAL_SECONDS),
            on_tab_create: self.auto_sort_on_tab_create,
            on_tab_close: self.auto_sort_on_tab_close,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stored_schema() {
        let stored = StoredSettings::default();
        assert_eq!(stored.sort_configuration(), SortConfiguration::default());
        assert_eq!(stored.auto_sort(), AutoSortSettings::default());
    }

    #[test]
    fn test_from_json_partial() {
        let stored = StoredSettings::from_json(
            r#"{"sortBy": "custom", "groupFrom": "rightToLeft", "dedupeTabs": true}"#,
        )
        .unwrap();
        let config = stored.sort_configuration();

        assert_eq!(config.sort_by, SortBy::Custom);
        assert_eq!(config.group_from, GroupFrom::RightToLeft);
        assert!(config.dedupe_tabs);
        assert!(!config.sort_pinned_tabs);
        assert_eq!(config.suspender_marker_id, DEFAULT_SUSPENDER_EXTENSION_ID);
    }

    #[test]
    fn test_from_json_invalid() {
        let result = StoredSettings::from_json("{\"sortBy\": 3}");
        assert!(matches!(result, Err(TabSortError::InvalidInput(_))));
    }

    #[test]
    fn test_unknown_modes_fall_back() {
        let stored = StoredSettings {
            sort_by: "color".to_string(),
            group_from: "diagonal".to_string(),
            ..StoredSettings::default()
        };
        let config = stored.sort_configuration();

        assert_eq!(config.sort_by, SortBy::Url);
        assert_eq!(config.group_from, GroupFrom::LeftToRight);
    }

    #[test]
    fn test_sort_by_from_str() {
        assert_eq!("title".parse::<SortBy>(), Ok(SortBy::Title));
        assert_eq!(
            "Title".parse::<SortBy>(),
            Err(TabSortError::UnknownSortMode("Title".to_string()))
        );
    }

    #[test]
    fn test_blank_suspender_id_uses_default() {
        let stored = StoredSettings {
            tab_suspender_extension_id: "  ".to_string(),
            ..StoredSettings::default()
        };
        assert_eq!(
            stored.sort_configuration().suspender_marker_id,
            DEFAULT_SUSPENDER_EXTENSION_ID
        );
    }

    #[test]
    fn test_auto_sort_interval_clamped() {
        let low = StoredSettings {
            auto_sort_interval_seconds: 0,
            ..StoredSettings::default()
        };
        let high = StoredSettings {
            auto_sort_interval_seconds: 86_400,
            ..StoredSettings::default()
        };

        assert_eq!(low.auto_sort().interval_seconds, 1);
        assert_eq!(high.auto_sort().interval_seconds, 3600);
    }
}
