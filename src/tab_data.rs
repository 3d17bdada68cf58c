/// Data structures for the tab ordering engine
use serde::{Deserialize, Serialize};

/// Group id the browser reports for tabs outside any tab group
pub const TAB_GROUP_ID_NONE: i32 = -1;

/// Snapshot of a browser tab, as reported by `chrome.tabs.query`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub id: i32,
    pub index: i32,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default = "default_group_id")]
    pub group_id: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_url: Option<String>,
}

fn default_group_id() -> i32 {
    TAB_GROUP_ID_NONE
}

impl TabInfo {
    pub fn new(id: i32, url: String, title: String, pinned: bool, index: i32) -> TabInfo {
        TabInfo {
            id,
            index,
            pinned,
            group_id: TAB_GROUP_ID_NONE,
            title,
            url,
            pending_url: None,
        }
    }

    pub fn in_group(&self) -> bool {
        self.group_id > TAB_GROUP_ID_NONE
    }
}

/// An existing tab group in the window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabGroup {
    pub id: i32,
    #[serde(default)]
    pub title: String,
}

/// A tab the planner refused to move, with the reason
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabWarning {
    pub tab_id: i32,
    pub message: String,
}

/// Target order for one segment of a window
///
/// The caller moves `tab_ids` as a block to `anchor_index`, then, if
/// `regroup_id` is set, re-adds them to that group (moving a tab can evict it
/// from its group).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementPlan {
    pub anchor_index: i32,
    pub tab_ids: Vec<i32>,
    pub regroup_id: Option<i32>,
    pub remove_ids: Vec<i32>,
    pub warnings: Vec<TabWarning>,
}

impl PlacementPlan {
    /// True when applying the plan would not move any of `tabs`
    pub fn is_identity(&self, tabs: &[TabInfo]) -> bool {
        self.remove_ids.is_empty()
            && self.tab_ids.len() == tabs.len()
            && self.tab_ids.iter().zip(tabs).all(|(id, tab)| *id == tab.id)
    }
}

/// Duplicate-URL resolution for a list of tabs
#[derive(Debug, Clone, PartialEq)]
pub struct DedupeDecision {
    pub keep: Vec<TabInfo>,
    pub remove: Vec<i32>,
}

/// A segment whose plan could not be computed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedSegment {
    pub group_id: i32,
    pub message: String,
}

/// Plans for every segment of one window
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowPlan {
    pub group_order: Vec<i32>,
    pub segments: Vec<PlacementPlan>,
    pub remove_ids: Vec<i32>,
    pub failed_segments: Vec<FailedSegment>,
}
