/// Tab operations: planning the sorted, deduplicated order of a window

use crate::compare::{compare_url_keys, locale_compare, title_comparator, CompareOptions, UrlSortKey};
use crate::config::{SortBy, SortConfiguration};
use crate::dedupe::dedupe;
use crate::error::{Result, TabSortError};
use crate::grouping::{sort_by_custom, GroupedTab};
use crate::locator::logical_url;
use crate::tab_data::{
    FailedSegment, PlacementPlan, TabGroup, TabInfo, TabWarning, WindowPlan, TAB_GROUP_ID_NONE,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Tabs of one existing tab group, as queried by group id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSnapshot {
    pub group: TabGroup,
    pub tabs: Vec<TabInfo>,
}

/// Per-segment tab queries for one window
///
/// The browser answers each query separately, so segments may disagree with
/// each other when tabs change in between.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowSnapshot {
    pub pinned: Vec<TabInfo>,
    pub groups: Vec<GroupSnapshot>,
    pub ungrouped: Vec<TabInfo>,
}

impl WindowSnapshot {
    /// Partition one consistent tab list into segments
    ///
    /// Tabs in a group missing from `groups` are left out.
    pub fn from_tabs(tabs: &[TabInfo], groups: &[TabGroup]) -> WindowSnapshot {
        let mut snapshot = WindowSnapshot {
            groups: groups
                .iter()
                .map(|group| GroupSnapshot {
                    group: group.clone(),
                    tabs: Vec::new(),
                })
                .collect(),
            ..WindowSnapshot::default()
        };

        for tab in tabs {
            if tab.pinned {
                snapshot.pinned.push(tab.clone());
            } else if !tab.in_group() {
                snapshot.ungrouped.push(tab.clone());
            } else if let Some(group) = snapshot.groups.iter_mut().find(|g| g.group.id == tab.group_id) {
                group.tabs.push(tab.clone());
            } else {
                log::warn!("Tab {} is in unknown group {}, leaving it in place", tab.id, tab.group_id);
            }
        }
        snapshot
    }
}

/// A tab resolved for sorting, or held at its current slot
enum Slot<'a> {
    Movable(&'a TabInfo),
    Fixed(&'a TabInfo),
}

/// Plan the target order of one segment (pinned tabs, one group, or ungrouped tabs)
///
/// `group_id` is the segment's group, `TAB_GROUP_ID_NONE` for pinned and
/// ungrouped tabs. The plan anchors at the segment's first index. Pinned
/// tabs (unless pinned sorting is on) and tabs whose URL cannot be parsed
/// keep their slot; the rest are sorted into the remaining slots.
pub fn compute_plan(tabs: &[TabInfo], group_id: i32, config: &SortConfiguration) -> Result<PlacementPlan> {
    if let Some(stray) = tabs.iter().find(|tab| tab.group_id != group_id) {
        return Err(TabSortError::SegmentMismatch {
            tab_id: stray.id,
            expected: group_id,
            found: stray.group_id,
        });
    }

    let mut ordered: Vec<&TabInfo> = tabs.iter().collect();
    ordered.sort_by_key(|tab| tab.index);
    let anchor_index = ordered.first().map_or(0, |tab| tab.index);

    let mut warnings = Vec::new();
    let slots: Vec<Slot> = ordered
        .iter()
        .map(|&tab| classify(tab, config, &mut warnings))
        .collect();

    let sorted = sort_movable(&slots, config);
    let mut sorted = sorted.into_iter();
    let arranged: Vec<TabInfo> = slots
        .iter()
        .filter_map(|slot| match slot {
            Slot::Fixed(tab) => Some((*tab).clone()),
            Slot::Movable(_) => sorted.next().cloned(),
        })
        .collect();

    let (kept, remove_ids) = if config.dedupe_tabs {
        let marker = config.suspender_marker_id.as_str();
        // Pinned tabs are only closed when pinned sorting is on
        let decision = dedupe(&arranged, |tab| {
            if tab.pinned && !config.sort_pinned_tabs {
                return None;
            }
            logical_url(tab, false, marker).ok().map(String::from)
        });
        (decision.keep, decision.remove)
    } else {
        (arranged, Vec::new())
    };

    let plan = PlacementPlan {
        anchor_index,
        tab_ids: kept.iter().map(|tab| tab.id).collect(),
        regroup_id: (group_id > TAB_GROUP_ID_NONE).then_some(group_id),
        remove_ids,
        warnings,
    };
    log::debug!(
        "planned segment {}: {} tabs at {}, {} to close, {} held",
        group_id,
        plan.tab_ids.len(),
        plan.anchor_index,
        plan.remove_ids.len(),
        plan.warnings.len()
    );
    Ok(plan)
}

fn classify<'a>(tab: &'a TabInfo, config: &SortConfiguration, warnings: &mut Vec<TabWarning>) -> Slot<'a> {
    if tab.pinned && !config.sort_pinned_tabs {
        return Slot::Fixed(tab);
    }

    // Title sorting never looks at the URL
    if config.sort_by == SortBy::Title {
        return Slot::Movable(tab);
    }

    let resolved = match config.sort_by {
        SortBy::Custom => GroupedTab::resolve(tab, config).map(|_| ()),
        _ => logical_url(tab, config.group_suspended_tabs, &config.suspender_marker_id).map(|_| ()),
    };
    match resolved {
        Ok(()) => Slot::Movable(tab),
        Err(e) => {
            log::warn!("{}, leaving it in place", e);
            warnings.push(TabWarning {
                tab_id: tab.id,
                message: e.to_string(),
            });
            Slot::Fixed(tab)
        }
    }
}

/// Sort the movable tabs with the strategy selected by `sort_by`
fn sort_movable<'a>(slots: &[Slot<'a>], config: &SortConfiguration) -> Vec<&'a TabInfo> {
    let mut movable: Vec<&TabInfo> = slots
        .iter()
        .filter_map(|slot| match slot {
            Slot::Movable(tab) => Some(*tab),
            Slot::Fixed(_) => None,
        })
        .collect();

    let options = CompareOptions {
        group_suspended_tabs: config.group_suspended_tabs,
        sort_pinned_tabs: config.sort_pinned_tabs,
        suspender_marker_id: &config.suspender_marker_id,
    };

    match config.sort_by {
        SortBy::Title => movable.sort_by(|a, b| title_comparator(a, b, &options)),
        SortBy::Url => {
            // Keys are resolved once; movable tabs were resolved in `classify`
            let mut keyed: Vec<(&TabInfo, UrlSortKey)> = movable
                .iter()
                .filter_map(|&tab| UrlSortKey::resolve(tab, &options).ok().map(|key| (tab, key)))
                .collect();
            keyed.sort_by(|a, b| compare_url_keys(&a.1, &b.1));
            movable = keyed.into_iter().map(|(tab, _)| tab).collect();
        }
        SortBy::Custom => {
            // Movable tabs were resolved successfully in `classify`
            let mut grouped: Vec<GroupedTab> = movable
                .iter()
                .filter_map(|&tab| GroupedTab::resolve(tab, config).ok())
                .collect();
            sort_by_custom(&mut grouped, config);
            movable = grouped.into_iter().map(|grouped| grouped.tab).collect();
        }
    }
    movable
}

/// Plan every segment of a window
///
/// Pinned tabs are planned only when pinned sorting is on. Groups are laid
/// out after the pinned tabs in ascending title order, followed by the
/// ungrouped tabs; each segment's anchor accounts for tabs closed by dedupe
/// in the segments before it. A segment that fails to plan is reported and
/// stays where it is.
pub fn plan_window(snapshot: &WindowSnapshot, config: &SortConfiguration) -> WindowPlan {
    let mut window = WindowPlan::default();
    let mut offset = i32::try_from(snapshot.pinned.len()).unwrap_or(i32::MAX);

    if config.sort_pinned_tabs && !snapshot.pinned.is_empty() {
        match compute_plan(&snapshot.pinned, TAB_GROUP_ID_NONE, config) {
            Ok(plan) => {
                offset = plan.anchor_index + segment_len(&plan);
                add_segment(&mut window, plan);
            }
            Err(e) => fail_segment(&mut window, TAB_GROUP_ID_NONE, e),
        }
    }

    let mut groups: Vec<&GroupSnapshot> = snapshot.groups.iter().filter(|g| !g.tabs.is_empty()).collect();
    groups.sort_by(|a, b| locale_compare(&a.group.title, &b.group.title));

    for group in groups {
        window.group_order.push(group.group.id);
        match compute_plan(&group.tabs, group.group.id, config) {
            Ok(mut plan) => {
                plan.anchor_index = offset;
                offset += segment_len(&plan);
                add_segment(&mut window, plan);
            }
            Err(e) => {
                offset += i32::try_from(group.tabs.len()).unwrap_or(0);
                fail_segment(&mut window, group.group.id, e);
            }
        }
    }

    if !snapshot.ungrouped.is_empty() {
        match compute_plan(&snapshot.ungrouped, TAB_GROUP_ID_NONE, config) {
            Ok(mut plan) => {
                plan.anchor_index = offset;
                add_segment(&mut window, plan);
            }
            Err(e) => fail_segment(&mut window, TAB_GROUP_ID_NONE, e),
        }
    }

    window
}

fn segment_len(plan: &PlacementPlan) -> i32 {
    i32::try_from(plan.tab_ids.len()).unwrap_or(0)
}

fn add_segment(window: &mut WindowPlan, plan: PlacementPlan) {
    let seen: HashSet<i32> = window.remove_ids.iter().copied().collect();
    window
        .remove_ids
        .extend(plan.remove_ids.iter().filter(|id| !seen.contains(*id)));
    window.segments.push(plan);
}

fn fail_segment(window: &mut WindowPlan, group_id: i32, error: TabSortError) {
    log::warn!("Skipping segment {}: {}", group_id, error);
    window.failed_segments.push(FailedSegment {
        group_id,
        message: error.to_string(),
    });
}
