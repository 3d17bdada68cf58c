/// Custom grouping: same-host tabs together, groups in first-seen host order
use crate::compare::{compare_suspended_first, locale_compare, url_components_key};
use crate::config::{GroupFrom, SortConfiguration};
use crate::error::Result;
use crate::locator::{host_key, is_suspended, logical_url};
use crate::tab_data::TabInfo;
use std::cmp::Ordering;
use std::collections::HashMap;
use url::Url;

/// What a tab is grouped by
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    /// Every suspended tab, whatever page it wraps
    Suspended,
    Host(String),
}

/// First-seen ordinal for each group key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupKeyTable {
    ordinals: HashMap<GroupKey, usize>,
}

impl GroupKeyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from keys listed in tab order
    ///
    /// `reserve_suspended` gives the suspended bucket ordinal 0 when scanning
    /// left to right, or the last ordinal when scanning right to left.
    pub fn build<'k>(
        keys: impl DoubleEndedIterator<Item = &'k GroupKey>,
        group_from: GroupFrom,
        reserve_suspended: bool,
    ) -> GroupKeyTable {
        let mut table = GroupKeyTable::new();
        let scan: Vec<&GroupKey> = match group_from {
            GroupFrom::LeftToRight => keys.collect(),
            GroupFrom::RightToLeft => keys.rev().collect(),
        };

        if reserve_suspended && group_from == GroupFrom::LeftToRight {
            table.insert(GroupKey::Suspended);
        }
        for key in scan {
            if *key != GroupKey::Suspended {
                table.insert(key.clone());
            }
        }

        if reserve_suspended && group_from == GroupFrom::RightToLeft {
            table.insert(GroupKey::Suspended);
        }
        table
    }

    /// Assign the next ordinal to an unseen key; returns the key's ordinal
    pub fn insert(&mut self, key: GroupKey) -> usize {
        let next = self.ordinals.len();
        *self.ordinals.entry(key).or_insert(next)
    }

    pub fn ordinal(&self, key: &GroupKey) -> Option<usize> {
        self.ordinals.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.ordinals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordinals.is_empty()
    }
}

/// Group key plus URL-components key, precomputed from one URL
#[derive(Debug, Clone, PartialEq)]
struct SortKey {
    group: GroupKey,
    components: String,
}

impl SortKey {
    fn from_url(url: &Url) -> SortKey {
        SortKey {
            group: GroupKey::Host(host_key(url)),
            components: url_components_key(url),
        }
    }
}

/// A tab with everything the custom sort needs resolved up front
#[derive(Debug, Clone)]
pub struct GroupedTab<'a> {
    pub tab: &'a TabInfo,
    pub suspended: bool,
    /// Key for the main pass
    primary: SortKey,
    /// Key for the suspended subsort, by the wrapped page
    unwrapped: SortKey,
}

impl<'a> GroupedTab<'a> {
    pub fn resolve(tab: &'a TabInfo, config: &SortConfiguration) -> Result<GroupedTab<'a>> {
        let marker = config.suspender_marker_id.as_str();
        let suspended = is_suspended(tab, marker);
        let unwrapped = SortKey::from_url(&logical_url(tab, false, marker)?);

        let primary = if !config.group_suspended_tabs {
            unwrapped.clone()
        } else if suspended {
            SortKey {
                group: GroupKey::Suspended,
                components: String::new(),
            }
        } else {
            SortKey::from_url(&logical_url(tab, true, marker)?)
        };

        Ok(GroupedTab {
            tab,
            suspended,
            primary,
            unwrapped,
        })
    }

    pub fn group_key(&self) -> &GroupKey {
        &self.primary.group
    }
}

/// Order two keys by group ordinal, then by URL components if `tie_break`
fn compare_grouped(a: &SortKey, b: &SortKey, table: &GroupKeyTable, group_from: GroupFrom, tie_break: bool) -> Ordering {
    let by_group = table.ordinal(&a.group).cmp(&table.ordinal(&b.group));
    let by_group = match group_from {
        GroupFrom::LeftToRight => by_group,
        GroupFrom::RightToLeft => by_group.reverse(),
    };

    by_group.then_with(|| {
        if tie_break {
            locale_compare(&a.components, &b.components)
        } else {
            Ordering::Equal
        }
    })
}

/// Suspended tabs go to the edge groups are anchored at
fn compare_suspended_edge(a: &GroupedTab<'_>, b: &GroupedTab<'_>, group_from: GroupFrom) -> Ordering {
    let first = compare_suspended_first(a.suspended, b.suspended);
    match group_from {
        GroupFrom::LeftToRight => first,
        GroupFrom::RightToLeft => first.reverse(),
    }
}

/// Sort `tabs` (already in positional order) into custom group order
///
/// Ordinals are assigned by scanning in the configured direction. When
/// suspended tabs are grouped they get a bucket at that edge, every group
/// keeps positional order in the main pass, and a second pass orders the
/// suspended block by the hosts of the pages it wraps. Returns the table
/// used by the main pass.
pub fn sort_by_custom(tabs: &mut [GroupedTab<'_>], config: &SortConfiguration) -> GroupKeyTable {
    let group_from = config.group_from;
    let preserve = config.preserve_order_within_groups;
    let group_suspended = config.group_suspended_tabs;

    let table = GroupKeyTable::build(tabs.iter().map(GroupedTab::group_key), group_from, group_suspended);
    // Within-group ordering only happens in the subsort when suspended tabs are grouped
    let tie_break = !preserve && !group_suspended;
    let suspended_count = tabs.iter().filter(|t| t.suspended).count();

    tabs.sort_by(|a, b| {
        let edge = if group_suspended {
            compare_suspended_edge(a, b, group_from)
        } else {
            Ordering::Equal
        };
        edge.then_with(|| compare_grouped(&a.primary, &b.primary, &table, group_from, tie_break))
    });

    if group_suspended && suspended_count > 0 {
        let len = tabs.len();
        let suspended = match group_from {
            GroupFrom::LeftToRight => &mut tabs[..suspended_count],
            GroupFrom::RightToLeft => &mut tabs[len - suspended_count..],
        };
        subsort_suspended(suspended, group_from, preserve);
    }

    log::debug!(
        "custom sort: {} tabs, {} groups, {} suspended",
        tabs.len(),
        table.len(),
        suspended_count
    );
    table
}

/// Order the suspended block by the hosts of the pages the tabs wrap
fn subsort_suspended(suspended: &mut [GroupedTab<'_>], group_from: GroupFrom, preserve: bool) {
    let table = GroupKeyTable::build(suspended.iter().map(|t| &t.unwrapped.group), group_from, false);
    suspended.sort_by(|a, b| compare_grouped(&a.unwrapped, &b.unwrapped, &table, group_from, !preserve));
}
