//! Property-based tests for segment planning.
//!
//! These tests generate window snapshots mixing hosts, suspended tabs,
//! pinned tabs and malformed URLs, and check the guarantees callers rely
//! on: plans are deterministic, settle after one application, leave pinned
//! tabs alone, and keep suspended tabs at the left edge when grouped.

use proptest::prelude::*;
use tab_sorter::config::{GroupFrom, SortBy, SortConfiguration};
use tab_sorter::locator::suspended_prefix;
use tab_sorter::operations::compute_plan;
use tab_sorter::tab_data::{PlacementPlan, TabInfo, TAB_GROUP_ID_NONE};

const MARKER: &str = "noogafoofpebimajpfpamcfhoaifemoa";

const HOSTS: &[&str] = &[
    "https://www.google.com",
    "https://mail.google.com",
    "https://github.com",
    "http://localhost:3000",
    "https://news.bbc.co.uk",
];

const PATHS: &[&str] = &["/", "/a", "/b?q=1", "/c#top"];

const TITLES: &[&str] = &["Inbox", "inbox", "Docs", "README", "Search results"];

#[derive(Debug, Clone, Copy, PartialEq)]
enum Kind {
    Live,
    Suspended,
    Malformed,
}

#[derive(Debug, Clone)]
struct TabSpec {
    host: usize,
    path: usize,
    title: usize,
    kind: Kind,
}

fn arb_tab_spec() -> impl Strategy<Value = TabSpec> {
    (
        0..HOSTS.len(),
        0..PATHS.len(),
        0..TITLES.len(),
        prop_oneof![
            6 => Just(Kind::Live),
            3 => Just(Kind::Suspended),
            1 => Just(Kind::Malformed),
        ],
    )
        .prop_map(|(host, path, title, kind)| TabSpec {
            host,
            path,
            title,
            kind,
        })
}

fn arb_config() -> impl Strategy<Value = SortConfiguration> {
    (
        prop_oneof![Just(SortBy::Url), Just(SortBy::Title), Just(SortBy::Custom)],
        prop_oneof![Just(GroupFrom::LeftToRight), Just(GroupFrom::RightToLeft)],
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(sort_by, group_from, preserve_order_within_groups, group_suspended_tabs, dedupe_tabs)| {
                SortConfiguration {
                    sort_by,
                    group_from,
                    preserve_order_within_groups,
                    group_suspended_tabs,
                    dedupe_tabs,
                    ..SortConfiguration::default()
                }
            },
        )
}

fn build_tabs(specs: &[TabSpec], pinned: bool) -> Vec<TabInfo> {
    specs
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            let page = format!("{}{}", HOSTS[spec.host], PATHS[spec.path]);
            let url = match spec.kind {
                Kind::Live => page,
                Kind::Suspended => {
                    let encoded: String = url::form_urlencoded::byte_serialize(page.as_bytes()).collect();
                    format!("{}ttl=t&pos=0&uri={}", suspended_prefix(MARKER), encoded)
                }
                Kind::Malformed => "not a url".to_string(),
            };
            TabInfo {
                id: 1000 - i as i32,
                index: i as i32,
                pinned,
                group_id: TAB_GROUP_ID_NONE,
                title: TITLES[spec.title].to_string(),
                url,
                pending_url: None,
            }
        })
        .collect()
}

/// The snapshot a browser would report after applying `plan`
fn apply(tabs: &[TabInfo], plan: &PlacementPlan) -> Vec<TabInfo> {
    plan.tab_ids
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let mut tab = tabs.iter().find(|t| t.id == *id).cloned().unwrap();
            tab.index = plan.anchor_index + i as i32;
            tab
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn plan_is_deterministic(
        specs in prop::collection::vec(arb_tab_spec(), 0..24),
        config in arb_config(),
    ) {
        let tabs = build_tabs(&specs, false);

        let first = compute_plan(&tabs, TAB_GROUP_ID_NONE, &config).unwrap();
        let second = compute_plan(&tabs, TAB_GROUP_ID_NONE, &config).unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn plan_settles_after_one_application(
        specs in prop::collection::vec(arb_tab_spec(), 0..24),
        config in arb_config(),
    ) {
        let tabs = build_tabs(&specs, false);

        let first = compute_plan(&tabs, TAB_GROUP_ID_NONE, &config).unwrap();
        let applied = apply(&tabs, &first);
        let second = compute_plan(&applied, TAB_GROUP_ID_NONE, &config).unwrap();

        prop_assert!(second.is_identity(&applied), "second plan moved tabs: {:?}", second.tab_ids);
    }

    #[test]
    fn plan_keeps_every_tab_exactly_once(
        specs in prop::collection::vec(arb_tab_spec(), 0..24),
        config in arb_config(),
    ) {
        let tabs = build_tabs(&specs, false);

        let plan = compute_plan(&tabs, TAB_GROUP_ID_NONE, &config).unwrap();

        let mut planned: Vec<i32> = plan.tab_ids.iter().chain(&plan.remove_ids).copied().collect();
        planned.sort_unstable();
        let mut expected: Vec<i32> = tabs.iter().map(|t| t.id).collect();
        expected.sort_unstable();
        prop_assert_eq!(planned, expected);
    }

    #[test]
    fn pinned_tabs_never_reordered_or_closed(
        specs in prop::collection::vec(arb_tab_spec(), 0..16),
        config in arb_config(),
    ) {
        let tabs = build_tabs(&specs, true);
        let config = SortConfiguration { sort_pinned_tabs: false, ..config };

        let plan = compute_plan(&tabs, TAB_GROUP_ID_NONE, &config).unwrap();

        let original: Vec<i32> = tabs.iter().map(|t| t.id).collect();
        prop_assert_eq!(plan.tab_ids, original);
        prop_assert!(plan.remove_ids.is_empty());
    }

    #[test]
    fn suspended_tabs_cluster_left(
        specs in prop::collection::vec(arb_tab_spec(), 0..24),
        config in arb_config(),
    ) {
        let specs: Vec<TabSpec> = specs.into_iter().filter(|s| s.kind != Kind::Malformed).collect();
        let tabs = build_tabs(&specs, false);
        let config = SortConfiguration {
            group_suspended_tabs: true,
            group_from: GroupFrom::LeftToRight,
            ..config
        };

        let plan = compute_plan(&tabs, TAB_GROUP_ID_NONE, &config).unwrap();

        let suspended_flags: Vec<bool> = plan
            .tab_ids
            .iter()
            .map(|id| tabs.iter().find(|t| t.id == *id).unwrap().url.starts_with("chrome-extension://"))
            .collect();
        let first_live = suspended_flags.iter().position(|s| !s).unwrap_or(suspended_flags.len());
        prop_assert!(suspended_flags[first_live..].iter().all(|s| !s));
    }
}

#[test]
fn dedupe_example_keeps_newest_in_original_order() {
    let tabs = vec![
        TabInfo::new(1, "https://a.com/".to_string(), "A".to_string(), false, 0),
        TabInfo::new(5, "https://a.com/".to_string(), "A".to_string(), false, 1),
        TabInfo::new(3, "https://b.com/".to_string(), "B".to_string(), false, 2),
    ];
    let config = SortConfiguration {
        dedupe_tabs: true,
        ..SortConfiguration::default()
    };

    let plan = compute_plan(&tabs, TAB_GROUP_ID_NONE, &config).unwrap();

    assert_eq!(plan.remove_ids, vec![1]);
    assert_eq!(plan.tab_ids, vec![5, 3]);
}

#[test]
fn custom_groups_follow_first_seen_host() {
    let tabs = vec![
        TabInfo::new(1, "https://b.com/".to_string(), "B".to_string(), false, 0),
        TabInfo::new(2, "https://a.com/".to_string(), "A".to_string(), false, 1),
        TabInfo::new(3, "https://b.com/".to_string(), "B".to_string(), false, 2),
    ];
    let config = SortConfiguration {
        sort_by: SortBy::Custom,
        ..SortConfiguration::default()
    };

    let plan = compute_plan(&tabs, TAB_GROUP_ID_NONE, &config).unwrap();

    assert_eq!(plan.tab_ids, vec![1, 3, 2]);
}

#[test]
fn url_sort_orders_subdomains_within_registrable_domain() {
    let tabs = vec![
        TabInfo::new(1, "https://mail.google.com/x".to_string(), "Mail".to_string(), false, 0),
        TabInfo::new(2, "https://docs.google.com/y".to_string(), "Docs".to_string(), false, 1),
        TabInfo::new(3, "https://example.com/".to_string(), "Example".to_string(), false, 2),
    ];

    let plan = compute_plan(&tabs, TAB_GROUP_ID_NONE, &SortConfiguration::default()).unwrap();

    assert_eq!(plan.tab_ids, vec![3, 2, 1]);
}
