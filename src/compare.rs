/// Ordering functions for tabs, selected by the configured sort mode
use crate::domain::parse_hostname;
use crate::error::Result;
use crate::locator::{is_suspended, logical_url};
use crate::tab_data::TabInfo;
use std::cmp::Ordering;
use url::{Position, Url};

/// Case-insensitive compare with a case-sensitive tie-break, so the order is total
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Key ordering tabs by domain, then subdomain, path, query string and fragment
///
/// Plain concatenation: `google.com` + `mail` + `/x` + `?q` + `#h`.
pub fn url_components_key(url: &Url) -> String {
    let parsed = parse_hostname(url.host_str().unwrap_or_default());
    format!(
        "{}{}{}",
        parsed.domain,
        parsed.subdomain,
        &url[Position::BeforePath..]
    )
}

pub fn compare_url_components(a: &Url, b: &Url) -> Ordering {
    locale_compare(&url_components_key(a), &url_components_key(b))
}

/// Suspended tabs first when grouping them, otherwise no opinion
pub fn compare_suspended_first(a_suspended: bool, b_suspended: bool) -> Ordering {
    match (a_suspended, b_suspended) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Options shared by the title and URL comparators
#[derive(Debug, Clone, Copy)]
pub struct CompareOptions<'a> {
    pub group_suspended_tabs: bool,
    pub sort_pinned_tabs: bool,
    pub suspender_marker_id: &'a str,
}

impl CompareOptions<'_> {
    fn excludes_pinned(&self, a: &TabInfo, b: &TabInfo) -> bool {
        !self.sort_pinned_tabs && (a.pinned || b.pinned)
    }

    fn suspended_order(&self, a: &TabInfo, b: &TabInfo) -> Ordering {
        if !self.group_suspended_tabs {
            return Ordering::Equal;
        }
        compare_suspended_first(
            is_suspended(a, self.suspender_marker_id),
            is_suspended(b, self.suspender_marker_id),
        )
    }
}

/// Sort by title; pinned tabs compare equal to everything unless pinned sorting is on
pub fn title_comparator(a: &TabInfo, b: &TabInfo, options: &CompareOptions<'_>) -> Ordering {
    if options.excludes_pinned(a, b) {
        return Ordering::Equal;
    }

    options
        .suspended_order(a, b)
        .then_with(|| locale_compare(&a.title, &b.title))
}

/// URL-mode sort key, resolved once per tab
#[derive(Debug, Clone, PartialEq)]
pub struct UrlSortKey {
    suspended: bool,
    components: String,
}

impl UrlSortKey {
    pub fn resolve(tab: &TabInfo, options: &CompareOptions<'_>) -> Result<UrlSortKey> {
        let url = logical_url(tab, options.group_suspended_tabs, options.suspender_marker_id)?;
        Ok(UrlSortKey {
            suspended: options.group_suspended_tabs && is_suspended(tab, options.suspender_marker_id),
            components: url_components_key(&url),
        })
    }
}

pub fn compare_url_keys(a: &UrlSortKey, b: &UrlSortKey) -> Ordering {
    compare_suspended_first(a.suspended, b.suspended).then_with(|| locale_compare(&a.components, &b.components))
}

/// Sort by URL components of each tab's logical URL
///
/// Tabs whose URL cannot be resolved only order by suspension; the
/// orchestrator keeps such tabs out of the sort entirely.
pub fn url_comparator(a: &TabInfo, b: &TabInfo, options: &CompareOptions<'_>) -> Ordering {
    if options.excludes_pinned(a, b) {
        return Ordering::Equal;
    }

    match (UrlSortKey::resolve(a, options), UrlSortKey::resolve(b, options)) {
        (Ok(key_a), Ok(key_b)) => compare_url_keys(&key_a, &key_b),
        _ => options.suspended_order(a, b),
    }
}
