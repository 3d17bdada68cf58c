/// Resolving the URL a tab logically points at, including suspended tabs
use crate::error::{Result, TabSortError};
use crate::tab_data::TabInfo;
use url::Url;

/// Placeholder-page prefix used by a tab suspender extension
pub fn suspended_prefix(suspender_marker_id: &str) -> String {
    format!("chrome-extension://{}/suspended.html#", suspender_marker_id)
}

/// Return whether the tab is currently showing a suspender placeholder page
pub fn is_suspended(tab: &TabInfo, suspender_marker_id: &str) -> bool {
    tab.url.starts_with(&suspended_prefix(suspender_marker_id))
}

/// Resolve the URL used to sort and dedupe `tab`
///
/// With `group_suspended_tabs` the tab's own URL is returned as-is, so every
/// suspended tab shares the suspender's host. Otherwise a suspended tab
/// resolves to the page it wraps (the `uri` parameter after the marker), and
/// any other tab to its pending or current URL.
pub fn logical_url(tab: &TabInfo, group_suspended_tabs: bool, suspender_marker_id: &str) -> Result<Url> {
    if group_suspended_tabs {
        return parse_tab_url(tab, &tab.url);
    }

    let prefix = suspended_prefix(suspender_marker_id);
    if let Some(suffix) = tab.url.strip_prefix(prefix.as_str()) {
        let wrapped = url::form_urlencoded::parse(suffix.as_bytes())
            .find(|(key, _)| key == "uri")
            .map(|(_, value)| value.into_owned());
        if let Some(wrapped) = wrapped {
            return parse_tab_url(tab, &wrapped);
        }
    }

    let current = tab
        .pending_url
        .as_deref()
        .filter(|pending| !pending.is_empty())
        .unwrap_or(&tab.url);
    parse_tab_url(tab, current)
}

/// Host with an explicit port, matching what browsers report as `URL.host`
pub fn host_key(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}

fn parse_tab_url(tab: &TabInfo, raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| TabSortError::MalformedUrl {
        tab_id: tab.id,
        url: raw.to_string(),
        reason: e.to_string(),
    })
}
