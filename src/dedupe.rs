/// Duplicate-tab detection: keep the newest tab for each URL
use crate::tab_data::{DedupeDecision, TabInfo};
use std::collections::HashMap;

/// Split `tabs` into tabs to keep and ids to close
///
/// Tabs are duplicates when `resolve_url` yields the same string for them
/// (query and fragment included). For each duplicate set the tab with the
/// largest id, i.e. the most recently created one, is kept. Tabs whose URL
/// cannot be resolved are always kept. `keep` preserves the input order.
pub fn dedupe<F>(tabs: &[TabInfo], resolve_url: F) -> DedupeDecision
where
    F: Fn(&TabInfo) -> Option<String>,
{
    let urls: Vec<Option<String>> = tabs.iter().map(&resolve_url).collect();

    let newest: HashMap<&str, i32> = tabs.iter().zip(&urls).fold(HashMap::new(), |mut newest, (tab, url)| {
        if let Some(url) = url {
            let id = newest.entry(url.as_str()).or_insert(tab.id);
            *id = (*id).max(tab.id);
        }
        newest
    });

    let mut keep = Vec::new();
    let mut remove = Vec::new();

    for (tab, url) in tabs.iter().zip(&urls) {
        let superseded = url
            .as_deref()
            .and_then(|url| newest.get(url))
            .is_some_and(|newest_id| *newest_id != tab.id);

        if superseded {
            remove.push(tab.id);
        } else {
            keep.push(tab.clone());
        }
    }

    if !remove.is_empty() {
        log::debug!("dedupe: closing {} of {} tabs", remove.len(), tabs.len());
    }
    DedupeDecision { keep, remove }
}
