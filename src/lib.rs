/// Tab Sorter - ordering and grouping engine for a tab-sorting browser extension
/// Built with Rust + WASM

pub mod compare;
pub mod config;
pub mod dedupe;
pub mod domain;
pub mod error;
pub mod grouping;
pub mod locator;
pub mod operations;
pub mod schedule;
pub mod tab_data;

use config::StoredSettings;
use operations::WindowSnapshot;
use schedule::SortTrigger;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tab_data::{TabGroup, TabInfo};
use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Plan one segment: pinned tabs, one tab group, or the ungrouped tabs
#[wasm_bindgen(js_name = computePlan)]
pub fn compute_plan(tabs: JsValue, group_id: i32, settings: JsValue) -> Result<JsValue, JsValue> {
    let tabs: Vec<TabInfo> = from_js(tabs)?;
    let config = settings_from_js(settings)?.sort_configuration();
    let plan = operations::compute_plan(&tabs, group_id, &config).map_err(to_js_error)?;
    to_js(&plan)
}

// Plan a whole window from per-segment queries ({pinned, groups, ungrouped})
#[wasm_bindgen(js_name = planWindow)]
pub fn plan_window(snapshot: JsValue, settings: JsValue) -> Result<JsValue, JsValue> {
    let snapshot: WindowSnapshot = from_js(snapshot)?;
    let config = settings_from_js(settings)?.sort_configuration();
    to_js(&operations::plan_window(&snapshot, &config))
}

// Plan a whole window from a single tabs query plus its tab groups
#[wasm_bindgen(js_name = planWindowFromTabs)]
pub fn plan_window_from_tabs(tabs: JsValue, groups: JsValue, settings: JsValue) -> Result<JsValue, JsValue> {
    let tabs: Vec<TabInfo> = from_js(tabs)?;
    let groups: Vec<TabGroup> = from_js(groups)?;
    let config = settings_from_js(settings)?.sort_configuration();
    let snapshot = WindowSnapshot::from_tabs(&tabs, &groups);
    to_js(&operations::plan_window(&snapshot, &config))
}

#[wasm_bindgen(js_name = parseDomain)]
pub fn parse_domain(hostname: &str) -> Result<JsValue, JsValue> {
    to_js(&domain::parse_hostname(hostname))
}

#[wasm_bindgen(js_name = shouldSort)]
pub fn should_sort(settings: JsValue, trigger: JsValue, initializing: bool) -> Result<bool, JsValue> {
    let trigger: SortTrigger = from_js(trigger)?;
    Ok(settings_from_js(settings)?.auto_sort().should_sort(trigger, initializing))
}

#[wasm_bindgen(js_name = alarmPeriodMinutes)]
pub fn alarm_period_minutes(settings: JsValue) -> Result<Option<u32>, JsValue> {
    Ok(settings_from_js(settings)?.auto_sort().alarm_period_minutes())
}

fn settings_from_js(settings: JsValue) -> Result<StoredSettings, JsValue> {
    if settings.is_undefined() || settings.is_null() {
        return Ok(StoredSettings::default());
    }
    from_js(settings)
}

fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| to_js_error(error::TabSortError::InvalidInput(e.to_string())))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(to_js_error)
}

fn to_js_error(error: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&error.to_string()).into()
}
