/// Error types for the tab ordering engine
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TabSortError {
    #[error("Tab {tab_id} has a malformed URL {url:?}: {reason}")]
    MalformedUrl {
        tab_id: i32,
        url: String,
        reason: String,
    },
    #[error("Unknown sort mode: {0:?}")]
    UnknownSortMode(String),
    #[error("Unknown group direction: {0:?}")]
    UnknownGroupDirection(String),
    #[error("Tab {tab_id} belongs to group {found}, not to the segment's group {expected}")]
    SegmentMismatch {
        tab_id: i32,
        expected: i32,
        found: i32,
    },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, TabSortError>;
