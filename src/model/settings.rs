use serde::{Deserialize, Serialize};

/// Configuration from shelve.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub nav: NavConfig,
    #[serde(default)]
    pub locator: Locator,
    #[serde(default)]
    pub grouping: GroupingConfig,
}

/// Target-view matching and polling cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavConfig {
    /// Regex matched against the current location string. The view counts
    /// as "arrived at" while this matches.
    #[serde(default = "default_target_pattern")]
    pub target_pattern: String,
    /// Fallback location recheck fires every this many ticks, because some
    /// navigation paths raise no history signal at all.
    #[serde(default = "default_recheck_every_ticks")]
    pub recheck_every_ticks: u32,
    /// Readiness polls before the monitor gives up on one arrival.
    #[serde(default = "default_max_ready_polls")]
    pub max_ready_polls: u32,
    /// Event-loop tick length in milliseconds; readiness is polled once per
    /// tick while an arrival is pending.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

impl Default for NavConfig {
    fn default() -> Self {
        NavConfig {
            target_pattern: default_target_pattern(),
            recheck_every_ticks: default_recheck_every_ticks(),
            max_ready_polls: default_max_ready_polls(),
            tick_ms: default_tick_ms(),
        }
    }
}

fn default_target_pattern() -> String {
    "^/library(?:[/?#]|$)".to_string()
}

fn default_recheck_every_ticks() -> u32 {
    5
}

fn default_max_ready_polls() -> u32 {
    40
}

fn default_tick_ms() -> u64 {
    200
}

/// Where the list lives in the host tree. The markup shape is the host's,
/// not ours, so every hop is configurable: container → item → heading →
/// link → title span.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Locator {
    #[serde(default = "default_container_class")]
    pub container_class: String,
    #[serde(default = "default_item_tag")]
    pub item_tag: String,
    #[serde(default = "default_heading_tag")]
    pub heading_tag: String,
    #[serde(default = "default_link_tag")]
    pub link_tag: String,
    #[serde(default = "default_title_tag")]
    pub title_tag: String,
}

impl Default for Locator {
    fn default() -> Self {
        Locator {
            container_class: default_container_class(),
            item_tag: default_item_tag(),
            heading_tag: default_heading_tag(),
            link_tag: default_link_tag(),
            title_tag: default_title_tag(),
        }
    }
}

fn default_container_class() -> String {
    "item-list".to_string()
}

fn default_item_tag() -> String {
    "article".to_string()
}

fn default_heading_tag() -> String {
    "h3".to_string()
}

fn default_link_tag() -> String {
    "a".to_string()
}

fn default_title_tag() -> String {
    "span".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingConfig {
    /// Group key is the title text before the first occurrence of this
    /// delimiter; a title without it forms its own singleton group.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        GroupingConfig {
            delimiter: default_delimiter(),
        }
    }
}

fn default_delimiter() -> String {
    "-".to_string()
}
