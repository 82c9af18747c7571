pub mod history;
pub mod monitor;

pub use history::{HistoryAdapter, NavEvents, NavSignal};
pub use monitor::{Monitor, MonitorError, Phase};
