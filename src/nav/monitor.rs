use regex::Regex;
use tracing::{debug, info, warn};

use crate::dom::{Document, NodeId};
use crate::model::Settings;
use crate::ops::rewrite::Sections;
use crate::ops::{extract, group, probe, rewrite};

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("invalid target pattern {pattern:?}: {source}")]
    BadPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// Where the monitor stands relative to the target view.
///
/// One explicit state instead of an `is_on_view` / `has_processed` flag
/// pair, so "already processed, do nothing" is a structural invariant
/// rather than an emergent one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Location does not match the target view.
    OffView,
    /// Arrived; polling readiness with a bounded budget.
    Pending { polls_left: u32 },
    /// Arrived and processed. Further triggers are no-ops until departure.
    Done,
    /// The poll budget ran out without the view becoming ready.
    /// Terminal for this arrival; departure resets it.
    GaveUp,
}

/// Tick- and signal-driven state machine that runs the regrouping pipeline
/// exactly once per arrival at the target view.
///
/// Triggers are history signals plus a low-frequency location recheck that
/// fires every `recheck_every_ticks` regardless of signals, because some
/// host navigation paths raise nothing. While an arrival is pending,
/// readiness is polled once per tick and the pipeline runs the instant the
/// probe succeeds. The `Done` gate is the sole idempotence guard: the
/// rewrite is not re-runnable, since a second extraction would read
/// already-stripped titles.
pub struct Monitor {
    phase: Phase,
    target: Regex,
    settings: Settings,
    ticks_since_recheck: u32,
    sections: Sections,
    runs: u32,
}

impl Monitor {
    pub fn new(settings: &Settings) -> Result<Self, MonitorError> {
        let target =
            Regex::new(&settings.nav.target_pattern).map_err(|source| MonitorError::BadPattern {
                pattern: settings.nav.target_pattern.clone(),
                source,
            })?;
        Ok(Monitor {
            phase: Phase::OffView,
            target,
            settings: settings.clone(),
            ticks_since_recheck: 0,
            sections: Sections::default(),
            runs: 0,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Total pipeline runs so far (diagnostics).
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Sections built by the most recent rewrite.
    pub fn sections(&self) -> &Sections {
        &self.sections
    }

    /// A history signal arrived: recheck the location now, and take one
    /// readiness poll if an arrival is pending.
    pub fn on_signal(&mut self, doc: &mut Document, location: &str) {
        self.recheck(location);
        if matches!(self.phase, Phase::Pending { .. }) {
            self.poll_ready(doc);
        }
    }

    /// One event-loop tick: run the low-frequency location recheck when due,
    /// then poll readiness if an arrival is pending.
    pub fn on_tick(&mut self, doc: &mut Document, location: &str) {
        self.ticks_since_recheck += 1;
        if self.ticks_since_recheck >= self.settings.nav.recheck_every_ticks {
            self.ticks_since_recheck = 0;
            self.recheck(location);
        }
        if matches!(self.phase, Phase::Pending { .. }) {
            self.poll_ready(doc);
        }
    }

    /// Forward a user activation (e.g. a click on a header) to the current
    /// sections. Returns false when the node is not a section header.
    pub fn activate(&self, doc: &mut Document, id: NodeId) -> bool {
        self.sections.activate(doc, id)
    }

    fn recheck(&mut self, location: &str) {
        let on_target = self.target.is_match(location);
        match self.phase {
            Phase::OffView if on_target => {
                info!(location, "arrived at target view");
                self.phase = Phase::Pending {
                    polls_left: self.settings.nav.max_ready_polls,
                };
            }
            Phase::Pending { .. } if !on_target => {
                info!(location, "left target view before it became ready");
                self.phase = Phase::OffView;
            }
            Phase::Done if !on_target => {
                info!(location, "left target view");
                self.phase = Phase::OffView;
                self.sections = Sections::default();
            }
            Phase::GaveUp if !on_target => {
                info!(location, "left target view after giving up");
                self.phase = Phase::OffView;
            }
            // Still on the view and already pending, done, or given up:
            // redundant triggers change nothing.
            _ => {}
        }
    }

    fn poll_ready(&mut self, doc: &mut Document) {
        let Phase::Pending { polls_left } = self.phase else {
            return;
        };
        if probe::is_ready(doc, &self.settings.locator) {
            self.process(doc);
            self.phase = Phase::Done;
        } else if polls_left <= 1 {
            warn!(
                polls = self.settings.nav.max_ready_polls,
                "view never became ready, giving up until next arrival"
            );
            self.phase = Phase::GaveUp;
        } else {
            debug!(polls_left = polls_left - 1, "target view not ready yet");
            self.phase = Phase::Pending {
                polls_left: polls_left - 1,
            };
        }
    }

    /// Probe → extract → group → rewrite as one synchronous step.
    fn process(&mut self, doc: &mut Document) {
        let locator = &self.settings.locator;
        let Some(container) = doc.find_by_class(&locator.container_class) else {
            return;
        };
        let records = extract::extract(doc, container, locator);
        let delimiter = &self.settings.grouping.delimiter;
        let groups = group::group_records(records, delimiter);
        self.sections = rewrite::rewrite(doc, container, &groups, locator, delimiter);
        self.runs += 1;
        info!(
            sections = self.sections.len(),
            groups = groups.len(),
            "regrouped target list"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::NodeId;

    fn settings() -> Settings {
        let mut settings = Settings::default();
        settings.nav.recheck_every_ticks = 3;
        settings.nav.max_ready_polls = 4;
        settings
    }

    fn mount_list(doc: &mut Document, titles: &[&str]) -> NodeId {
        let container = doc.create_with_class("div", "item-list");
        doc.append(doc.root(), container);
        for title in titles {
            let item = doc.create("article");
            let heading = doc.create("h3");
            let link = doc.create("a");
            let span = doc.create("span");
            doc.set_text(span, title);
            doc.append(link, span);
            doc.append(heading, link);
            doc.append(item, heading);
            doc.append(container, item);
        }
        container
    }

    #[test]
    fn signal_arrival_then_ready_processes_once() {
        let mut doc = Document::new();
        mount_list(&mut doc, &["alpha-one", "alpha-two"]);
        let mut monitor = Monitor::new(&settings()).unwrap();
        assert_eq!(monitor.phase(), Phase::OffView);

        monitor.on_signal(&mut doc, "/library");
        assert_eq!(monitor.phase(), Phase::Done);
        assert_eq!(monitor.runs(), 1);

        // Redundant triggers while done are no-ops.
        monitor.on_signal(&mut doc, "/library");
        monitor.on_tick(&mut doc, "/library");
        assert_eq!(monitor.runs(), 1);
    }

    #[test]
    fn pending_until_list_appears() {
        let mut doc = Document::new();
        let mut monitor = Monitor::new(&settings()).unwrap();
        monitor.on_signal(&mut doc, "/library");
        assert!(matches!(monitor.phase(), Phase::Pending { .. }));

        monitor.on_tick(&mut doc, "/library");
        assert!(matches!(monitor.phase(), Phase::Pending { .. }));

        mount_list(&mut doc, &["alpha-one", "alpha-two"]);
        monitor.on_tick(&mut doc, "/library");
        assert_eq!(monitor.phase(), Phase::Done);
        assert_eq!(monitor.runs(), 1);
    }

    #[test]
    fn gives_up_after_poll_budget() {
        let mut doc = Document::new();
        let mut monitor = Monitor::new(&settings()).unwrap();
        monitor.on_signal(&mut doc, "/library");
        for _ in 0..10 {
            monitor.on_tick(&mut doc, "/library");
        }
        assert_eq!(monitor.phase(), Phase::GaveUp);
        assert_eq!(monitor.runs(), 0);

        // Departure resets the terminal state.
        monitor.on_signal(&mut doc, "/home");
        assert_eq!(monitor.phase(), Phase::OffView);
    }

    #[test]
    fn silent_navigation_is_caught_by_recheck_fallback() {
        let mut doc = Document::new();
        mount_list(&mut doc, &["alpha-one", "alpha-two"]);
        let mut monitor = Monitor::new(&settings()).unwrap();

        // No signal ever fires; only ticks. The third tick rechecks.
        monitor.on_tick(&mut doc, "/library");
        monitor.on_tick(&mut doc, "/library");
        assert_eq!(monitor.phase(), Phase::OffView);
        monitor.on_tick(&mut doc, "/library");
        assert_eq!(monitor.phase(), Phase::Done);
    }

    #[test]
    fn departure_resets_for_a_second_arrival() {
        let mut doc = Document::new();
        let container = mount_list(&mut doc, &["alpha-one", "alpha-two"]);
        let mut monitor = Monitor::new(&settings()).unwrap();

        monitor.on_signal(&mut doc, "/library");
        assert_eq!(monitor.runs(), 1);

        // Host tears the view down on departure and renders it fresh on
        // the next arrival.
        monitor.on_signal(&mut doc, "/home");
        assert_eq!(monitor.phase(), Phase::OffView);
        doc.detach(container);
        mount_list(&mut doc, &["alpha-one", "alpha-two"]);

        monitor.on_signal(&mut doc, "/library");
        assert_eq!(monitor.phase(), Phase::Done);
        assert_eq!(monitor.runs(), 2);
    }

    #[test]
    fn bad_pattern_is_a_config_error() {
        let mut settings = settings();
        settings.nav.target_pattern = "([".to_string();
        assert!(Monitor::new(&settings).is_err());
    }
}
