use std::sync::mpsc;

/// Uniform signal emitted for every history mutation, whatever raised it.
/// Programmatic pushes and replaces carry no native event in the host, so
/// the adapter below synthesizes one; back/forward map onto the same shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavSignal {
    /// A new entry was pushed.
    Pushed(String),
    /// The current entry was replaced in place.
    Replaced(String),
    /// Back/forward moved within existing entries.
    Popped(String),
}

impl NavSignal {
    pub fn location(&self) -> &str {
        match self {
            NavSignal::Pushed(loc) | NavSignal::Replaced(loc) | NavSignal::Popped(loc) => loc,
        }
    }
}

/// The host's session history: a list of location strings and a cursor.
#[derive(Debug)]
pub struct History {
    entries: Vec<String>,
    index: usize,
}

impl History {
    pub fn new(initial: &str) -> Self {
        History {
            entries: vec![initial.to_string()],
            index: 0,
        }
    }

    pub fn location(&self) -> &str {
        &self.entries[self.index]
    }

    /// Drop the forward stack and append a new entry.
    pub fn push(&mut self, location: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(location.to_string());
        self.index += 1;
    }

    pub fn replace(&mut self, location: &str) {
        self.entries[self.index] = location.to_string();
    }

    /// Move one entry back. Returns false at the start of the stack.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Move one entry forward. Returns false at the end of the stack.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }
}

/// Decorator over [`History`] that forwards every call and additionally
/// emits a [`NavSignal`]. All signal synthesis lives here — callers never
/// patch individual history calls themselves.
pub struct HistoryAdapter {
    inner: History,
    tx: mpsc::Sender<NavSignal>,
}

/// Receiving side of the adapter's signal channel.
/// `poll()` should be called once per event-loop tick.
pub struct NavEvents {
    rx: mpsc::Receiver<NavSignal>,
}

impl HistoryAdapter {
    pub fn channel(initial: &str) -> (Self, NavEvents) {
        let (tx, rx) = mpsc::channel();
        (
            HistoryAdapter {
                inner: History::new(initial),
                tx,
            },
            NavEvents { rx },
        )
    }

    pub fn location(&self) -> &str {
        self.inner.location()
    }

    pub fn push(&mut self, location: &str) {
        self.inner.push(location);
        let _ = self.tx.send(NavSignal::Pushed(location.to_string()));
    }

    pub fn replace(&mut self, location: &str) {
        self.inner.replace(location);
        let _ = self.tx.send(NavSignal::Replaced(location.to_string()));
    }

    pub fn back(&mut self) -> bool {
        if !self.inner.back() {
            return false;
        }
        let _ = self
            .tx
            .send(NavSignal::Popped(self.inner.location().to_string()));
        true
    }

    pub fn forward(&mut self) -> bool {
        if !self.inner.forward() {
            return false;
        }
        let _ = self
            .tx
            .send(NavSignal::Popped(self.inner.location().to_string()));
        true
    }
}

impl NavEvents {
    /// Non-blocking poll for pending signals.
    /// Returns all queued signals (may be empty).
    pub fn poll(&self) -> Vec<NavSignal> {
        let mut signals = Vec::new();
        while let Ok(sig) = self.rx.try_recv() {
            signals.push(sig);
        }
        signals
    }
}
