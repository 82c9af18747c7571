use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::dom::{Document, NodeId};
use crate::model::Settings;
use crate::nav::{HistoryAdapter, Monitor, MonitorError, NavEvents};
use crate::ops::extract::title_node;
use crate::ops::rewrite::{BODY_CLASS, SECTION_CLASS};

use super::host::{self, SiteHost};
use super::input;
use super::render;
use super::theme::Theme;

/// One row of the rendered list view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// Plain host text outside the regrouped list
    Note(String),
    /// A collapsible section header
    SectionHeader {
        node: NodeId,
        text: String,
        expanded: bool,
        count: usize,
    },
    /// An item; `indent` marks members inside an expanded section
    Item {
        node: NodeId,
        text: String,
        indent: bool,
    },
}

/// Main application state: the simulated host plus the monitor under demo.
pub struct App {
    pub doc: Document,
    pub history: HistoryAdapter,
    nav_events: NavEvents,
    pub monitor: Monitor,
    pub host: SiteHost,
    pub settings: Settings,
    pub theme: Theme,
    pub cursor: usize,
    pub scroll_offset: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(settings: Settings) -> Result<Self, MonitorError> {
        let mut doc = Document::new();
        let monitor = Monitor::new(&settings)?;
        let (history, nav_events) = HistoryAdapter::channel(host::HOME);
        let host = SiteHost::new(&mut doc, &settings.locator, host::HOME);
        Ok(App {
            doc,
            history,
            nav_events,
            monitor,
            host,
            settings,
            theme: Theme::default(),
            cursor: 0,
            scroll_offset: 0,
            should_quit: false,
        })
    }

    /// Programmatic navigation: push a new history entry and let the host
    /// router re-render, exactly as the site's own link handler would.
    pub fn go(&mut self, location: &str) {
        self.history.push(location);
        self.after_navigation();
    }

    /// Programmatic navigation that replaces the current entry.
    pub fn replace(&mut self, location: &str) {
        self.history.replace(location);
        self.after_navigation();
    }

    /// Native back navigation.
    pub fn back(&mut self) {
        if self.history.back() {
            self.after_navigation();
        }
    }

    /// Native forward navigation.
    pub fn forward(&mut self) {
        if self.history.forward() {
            self.after_navigation();
        }
    }

    fn after_navigation(&mut self) {
        let location = self.history.location().to_string();
        self.host.navigate_to(&mut self.doc, &location);
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    /// One fixed-interval tick: the host renders a step, queued navigation
    /// signals drain into the monitor, then the monitor takes its tick.
    pub fn tick(&mut self) {
        self.host.on_tick(&mut self.doc);
        for signal in self.nav_events.poll() {
            let location = signal.location().to_string();
            self.monitor.on_signal(&mut self.doc, &location);
        }
        let location = self.history.location().to_string();
        self.monitor.on_tick(&mut self.doc, &location);
        self.clamp_cursor();
    }

    /// Flatten the current view subtree into display rows.
    pub fn build_rows(&self) -> Vec<Row> {
        let locator = &self.settings.locator;
        let Some(container) = self.doc.find_by_class(&locator.container_class) else {
            return self
                .doc
                .children(self.host.view_root())
                .iter()
                .map(|n| Row::Note(self.doc.text(*n).to_string()))
                .collect();
        };

        let mut rows = Vec::new();
        for child in self.doc.children(container) {
            if self.doc.class(*child) == Some(SECTION_CLASS) {
                self.push_section_rows(*child, &mut rows);
            } else {
                rows.push(Row::Item {
                    node: *child,
                    text: self.item_text(*child),
                    indent: false,
                });
            }
        }
        rows
    }

    fn push_section_rows(&self, section: NodeId, rows: &mut Vec<Row>) {
        let header = self.doc.first_child_by_tag(section, "header");
        let body = self
            .doc
            .children(section)
            .iter()
            .copied()
            .find(|c| self.doc.class(*c) == Some(BODY_CLASS));
        let (Some(header), Some(body)) = (header, body) else {
            return;
        };
        let expanded = self.doc.is_visible(body);
        rows.push(Row::SectionHeader {
            node: header,
            text: self.doc.text(header).to_string(),
            expanded,
            count: self.doc.children(body).len(),
        });
        if expanded {
            for member in self.doc.children(body) {
                rows.push(Row::Item {
                    node: *member,
                    text: self.item_text(*member),
                    indent: true,
                });
            }
        }
    }

    fn item_text(&self, item: NodeId) -> String {
        let title = title_node(&self.doc, item, &self.settings.locator)
            .map(|t| self.doc.text(t).trim().to_string())
            .unwrap_or_default();
        if title.is_empty() {
            "\u{2026}".to_string()
        } else {
            title
        }
    }

    pub fn cursor_down(&mut self) {
        let rows = self.build_rows().len();
        if rows > 0 && self.cursor + 1 < rows {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn clamp_cursor(&mut self) {
        let rows = self.build_rows().len();
        if rows == 0 {
            self.cursor = 0;
        } else if self.cursor >= rows {
            self.cursor = rows - 1;
        }
    }

    /// Activate the row under the cursor. Only section headers react.
    pub fn activate_cursor(&mut self) {
        if let Some(Row::SectionHeader { node, .. }) = self.build_rows().get(self.cursor) {
            let node = *node;
            self.monitor.activate(&mut self.doc, node);
        }
    }
}

/// Run the demo TUI
pub fn run(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let tick = Duration::from_millis(settings.nav.tick_ms);
    let mut app = App::new(settings)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, tick);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }
        if last_tick.elapsed() >= tick {
            app.tick();
            last_tick = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
