use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::nav::Phase;

use super::app::{App, Row};

/// Main render function: top bar, list view, status row
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // top bar
            Constraint::Min(1),    // list view
            Constraint::Length(1), // status row
        ])
        .split(area);

    render_top_bar(frame, app, chunks[0]);
    render_rows(frame, app, chunks[1]);
    render_status_row(frame, app, chunks[2]);
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::OffView => "off-view",
        Phase::Pending { .. } => "pending",
        Phase::Done => "done",
        Phase::GaveUp => "gave-up",
    }
}

fn render_top_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let phase = app.monitor.phase();
    let phase_style = match phase {
        Phase::Pending { .. } => Style::default().fg(app.theme.yellow).bg(bg),
        Phase::Done => Style::default().fg(app.theme.green).bg(bg),
        Phase::GaveUp => Style::default().fg(app.theme.highlight).bg(bg),
        Phase::OffView => Style::default().fg(app.theme.dim).bg(bg),
    };
    let line = Line::from(vec![
        Span::styled("shelve", Style::default().fg(app.theme.highlight).bg(bg)),
        Span::styled(
            format!("  {}", app.history.location()),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ),
        Span::styled(format!("  [{}]", phase_label(phase)), phase_style),
    ]);
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}

fn render_rows(frame: &mut Frame, app: &mut App, area: Rect) {
    let rows = app.build_rows();
    let height = area.height as usize;

    // Keep the cursor inside the visible window.
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if height > 0 && app.cursor >= app.scroll_offset + height {
        app.scroll_offset = app.cursor - height + 1;
    }

    let bg = app.theme.background;
    let width = area.width as usize;
    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(height)
        .map(|(i, row)| {
            let selected = i == app.cursor;
            let row_bg = if selected { app.theme.selection_bg } else { bg };
            let (text, fg) = match row {
                Row::Note(text) => (text.clone(), app.theme.dim),
                Row::SectionHeader {
                    text,
                    expanded,
                    count,
                    ..
                } => {
                    let marker = if *expanded { '\u{25be}' } else { '\u{25b8}' };
                    (format!("{} {} ({})", marker, text, count), app.theme.header)
                }
                Row::Item { text, indent, .. } => {
                    let prefix = if *indent { "    \u{2022} " } else { "\u{2022} " };
                    (format!("{}{}", prefix, text), app.theme.text)
                }
            };
            Line::from(Span::styled(
                fit_width(&text, width),
                Style::default().fg(fg).bg(row_bg),
            ))
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        area,
    );
}

fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let hints = "1/2 nav  r replace  [ ] back/fwd  j/k move  enter toggle  q quit";
    let line = Line::from(Span::styled(
        fit_width(hints, area.width as usize),
        Style::default().fg(app.theme.dim).bg(bg),
    ));
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}

/// Truncate to the given display width (no ellipsis; rows are short).
fn fit_width(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}
