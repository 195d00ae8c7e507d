use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use std::collections::HashMap;

use crate::tui::focus::Command;
use crate::tui::redraw::{Canvas, Region, RegionContent};
use crate::tui::session::Session;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn text_key(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

/// Feed each character of `text` to the focused entry.
pub fn type_text(session: &mut Session, text: &str) {
    for c in text.chars() {
        session.handle(Command::TextKey(text_key(c)));
    }
}

/// A session with one record per text, added through the entry box.
/// Focus is left on the entry and the newest record is selected.
pub fn session_with(texts: &[&str]) -> Session {
    let mut session = Session::new(10);
    for text in texts {
        type_text(&mut session, text);
        session.handle(Command::Submit);
    }
    session
}

/// One call made against a [`RecordingCanvas`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasCall {
    Redraw(Region, RegionContent),
    Focus(Region, bool),
    ShowCursor(Region, usize),
    HideCursor,
}

/// Canvas that records what the coordinator asked for
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<CanvasCall>,
    pub focus: HashMap<Region, bool>,
    pub cursor: Option<(Region, usize)>,
}

impl RecordingCanvas {
    /// Regions redrawn, in call order
    pub fn redrawn(&self) -> Vec<Region> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                CanvasCall::Redraw(region, _) => Some(*region),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn redraw(&mut self, region: Region, content: RegionContent) {
        self.calls.push(CanvasCall::Redraw(region, content));
    }

    fn set_focus_indicator(&mut self, region: Region, focused: bool) {
        self.calls.push(CanvasCall::Focus(region, focused));
        self.focus.insert(region, focused);
    }

    fn show_cursor(&mut self, region: Region, column: usize) {
        self.calls.push(CanvasCall::ShowCursor(region, column));
        self.cursor = Some((region, column));
    }

    fn hide_cursor(&mut self) {
        self.calls.push(CanvasCall::HideCursor);
        self.cursor = None;
    }
}
