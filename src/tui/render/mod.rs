pub mod layout;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::util::unicode;

use super::redraw::{Canvas, DisplayLine, LIST_HINT, Region, RegionContent};
use super::theme::Theme;

use layout::{AppLayout, ROW_HEIGHT};

const HEADER: &str = "T O D O M V C";
const KEY_BINDINGS: [(&str, &str); 4] = [
    ("ctrl-c", "quit"),
    ("tab", "switch focus"),
    ("j/k", "navigate"),
    ("space", "toggle"),
];

/// Checkbox shown before each record
fn checkbox(done: bool) -> &'static str {
    if done { "(X)" } else { "( )" }
}

/// Retained region contents for the ratatui backend.
///
/// The coordinator writes into this through [`Canvas`]; every frame is then
/// painted from the retained state, since ratatui diffs whole frames anyway.
#[derive(Debug, Clone)]
pub struct TerminalCanvas {
    entry: RegionContent,
    hints: String,
    list: Vec<DisplayLine>,
    summary: String,
    entry_focused: bool,
    list_focused: bool,
    cursor: Option<usize>,
}

impl Default for TerminalCanvas {
    fn default() -> Self {
        TerminalCanvas {
            entry: RegionContent::Text(String::new()),
            hints: String::new(),
            list: Vec::new(),
            summary: String::new(),
            entry_focused: false,
            list_focused: false,
            cursor: None,
        }
    }
}

impl Canvas for TerminalCanvas {
    fn redraw(&mut self, region: Region, content: RegionContent) {
        match (region, content) {
            (Region::Entry, content) => self.entry = content,
            (Region::Hints, RegionContent::Text(text)) => self.hints = text,
            (Region::List, RegionContent::Lines(lines)) => self.list = lines,
            (Region::Summary, RegionContent::Text(text)) => self.summary = text,
            (region, content) => {
                tracing::warn!(?region, ?content, "content does not fit region");
            }
        }
    }

    fn set_focus_indicator(&mut self, region: Region, focused: bool) {
        match region {
            Region::Entry => self.entry_focused = focused,
            Region::List => self.list_focused = focused,
            Region::Hints | Region::Summary => {}
        }
    }

    fn show_cursor(&mut self, region: Region, column: usize) {
        if region == Region::Entry {
            self.cursor = Some(column);
        }
    }

    fn hide_cursor(&mut self) {
        self.cursor = None;
    }
}

impl TerminalCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paint the whole screen from retained state
    pub fn draw(&self, frame: &mut Frame, theme: &Theme) {
        let area = frame.area();
        let bg = Style::default().bg(theme.background);
        frame.render_widget(Block::default().style(bg), area);

        let layout = AppLayout::new(area);

        let header = Paragraph::new(HEADER)
            .style(bg.fg(theme.text_bright).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        frame.render_widget(header, layout.header);

        self.draw_entry(frame, theme, layout.entry);

        let hints = Paragraph::new(self.hints_line(theme))
            .style(bg)
            .alignment(Alignment::Right);
        frame.render_widget(hints, layout.hints);

        self.draw_list(frame, theme, layout.list);

        let summary = Paragraph::new(self.summary.as_str())
            .style(bg.fg(theme.text))
            .alignment(Alignment::Right);
        frame.render_widget(summary, layout.summary);

        let bindings = Paragraph::new(bindings_line(theme))
            .style(bg)
            .alignment(Alignment::Center);
        frame.render_widget(bindings, layout.bindings);
    }

    fn draw_entry(&self, frame: &mut Frame, theme: &Theme, area: Rect) {
        let border = match (&self.entry, self.entry_focused) {
            (RegionContent::Editing(_), true) => theme.editing,
            (_, true) => theme.highlight,
            (_, false) => theme.dim,
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border).bg(theme.background));
        let inner = block.inner(area);
        let inner = Rect {
            x: inner.x + 1,
            width: inner.width.saturating_sub(2),
            ..inner
        };
        frame.render_widget(block, area);

        let width = inner.width as usize;
        let (text, fg) = match &self.entry {
            RegionContent::Placeholder(text) => (text.as_str(), theme.dim),
            RegionContent::Text(text) | RegionContent::Editing(text) => {
                (text.as_str(), theme.text_bright)
            }
            RegionContent::Lines(_) => ("", theme.text),
        };
        let text = unicode::truncate_to_width(text, width);
        frame.render_widget(
            Paragraph::new(text).style(Style::default().fg(fg).bg(theme.background)),
            inner,
        );

        if let Some(col) = self.cursor
            && inner.width > 0
        {
            let col = col.min(width.saturating_sub(1)) as u16;
            frame.set_cursor_position(Position::new(inner.x + col, inner.y));
        }
    }

    fn draw_list(&self, frame: &mut Frame, theme: &Theme, area: Rect) {
        let border = if self.list_focused {
            theme.highlight
        } else {
            theme.dim
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border).bg(theme.background));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let text_width = (inner.width as usize).saturating_sub(3 + 4);
        let mut y = inner.y;
        for line in &self.list {
            if y + ROW_HEIGHT > inner.y + inner.height {
                break;
            }
            let bg = if line.selected {
                theme.selection_bg
            } else {
                theme.background
            };
            let fg = if line.selected {
                theme.text_bright
            } else {
                theme.text
            };
            let row = Rect {
                y,
                height: ROW_HEIGHT,
                ..inner
            };
            let text = format!(
                "   {} {}",
                checkbox(line.done),
                unicode::truncate_to_width(&line.text, text_width)
            );
            let rows = vec![Line::default(), Line::from(text), Line::default()];
            frame.render_widget(
                Paragraph::new(rows).style(Style::default().fg(fg).bg(bg)),
                row,
            );
            y += ROW_HEIGHT;
        }
    }

    fn hints_line(&self, theme: &Theme) -> Line<'static> {
        let dim = Style::default().fg(theme.dim).bg(theme.background);
        if self.hints != LIST_HINT {
            return Line::from(Span::styled(self.hints.clone(), dim));
        }
        let bold = dim.fg(theme.text).add_modifier(Modifier::BOLD);
        Line::from(vec![
            Span::styled("(M)", bold),
            Span::styled(" Mark all as complete  ", dim),
            Span::styled("(C)", bold),
            Span::styled(" Clear completed", dim),
        ])
    }
}

fn bindings_line(theme: &Theme) -> Line<'static> {
    let plain = Style::default().fg(theme.dim).bg(theme.background);
    let bold = plain.fg(theme.text).add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();
    for (i, (key, action)) in KEY_BINDINGS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(", ", plain));
        }
        spans.push(Span::styled(*key, bold));
        spans.push(Span::styled(format!(": {}", action), plain));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::focus::Command;
    use crate::tui::redraw::{RedrawSet, RenderCoordinator};
    use crate::tui::session::Session;
    use test_helpers::*;

    fn screen(session: &Session) -> String {
        let mut canvas = TerminalCanvas::new();
        RenderCoordinator::default().apply(session, &RedrawSet::all(), &mut canvas);
        render_to_string(TERM_W, TERM_H, |frame, _area| {
            canvas.draw(frame, &Theme::default());
        })
    }

    #[test]
    fn empty_session_shows_placeholder() {
        let session: Session = Session::new(4);
        let out = screen(&session);
        assert!(out.contains("T O D O M V C"));
        assert!(out.contains("What needs to be done?"));
        assert!(out.contains("enter: save"));
        assert!(out.contains("ctrl-c: quit, tab: switch focus"));
        assert!(!out.contains("left"));
    }

    #[test]
    fn records_and_summary() {
        let mut session = session_with(&["buy milk", "walk dog"]);
        session.handle(Command::SwitchFocus);
        session.handle(Command::Toggle);
        let out = screen(&session);
        assert!(out.contains("( ) buy milk"));
        assert!(out.contains("(X) walk dog"));
        assert!(out.contains("1 item left"));
        assert!(out.contains("(M) Mark all as complete  (C) Clear completed"));
    }

    #[test]
    fn list_draws_only_visible_rows() {
        let texts: Vec<String> = (0..8).map(|i| format!("task {i}")).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let mut session = session_with(&refs);
        let list_area = AppLayout::new(Rect::new(0, 0, TERM_W, TERM_H)).list;
        session.handle(Command::Resize(layout::visible_count(list_area)));
        let out = screen(&session);
        assert!(out.contains("task 7"));
        assert!(!out.contains("task 0"));
    }

    #[test]
    fn long_text_is_truncated() {
        let long = "x".repeat(200);
        let session = session_with(&[long.as_str()]);
        let out = screen(&session);
        assert!(out.contains('\u{2026}'));
    }

    #[test]
    fn mismatched_content_is_ignored() {
        let mut canvas = TerminalCanvas::new();
        canvas.redraw(Region::List, RegionContent::Text("nope".into()));
        assert!(canvas.list.is_empty());
        canvas.redraw(Region::Summary, RegionContent::Text("2 items left".into()));
        assert_eq!(canvas.summary, "2 items left");
    }
}
