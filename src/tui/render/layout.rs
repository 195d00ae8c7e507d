use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Terminal rows taken by one record in the list
pub const ROW_HEIGHT: u16 = 3;

/// Widest the centered column gets
const MAX_COLUMN_WIDTH: u16 = 64;

/// Screen rectangles for each region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub header: Rect,
    pub entry: Rect,
    pub hints: Rect,
    pub list: Rect,
    pub summary: Rect,
    pub bindings: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        // Layout: gap | header | gap | entry (3) | hints | list | summary | bindings
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(2),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        AppLayout {
            header: rows[1],
            entry: centered(rows[3]),
            hints: centered(rows[4]),
            list: centered(rows[5]),
            summary: centered(rows[6]),
            bindings: rows[7],
        }
    }
}

fn centered(row: Rect) -> Rect {
    let width = row.width.min(MAX_COLUMN_WIDTH);
    Rect {
        x: row.x + (row.width - width) / 2,
        width,
        ..row
    }
}

/// How many records fit inside the bordered list area
pub fn visible_count(list: Rect) -> usize {
    (list.height.saturating_sub(2) / ROW_HEIGHT) as usize
}

/// Visible record count for a full terminal of the given size
pub fn visible_count_for(width: u16, height: u16) -> usize {
    visible_count(AppLayout::new(Rect::new(0, 0, width, height)).list)
}
