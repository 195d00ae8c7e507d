use std::collections::BTreeSet;

use crate::model::config::UiConfig;

use super::focus::Focus;
use super::session::Session;
use super::text_entry::TextEntry;

/// Screen regions the coordinator knows how to fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    /// New-item / rename entry box
    Entry,
    /// Mode hints row above the list
    Hints,
    List,
    /// Items-left line
    Summary,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Entry, Region::Hints, Region::List, Region::Summary];
}

/// Set of regions that need redrawing after an event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedrawSet {
    regions: BTreeSet<Region>,
}

impl RedrawSet {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Region::ALL.into_iter().collect()
    }

    /// Regions touched when focus moves between entry and list
    pub fn focus_change() -> Self {
        [Region::Entry, Region::Hints, Region::List].into_iter().collect()
    }

    /// Regions derived from the record store or the selection
    pub fn list_change() -> Self {
        [Region::List, Region::Summary].into_iter().collect()
    }

    pub fn entry() -> Self {
        [Region::Entry].into_iter().collect()
    }

    pub fn with(mut self, other: RedrawSet) -> Self {
        self.regions.extend(other.regions);
        self
    }

    pub fn contains(&self, region: Region) -> bool {
        self.regions.contains(&region)
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Region> + '_ {
        self.regions.iter().copied()
    }
}

impl FromIterator<Region> for RedrawSet {
    fn from_iter<I: IntoIterator<Item = Region>>(iter: I) -> Self {
        RedrawSet {
            regions: iter.into_iter().collect(),
        }
    }
}

/// One record as it should appear in the list region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    pub text: String,
    pub done: bool,
    pub selected: bool,
}

/// What a region should display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionContent {
    Text(String),
    /// Entry is empty; show this dimmed hint instead
    Placeholder(String),
    /// Entry holds a rename buffer for an existing record
    Editing(String),
    Lines(Vec<DisplayLine>),
}

/// Drawing surface the coordinator writes into
pub trait Canvas {
    fn redraw(&mut self, region: Region, content: RegionContent);
    fn set_focus_indicator(&mut self, region: Region, focused: bool);
    fn show_cursor(&mut self, region: Region, column: usize);
    fn hide_cursor(&mut self);
}

/// Items-left summary text
pub fn summary_text(incomplete: usize) -> String {
    match incomplete {
        0 => "woohoo! all done".to_string(),
        1 => "1 item left".to_string(),
        n => format!("{} items left", n),
    }
}

pub const ENTRY_HINT: &str = "enter: save";
pub const RENAME_HINT: &str = "enter: save, esc: cancel";
pub const LIST_HINT: &str = "(M) Mark all as complete  (C) Clear completed";

/// Turns session state plus a redraw set into canvas calls
#[derive(Debug, Clone)]
pub struct RenderCoordinator {
    placeholder: String,
    show_key_hints: bool,
}

impl Default for RenderCoordinator {
    fn default() -> Self {
        Self::from_config(&UiConfig::default())
    }
}

impl RenderCoordinator {
    pub fn from_config(ui: &UiConfig) -> Self {
        RenderCoordinator {
            placeholder: ui.placeholder.clone(),
            show_key_hints: ui.show_key_hints,
        }
    }

    pub fn apply<E: TextEntry>(
        &self,
        session: &Session<E>,
        set: &RedrawSet,
        canvas: &mut impl Canvas,
    ) {
        if set.is_empty() {
            return;
        }
        for region in set.iter() {
            canvas.redraw(region, self.content_for(session, region));
        }

        let focus = session.focus();
        if set.contains(Region::Entry) {
            canvas.set_focus_indicator(Region::Entry, focus.is_text_entry());
        }
        if set.contains(Region::List) {
            canvas.set_focus_indicator(Region::List, *focus == Focus::Navigating);
        }

        if focus.is_text_entry() {
            canvas.show_cursor(Region::Entry, session.active_entry().cursor_position());
        } else {
            canvas.hide_cursor();
        }
    }

    pub fn content_for<E: TextEntry>(&self, session: &Session<E>, region: Region) -> RegionContent {
        match region {
            Region::Entry => {
                let text = session.active_entry().content();
                match session.focus() {
                    Focus::Renaming { .. } => RegionContent::Editing(text.to_string()),
                    _ if text.is_empty() => RegionContent::Placeholder(self.placeholder.clone()),
                    _ => RegionContent::Text(text.to_string()),
                }
            }
            Region::Hints => {
                let hint = match session.focus() {
                    _ if !self.show_key_hints => "",
                    Focus::EnteringNew => ENTRY_HINT,
                    Focus::Navigating => LIST_HINT,
                    Focus::Renaming { .. } => RENAME_HINT,
                };
                RegionContent::Text(hint.to_string())
            }
            Region::List => RegionContent::Lines(list_lines(session)),
            Region::Summary => {
                if session.has_added() {
                    RegionContent::Text(summary_text(session.store().count_incomplete()))
                } else {
                    RegionContent::Text(String::new())
                }
            }
        }
    }
}

/// Records inside the viewport, in order
pub fn list_lines<E: TextEntry>(session: &Session<E>) -> Vec<DisplayLine> {
    let selection = session.selection();
    let records = session.store().records();
    selection
        .visible_range()
        .map(|i| DisplayLine {
            text: records[i].text.clone(),
            done: records[i].done,
            selected: selection.selected() == Some(i),
        })
        .collect()
}
