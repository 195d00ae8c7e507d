use tracing::{debug, error};

use crate::model::record::{RecordStore, StoreError};

use super::focus::{Command, Focus};
use super::redraw::RedrawSet;
use super::selection::{Direction, Selection};
use super::text_entry::{LineEditor, TextEntry};

/// All state for one run of the task list.
///
/// Every input command goes through [`Session::handle`], which mutates the
/// store, resynchronises the selection and reports which regions changed.
#[derive(Debug)]
pub struct Session<E = LineEditor> {
    store: RecordStore,
    selection: Selection,
    focus: Focus,
    /// Buffer for new items; left untouched while renaming
    entry: E,
    rename_entry: E,
    /// Whether any record has ever been added (the summary stays blank until then)
    has_added: bool,
    should_quit: bool,
}

impl<E: TextEntry + Default> Session<E> {
    pub fn new(visible_count: usize) -> Self {
        Self::with_entries(visible_count, E::default(), E::default())
    }
}

impl<E: TextEntry> Session<E> {
    pub fn with_entries(visible_count: usize, entry: E, rename_entry: E) -> Self {
        Session {
            store: RecordStore::new(),
            selection: Selection::new(visible_count),
            focus: Focus::default(),
            entry,
            rename_entry,
            has_added: false,
            should_quit: false,
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn focus(&self) -> &Focus {
        &self.focus
    }

    pub fn entry(&self) -> &E {
        &self.entry
    }

    pub fn rename_entry(&self) -> &E {
        &self.rename_entry
    }

    /// The entry currently shown in the entry region
    pub fn active_entry(&self) -> &E {
        match self.focus {
            Focus::Renaming { .. } => &self.rename_entry,
            _ => &self.entry,
        }
    }

    pub fn has_added(&self) -> bool {
        self.has_added
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Process one command to completion and return the regions to redraw.
    pub fn handle(&mut self, command: Command) -> RedrawSet {
        match command {
            Command::Quit => {
                self.should_quit = true;
                return RedrawSet::none();
            }
            Command::RedrawAll => return RedrawSet::all(),
            Command::Resize(visible_count) => {
                self.selection.on_resize(visible_count);
                return RedrawSet::list_change();
            }
            _ => {}
        }

        match self.focus {
            Focus::EnteringNew => self.handle_entering(command),
            Focus::Navigating => self.handle_navigating(command),
            Focus::Renaming { .. } => self.handle_renaming(command),
        }
    }

    fn handle_entering(&mut self, command: Command) -> RedrawSet {
        match command {
            Command::SwitchFocus => self.set_focus(Focus::Navigating),
            Command::Submit => {
                if self.entry.content().is_empty() {
                    return RedrawSet::none();
                }
                let index = self.store.add(self.entry.content());
                self.entry.set_content("");
                self.has_added = true;
                self.selection.on_store_mutated(self.store.len());
                self.selection.select(index);
                debug!(index, len = self.store.len(), "added record");
                RedrawSet::entry().with(RedrawSet::list_change())
            }
            Command::TextKey(key) => {
                self.entry.handle_key(key);
                RedrawSet::entry()
            }
            _ => RedrawSet::none(),
        }
    }

    fn handle_navigating(&mut self, command: Command) -> RedrawSet {
        if command == Command::SwitchFocus {
            return self.set_focus(Focus::EnteringNew);
        }
        // Everything else acts on the selected record
        let Some(selected) = self.selection.selected() else {
            return RedrawSet::none();
        };

        let moved = match command {
            Command::MoveUp => self.selection.move_by(-1),
            Command::MoveDown => self.selection.move_by(1),
            Command::PageUp => self.selection.move_by_page(Direction::Up),
            Command::PageDown => self.selection.move_by_page(Direction::Down),
            Command::HalfPageUp => self.selection.move_by_half_page(Direction::Up),
            Command::HalfPageDown => self.selection.move_by_half_page(Direction::Down),
            Command::Toggle => {
                let result = self.store.toggle(selected);
                return self.after_mutation(result);
            }
            Command::Delete => {
                let result = self.store.delete(selected).map(|_| ());
                return self.after_mutation(result);
            }
            Command::CompleteAll => {
                self.store.complete_all();
                return self.after_mutation(Ok(()));
            }
            Command::ClearCompleted => return self.clear_completed(selected),
            Command::Edit => return self.begin_rename(selected),
            _ => return RedrawSet::none(),
        };

        if moved {
            RedrawSet::list_change()
        } else {
            RedrawSet::none()
        }
    }

    fn handle_renaming(&mut self, command: Command) -> RedrawSet {
        let Focus::Renaming { index, .. } = self.focus else {
            return RedrawSet::none();
        };
        match command {
            Command::Submit => {
                if self.rename_entry.content().is_empty() {
                    return RedrawSet::none();
                }
                let result = self.store.rename(index, self.rename_entry.content());
                self.rename_entry.set_content("");
                let changed = self.after_mutation(result);
                debug!(index, "renamed record");
                self.set_focus(Focus::Navigating).with(changed)
            }
            Command::Cancel => {
                // Nothing was written to the store; dropping the buffer is enough
                self.rename_entry.set_content("");
                debug!(index, "rename cancelled");
                self.set_focus(Focus::Navigating)
            }
            Command::TextKey(key) => {
                self.rename_entry.handle_key(key);
                RedrawSet::entry()
            }
            _ => RedrawSet::none(),
        }
    }

    fn begin_rename(&mut self, index: usize) -> RedrawSet {
        let Some(record) = self.store.get(index) else {
            report_store_error(StoreError::IndexOutOfRange {
                index,
                len: self.store.len(),
            });
            return RedrawSet::none();
        };
        let original = record.text.clone();
        self.rename_entry.set_content(&original);
        self.set_focus(Focus::Renaming { index, original })
    }

    /// Drop done records. The selection follows its record if it survives.
    fn clear_completed(&mut self, selected: usize) -> RedrawSet {
        let removed = self.store.clear_completed();
        if removed.is_empty() {
            return RedrawSet::none();
        }
        self.selection.on_store_mutated(self.store.len());
        if removed.binary_search(&selected).is_err() {
            let shift = removed.iter().take_while(|&&r| r < selected).count();
            self.selection.select(selected - shift);
        }
        debug!(removed = removed.len(), "cleared completed records");
        RedrawSet::list_change()
    }

    fn after_mutation(&mut self, result: Result<(), StoreError>) -> RedrawSet {
        if let Err(err) = result {
            report_store_error(err);
        }
        self.selection.on_store_mutated(self.store.len());
        RedrawSet::list_change()
    }

    fn set_focus(&mut self, focus: Focus) -> RedrawSet {
        debug!(from = ?self.focus, to = ?focus, "focus change");
        self.focus = focus;
        RedrawSet::focus_change()
    }
}

/// The selection must never hand the store a bad index.
fn report_store_error(err: StoreError) {
    error!(%err, "selection out of sync with record store");
    debug_assert!(false, "{err}");
}
