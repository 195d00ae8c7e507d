use crossterm::event::KeyEvent;

/// Which logical region currently owns keyboard input
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Focus {
    /// Typing a new item into the entry box
    #[default]
    EnteringNew,
    /// Moving through and acting on the list
    Navigating,
    /// Editing the text of an existing record in the entry box
    Renaming {
        index: usize,
        /// Text of the record when editing began
        original: String,
    },
}

impl Focus {
    pub fn is_text_entry(&self) -> bool {
        matches!(self, Focus::EnteringNew | Focus::Renaming { .. })
    }
}

/// A logical input command, already translated from a raw key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SwitchFocus,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,
    Toggle,
    Delete,
    Edit,
    Submit,
    Cancel,
    CompleteAll,
    ClearCompleted,
    Resize(usize),
    RedrawAll,
    Quit,
    /// Raw key forwarded to the focused text entry
    TextKey(KeyEvent),
}
