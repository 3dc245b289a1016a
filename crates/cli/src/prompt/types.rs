//! State for the selection menu.

/// Direction to move the highlighted entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleDirection {
    Up,
    Down,
}

/// Visible window onto the list of entries.
#[derive(Clone, PartialEq, Debug)]
pub struct ViewportState {
    pub offset: usize,
    pub height: u16,
    pub width: u16,
}

#[derive(Clone, PartialEq, Debug)]
pub struct UiState {
    /// Position of the highlighted entry among the displayed entries
    pub selected_index: usize,
    pub viewport: ViewportState,
    pub is_filtering: bool,
    pub filter_text: String,
}

impl UiState {
    /// Initial state with `selected_index` scrolled into view.
    #[must_use]
    pub fn new(selected_index: usize, width: u16, height: u16) -> Self {
        let viewport_height = height.max(1);
        let offset = selected_index.saturating_sub(viewport_height as usize - 1);

        Self {
            selected_index,
            viewport: ViewportState {
                offset,
                height: viewport_height,
                width,
            },
            is_filtering: false,
            filter_text: String::new(),
        }
    }
}

/// What a key press asks the menu to do.
#[derive(Clone, Debug, PartialEq)]
pub enum MenuAction {
    Select,
    Cancel,
    Move(CycleDirection),
    Update(UiState),
    Nothing,
}
