use tui_input::Input;

/// Label of the pseudo-category that shows every record
pub const ALL_CATEGORIES: &str = "All";

/// Which pane receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Search,
    Categories,
    List,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Search => Focus::Categories,
            Focus::Categories => Focus::List,
            Focus::List => Focus::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Search => Focus::List,
            Focus::Categories => Focus::Search,
            Focus::List => Focus::Categories,
        }
    }
}

/// Presentation state of the browse screen.
///
/// Record data lives in the `BrowserSession`; this only tracks cursors,
/// focus and the search box.
#[derive(Debug, Default)]
pub struct BrowseState {
    pub focus: Focus,
    pub search_input: Input,
    /// Cursor in the category row; 0 is "All"
    pub category_index: usize,
    /// Cursor in the record list
    pub list_index: usize,
    /// Waiting for the initial record fetch
    pub loading_records: bool,
    /// Last failure, shown in the status line
    pub status: Option<String>,
}

impl BrowseState {
    pub fn new() -> Self {
        Self {
            loading_records: true,
            ..Default::default()
        }
    }

    pub fn query(&self) -> &str {
        self.search_input.value()
    }

    /// Move the list cursor by `delta`, staying within `len` rows
    pub fn move_list(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.list_index = 0;
            return;
        }
        let target = self.list_index as isize + delta;
        self.list_index = target.clamp(0, len as isize - 1) as usize;
    }

    /// Keep the list cursor valid after the displayed set changed
    pub fn clamp_list(&mut self, len: usize) {
        self.list_index = self.list_index.min(len.saturating_sub(1));
    }

    /// Move the category cursor; `count` excludes the "All" entry
    pub fn move_category(&mut self, delta: isize, count: usize) {
        let target = self.category_index as isize + delta;
        self.category_index = target.clamp(0, count as isize) as usize;
    }
}
