use pokedex_core::catalog::category_color;
use ratatui::style::{Color, Modifier, Style};

/// Consistent theme for the TUI
pub struct Theme {
    pub focused_border: Style,
    pub border: Style,
    pub highlight: Style,
    pub loading: Style,
    pub detail: Style,
    pub muted: Style,
    pub error: Style,
    pub key_hint: Style,
    /// Marks the category whose records are displayed
    pub active_category: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            focused_border: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::Gray),
            highlight: Style::default()
                .bg(Color::Rgb(50, 50, 80))
                .add_modifier(Modifier::BOLD),
            loading: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::ITALIC),
            detail: Style::default().fg(Color::White),
            muted: Style::default().fg(Color::DarkGray),
            error: Style::default().fg(Color::Red),
            key_hint: Style::default().fg(Color::Cyan),
            active_category: Style::default()
                .fg(Color::Rgb(0xFF, 0xD7, 0x00))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        }
    }
}

impl Theme {
    /// Background color for a category button
    pub fn category_color(name: &str) -> Color {
        let (r, g, b) = category_color(name).rgb();
        Color::Rgb(r, g, b)
    }

    /// Style of a category button
    pub fn category_style(name: &str, under_cursor: bool) -> Style {
        let style = Style::default()
            .bg(Self::category_color(name))
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        if under_cursor {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        }
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            self.focused_border
        } else {
            self.border
        }
    }
}
