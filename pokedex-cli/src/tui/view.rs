//! Browse screen rendering

use pokedex_core::catalog::display_label;
use pokedex_core::detail::RowState;
use pokedex_core::{BrowserSession, CatalogConfig, FilterMode, Record};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::state::{BrowseState, Focus, ALL_CATEGORIES};
use super::theme::Theme;

/// Rows the category block may take, borders excluded, before it scrolls
const MAX_CATEGORY_LINES: u16 = 6;

pub fn render(
    frame: &mut Frame,
    session: &BrowserSession,
    ui: &BrowseState,
    theme: &Theme,
    config: &CatalogConfig,
) {
    let area = frame.area();
    let entries = category_entries(session);
    let category_lines = pack_buttons(&entries, inner_width(area)).len() as u16;
    let category_height = category_lines.clamp(1, MAX_CATEGORY_LINES) + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),               // Search bar
            Constraint::Length(category_height), // Categories
            Constraint::Min(5),                  // Record list
            Constraint::Length(1),               // Help / status
        ])
        .split(area);

    render_search_bar(frame, chunks[0], ui, theme);
    render_categories(frame, chunks[1], session, ui, theme);
    render_record_list(frame, chunks[2], session, ui, theme, config);
    render_help(frame, chunks[3], ui, theme);
}

fn inner_width(area: Rect) -> usize {
    area.width.saturating_sub(2) as usize
}

/// "All" followed by every category name, in cursor order
fn category_entries(session: &BrowserSession) -> Vec<&str> {
    std::iter::once(ALL_CATEGORIES)
        .chain(session.categories().iter().map(String::as_str))
        .collect()
}

/// Cells taken by one category button, brackets included
fn button_width(name: &str) -> usize {
    display_label(name).chars().count() + 4
}

/// Split buttons into lines no wider than `width`, never breaking a button.
/// Each line holds entry indices.
fn pack_buttons(entries: &[&str], width: usize) -> Vec<Vec<usize>> {
    let mut lines: Vec<Vec<usize>> = Vec::new();
    let mut used = 0;

    for (index, name) in entries.iter().enumerate() {
        let needed = button_width(name);
        match lines.last_mut() {
            Some(line) if used + needed <= width => {
                line.push(index);
                used += needed;
            }
            _ => {
                lines.push(vec![index]);
                used = needed;
            }
        }
    }

    lines
}

fn render_search_bar(frame: &mut Frame, area: Rect, ui: &BrowseState, theme: &Theme) {
    let focused = ui.focus == Focus::Search;

    let content = if ui.query().is_empty() && !focused {
        Line::from(Span::styled("Search Pokémon", theme.muted))
    } else {
        Line::from(ui.query().to_string())
    };

    let input = Paragraph::new(content).block(
        Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_style(theme.border_style(focused)),
    );
    frame.render_widget(input, area);

    if focused {
        let cursor = ui.search_input.visual_cursor() as u16;
        let max_x = area.x + area.width.saturating_sub(2);
        frame.set_cursor_position(((area.x + 1 + cursor).min(max_x), area.y + 1));
    }
}

fn render_categories(
    frame: &mut Frame,
    area: Rect,
    session: &BrowserSession,
    ui: &BrowseState,
    theme: &Theme,
) {
    let focused = ui.focus == Focus::Categories;
    let active = session.mode().category();
    let entries = category_entries(session);
    let packed = pack_buttons(&entries, inner_width(area));

    // Scroll so the line holding the cursor stays visible
    let visible = (area.height.saturating_sub(2) as usize).max(1);
    let cursor_line = packed
        .iter()
        .position(|line| line.contains(&ui.category_index))
        .unwrap_or(0);
    let offset = (cursor_line + 1).saturating_sub(visible);

    let lines: Vec<Line> = packed
        .iter()
        .skip(offset)
        .take(visible)
        .map(|line| {
            let mut spans = Vec::new();
            for &index in line {
                let name = entries[index];
                let is_active = match active {
                    Some(category) => category == name,
                    None => index == 0 && matches!(session.mode(), FilterMode::All),
                };
                let under_cursor = focused && ui.category_index == index;
                let (open, close) = if is_active { ("[", "]") } else { (" ", " ") };

                spans.push(Span::styled(open, theme.active_category));
                spans.push(Span::styled(
                    format!(" {} ", display_label(name)),
                    Theme::category_style(name, under_cursor),
                ));
                spans.push(Span::styled(close, theme.active_category));
            }
            Line::from(spans)
        })
        .collect();

    let title = if packed.len() > visible {
        format!(" Types ({}/{}) ", cursor_line + 1, packed.len())
    } else {
        " Types ".to_string()
    };

    let row = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(theme.border_style(focused)),
    );
    frame.render_widget(row, area);
}

fn mode_label(mode: &FilterMode) -> String {
    match mode {
        FilterMode::All => "all".to_string(),
        FilterMode::ByCategory(name) => format!("type: {name}"),
        FilterMode::ByText(query) => format!("search: \"{query}\""),
    }
}

fn record_item<'a>(
    record: &'a Record,
    session: &'a BrowserSession,
    theme: &Theme,
    config: &CatalogConfig,
) -> ListItem<'a> {
    let mut header = vec![
        Span::styled(format!("#{:<5} ", record.id), theme.muted),
        Span::raw(display_label(&record.name)),
    ];

    let mut lines = Vec::new();
    match session.row_state(record) {
        RowState::Loading => {
            header.push(Span::styled("  loading…", theme.loading));
            lines.push(Line::from(header));
        }
        RowState::Expanded => {
            lines.push(Line::from(header));
            if let Some(detail) = session.detail_for(record) {
                lines.push(Line::styled(
                    format!("       Height: {}", detail.height),
                    theme.detail,
                ));
                lines.push(Line::styled(
                    format!("       Weight: {}", detail.weight),
                    theme.detail,
                ));
                lines.push(Line::styled(
                    format!("       Type: {}", detail.types_display()),
                    theme.detail,
                ));
                lines.push(Line::styled(
                    format!("       Sprite: {}", config.sprite_url(&record.id)),
                    theme.muted,
                ));
            }
        }
        RowState::Collapsed => lines.push(Line::from(header)),
    }

    ListItem::new(Text::from(lines))
}

fn render_record_list(
    frame: &mut Frame,
    area: Rect,
    session: &BrowserSession,
    ui: &BrowseState,
    theme: &Theme,
    config: &CatalogConfig,
) {
    let focused = ui.focus == Focus::List;
    let displayed = session.displayed();

    let block = Block::default()
        .title(format!(
            " {} of {} · {} ",
            displayed.len(),
            session.full().len(),
            mode_label(session.mode())
        ))
        .borders(Borders::ALL)
        .border_style(theme.border_style(focused));

    if displayed.is_empty() {
        let message = if ui.loading_records {
            "Loading catalog…"
        } else {
            "No records"
        };
        let placeholder = Paragraph::new(Span::styled(message, theme.muted)).block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = displayed
        .iter()
        .map(|record| record_item(record, session, theme, config))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(if focused { theme.highlight } else { Style::default() })
        .highlight_symbol("▶ ");

    let mut state = ListState::default().with_selected(Some(ui.list_index));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_help(frame: &mut Frame, area: Rect, ui: &BrowseState, theme: &Theme) {
    if let Some(status) = &ui.status {
        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled(status.clone(), theme.error),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let hints: &[(&str, &str)] = match ui.focus {
        Focus::Search => &[
            ("Type", "Search"),
            ("Enter", "List"),
            ("Tab", "Focus"),
            ("Esc", "Clear/Quit"),
        ],
        Focus::Categories => &[
            ("←→", "Move"),
            ("Enter", "Apply"),
            ("Tab", "Focus"),
            ("q", "Quit"),
        ],
        Focus::List => &[
            ("↑↓", "Move"),
            ("Enter", "Details"),
            ("/", "Search"),
            ("q", "Quit"),
        ],
    };

    let mut spans = vec![Span::raw(" ")];
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  •  ", theme.muted));
        }
        spans.push(Span::styled(*key, theme.key_hint));
        spans.push(Span::raw(format!(" {action}")));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
