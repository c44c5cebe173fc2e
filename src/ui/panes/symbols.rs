//! Symbol table pane rendering

use super::{clamp_scroll, pane_block};
use crate::semantic::SymbolTable;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the symbol table pane; `None` means compilation failed.
pub fn render_symbols_pane(
    frame: &mut Frame,
    area: Rect,
    symbols: Option<&SymbolTable>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let count = symbols.map_or(0, SymbolTable::len);
    let block = pane_block(format!(" Symbols ({count}) "), is_focused);

    let symbols = match symbols {
        Some(table) if !table.is_empty() => table,
        other => {
            let text = if other.is_some() {
                "(no declarations)"
            } else {
                "(unavailable)"
            };
            let paragraph = Paragraph::new(text)
                .block(block)
                .style(Style::default().fg(DEFAULT_THEME.comment));
            frame.render_widget(paragraph, area);
            return;
        }
    };

    let name_width = symbols.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    let visible_height = clamp_scroll(symbols.len(), area, scroll_offset);

    let items: Vec<ListItem> = symbols
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(name, symbol)| {
            let (marker, marker_color) = if symbol.initialized {
                ("initialized", DEFAULT_THEME.success)
            } else {
                ("uninitialized", DEFAULT_THEME.comment)
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{name:<name_width$}  "),
                    Style::default()
                        .fg(DEFAULT_THEME.fg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{:<9}", symbol.data_type.to_string()),
                    Style::default().fg(DEFAULT_THEME.type_name),
                ),
                Span::styled(marker, Style::default().fg(marker_color)),
            ]))
        })
        .collect();

    let list = List::new(items).block(block.padding(Padding::new(1, 0, 0, 0)));
    frame.render_widget(list, area);
}
