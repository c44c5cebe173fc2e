//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source text with keyword highlighting and the error line marked
//! - [`tokens`]: Token stream produced by the lexer
//! - [`tree`]: Annotated syntax tree outline
//! - [`symbols`]: Symbol table in declaration order
//! - [`status`]: Status bar with the compile outcome and keybindings
//!
//! Each pane module exports a single `render_*` function. Scrollable panes
//! take their offset by `&mut` and clamp it to the content on every frame.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

pub mod source;
pub mod status;
pub mod symbols;
pub mod tokens;
pub mod tree;

pub use source::render_source_pane;
pub use status::render_status_bar;
pub use symbols::render_symbols_pane;
pub use tokens::render_tokens_pane;
pub use tree::render_tree_pane;

/// Bordered block with the focus-dependent border colour
fn pane_block(title: String, is_focused: bool) -> Block<'static> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Clamp `offset` so the last page stays full, returning the visible height.
fn clamp_scroll(total_items: usize, area: Rect, offset: &mut usize) -> usize {
    // Account for borders, min 1
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *offset = (*offset).min(max_scroll);
    } else {
        *offset = 0;
    }

    visible_height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_scroll() {
        let area = Rect::new(0, 0, 20, 12);

        let mut offset = usize::MAX;
        assert_eq!(clamp_scroll(30, area, &mut offset), 10);
        assert_eq!(offset, 20);

        let mut offset = 5;
        clamp_scroll(4, area, &mut offset);
        assert_eq!(offset, 0);
    }
}
