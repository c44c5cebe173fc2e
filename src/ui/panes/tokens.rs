//! Token stream pane rendering

use super::{clamp_scroll, pane_block};
use crate::parser::lexer::{Token, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

fn kind_style(kind: TokenKind) -> Style {
    let color = match kind {
        TokenKind::Type => DEFAULT_THEME.type_name,
        TokenKind::Integer | TokenKind::Float => DEFAULT_THEME.number,
        TokenKind::Char => DEFAULT_THEME.string,
        TokenKind::Variable => DEFAULT_THEME.fg,
        TokenKind::Operator | TokenKind::Assign => DEFAULT_THEME.secondary,
        TokenKind::Semicolon | TokenKind::Parenthesis => DEFAULT_THEME.primary,
    };
    Style::default().fg(color)
}

fn token_line(token: &Token) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:>4}:{:<4}", token.location.line, token.location.column),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(format!("{:<12}", token.kind.name()), kind_style(token.kind)),
        Span::styled(token.value.to_string(), Style::default().fg(DEFAULT_THEME.fg)),
    ])
}

/// Render the token pane
///
/// `lex_failed` selects the placeholder shown when there are no tokens.
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    lex_failed: bool,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(format!(" Tokens ({}) ", tokens.len()), is_focused);

    if tokens.is_empty() {
        let (text, color) = if lex_failed {
            ("(lexing failed)", DEFAULT_THEME.error)
        } else {
            ("(no tokens)", DEFAULT_THEME.comment)
        };
        let paragraph = Paragraph::new(text)
            .block(block)
            .style(Style::default().fg(color));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = clamp_scroll(tokens.len(), area, scroll_offset);
    let items: Vec<ListItem> = tokens
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|token| ListItem::new(token_line(token)))
        .collect();

    let list = List::new(items).block(block.padding(Padding::new(1, 0, 0, 0)));
    frame.render_widget(list, area);
}
