//! Syntax tree pane rendering
//!
//! Draws [`Program::outline`] with node kinds coloured by role and resolved
//! types dimmed after each variable and operator.

use super::{clamp_scroll, pane_block};
use crate::parser::ast::{OutlineLine, Program};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

fn kind_style(kind: &str) -> Style {
    match kind {
        "Program" | "StatementList" | "Statement" | "Declaration" | "Assignment" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        "TYPE" => Style::default().fg(DEFAULT_THEME.type_name),
        "INTEGER" | "FLOAT" => Style::default().fg(DEFAULT_THEME.number),
        "CHAR" => Style::default().fg(DEFAULT_THEME.string),
        "ASSIGN" | "OPERATOR" => Style::default().fg(DEFAULT_THEME.secondary),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

fn outline_line(line: &OutlineLine) -> Line<'static> {
    let mut spans = vec![
        Span::raw(" ".repeat(line.depth * 2)),
        Span::styled(line.kind, kind_style(line.kind)),
    ];

    if let Some(value) = &line.value {
        spans.push(Span::styled(
            format!(": {value}"),
            Style::default().fg(DEFAULT_THEME.fg),
        ));
    }
    if let Some(ty) = line.annotation {
        spans.push(Span::styled(
            format!(" <{ty}>"),
            Style::default().fg(DEFAULT_THEME.comment),
        ));
    }

    Line::from(spans)
}

/// Render the syntax tree pane; `None` means compilation failed.
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    program: Option<&Program>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Syntax Tree ".to_string(), is_focused);

    let Some(program) = program else {
        let paragraph = Paragraph::new("(no tree: compilation failed)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.error));
        frame.render_widget(paragraph, area);
        return;
    };

    let lines = program.outline();
    let visible_height = clamp_scroll(lines.len(), area, scroll_offset);
    let items: Vec<ListItem> = lines
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|line| ListItem::new(outline_line(line)))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
