//! Source pane rendering with syntax highlighting
//!
//! Highlighting is a per-line word scan, not the real lexer, so it still
//! works on input the lexer rejects. The line holding the first compile
//! error is drawn on a red background.

use super::{clamp_scroll, pane_block};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn highlight_source_code(line: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        // Quoted words
        if c == '\'' {
            let mut end = i + 1;
            while end < chars.len() && chars[end].is_ascii_alphabetic() {
                end += 1;
            }
            if end < chars.len() && chars[end] == '\'' {
                end += 1;
            }
            spans.push(Span::styled(
                chars[i..end].iter().collect::<String>(),
                Style::default().fg(DEFAULT_THEME.string),
            ));
            i = end;
            continue;
        }

        if c.is_ascii_alphanumeric() {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '.') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let style = get_word_style(&word);
            spans.push(Span::styled(word, style));
            continue;
        }

        let style = match c {
            '(' | ')' => Style::default().fg(DEFAULT_THEME.primary),
            '+' | '-' | '*' | '/' | '=' => Style::default().fg(DEFAULT_THEME.secondary),
            ';' => Style::default().fg(DEFAULT_THEME.fg),
            c if c.is_whitespace() => Style::default(),
            _ => Style::default().fg(DEFAULT_THEME.error), // Nothing lexes this
        };
        spans.push(Span::styled(c.to_string(), style));
        i += 1;
    }

    Line::from(spans)
}

fn get_word_style(word: &str) -> Style {
    if word.starts_with(|c: char| c.is_ascii_digit()) {
        return Style::default().fg(DEFAULT_THEME.number);
    }
    match word {
        "int" | "float" | "char" => Style::default()
            .fg(DEFAULT_THEME.type_name)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Render the source code pane
///
/// `error_line` is the 1-based line of the compile error, if any.
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    error_line: Option<usize>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Source Code ".to_string(), is_focused);

    let lines: Vec<&str> = source_code.lines().collect();
    let visible_height = clamp_scroll(lines.len(), area, scroll_offset);

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_error = error_line == Some(line_num);
            let line_num_str = format!("{:4} ", line_num);

            let mut content_line = highlight_source_code(line);

            let num_style = if is_error {
                // White text on red for visibility
                let error_style = Style::default()
                    .bg(DEFAULT_THEME.error)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD);
                for span in &mut content_line.spans {
                    span.style = error_style;
                }
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut final_spans = vec![Span::styled(line_num_str, num_style)];
            final_spans.extend(content_line.spans);
            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(line: &Line) -> Vec<String> {
        line.spans
            .iter()
            .map(|s| s.content.to_string())
            .filter(|s| !s.trim().is_empty())
            .collect()
    }

    #[test]
    fn test_highlight_splits_words() {
        let line = highlight_source_code("float y = 'ab' * 2.5;");
        assert_eq!(words(&line), ["float", "y", "=", "'ab'", "*", "2.5", ";"]);
    }

    #[test]
    fn test_type_keywords_styled() {
        let line = highlight_source_code("int x;");
        assert_eq!(line.spans[0].style.fg, Some(DEFAULT_THEME.type_name));
        assert_eq!(line.spans[2].style.fg, Some(DEFAULT_THEME.fg));
    }
}
