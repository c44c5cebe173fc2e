//! Lexer (tokenizer) for the expression language
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//!
//! At every scan position the lexer tries a fixed, ordered list of shape
//! matchers and takes the first one that matches:
//!
//! 1. a `TYPE` keyword prefix (`int`, `float`, `char`), even when more letters
//!    follow, so `integer` lexes as `int` followed by `eger`
//! 2. an unsigned float, `digits '.' digits`
//! 3. an identifier, `[a-zA-Z]+`
//! 4. an unsigned integer, `digits`
//! 5. a quoted word, `'[a-zA-Z]+'`
//! 6. one of the symbols `+ - * / ; = ( )`
//!
//! A number followed by a `.` without a digit after it is lexed as an integer
//! and the dot is left behind, where nothing matches it.

use crate::errors::CompileError;
use crate::parser::ast::SourceLocation;
use log::trace;
use std::fmt;

/// Token categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Type,
    Integer,
    Float,
    Char,
    Variable,
    Operator,
    Assign,
    Semicolon,
    Parenthesis,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Type => "TYPE",
            TokenKind::Integer => "INTEGER",
            TokenKind::Float => "FLOAT",
            TokenKind::Char => "CHAR",
            TokenKind::Variable => "VARIABLE",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Parenthesis => "PARENTHESIS",
        }
    }

    /// Kinds that can stand alone as a term.
    pub fn is_term(self) -> bool {
        matches!(
            self,
            TokenKind::Integer | TokenKind::Float | TokenKind::Char | TokenKind::Variable
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Token payload: literal text, or the parsed number
///
/// `INTEGER` tokens too wide for `i64` carry their digits as `Text`.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Text(s) => f.write_str(s),
            TokenValue::Integer(n) => write!(f, "{n}"),
            TokenValue::Float(x) => write!(f, "{x:?}"),
        }
    }
}

/// A lexical unit.
///
/// Equality compares `kind` and `value` only; the location is carried for
/// diagnostics.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    pub location: SourceLocation,
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.value == other.value
    }
}

impl Token {
    pub fn new(kind: TokenKind, value: TokenValue, location: SourceLocation) -> Self {
        Self {
            kind,
            value,
            location,
        }
    }

    /// Text payload, for every kind except numeric literals.
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_paren(&self, paren: char) -> bool {
        self.kind == TokenKind::Parenthesis
            && self.text().is_some_and(|t| t.len() == 1 && t.starts_with(paren))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.value)
    }
}

/// Token shapes, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Keyword,
    Float,
    Identifier,
    Integer,
    Quoted,
    Symbol,
}

type Matcher = fn(&[char]) -> Option<usize>;

const SHAPES: [(Shape, Matcher); 6] = [
    (Shape::Keyword, match_keyword),
    (Shape::Float, match_float),
    (Shape::Identifier, match_identifier),
    (Shape::Integer, match_integer),
    (Shape::Quoted, match_quoted),
    (Shape::Symbol, match_symbol),
];

const KEYWORDS: [&str; 3] = ["int", "float", "char"];
const SYMBOLS: [char; 8] = ['+', '-', '*', '/', ';', '=', '(', ')'];

fn count_while(rest: &[char], pred: impl Fn(char) -> bool) -> usize {
    rest.iter().take_while(|c| pred(**c)).count()
}

fn match_keyword(rest: &[char]) -> Option<usize> {
    KEYWORDS.iter().find_map(|kw| {
        let len = kw.chars().count();
        let prefix = rest.len() >= len && rest.iter().zip(kw.chars()).all(|(a, b)| *a == b);
        prefix.then_some(len)
    })
}

fn match_float(rest: &[char]) -> Option<usize> {
    let whole = count_while(rest, |c| c.is_ascii_digit());
    if whole == 0 || rest.get(whole) != Some(&'.') {
        return None;
    }
    let frac = count_while(&rest[whole + 1..], |c| c.is_ascii_digit());
    (frac > 0).then_some(whole + 1 + frac)
}

fn match_identifier(rest: &[char]) -> Option<usize> {
    let len = count_while(rest, |c| c.is_ascii_alphabetic());
    (len > 0).then_some(len)
}

fn match_integer(rest: &[char]) -> Option<usize> {
    let len = count_while(rest, |c| c.is_ascii_digit());
    (len > 0).then_some(len)
}

fn match_quoted(rest: &[char]) -> Option<usize> {
    if rest.first() != Some(&'\'') {
        return None;
    }
    let word = count_while(&rest[1..], |c| c.is_ascii_alphabetic());
    (word > 0 && rest.get(word + 1) == Some(&'\'')).then_some(word + 2)
}

fn match_symbol(rest: &[char]) -> Option<usize> {
    rest.first().filter(|c| SYMBOLS.contains(*c)).map(|_| 1)
}

/// Lexer for the expression language
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, CompileError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                break;
            }

            let token = self.next_token()?;
            trace!("lexed {} at {}", token, token.location);
            tokens.push(token);
        }

        Ok(tokens)
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, CompileError> {
        let loc = self.current_location();
        let rest = &self.input[self.position..];

        let Some((shape, len)) = SHAPES
            .iter()
            .find_map(|(shape, matcher)| matcher(rest).map(|len| (*shape, len)))
        else {
            return Err(CompileError::Lexical {
                message: format!("Unexpected character: '{}'", rest[0]),
                location: loc,
            });
        };

        let text: String = rest[..len].iter().collect();
        let (kind, value) = classify(shape, text, loc)?;

        for _ in 0..len {
            self.advance();
        }

        Ok(Token::new(kind, value, loc))
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

fn classify(
    shape: Shape,
    text: String,
    loc: SourceLocation,
) -> Result<(TokenKind, TokenValue), CompileError> {
    let classified = match shape {
        Shape::Keyword => (TokenKind::Type, TokenValue::Text(text)),
        Shape::Identifier => (TokenKind::Variable, TokenValue::Text(text)),
        Shape::Float => {
            let value = text.parse::<f64>().map_err(|_| CompileError::Lexical {
                message: format!("Invalid float literal: {text}"),
                location: loc,
            })?;
            (TokenKind::Float, TokenValue::Float(value))
        }
        // Digits beyond i64 keep their text; typing only needs the kind
        Shape::Integer => match text.parse::<i64>() {
            Ok(value) => (TokenKind::Integer, TokenValue::Integer(value)),
            Err(_) => (TokenKind::Integer, TokenValue::Text(text)),
        },
        Shape::Quoted => {
            let inner = text.trim_matches('\'').to_string();
            (TokenKind::Char, TokenValue::Text(inner))
        }
        Shape::Symbol => {
            let kind = match text.as_str() {
                "=" => TokenKind::Assign,
                ";" => TokenKind::Semicolon,
                "(" | ")" => TokenKind::Parenthesis,
                _ => TokenKind::Operator,
            };
            (kind, TokenValue::Text(text))
        }
    };
    Ok(classified)
}

/// Tokenize `source` in one call.
pub fn tokenize(source: &str) -> Result<Vec<Token>, CompileError> {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn tok(kind: TokenKind, text: &str) -> Token {
        Token::new(kind, TokenValue::Text(text.to_string()), SourceLocation::default())
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_declaration() {
        let tokens = tokenize("int x = 5;").unwrap();
        let expected = vec![
            tok(TokenKind::Type, "int"),
            tok(TokenKind::Variable, "x"),
            tok(TokenKind::Assign, "="),
            Token::new(TokenKind::Integer, TokenValue::Integer(5), SourceLocation::default()),
            tok(TokenKind::Semicolon, ";"),
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_locations() {
        let tokens = tokenize("int a;\n  a = 2;").unwrap();
        assert_eq!(tokens[0].location, SourceLocation::new(1, 1));
        assert_eq!(tokens[1].location, SourceLocation::new(1, 5));
        assert_eq!(tokens[3].location, SourceLocation::new(2, 3));
        assert_eq!(tokens[5].location, SourceLocation::new(2, 7));
    }

    #[test]
    fn test_float_and_char_literals() {
        let tokens = tokenize("3.25 'hi' ( )").unwrap();
        assert_eq!(tokens[0].value, TokenValue::Float(3.25));
        assert_eq!(tokens[1], tok(TokenKind::Char, "hi"));
        assert!(tokens[2].is_paren('('));
        assert!(tokens[3].is_paren(')'));
    }

    #[test]
    fn test_keyword_prefix_wins() {
        let tokens = tokenize("integer").unwrap();
        assert_eq!(tokens, vec![tok(TokenKind::Type, "int"), tok(TokenKind::Variable, "eger")]);

        // Keyword only counts at the start of the candidate
        assert_eq!(kinds("print"), vec![TokenKind::Variable]);
    }

    #[test]
    fn test_operators_need_no_spaces() {
        assert_eq!(
            kinds("a+b*(c-1)/2"),
            vec![
                TokenKind::Variable,
                TokenKind::Operator,
                TokenKind::Variable,
                TokenKind::Operator,
                TokenKind::Parenthesis,
                TokenKind::Variable,
                TokenKind::Operator,
                TokenKind::Integer,
                TokenKind::Parenthesis,
                TokenKind::Operator,
                TokenKind::Integer,
            ]
        );
    }

    #[test]
    fn test_trailing_dot_not_consumed() {
        let err = tokenize("x = 12.;").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lexical);
        assert_eq!(err.location(), SourceLocation::new(1, 7));
    }

    #[test]
    fn test_digits_then_letters_split() {
        let tokens = tokenize("12ab").unwrap();
        assert_eq!(tokens[0].value, TokenValue::Integer(12));
        assert_eq!(tokens[1], tok(TokenKind::Variable, "ab"));
    }

    #[test]
    fn test_invalid_characters() {
        for source in ["x = $;", "char c = 'a;", "a_b", "x = ''"] {
            let err = tokenize(source).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Lexical, "source: {source}");
        }
    }

    #[test]
    fn test_wide_integer_keeps_digits() {
        let tokens = tokenize("99999999999999999999;").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Integer);
        assert_eq!(
            tokens[0].value,
            TokenValue::Text("99999999999999999999".to_string())
        );
        assert_eq!(tokens[0].to_string(), "INTEGER(99999999999999999999)");
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize(" \n\t ").unwrap().is_empty());
    }
}
