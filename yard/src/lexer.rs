//! Lexer for tokenizing infix regex patterns
//!
//! This module turns a cleaned pattern (spaces already stripped) into a
//! stream of atomic tokens. Character classes and repetition counts are
//! kept whole as single operands, so later stages never look inside them.

use std::fmt;

use crate::error::{Anomaly, AnomalyKind, Span};
use crate::operator::{ALT_STAR, Operator};

/// Escapes that keep their backslash (`\d`, `\w`, ...)
pub const SHORTHAND_ESCAPES: [char; 6] = ['n', 't', 'r', 's', 'd', 'w'];

/// Metacharacters that lose their backslash when escaped (`\(` lexes as `(`)
pub const ESCAPABLE_METACHARS: [char; 12] =
    ['(', ')', '{', '}', '[', ']', '+', '*', '?', '|', '^', '.'];

/// A token in a regex pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A literal character, including an escaped metacharacter
    Literal(char),
    /// A shorthand escape such as `\d`, stored without the backslash
    Shorthand(char),
    /// Any other escape pair such as `\x`, stored without the backslash
    Escape(char),
    /// A bracketed character class, brackets included (`[a-z]`)
    Class(String),
    /// A brace repetition count, braces included (`{2,3}`)
    Repetition(String),
    /// An operator from the fixed alphabet
    Operator(Operator),
}

impl Token {
    /// Whether the token is an operand (anything but an operator)
    pub fn is_operand(&self) -> bool {
        !matches!(self, Token::Operator(_))
    }

    /// The operator this token carries, if any
    pub fn as_operator(&self) -> Option<Operator> {
        match self {
            Token::Operator(op) => Some(*op),
            _ => None,
        }
    }

    /// Check for one specific operator
    pub fn is(&self, op: Operator) -> bool {
        self.as_operator() == Some(op)
    }

    /// Short category name for reports
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Literal(_) => "literal",
            Token::Shorthand(_) => "shorthand",
            Token::Escape(_) => "escape",
            Token::Class(_) => "class",
            Token::Repetition(_) => "repetition",
            Token::Operator(_) => "operator",
        }
    }

    /// Whether a concatenation marker must not be placed before this token
    pub(crate) fn blocks_concat_before(&self) -> bool {
        match self {
            Token::Operator(op) => *op == Operator::RightParen || op.suppresses_concat(),
            Token::Literal(c) => *c == ALT_STAR,
            _ => false,
        }
    }

    /// Whether a concatenation marker must not be placed after this token
    pub(crate) fn blocks_concat_after(&self) -> bool {
        match self {
            Token::Operator(op) => *op == Operator::LeftParen || op.is_binary(),
            _ => false,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(c) => write!(f, "{}", c),
            Token::Shorthand(c) | Token::Escape(c) => write!(f, "\\{}", c),
            Token::Class(text) | Token::Repetition(text) => f.write_str(text),
            Token::Operator(op) => write!(f, "{}", op),
        }
    }
}

/// A token together with the span it covers in the cleaned pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedToken {
    /// The token itself
    pub token: Token,
    /// Char offsets in the cleaned pattern; empty for synthetic tokens
    pub span: Span,
}

impl SpannedToken {
    /// Create a new spanned token
    pub fn new(token: Token, span: Span) -> Self {
        SpannedToken { token, span }
    }

    /// Whether the token was inserted rather than read from the input
    pub fn is_synthetic(&self) -> bool {
        self.span.is_empty()
    }
}

impl fmt::Display for SpannedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.token.fmt(f)
    }
}

/// Lexer for tokenizing regex patterns
pub struct Lexer {
    chars: Vec<char>,
    position: usize,
    anomalies: Vec<Anomaly>,
}

impl Lexer {
    /// Create a new lexer for the given input string
    pub fn new(input: &str) -> Self {
        Lexer {
            chars: input.chars().collect(),
            position: 0,
            anomalies: Vec::new(),
        }
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position + 1).copied()
    }

    /// Read an escape pair (cursor on the backslash)
    fn read_escape(&mut self, next: char) -> Token {
        self.position += 2;
        if SHORTHAND_ESCAPES.contains(&next) {
            Token::Shorthand(next)
        } else if ESCAPABLE_METACHARS.contains(&next) {
            Token::Literal(next)
        } else {
            Token::Escape(next)
        }
    }

    /// Read a delimited group such as `[...]` or `{...}` (cursor on the opener).
    ///
    /// Without a closing delimiter only the opener is consumed, as a literal.
    fn read_group(&mut self, open: char, close: char) -> Token {
        let start = self.position;
        let closing = self.chars[start + 1..]
            .iter()
            .position(|&c| c == close)
            .map(|offset| start + 1 + offset);

        match closing {
            Some(end) => {
                let text: String = self.chars[start..=end].iter().collect();
                self.position = end + 1;
                if open == '[' {
                    Token::Class(text)
                } else {
                    Token::Repetition(text)
                }
            }
            None => {
                let kind = if open == '[' {
                    AnomalyKind::UnclosedClass
                } else {
                    AnomalyKind::UnclosedRepetition
                };
                log::warn!("{} at position {}, lexing `{}` as a literal", kind, start, open);
                self.anomalies.push(Anomaly::new(kind, Span::single(start)));
                self.position += 1;
                Token::Literal(open)
            }
        }
    }

    /// Get the next token from the input, or `None` at the end
    pub fn next_token(&mut self) -> Option<SpannedToken> {
        let start = self.position;
        let token = match self.current()? {
            '\\' => match self.peek() {
                Some(next) => self.read_escape(next),
                None => {
                    // trailing backslash
                    self.position += 1;
                    Token::Literal('\\')
                }
            },
            '[' => self.read_group('[', ']'),
            '{' => self.read_group('{', '}'),
            c => {
                self.position += 1;
                match Operator::from_char(c) {
                    Some(op) => Token::Operator(op),
                    None => Token::Literal(c),
                }
            }
        };
        Some(SpannedToken::new(token, Span::new(start, self.position)))
    }

    /// Tokenize the entire input and return a vector of tokens
    pub fn tokenize(&mut self) -> Vec<SpannedToken> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }

    /// Defects recovered so far
    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    /// Consume the lexer, keeping only the recovered defects
    pub fn into_anomalies(self) -> Vec<Anomaly> {
        self.anomalies
    }
}

impl Iterator for Lexer {
    type Item = SpannedToken;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Tokenize a cleaned pattern, dropping spans and anomalies
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).map(|spanned| spanned.token).collect()
}
