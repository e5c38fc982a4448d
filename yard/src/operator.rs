//! Operator alphabet and precedence table
//!
//! The table is fixed: `(` binds loosest so it is never popped by an
//! operator comparison, postfix quantifiers share one level, and `^` sits
//! above everything else.

use std::fmt;

/// Every character the tokenizer classifies as an operator
pub const OPERATOR_ALPHABET: [char; 8] = ['(', ')', '|', '.', '?', '*', '+', '^'];

/// Alternate star glyph (U+2217). Lexed as an operand, but it still
/// suppresses concatenation in front of it.
pub const ALT_STAR: char = '\u{2217}';

/// An operator symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `|`
    Alternation,
    /// `.` (explicit or synthetic concatenation)
    Concat,
    /// `?`
    Optional,
    /// `*`
    Star,
    /// `+`
    Plus,
    /// `^`
    Caret,
}

impl Operator {
    /// Classify a character, returning `None` for operands
    pub fn from_char(c: char) -> Option<Operator> {
        match c {
            '(' => Some(Operator::LeftParen),
            ')' => Some(Operator::RightParen),
            '|' => Some(Operator::Alternation),
            '.' => Some(Operator::Concat),
            '?' => Some(Operator::Optional),
            '*' => Some(Operator::Star),
            '+' => Some(Operator::Plus),
            '^' => Some(Operator::Caret),
            _ => None,
        }
    }

    /// The source character for this operator
    pub fn as_char(self) -> char {
        match self {
            Operator::LeftParen => '(',
            Operator::RightParen => ')',
            Operator::Alternation => '|',
            Operator::Concat => '.',
            Operator::Optional => '?',
            Operator::Star => '*',
            Operator::Plus => '+',
            Operator::Caret => '^',
        }
    }

    /// Precedence used when comparing against the top of the operator stack.
    ///
    /// `)` is never pushed, so it has no level of its own.
    pub fn precedence(self) -> u8 {
        match self {
            Operator::LeftParen => 1,
            Operator::Alternation => 2,
            Operator::Concat => 3,
            Operator::Optional | Operator::Star | Operator::Plus => 4,
            Operator::Caret => 5,
            Operator::RightParen => 0,
        }
    }

    /// Operators that take an operand on each side
    pub fn is_binary(self) -> bool {
        matches!(self, Operator::Alternation | Operator::Caret)
    }

    /// Operators that never get a concatenation marker in front of them
    pub fn suppresses_concat(self) -> bool {
        matches!(
            self,
            Operator::Alternation
                | Operator::Optional
                | Operator::Star
                | Operator::Plus
                | Operator::Caret
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Look up the precedence of an arbitrary symbol.
///
/// Anything outside the table is an operand and gets `0`.
pub fn precedence(c: char) -> u8 {
    match Operator::from_char(c) {
        Some(Operator::RightParen) | None => 0,
        Some(op) => op.precedence(),
    }
}
