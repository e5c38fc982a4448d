//! Bracket balance checking with a step-by-step stack trace
//!
//! Independent of the conversion pipeline. Checks `()`, `[]` and `{}`
//! pairs and records what the stack did at every character, stopping at
//! the first error.

use std::fmt;

/// What the checker did with one character
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceAction {
    /// An opening symbol was pushed
    Push,
    /// A closing symbol matched and popped its opener
    Pop {
        /// The opener that was popped
        opening: char,
    },
    /// Not a bracket
    Ignore,
    /// A closing symbol arrived with an empty stack
    UnexpectedClose,
    /// A closing symbol did not match the opener on top of the stack
    Mismatch {
        /// The opener the closing symbol needed
        expected: char,
        /// The opener actually on top
        found: char,
    },
    /// Input ended with openers still on the stack
    Unclosed {
        /// The openers left over, bottom first
        remaining: Vec<char>,
    },
}

impl BalanceAction {
    /// Whether this action ends the check with a failure
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            BalanceAction::UnexpectedClose
                | BalanceAction::Mismatch { .. }
                | BalanceAction::Unclosed { .. }
        )
    }
}

impl fmt::Display for BalanceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceAction::Push => write!(f, "push opening symbol"),
            BalanceAction::Pop { opening } => write!(f, "pop `{}`", opening),
            BalanceAction::Ignore => write!(f, "ignore"),
            BalanceAction::UnexpectedClose => {
                write!(f, "error: closing symbol without an opening symbol")
            }
            BalanceAction::Mismatch { expected, found } => {
                write!(f, "error: expected `{}` on the stack, found `{}`", expected, found)
            }
            BalanceAction::Unclosed { remaining } => {
                let remaining: String = remaining.iter().collect();
                write!(f, "error: unclosed symbols `{}`", remaining)
            }
        }
    }
}

/// One row of the stack trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceStep {
    /// Char offset in the expression; equals its length for the final check
    pub position: usize,
    /// The character examined, `None` for the end-of-input check
    pub character: Option<char>,
    /// What happened
    pub action: BalanceAction,
    /// Stack contents before the step, bottom first
    pub stack_before: Vec<char>,
    /// Stack contents after the step, bottom first
    pub stack_after: Vec<char>,
}

/// Outcome of a balance check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceReport {
    /// Whether every opener was closed by its matching symbol
    pub balanced: bool,
    /// The full trace
    pub steps: Vec<BalanceStep>,
}

fn opener_for(close: char) -> Option<char> {
    match close {
        ')' => Some('('),
        ']' => Some('['),
        '}' => Some('{'),
        _ => None,
    }
}

fn is_opener(c: char) -> bool {
    matches!(c, '(' | '[' | '{')
}

/// Check an expression and record every stack operation
pub fn check_balance(expression: &str) -> BalanceReport {
    let mut stack: Vec<char> = Vec::new();
    let mut steps = Vec::new();
    let mut length = 0;

    for (position, c) in expression.chars().enumerate() {
        length = position + 1;
        let stack_before = stack.clone();

        let action = if is_opener(c) {
            stack.push(c);
            BalanceAction::Push
        } else if let Some(expected) = opener_for(c) {
            match stack.pop() {
                None => BalanceAction::UnexpectedClose,
                Some(top) if top == expected => BalanceAction::Pop { opening: top },
                Some(found) => BalanceAction::Mismatch { expected, found },
            }
        } else {
            BalanceAction::Ignore
        };

        let failed = action.is_error();
        steps.push(BalanceStep {
            position,
            character: Some(c),
            action,
            stack_before,
            stack_after: stack.clone(),
        });
        if failed {
            return BalanceReport {
                balanced: false,
                steps,
            };
        }
    }

    if !stack.is_empty() {
        steps.push(BalanceStep {
            position: length,
            character: None,
            action: BalanceAction::Unclosed {
                remaining: stack.clone(),
            },
            stack_before: stack,
            stack_after: Vec::new(),
        });
        return BalanceReport {
            balanced: false,
            steps,
        };
    }

    BalanceReport {
        balanced: true,
        steps,
    }
}
