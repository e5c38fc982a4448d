//! Shunting-Yard conversion from infix to postfix
//!
//! Works directly on the token sequence produced by the lexer and the
//! concatenation pass. Operands go straight to the output; operators wait
//! on a stack until something of lower or equal precedence arrives.
//!
//! Unbalanced parentheses are recovered rather than rejected:
//! - a `)` with no open group is dropped
//! - a `(` that is never closed is flushed to the output as-is
//!
//! Both cases are recorded as anomalies.

use crate::error::{Anomaly, AnomalyKind};
use crate::lexer::SpannedToken;
use crate::operator::Operator;

/// Output of one conversion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Postfix {
    /// Tokens in postfix order
    pub tokens: Vec<SpannedToken>,
    /// Parenthesis defects recovered during conversion
    pub anomalies: Vec<Anomaly>,
}

/// Operator-precedence converter
///
/// Holds the operator stack and output for a single conversion.
#[derive(Debug, Default)]
pub struct Converter {
    stack: Vec<SpannedToken>,
    output: Vec<SpannedToken>,
    anomalies: Vec<Anomaly>,
}

impl Converter {
    /// Create an empty converter
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one infix token
    pub fn push(&mut self, token: SpannedToken) {
        let op = match token.token.as_operator() {
            None => {
                self.output.push(token);
                return;
            }
            Some(op) => op,
        };

        match op {
            Operator::LeftParen => self.stack.push(token),
            Operator::RightParen => self.close_group(&token),
            _ => {
                while let Some(top) = self.stack.last() {
                    let top_op = match top.token.as_operator() {
                        Some(Operator::LeftParen) | None => break,
                        Some(top_op) => top_op,
                    };
                    // equal precedence pops: left associative
                    if top_op.precedence() < op.precedence() {
                        break;
                    }
                    self.pop_to_output();
                }
                self.stack.push(token);
            }
        }
    }

    fn close_group(&mut self, close: &SpannedToken) {
        loop {
            let top_is_open = match self.stack.last() {
                Some(top) => top.token.is(Operator::LeftParen),
                None => {
                    log::warn!("unmatched `)` at position {}, ignoring", close.span.start);
                    self.anomalies
                        .push(Anomaly::new(AnomalyKind::UnmatchedCloseParen, close.span));
                    return;
                }
            };
            if top_is_open {
                self.stack.pop();
                return;
            }
            self.pop_to_output();
        }
    }

    fn pop_to_output(&mut self) {
        if let Some(top) = self.stack.pop() {
            self.output.push(top);
        }
    }

    /// Flush the stack and return the postfix sequence
    pub fn finish(mut self) -> Postfix {
        while let Some(top) = self.stack.pop() {
            if top.token.is(Operator::LeftParen) {
                log::warn!(
                    "unmatched `(` at position {}, emitting it into the output",
                    top.span.start
                );
                self.anomalies
                    .push(Anomaly::new(AnomalyKind::UnmatchedOpenParen, top.span));
            }
            self.output.push(top);
        }

        Postfix {
            tokens: self.output,
            anomalies: self.anomalies,
        }
    }
}

/// Convert an infix token sequence (concatenation already explicit) to postfix
pub fn to_postfix<I>(tokens: I) -> Postfix
where
    I: IntoIterator<Item = SpannedToken>,
{
    let mut converter = Converter::new();
    for token in tokens {
        converter.push(token);
    }
    converter.finish()
}
