//! Explicit concatenation insertion
//!
//! Juxtaposition means concatenation in a regex, but the Shunting-Yard
//! converter only understands explicit operators. This pass puts a `.`
//! between every pair of adjacent tokens that needs one.

use crate::error::Span;
use crate::lexer::{SpannedToken, Token};
use crate::operator::Operator;

/// Insert concatenation markers into a token sequence.
///
/// A marker goes between `left` and `right` unless `left` is `(` or a
/// binary operator, or `right` is `)` or an operator that binds to what
/// precedes it. Markers get an empty span at the end of `left`.
pub fn insert_concatenation(tokens: Vec<SpannedToken>) -> Vec<SpannedToken> {
    let mut result = Vec::with_capacity(tokens.len() * 2);
    let mut iter = tokens.into_iter().peekable();

    while let Some(token) = iter.next() {
        let needs_marker = iter
            .peek()
            .is_some_and(|next| needs_concatenation(&token.token, &next.token));
        let end = token.span.end;
        result.push(token);
        if needs_marker {
            result.push(SpannedToken::new(
                Token::Operator(Operator::Concat),
                Span::empty(end),
            ));
        }
    }

    result
}

/// Whether two adjacent tokens are joined by implicit concatenation
pub fn needs_concatenation(left: &Token, right: &Token) -> bool {
    !left.blocks_concat_after() && !right.blocks_concat_before()
}
