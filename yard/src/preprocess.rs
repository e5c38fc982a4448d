//! Pattern preprocessing
//!
//! Runs before tokenization. It is currently an identity transform that
//! walks escape pairs as a unit; quantifier shorthands such as `+` and `?`
//! are left as they are.
// TODO: expand `x+` to `xx*` and `x?` to `(x|ε)` here once an ε token exists.

/// Preprocess a raw pattern.
pub fn preprocess(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        result.push(c);
        if c == '\\'
            && let Some(escaped) = chars.next()
        {
            result.push(escaped);
        }
    }

    result
}
