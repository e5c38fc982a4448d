//! Yard
//!
//! Converts infix regular expressions to postfix (Reverse Polish) notation
//! with the Shunting-Yard algorithm, ready for a downstream automaton
//! builder.

pub mod balance;
pub mod concat;
pub mod error;
pub mod lexer;
pub mod operator;
pub mod pipeline;
pub mod preprocess;
pub mod shunting_yard;

pub use balance::{BalanceAction, BalanceReport, BalanceStep, check_balance};
pub use concat::insert_concatenation;
pub use error::{Anomaly, AnomalyKind, Result, Span, YardError};
pub use lexer::{Lexer, SpannedToken, Token, tokenize};
pub use operator::{OPERATOR_ALPHABET, Operator, precedence};
pub use pipeline::{
    Conversion, ConversionReport, Mode, Options, convert, convert_debug, convert_debug_with,
    convert_strict, convert_with, read_pattern, read_patterns,
};
pub use preprocess::preprocess;
pub use shunting_yard::{Converter, Postfix, to_postfix};
