//! Property tests for the conversion pipeline

use proptest::prelude::*;
use yard::{Operator, Options, Token, convert, convert_with, pipeline::infix_tokens};

/// Well-formed patterns with balanced parentheses
fn pattern() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        "[a-e]",
        Just(r"\d".to_string()),
        Just(r"\(".to_string()),
        Just("[xyz]".to_string()),
        Just("{2,3}".to_string()),
    ];

    leaf.prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{}{}", a, b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{}|{}", a, b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{}^{}", a, b)),
            (inner.clone(), prop::sample::select(vec!['*', '+', '?']))
                .prop_map(|(a, q)| format!("{}{}", a, q)),
            inner.prop_map(|a| format!("({})", a)),
        ]
    })
}

fn is_paren(token: &Token) -> bool {
    token.is(Operator::LeftParen) || token.is(Operator::RightParen)
}

/// Evaluate the postfix sequence with a depth counter; a well-formed
/// sequence reduces to exactly one value.
fn reduces_to_one(tokens: &[Token]) -> bool {
    let mut depth: usize = 0;
    for token in tokens {
        match token.as_operator() {
            None => depth += 1,
            Some(Operator::Star | Operator::Plus | Operator::Optional) => {
                if depth < 1 {
                    return false;
                }
            }
            Some(Operator::Alternation | Operator::Concat | Operator::Caret) => {
                if depth < 2 {
                    return false;
                }
                depth -= 1;
            }
            Some(Operator::LeftParen | Operator::RightParen) => return false,
        }
    }
    depth == 1
}

proptest! {
    #[test]
    fn operands_and_operators_are_preserved(input in pattern()) {
        let options = Options::default();
        let (infix, _) = infix_tokens(&input, &options);
        let conversion = convert_with(&input, &options).unwrap();
        let postfix: Vec<Token> = conversion.postfix().iter().map(|t| t.token.clone()).collect();

        let infix_operands = infix.iter().filter(|t| t.token.is_operand()).count();
        let postfix_operands = postfix.iter().filter(|t| t.is_operand()).count();
        prop_assert_eq!(infix_operands, postfix_operands);

        let infix_operators = infix
            .iter()
            .filter(|t| !t.token.is_operand() && !is_paren(&t.token))
            .count();
        let postfix_operators = postfix.iter().filter(|t| !t.is_operand()).count();
        prop_assert_eq!(infix_operators, postfix_operators);

        prop_assert!(!postfix.iter().any(is_paren));
    }

    #[test]
    fn balanced_patterns_convert_cleanly(input in pattern()) {
        let conversion = convert_with(&input, &Options::strict());
        prop_assert!(conversion.is_ok());
    }

    #[test]
    fn balanced_patterns_yield_valid_postfix(input in pattern()) {
        let conversion = convert_with(&input, &Options::default()).unwrap();
        let postfix: Vec<Token> = conversion.postfix().iter().map(|t| t.token.clone()).collect();
        prop_assert!(reduces_to_one(&postfix), "invalid postfix for {}: {}", input, conversion);
    }

    #[test]
    fn conversion_is_total(input in any::<String>()) {
        let _ = convert(&input);
    }

    #[test]
    fn conversion_is_total_on_metacharacters(input in r"[()\[\]{}|.?*+^\\ab]{0,24}") {
        let _ = convert(&input);
        let _ = convert_with(&input, &Options::strict());
    }
}
