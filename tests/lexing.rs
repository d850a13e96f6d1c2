//! Classification and merge passes, driven through the public API.

use rstest::rstest;
use tokenforge::forge::lexing::{classify, tokenize};
use tokenforge::forge::token::{detokenize, Token, TokenKind};
use tokenforge::forge::transforms::merge::{merge, merge_all};
use tokenforge::forge::transforms::standard::{LEXING, STANDARD_MERGE_ORDER};

fn lex(source: &str) -> Vec<Token> {
    merge_all(tokenize(source), STANDARD_MERGE_ORDER)
}

fn significant(tokens: &[Token]) -> Vec<(TokenKind, String)> {
    tokens
        .iter()
        .filter(|t| !t.kind().is_whitespace())
        .map(|t| (t.kind(), t.text().into_owned()))
        .collect()
}

#[rstest]
#[case('(', TokenKind::LeftParenthesis)]
#[case(']', TokenKind::RightSquareBracket)]
#[case('|', TokenKind::Pipe)]
#[case('"', TokenKind::DoubleQuote)]
#[case('\\', TokenKind::Backslash)]
#[case('\r', TokenKind::CarriageReturn)]
#[case('\n', TokenKind::LineFeed)]
#[case(' ', TokenKind::Space)]
#[case('\t', TokenKind::Char)]
#[case('7', TokenKind::Char)]
#[case('z', TokenKind::Char)]
#[case('λ', TokenKind::Char)]
fn test_classification_table(#[case] c: char, #[case] expected: TokenKind) {
    assert_eq!(classify(c), expected);
}

#[rstest]
#[case("3.25", TokenKind::Number)]
#[case("6.02e23", TokenKind::Number)]
#[case("speed_2", TokenKind::Word)]
#[case("\"a b\"", TokenKind::Text)]
#[case("# note", TokenKind::Comment)]
#[case("a::b::c", TokenKind::NamespacePath)]
#[case("loop", TokenKind::LoopKeyword)]
#[case("over", TokenKind::BindingKeyword)]
#[case("==", TokenKind::Equality)]
#[case("!=", TokenKind::Inequality)]
#[case("<=", TokenKind::LessOrEqual)]
#[case(">=", TokenKind::GreaterOrEqual)]
#[case("->", TokenKind::Arrow)]
#[case("..", TokenKind::Range)]
#[case("<|", TokenKind::TensorOpen)]
#[case("|>", TokenKind::TensorClose)]
#[case("||", TokenKind::NormDelimiter)]
#[case("  \t", TokenKind::Spaces)]
#[case("\r\n", TokenKind::NewLine)]
fn test_standard_order_produces_one_token(#[case] source: &str, #[case] expected: TokenKind) {
    let tokens = lex(source);
    assert_eq!(tokens.len(), 1, "{:?}", tokens);
    assert_eq!(tokens[0].kind(), expected);
    assert_eq!(tokens[0].text(), source);
}

#[test]
fn test_expression_lexes_into_expected_tokens() {
    let tokens = lex("rate = 1.5e3 * Units::Metre # per second\n");
    assert_eq!(
        significant(&tokens),
        vec![
            (TokenKind::Word, "rate".to_string()),
            (TokenKind::Equal, "=".to_string()),
            (TokenKind::Number, "1.5e3".to_string()),
            (TokenKind::Asterisk, "*".to_string()),
            (TokenKind::NamespacePath, "Units::Metre".to_string()),
            (TokenKind::Comment, "# per second".to_string()),
        ]
    );
}

#[test]
fn test_comment_contents_are_opaque() {
    let tokens = lex("x # f(a) \"b\"\ny");
    let comment = tokens
        .iter()
        .find(|t| t.kind() == TokenKind::Comment)
        .unwrap();
    assert_eq!(comment.text(), "# f(a) \"b\"");
    assert!(!comment.contains_kind(TokenKind::Word));
    assert_eq!(tokens.last().unwrap().text(), "y");
}

#[test]
fn test_escape_merged_before_text_keeps_string_open() {
    let source = r#""\"quoted\" text""#;
    let tokens = merge_all(
        tokenize(source),
        &[TokenKind::EscapeSequence, TokenKind::Text],
    );
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind(), TokenKind::Text);
    assert_eq!(tokens[0].text(), source);
    assert!(tokens[0].contains_kind(TokenKind::EscapeSequence));
}

#[test]
fn test_text_merged_before_escape_closes_string_early() {
    let source = r#""\"quoted\" text""#;
    let tokens = merge_all(
        tokenize(source),
        &[TokenKind::Text, TokenKind::EscapeSequence],
    );
    assert!(tokens.len() > 1);
    assert_eq!(tokens[0].kind(), TokenKind::Text);
    assert_eq!(tokens[0].text(), r#""\""#);
}

#[test]
fn test_standard_order_pins_escape_before_text() {
    let escape = STANDARD_MERGE_ORDER
        .iter()
        .position(|&k| k == TokenKind::EscapeSequence)
        .unwrap();
    let text = STANDARD_MERGE_ORDER
        .iter()
        .position(|&k| k == TokenKind::Text)
        .unwrap();
    assert!(escape < text);
}

#[test]
fn test_norm_delimiter_wins_over_bars() {
    let tokens = lex("||v|| + |w|");
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind()).collect();
    assert_eq!(kinds[0], TokenKind::NormDelimiter);
    assert_eq!(kinds[2], TokenKind::NormDelimiter);
    assert_eq!(
        kinds.iter().filter(|&&k| k == TokenKind::Pipe).count(),
        2
    );
}

#[test]
fn test_merge_only_touches_top_level() {
    let tokens = merge(lex("\"12\" 34"), TokenKind::Number);
    assert!(!tokens[0].contains_kind(TokenKind::Number));
    assert_eq!(tokens.last().unwrap().kind(), TokenKind::Number);
}

#[test]
fn test_lexing_pipeline_matches_merge_all() {
    let source = "f(x) = x^2 -> y";
    let root = LEXING.run(source.to_string()).unwrap();
    assert_eq!(root.children(), lex(source).as_slice());
    assert_eq!(detokenize(root.children()), source);
}
