use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use tessera::{
    error::ParseError,
    interpreter::lexer::{Token, tokenize},
};

fn kinds(source: &str) -> Vec<Token> {
    tokenize(source).unwrap_or_else(|e| panic!("failed to tokenize {source:?}: {e}"))
                    .into_iter()
                    .map(|(token, _)| token)
                    .collect()
}

#[test]
fn declaration_tokens() {
    assert_eq!(kinds("let x: int = 2 + 3;"),
               vec![Token::Let,
                    Token::Identifier("x".to_string()),
                    Token::Colon,
                    Token::Identifier("int".to_string()),
                    Token::Assign,
                    Token::IntLiteral(2),
                    Token::Plus,
                    Token::IntLiteral(3),
                    Token::Semicolon]);
}

#[test]
fn longest_operator_wins() {
    assert_eq!(kinds("a >>> b >> c >= d => e :: f"),
               vec![Token::Identifier("a".to_string()),
                    Token::UnsignedShiftRight,
                    Token::Identifier("b".to_string()),
                    Token::ShiftRight,
                    Token::Identifier("c".to_string()),
                    Token::GreaterEqual,
                    Token::Identifier("d".to_string()),
                    Token::FatArrow,
                    Token::Identifier("e".to_string()),
                    Token::ColonColon,
                    Token::Identifier("f".to_string())]);
}

#[test]
fn keywords_are_not_identifiers() {
    assert_eq!(kinds("class classy constructor"),
               vec![Token::Class,
                    Token::Identifier("classy".to_string()),
                    Token::Constructor]);
}

#[test]
fn suffixed_literals() {
    assert_eq!(kinds("1.5f 2.25d 3.10m 'x' true"),
               vec![Token::FloatLiteral(1.5),
                    Token::DoubleLiteral(2.25),
                    Token::DecimalLiteral(Decimal::new(310, 2)),
                    Token::CharLiteral('x'),
                    Token::BoolLiteral(true)]);
}

#[test]
fn string_escapes() {
    assert_eq!(kinds(r#""a\"b\n""#), vec![Token::StringLiteral("a\"b\n".to_string())]);
    assert_eq!(kinds(r"'\''"), vec![Token::CharLiteral('\'')]);
}

#[test]
fn comments_and_lines() {
    let tokens = tokenize("// header\nlet /* inline */ a: int;\n/* spans\ntwo lines */\nx").unwrap();
    let lines: Vec<usize> = tokens.iter().map(|(_, line)| *line).collect();
    assert_eq!(lines, vec![2, 2, 2, 2, 2, 5]);
    assert_eq!(tokens.last().map(|(token, _)| token.clone()),
               Some(Token::Identifier("x".to_string())));
}

#[test]
fn lexical_errors() {
    assert!(matches!(tokenize("let d: double = 1.5;"),
                     Err(ParseError::MissingNumericSuffix { ref literal, line: 1 }) if literal == "1.5"));
    assert!(matches!(tokenize("\n\"open"), Err(ParseError::UnterminatedLiteral { .. })));
    assert!(matches!(tokenize("'ab'"), Err(ParseError::InvalidCharLiteral { .. })));
    assert!(matches!(tokenize("let x: int = 99999999999999999999;"),
                     Err(ParseError::LiteralTooLarge { .. })));
    assert!(matches!(tokenize("x @ y"), Err(ParseError::UnrecognizedCharacter { ch: '@', .. })));
}
