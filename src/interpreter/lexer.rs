use std::{fmt, str::FromStr};

use logos::Logos;
use rust_decimal::Decimal;

use crate::error::ParseError;

/// Failure reasons reported by the logos callbacks.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LexError {
    /// No token starts with the current character.
    #[default]
    UnrecognizedCharacter,
    /// A fractional literal such as `1.5` without `f`, `d` or `m`.
    MissingNumericSuffix,
    /// End of input inside a string literal.
    UnterminatedString,
    /// End of input inside a character literal.
    UnterminatedChar,
    /// A character literal holding zero or several characters.
    InvalidChar(String),
    /// A numeric literal that does not fit its type.
    LiteralTooLarge,
}

impl LexError {
    /// Attaches the offending source text and line to the error.
    fn into_parse_error(self, slice: &str, line: usize) -> ParseError {
        match self {
            Self::UnrecognizedCharacter => {
                ParseError::UnrecognizedCharacter { ch: slice.chars().next().unwrap_or('\0'),
                                                    line }
            },
            Self::MissingNumericSuffix => {
                ParseError::MissingNumericSuffix { literal: slice.to_string(),
                                                   line }
            },
            Self::UnterminatedString => ParseError::UnterminatedLiteral { kind: "string",
                                                                          line },
            Self::UnterminatedChar => ParseError::UnterminatedLiteral { kind: "character",
                                                                        line },
            Self::InvalidChar(literal) => ParseError::InvalidCharLiteral { literal, line },
            Self::LiteralTooLarge => ParseError::LiteralTooLarge { line },
        }
    }
}

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexError)]
pub enum Token {
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    IntLiteral(i64),
    /// `float` literal tokens, such as `1.5f`.
    #[regex(r"[0-9]+\.[0-9]+f", parse_suffixed::<f32>)]
    FloatLiteral(f32),
    /// `double` literal tokens, such as `1.5d`.
    #[regex(r"[0-9]+\.[0-9]+d", parse_suffixed::<f64>)]
    DoubleLiteral(f64),
    /// `decimal` literal tokens, such as `1.50m`.
    #[regex(r"[0-9]+\.[0-9]+m", parse_suffixed::<Decimal>)]
    DecimalLiteral(Decimal),
    /// A fractional literal without a type suffix. Always rejected.
    #[regex(r"[0-9]+\.[0-9]+", reject_unsuffixed)]
    UnsuffixedFractional,
    /// String literal tokens, such as `"hello"`.
    #[token("\"", lex_string)]
    StringLiteral(String),
    /// Character literal tokens, such as `'a'`.
    #[token("'", lex_char)]
    CharLiteral(char),
    /// Boolean literal tokens, such as `true`.
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    BoolLiteral(bool),

    /// `class`
    #[token("class")]
    Class,
    /// `let`
    #[token("let")]
    Let,
    /// `func`
    #[token("func")]
    Func,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `do`
    #[token("do")]
    Do,
    /// `for`
    #[token("for")]
    For,
    /// `break`
    #[token("break")]
    Break,
    /// `continue`
    #[token("continue")]
    Continue,
    /// `return`
    #[token("return")]
    Return,
    /// `public`
    #[token("public")]
    Public,
    /// `private`
    #[token("private")]
    Private,
    /// `new`
    #[token("new")]
    New,
    /// `this`
    #[token("this")]
    This,
    /// `constructor`
    #[token("constructor")]
    Constructor,
    /// `static`
    #[token("static")]
    Static,
    /// `virt`
    #[token("virt")]
    Virt,
    /// `ovrd`
    #[token("ovrd")]
    Ovrd,
    /// `include`
    #[token("include")]
    Include,
    /// `use`
    #[token("use")]
    Use,
    /// `throw`
    #[token("throw")]
    Throw,
    /// `try`
    #[token("try")]
    Try,
    /// `catch`
    #[token("catch")]
    Catch,
    /// `finally`
    #[token("finally")]
    Finally,
    /// `enum`
    #[token("enum")]
    Enum,
    /// `interface`
    #[token("interface")]
    Interface,
    /// `getter`
    #[token("getter")]
    Getter,
    /// `setter`
    #[token("setter")]
    Setter,
    /// `parent`
    #[token("parent")]
    Parent,
    /// `switch`
    #[token("switch")]
    Switch,
    /// `case`
    #[token("case")]
    Case,
    /// `default`
    #[token("default")]
    Default,
    /// `const`
    #[token("const")]
    Const,
    /// `is`
    #[token("is")]
    Is,

    /// Identifier tokens; variable, type or function names such as `x` or
    /// `int`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    OrOr,
    /// `+=`
    #[token("+=")]
    PlusAssign,
    /// `-=`
    #[token("-=")]
    MinusAssign,
    /// `*=`
    #[token("*=")]
    StarAssign,
    /// `/=`
    #[token("/=")]
    SlashAssign,
    /// `%=`
    #[token("%=")]
    PercentAssign,
    /// `++`
    #[token("++")]
    PlusPlus,
    /// `--`
    #[token("--")]
    MinusMinus,
    /// `=>`
    #[token("=>")]
    FatArrow,
    /// `::`
    #[token("::")]
    ColonColon,
    /// `<<`
    #[token("<<")]
    ShiftLeft,
    /// `>>`
    #[token(">>")]
    ShiftRight,
    /// `>>>`
    #[token(">>>")]
    UnsignedShiftRight,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `=`
    #[token("=")]
    Assign,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `!`
    #[token("!")]
    Bang,
    /// `?`
    #[token("?")]
    Question,
    /// `:`
    #[token(":")]
    Colon,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,

    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip, allow_greedy = true)]
    Comment,
    /// ```
    /// // Multi line comments.
    /// ```
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", |lex| {
        let comment      = lex.slice();
        let newlines     = comment.chars().filter(|&c| c == '\n').count();
        lex.extras.line += newlines;
        logos::Skip
    })]
    MultiLineComment,
    /// Line breaks only advance the line counter.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs, carriage returns and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Tokenizes `source` into `(token, line)` pairs.
///
/// A fresh lexer is built on every call; the lexer itself is a lazy,
/// single-pass iterator. Tokenizing stops at the first lexical error.
///
/// # Errors
/// Returns a `ParseError` naming the offending character or literal.
///
/// # Example
/// ```
/// use tessera::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("x += 1;").unwrap();
/// let kinds: Vec<Token> = tokens.into_iter().map(|(token, _)| token).collect();
///
/// assert_eq!(kinds,
///            vec![Token::Identifier("x".to_string()),
///                 Token::PlusAssign,
///                 Token::IntLiteral(1),
///                 Token::Semicolon]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        let line = lexer.extras.line;
        match token {
            Ok(tok) => tokens.push((tok, line)),
            Err(error) => return Err(error.into_parse_error(lexer.slice(), line)),
        }
    }

    Ok(tokens)
}

/// Parses an integer literal from the current token slice.
fn parse_integer(lex: &logos::Lexer<Token>) -> Result<i64, LexError> {
    lex.slice().parse().map_err(|_| LexError::LiteralTooLarge)
}

/// Parses a suffixed fractional literal, dropping its one-letter suffix.
fn parse_suffixed<T: FromStr>(lex: &logos::Lexer<Token>) -> Result<T, LexError> {
    let slice = lex.slice();
    slice[..slice.len() - 1].parse()
                            .map_err(|_| LexError::LiteralTooLarge)
}

/// Fractional literals must name their type.
fn reject_unsuffixed(_: &logos::Lexer<Token>) -> Result<(), LexError> {
    Err(LexError::MissingNumericSuffix)
}

/// Parses a boolean literal from the current token slice (`true` or `false`).
fn parse_bool(lex: &logos::Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Lexes the body of a string literal after its opening quote.
fn lex_string(lex: &mut logos::Lexer<Token>) -> Result<String, LexError> {
    let (text, consumed) =
        scan_quoted(lex.remainder(), '"').ok_or(LexError::UnterminatedString)?;
    lex.extras.line += lex.remainder()[..consumed].matches('\n').count();
    lex.bump(consumed);
    Ok(text)
}

/// Lexes the body of a character literal after its opening quote.
fn lex_char(lex: &mut logos::Lexer<Token>) -> Result<char, LexError> {
    let (text, consumed) = scan_quoted(lex.remainder(), '\'').ok_or(LexError::UnterminatedChar)?;
    lex.bump(consumed);

    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(LexError::InvalidChar(text)),
    }
}

/// Scans up to and including the closing `delimiter`, resolving backslash
/// escapes.
///
/// Returns the unescaped contents and the number of bytes consumed, or
/// `None` when input ends first.
fn scan_quoted(rest: &str, delimiter: char) -> Option<(String, usize)> {
    let mut text = String::new();
    let mut chars = rest.char_indices();

    while let Some((offset, ch)) = chars.next() {
        match ch {
            '\\' => {
                let (_, escaped) = chars.next()?;
                text.push(unescape(escaped));
            },
            c if c == delimiter => return Some((text, offset + c.len_utf8())),
            c => text.push(c),
        }
    }

    None
}

const fn unescape(ch: char) -> char {
    match ch {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        other => other,
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::IntLiteral(n) => return write!(f, "integer literal '{n}'"),
            Self::FloatLiteral(n) => return write!(f, "float literal '{n}f'"),
            Self::DoubleLiteral(n) => return write!(f, "double literal '{n}d'"),
            Self::DecimalLiteral(n) => return write!(f, "decimal literal '{n}m'"),
            Self::StringLiteral(s) => return write!(f, "string literal \"{s}\""),
            Self::CharLiteral(c) => return write!(f, "character literal '{c}'"),
            Self::BoolLiteral(b) => return write!(f, "'{b}'"),
            Self::Identifier(name) => return write!(f, "identifier '{name}'"),
            Self::UnsuffixedFractional => "fractional literal",
            Self::Class => "class",
            Self::Let => "let",
            Self::Func => "func",
            Self::If => "if",
            Self::Else => "else",
            Self::While => "while",
            Self::Do => "do",
            Self::For => "for",
            Self::Break => "break",
            Self::Continue => "continue",
            Self::Return => "return",
            Self::Public => "public",
            Self::Private => "private",
            Self::New => "new",
            Self::This => "this",
            Self::Constructor => "constructor",
            Self::Static => "static",
            Self::Virt => "virt",
            Self::Ovrd => "ovrd",
            Self::Include => "include",
            Self::Use => "use",
            Self::Throw => "throw",
            Self::Try => "try",
            Self::Catch => "catch",
            Self::Finally => "finally",
            Self::Enum => "enum",
            Self::Interface => "interface",
            Self::Getter => "getter",
            Self::Setter => "setter",
            Self::Parent => "parent",
            Self::Switch => "switch",
            Self::Case => "case",
            Self::Default => "default",
            Self::Const => "const",
            Self::Is => "is",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::AndAnd => "&&",
            Self::OrOr => "||",
            Self::PlusAssign => "+=",
            Self::MinusAssign => "-=",
            Self::StarAssign => "*=",
            Self::SlashAssign => "/=",
            Self::PercentAssign => "%=",
            Self::PlusPlus => "++",
            Self::MinusMinus => "--",
            Self::FatArrow => "=>",
            Self::ColonColon => "::",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::UnsignedShiftRight => ">>>",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Assign => "=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Bang => "!",
            Self::Question => "?",
            Self::Colon => ":",
            Self::Semicolon => ";",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Comment | Self::MultiLineComment => "comment",
            Self::NewLine => "newline",
            Self::Ignored => "whitespace",
        };
        write!(f, "'{text}'")
    }
}
