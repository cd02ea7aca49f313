#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur during tokenizing or parsing.
pub enum ParseError {
    /// Found a token that cannot start or continue the current construct.
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input while a construct was still open.
    UnexpectedEndOfInput {
        /// What the parser was looking for.
        expected: String,
    },
    /// A specific token was required but another one was found.
    Expected {
        /// Description of the expected construct.
        expected: String,
        /// The token that was found instead.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// The tokenizer met a character that starts no token.
    UnrecognizedCharacter {
        /// The offending character.
        ch:   char,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A fractional literal was written without its `f`, `d` or `m` suffix.
    MissingNumericSuffix {
        /// The literal text as written.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A string or character literal ran into the end of input.
    UnterminatedLiteral {
        /// `"string"` or `"character"`.
        kind: &'static str,
        /// The source line where the literal starts.
        line: usize,
    },
    /// A character literal that does not hold exactly one character.
    InvalidCharLiteral {
        /// The literal text as written.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A numeric literal does not fit its type.
    LiteralTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An array declaration whose literal size disagrees with its
    /// initializer list.
    ArraySizeMismatch {
        /// The declared size.
        size:  i64,
        /// The number of initializer elements.
        count: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A sizeless array declaration without an initializer list.
    MissingArrayInitializer {
        /// The declared name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The left side of an assignment is not a variable, element or field.
    InvalidAssignmentTarget {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Some other kind of parse error, with a custom message.
    Other {
        /// Details about the parse error.
        message: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token, line } => {
                write!(f, "Error on line {line}: Unexpected token: {token}.")
            },
            Self::UnexpectedEndOfInput { expected } => {
                write!(f, "Error: Unexpected end of input, expected {expected}.")
            },
            Self::Expected { expected,
                             found,
                             line, } => {
                write!(f, "Error on line {line}: Expected {expected}, found {found}.")
            },
            Self::UnrecognizedCharacter { ch, line } => {
                write!(f, "Error on line {line}: Unrecognized character '{ch}'.")
            },
            Self::MissingNumericSuffix { literal, line } => write!(f,
                                                                   "Error on line {line}: Fractional literal '{literal}' needs a type suffix (f, d or m)."),
            Self::UnterminatedLiteral { kind, line } => {
                write!(f, "Error on line {line}: Unterminated {kind} literal.")
            },
            Self::InvalidCharLiteral { literal, line } => write!(f,
                                                                 "Error on line {line}: Character literal '{literal}' must hold exactly one character."),
            Self::LiteralTooLarge { line } => {
                write!(f, "Error on line {line}: Literal is too large.")
            },
            Self::ArraySizeMismatch { size, count, line } => write!(f,
                                                                    "Error on line {line}: Array declared with size {size} but initialized with {count} elements."),
            Self::MissingArrayInitializer { name, line } => write!(f,
                                                                   "Error on line {line}: Array '{name}' needs either a size or an initializer list."),
            Self::InvalidAssignmentTarget { line } => {
                write!(f, "Error on line {line}: Invalid assignment target.")
            },
            Self::Other { message, line } => write!(f, "Error on line {line}: {message}"),
        }
    }
}

impl std::error::Error for ParseError {}
