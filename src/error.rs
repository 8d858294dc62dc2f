//! Error types for the minipascal interpreter

use thiserror::Error;

/// Interpreter errors
///
/// Every stage propagates its first failure straight to the caller; nothing in
/// the pipeline catches and continues.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Lex errors
    /// Character that starts no token
    ///
    /// **Triggered by:** Any character outside the language's character classes
    /// **Example:** `x := 1 # 2` (`#` is not a token)
    #[error("LexError: unexpected character '{ch}' at offset {offset}")]
    Lex {
        /// Offending character
        ch: char,
        /// Byte offset of the character in the source
        offset: usize,
    },

    /// Numeric literal that does not fit the host numeric type
    #[error("LexError: invalid number literal '{lexeme}' at offset {offset}")]
    InvalidNumber {
        /// Literal text as written
        lexeme: String,
        /// Byte offset where the literal starts
        offset: usize,
    },

    // Parse errors
    /// Current token does not match what the grammar requires
    ///
    /// **Triggered by:** Missing separators, misplaced keywords, bad factors
    /// **Example:** `BEGIN x := 1 END` (missing the final `.`)
    #[error("ParseError: expected {expected}, found {found} at offset {offset}")]
    UnexpectedToken {
        /// Expected token kind or production name
        expected: String,
        /// Rendering of the token actually found
        found: String,
        /// Byte offset where the offending token starts
        offset: usize,
    },

    /// Input nests deeper than the parser accepts
    ///
    /// **Triggered by:** Long runs of parentheses, unary signs or `BEGIN`
    /// blocks, or operator chains whose tree would exceed the limit
    /// **Example:** `((((...1...))))` more than `limit` levels deep
    #[error("ParseError: nesting deeper than {limit} levels at offset {offset}")]
    NestingTooDeep {
        /// Deepest nesting accepted
        limit: usize,
        /// Byte offset of the token that crossed the limit
        offset: usize,
    },

    // Eval errors
    /// Variable read before any assignment
    ///
    /// **Triggered by:** Referencing a name that has no scope entry
    /// **Example:** `x := y` when `y` was never assigned
    /// **Prevention:** Declarations do not initialize; assign before reading
    #[error("UndefinedVariableError: variable '{name}' is not defined")]
    UndefinedVariable {
        /// Variable name as written at the use site
        name: String,
    },

    /// Node kind an evaluator refuses to handle
    #[error("UnsupportedOperationError: {operation}")]
    UnsupportedOperation {
        /// What was attempted
        operation: String,
    },

    /// Division by zero
    ///
    /// **Triggered by:** `DIV` or `/` with a zero right operand
    #[error("ArithmeticError: division by zero")]
    DivisionByZero,

    /// Integer arithmetic left the range of the host integer type
    #[error("ArithmeticError: integer overflow in {op}")]
    Overflow {
        /// Operator that overflowed
        op: String,
    },

    /// Operand of the wrong numeric kind
    ///
    /// **Triggered by:** `DIV` with a real operand
    #[error("ArithmeticError: {op} expects {expected} operands, got {got}")]
    TypeMismatch {
        /// Operator name
        op: String,
        /// Expected operand kind
        expected: String,
        /// Actual operand kind
        got: String,
    },
}

/// Pipeline stage an error originates from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Raised by the lexer
    Lex,
    /// Raised by the parser
    Parse,
    /// Raised by an evaluator
    Eval,
}

impl Error {
    /// Create an unsupported-operation error with a message
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Error::UnsupportedOperation {
            operation: operation.into(),
        }
    }

    /// Classify the stage that raised this error
    pub fn stage(&self) -> Stage {
        match self {
            Error::Lex { .. } | Error::InvalidNumber { .. } => Stage::Lex,

            Error::UnexpectedToken { .. } | Error::NestingTooDeep { .. } => Stage::Parse,

            Error::UndefinedVariable { .. }
            | Error::UnsupportedOperation { .. }
            | Error::DivisionByZero
            | Error::Overflow { .. }
            | Error::TypeMismatch { .. } => Stage::Eval,
        }
    }
}

/// Result type for minipascal operations
pub type Result<T> = std::result::Result<T, Error>;
