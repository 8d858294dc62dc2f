//! # Minipascal - a small Pascal dialect, interpreted
//!
//! Minipascal reads the source of a small Pascal-like language (blocks,
//! variable declarations, assignment, arithmetic) and evaluates it directly by
//! walking the syntax tree. There is no bytecode and no compile step.
//!
//! ## Quick Start
//!
//! ```rust
//! use minipascal::{Calculator, Lexer, Number, Parser};
//!
//! # fn main() -> minipascal::Result<()> {
//! let code = r#"
//!     PROGRAM Demo;
//!     VAR
//!        a, b : INTEGER;
//!        y    : REAL;
//!     BEGIN
//!        a := 2;
//!        b := 10 * a + 10 * a DIV 4;
//!        y := 20 / 7 + 3.14
//!     END.
//! "#;
//!
//! // Parse into AST (the parser pulls tokens from the lexer on demand)
//! let mut parser = Parser::new(Lexer::new(code))?;
//! let program = parser.parse_program()?;
//!
//! // Execute
//! let mut calculator = Calculator::new();
//! calculator.run(&program)?;
//!
//! assert_eq!(calculator.scope().get("b")?, Number::Int(25));
//! # Ok(())
//! # }
//! ```
//!
//! ## Language Variants
//!
//! Two variants are modelled, selected with [`Dialect`]:
//!
//! - **Typed** (default): `PROGRAM name; VAR ...; BEGIN ... END.`. Variable
//!   names are case-insensitive, so `a` and `A` are the same variable.
//! - **Untyped**: a bare `BEGIN ... END.` block with case-sensitive names.
//!
//! Declarations are purely syntactic. They never initialize a variable and the
//! declared type is not checked against assigned values.
//!
//! ## Architecture
//!
//! ```text
//! Source Code → Lexer → Token → Parser → AST → Calculator | RpnTranslator | LispTranslator
//! ```
//!
//! - [`Lexer`] - Produces one token per pull
//! - [`Parser`] - Recursive descent, one method per grammar production
//! - [`Visitor`] - Double dispatch over the closed set of AST nodes
//! - [`Calculator`] - Executes assignments into a [`Scope`]
//! - [`RpnTranslator`] / [`LispTranslator`] - Render expressions as text
//!
//! ## Notation Translators
//!
//! ```rust
//! # fn main() -> minipascal::Result<()> {
//! assert_eq!(minipascal::to_rpn("(1 + 2) * 3")?, "1 2 + 3 *");
//! assert_eq!(minipascal::to_lisp("(1 + 2) * 3")?, "(* (+ 1 2) 3)");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every stage stops at its first error and hands it to the caller:
//!
//! ```rust
//! use minipascal::{Dialect, Error};
//!
//! let err = minipascal::execute("BEGIN x := y END.", Dialect::Untyped).unwrap_err();
//! assert_eq!(err, Error::UndefinedVariable { name: "y".to_string() });
//! ```

/// Version of the minipascal interpreter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod runtime;

// Re-export main types
pub use config::Dialect;
pub use error::{Error, Result, Stage};
pub use lexer::{tokenize, Lexer, Token, TokenKind};
pub use parser::{
    BinaryOp, Block, Expression, Parser, Program, Statement, TypeSpec, UnaryOp, VarDecl, Visitor,
    MAX_NESTING_DEPTH,
};
pub use runtime::{Calculator, LispTranslator, NamePolicy, Number, RpnTranslator, Scope};

/// Parses a whole program in the given dialect
pub fn parse(source: &str, dialect: Dialect) -> Result<Program> {
    Parser::with_dialect(Lexer::new(source), dialect)?.parse_program()
}

/// Parses a bare arithmetic expression
pub fn parse_expression(source: &str) -> Result<Expression> {
    Parser::new(Lexer::new(source))?.parse_expression_only()
}

/// Parses and runs a program, returning the final variable scope
pub fn execute(source: &str, dialect: Dialect) -> Result<Scope> {
    let program = parse(source, dialect)?;
    let mut calculator = Calculator::with_dialect(dialect);
    calculator.run(&program)?;
    Ok(calculator.into_scope())
}

/// Renders an expression in reverse Polish notation
pub fn to_rpn(source: &str) -> Result<String> {
    RpnTranslator::new().translate(&parse_expression(source)?)
}

/// Renders an expression as a Lisp S-expression
pub fn to_lisp(source: &str) -> Result<String> {
    LispTranslator::new().translate(&parse_expression(source)?)
}
