//! Minipascal parser module
//!
//! Builds abstract syntax trees from the token stream by recursive descent.

mod ast;
mod descent;

pub use ast::{
    BinaryOp, Block, Expression, Program, Statement, TypeSpec, UnaryOp, VarDecl, Visitor,
};
pub use descent::{Parser, MAX_NESTING_DEPTH};
