use serde::{Deserialize, Serialize};
use std::fmt;

use crate::runtime::Number;

/// Complete minipascal program
///
/// Untyped programs have no name and no declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Name from the `PROGRAM` header
    pub name: Option<String>,
    /// Program body
    pub block: Block,
}

/// Declarations followed by the compound statement they precede
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Variable declarations from the `VAR` section
    pub declarations: Vec<VarDecl>,
    /// Body, always a `Statement::Compound`
    pub compound: Statement,
}

/// One `a, b, c : TYPE` declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDecl {
    /// Declared names in source order
    pub names: Vec<String>,
    /// Declared type
    pub type_spec: TypeSpec,
}

/// Declared variable type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeSpec {
    /// INTEGER
    Integer,
    /// REAL
    Real,
}

/// Statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// `BEGIN ... END` block, executed in order
    Compound(Vec<Statement>),

    /// Variable assignment: name := expr
    Assignment {
        /// Name of the variable to assign to
        name: String,
        /// Expression value to assign
        value: Expression,
    },

    /// Empty statement
    NoOp,
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Integer or real literal
    Number(Number),

    /// Variable reference expression
    Variable(String),

    /// Binary operation expression
    Binary {
        /// Binary operator to apply
        op: BinaryOp,
        /// Left operand expression
        left: Box<Expression>,
        /// Right operand expression
        right: Box<Expression>,
    },

    /// Unary operation expression
    Unary {
        /// Unary operator to apply
        op: UnaryOp,
        /// Operand expression
        operand: Box<Expression>,
    },
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    /// Addition operator (+)
    Add,
    /// Subtraction operator (-)
    Sub,
    /// Multiplication operator (*)
    Mul,
    /// Integer division (DIV)
    IntDiv,
    /// Real division (/)
    FloatDiv,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Identity operator (+x)
    Plus,
    /// Negation operator (-x)
    Minus,
}

/// Operation applied uniformly across every node variant
///
/// Every method is required: a new evaluation behaviour is a new visitor, and a
/// visitor that skips a variant does not compile.
pub trait Visitor {
    /// Result of visiting an expression node
    type Value;
    /// Result of visiting a statement node
    type Effect;

    /// Visit a numeric literal
    fn visit_number(&mut self, value: Number) -> Self::Value;
    /// Visit a variable reference
    fn visit_variable(&mut self, name: &str) -> Self::Value;
    /// Visit a binary operation
    fn visit_binary(&mut self, op: BinaryOp, left: &Expression, right: &Expression)
        -> Self::Value;
    /// Visit a unary operation
    fn visit_unary(&mut self, op: UnaryOp, operand: &Expression) -> Self::Value;
    /// Visit an empty statement
    fn visit_no_op(&mut self) -> Self::Effect;
    /// Visit an assignment
    fn visit_assignment(&mut self, name: &str, value: &Expression) -> Self::Effect;
    /// Visit a compound statement
    fn visit_compound(&mut self, statements: &[Statement]) -> Self::Effect;
}

impl Expression {
    /// Dispatch to the visitor method matching this variant
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Value {
        match self {
            Expression::Number(value) => visitor.visit_number(*value),
            Expression::Variable(name) => visitor.visit_variable(name),
            Expression::Binary { op, left, right } => visitor.visit_binary(*op, left, right),
            Expression::Unary { op, operand } => visitor.visit_unary(*op, operand),
        }
    }

    /// Builds a binary node
    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Self {
        Expression::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Builds a unary node
    pub fn unary(op: UnaryOp, operand: Expression) -> Self {
        Expression::Unary {
            op,
            operand: Box::new(operand),
        }
    }
}

impl Statement {
    /// Dispatch to the visitor method matching this variant
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Effect {
        match self {
            Statement::Compound(statements) => visitor.visit_compound(statements),
            Statement::Assignment { name, value } => visitor.visit_assignment(name, value),
            Statement::NoOp => visitor.visit_no_op(),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BinaryOp::Add => write!(f, "+"),
            BinaryOp::Sub => write!(f, "-"),
            BinaryOp::Mul => write!(f, "*"),
            BinaryOp::IntDiv => write!(f, "DIV"),
            BinaryOp::FloatDiv => write!(f, "/"),
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnaryOp::Plus => write!(f, "+"),
            UnaryOp::Minus => write!(f, "-"),
        }
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TypeSpec::Integer => write!(f, "INTEGER"),
            TypeSpec::Real => write!(f, "REAL"),
        }
    }
}
