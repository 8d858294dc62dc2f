use crate::error::{Error, Result};
use crate::parser::{BinaryOp, Expression, Statement, UnaryOp, Visitor};
use crate::runtime::Number;

/// Operator token used by both notations
///
/// Both divisions render as `/`.
fn operator_token(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::IntDiv | BinaryOp::FloatDiv => "/",
    }
}

fn statement_rejected(node: &str) -> Error {
    Error::unsupported(format!("can't translate {} statement to notation", node))
}

/// Renders an expression in reverse Polish notation: `1 2 + 3 *`
#[derive(Debug, Default, Clone, Copy)]
pub struct RpnTranslator;

impl RpnTranslator {
    /// Creates a translator
    pub fn new() -> Self {
        RpnTranslator
    }

    /// Translates an expression; unary operators are rejected
    pub fn translate(&mut self, expr: &Expression) -> Result<String> {
        expr.accept(self)
    }
}

impl Visitor for RpnTranslator {
    type Value = Result<String>;
    type Effect = Result<String>;

    fn visit_number(&mut self, value: Number) -> Self::Value {
        Ok(value.to_string())
    }

    fn visit_variable(&mut self, name: &str) -> Self::Value {
        Ok(name.to_string())
    }

    fn visit_binary(&mut self, op: BinaryOp, left: &Expression, right: &Expression) -> Self::Value {
        let left = self.translate(left)?;
        let right = self.translate(right)?;
        Ok(format!("{} {} {}", left, right, operator_token(op)))
    }

    fn visit_unary(&mut self, op: UnaryOp, _operand: &Expression) -> Self::Value {
        Err(Error::unsupported(format!(
            "can't translate unary operator '{}' to postfix",
            op
        )))
    }

    fn visit_no_op(&mut self) -> Self::Effect {
        Err(statement_rejected("empty"))
    }

    fn visit_assignment(&mut self, _name: &str, _value: &Expression) -> Self::Effect {
        Err(statement_rejected("assignment"))
    }

    fn visit_compound(&mut self, _statements: &[Statement]) -> Self::Effect {
        Err(statement_rejected("compound"))
    }
}

/// Renders an expression as a Lisp S-expression: `(* (+ 1 2) 3)`
#[derive(Debug, Default, Clone, Copy)]
pub struct LispTranslator;

impl LispTranslator {
    /// Creates a translator
    pub fn new() -> Self {
        LispTranslator
    }

    /// Translates an expression; unary operators are rejected
    pub fn translate(&mut self, expr: &Expression) -> Result<String> {
        expr.accept(self)
    }
}

impl Visitor for LispTranslator {
    type Value = Result<String>;
    type Effect = Result<String>;

    fn visit_number(&mut self, value: Number) -> Self::Value {
        Ok(value.to_string())
    }

    fn visit_variable(&mut self, name: &str) -> Self::Value {
        Ok(name.to_string())
    }

    fn visit_binary(&mut self, op: BinaryOp, left: &Expression, right: &Expression) -> Self::Value {
        let left = self.translate(left)?;
        let right = self.translate(right)?;
        Ok(format!("({} {} {})", operator_token(op), left, right))
    }

    fn visit_unary(&mut self, op: UnaryOp, _operand: &Expression) -> Self::Value {
        Err(Error::unsupported(format!(
            "can't translate unary operator '{}' to lisp",
            op
        )))
    }

    fn visit_no_op(&mut self) -> Self::Effect {
        Err(statement_rejected("empty"))
    }

    fn visit_assignment(&mut self, _name: &str, _value: &Expression) -> Self::Effect {
        Err(statement_rejected("assignment"))
    }

    fn visit_compound(&mut self, _statements: &[Statement]) -> Self::Effect {
        Err(statement_rejected("compound"))
    }
}
