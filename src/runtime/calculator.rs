use crate::config::Dialect;
use crate::error::{Error, Result};
use crate::parser::{BinaryOp, Expression, Program, Statement, UnaryOp, Visitor};
use crate::runtime::{Number, Scope};

/// Arithmetic and assignment evaluator
///
/// Walks a finished tree, computing expressions and storing assignments in its
/// own [`Scope`]. One calculator serves one run; build a new one for the next
/// program so no variables leak between runs.
///
/// Declarations are purely syntactic here: they neither create scope entries
/// nor constrain the type of later assignments.
#[derive(Debug, Clone)]
pub struct Calculator {
    /// Variables assigned so far
    scope: Scope,
}

impl Calculator {
    /// Creates a calculator for the typed dialect
    pub fn new() -> Self {
        Self::with_dialect(Dialect::default())
    }

    /// Creates a calculator whose name comparison follows `dialect`
    pub fn with_dialect(dialect: Dialect) -> Self {
        Calculator {
            scope: Scope::new(dialect.name_policy()),
        }
    }

    /// Evaluates an expression subtree
    pub fn calculate(&mut self, expr: &Expression) -> Result<Number> {
        expr.accept(self)
    }

    /// Executes a program's body, leaving its effects in the scope
    pub fn run(&mut self, program: &Program) -> Result<()> {
        tracing::debug!(
            program = program.name.as_deref().unwrap_or("<anonymous>"),
            declarations = program.block.declarations.len(),
            "running program"
        );
        self.run_statement(&program.block.compound)
    }

    /// Executes a single statement
    pub fn run_statement(&mut self, statement: &Statement) -> Result<()> {
        statement.accept(self)
    }

    /// Variables assigned so far
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Consumes the calculator, returning its final scope
    pub fn into_scope(self) -> Scope {
        self.scope
    }

    fn apply_binary_op(&self, op: BinaryOp, left: Number, right: Number) -> Result<Number> {
        match op {
            BinaryOp::Add => int_or_real(left, right, i64::checked_add, |l, r| l + r, op),
            BinaryOp::Sub => int_or_real(left, right, i64::checked_sub, |l, r| l - r, op),
            BinaryOp::Mul => int_or_real(left, right, i64::checked_mul, |l, r| l * r, op),

            BinaryOp::IntDiv => match (left, right) {
                (Number::Int(_), Number::Int(0)) => Err(Error::DivisionByZero),
                (Number::Int(l), Number::Int(r)) => l
                    .checked_div(r)
                    .map(Number::Int)
                    .ok_or_else(|| Error::Overflow { op: op.to_string() }),
                (l, r) => {
                    let got = if l.is_integer() { r } else { l };
                    Err(Error::TypeMismatch {
                        op: op.to_string(),
                        expected: "INTEGER".to_string(),
                        got: got.type_name(),
                    })
                }
            },

            BinaryOp::FloatDiv => {
                let divisor = right.as_f64();
                if divisor == 0.0 {
                    Err(Error::DivisionByZero)
                } else {
                    Ok(Number::Real(left.as_f64() / divisor))
                }
            }
        }
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Integer arithmetic when both sides are integers, real arithmetic otherwise
fn int_or_real(
    left: Number,
    right: Number,
    int_op: fn(i64, i64) -> Option<i64>,
    real_op: fn(f64, f64) -> f64,
    op: BinaryOp,
) -> Result<Number> {
    match (left, right) {
        (Number::Int(l), Number::Int(r)) => int_op(l, r)
            .map(Number::Int)
            .ok_or_else(|| Error::Overflow { op: op.to_string() }),
        (l, r) => Ok(Number::Real(real_op(l.as_f64(), r.as_f64()))),
    }
}

impl Visitor for Calculator {
    type Value = Result<Number>;
    type Effect = Result<()>;

    fn visit_number(&mut self, value: Number) -> Self::Value {
        Ok(value)
    }

    fn visit_variable(&mut self, name: &str) -> Self::Value {
        self.scope.get(name)
    }

    fn visit_binary(&mut self, op: BinaryOp, left: &Expression, right: &Expression) -> Self::Value {
        // Left before right: the first undefined name is the one reported
        let left = self.calculate(left)?;
        let right = self.calculate(right)?;
        self.apply_binary_op(op, left, right)
    }

    fn visit_unary(&mut self, op: UnaryOp, operand: &Expression) -> Self::Value {
        match (op, self.calculate(operand)?) {
            (UnaryOp::Plus, value) => Ok(value),
            (UnaryOp::Minus, Number::Int(n)) => n
                .checked_neg()
                .map(Number::Int)
                .ok_or_else(|| Error::Overflow { op: op.to_string() }),
            (UnaryOp::Minus, Number::Real(r)) => Ok(Number::Real(-r)),
        }
    }

    fn visit_no_op(&mut self) -> Self::Effect {
        Ok(())
    }

    fn visit_assignment(&mut self, name: &str, value: &Expression) -> Self::Effect {
        let value = self.calculate(value)?;
        tracing::debug!(name, %value, "assign");
        self.scope.set(name, value);
        Ok(())
    }

    fn visit_compound(&mut self, statements: &[Statement]) -> Self::Effect {
        tracing::trace!(statements = statements.len(), "enter compound");
        for statement in statements {
            self.run_statement(statement)?;
        }
        Ok(())
    }
}
