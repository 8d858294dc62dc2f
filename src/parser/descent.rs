use super::ast::{BinaryOp, Block, Expression, Program, Statement, TypeSpec, UnaryOp, VarDecl};
use crate::config::Dialect;
use crate::error::{Error, Result};
use crate::lexer::{Lexer, Token, TokenKind};

/// Deepest nesting the parser accepts
///
/// Counts parentheses, unary signs and `BEGIN` blocks while parsing, and the
/// height of each finished expression tree. Evaluators recurse over the
/// same structure, so this also bounds their stack use.
pub const MAX_NESTING_DEPTH: usize = 100;

/// Recursive-descent parser with one token of lookahead
///
/// `current` always holds the token that has not been consumed yet. Each
/// grammar production is one `parse_*` method; all of them report token
/// mismatches through [`Parser::eat`].
pub struct Parser {
    lexer: Lexer,
    current: Token,
    dialect: Dialect,
    /// Open parentheses, unary signs and compounds around the current token
    depth: usize,
}

impl Parser {
    /// Creates a parser for the typed dialect and reads the first token
    pub fn new(lexer: Lexer) -> Result<Self> {
        Self::with_dialect(lexer, Dialect::default())
    }

    /// Creates a parser for the given dialect and reads the first token
    pub fn with_dialect(mut lexer: Lexer, dialect: Dialect) -> Result<Self> {
        let current = lexer.advance()?;
        Ok(Parser {
            lexer,
            current,
            dialect,
            depth: 0,
        })
    }

    /// Dialect this parser accepts
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Parses a whole program according to the dialect
    ///
    /// ```text
    /// program := 'PROGRAM' IDENT ';' block '.' EOF      (typed)
    ///          | compound '.' EOF                        (untyped)
    /// ```
    pub fn parse_program(&mut self) -> Result<Program> {
        tracing::trace!(dialect = %self.dialect, "parse program");

        let program = if self.dialect.has_program_header() {
            self.eat(TokenKind::Program)?;
            let name = self.parse_identifier()?;
            self.eat(TokenKind::Semicolon)?;
            let block = self.parse_block()?;
            Program {
                name: Some(name),
                block,
            }
        } else {
            let compound = self.parse_compound()?;
            Program {
                name: None,
                block: Block {
                    declarations: Vec::new(),
                    compound,
                },
            }
        };

        self.eat(TokenKind::Dot)?;
        self.eat(TokenKind::Eof)?;
        Ok(program)
    }

    /// Parses a bare expression that must span the whole input
    pub fn parse_expression_only(&mut self) -> Result<Expression> {
        let expr = self.parse_expr()?;
        self.eat(TokenKind::Eof)?;
        Ok(expr)
    }

    /// `block := declarations compound`
    pub fn parse_block(&mut self) -> Result<Block> {
        let declarations = self.parse_declarations()?;
        let compound = self.parse_compound()?;
        Ok(Block {
            declarations,
            compound,
        })
    }

    /// `declarations := ('VAR' (varDecl ';')+)?`
    pub fn parse_declarations(&mut self) -> Result<Vec<VarDecl>> {
        let mut declarations = Vec::new();
        if !self.check(TokenKind::Var) {
            return Ok(declarations);
        }

        self.eat(TokenKind::Var)?;
        loop {
            declarations.push(self.parse_var_decl()?);
            self.eat(TokenKind::Semicolon)?;
            if !self.check(TokenKind::Identifier) {
                break;
            }
        }
        Ok(declarations)
    }

    /// `varDecl := IDENT (',' IDENT)* ':' typeSpec`
    pub fn parse_var_decl(&mut self) -> Result<VarDecl> {
        let mut names = vec![self.parse_identifier()?];
        while self.check(TokenKind::Comma) {
            self.eat(TokenKind::Comma)?;
            names.push(self.parse_identifier()?);
        }
        self.eat(TokenKind::Colon)?;
        let type_spec = self.parse_type_spec()?;
        Ok(VarDecl { names, type_spec })
    }

    /// `typeSpec := 'INTEGER' | 'REAL'`
    pub fn parse_type_spec(&mut self) -> Result<TypeSpec> {
        match self.current.kind {
            TokenKind::Integer => {
                self.eat(TokenKind::Integer)?;
                Ok(TypeSpec::Integer)
            }
            TokenKind::Real => {
                self.eat(TokenKind::Real)?;
                Ok(TypeSpec::Real)
            }
            _ => Err(self.unexpected("type name")),
        }
    }

    /// `compound := 'BEGIN' statementList 'END'`
    pub fn parse_compound(&mut self) -> Result<Statement> {
        tracing::trace!(depth = self.depth, "parse compound");
        self.nested(|parser| {
            parser.eat(TokenKind::Begin)?;
            let statements = parser.parse_statement_list()?;
            parser.eat(TokenKind::End)?;
            Ok(Statement::Compound(statements))
        })
    }

    /// `statementList := statement (';' statement)*`
    pub fn parse_statement_list(&mut self) -> Result<Vec<Statement>> {
        let mut statements = vec![self.parse_statement()?];
        while self.check(TokenKind::Semicolon) {
            self.eat(TokenKind::Semicolon)?;
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    /// `statement := compound | assignment | empty`
    pub fn parse_statement(&mut self) -> Result<Statement> {
        match self.current.kind {
            TokenKind::Begin => self.parse_compound(),
            TokenKind::Identifier => self.parse_assignment(),
            _ => Ok(Statement::NoOp),
        }
    }

    /// `assignment := IDENT ':=' expr`
    pub fn parse_assignment(&mut self) -> Result<Statement> {
        let name = self.parse_identifier()?;
        self.eat(TokenKind::Assign)?;
        let value = self.parse_expr()?;
        Ok(Statement::Assignment { name, value })
    }

    /// `expr := term (('+' | '-') term)*`, folded to the left
    pub fn parse_expr(&mut self) -> Result<Expression> {
        Ok(self.expr_tree()?.0)
    }

    /// `term := factor (('*' | 'DIV' | '/') factor)*`, folded to the left
    pub fn parse_term(&mut self) -> Result<Expression> {
        Ok(self.term_tree()?.0)
    }

    /// `factor := ('+' | '-') factor | INT | REAL | '(' expr ')' | IDENT`
    pub fn parse_factor(&mut self) -> Result<Expression> {
        Ok(self.factor_tree()?.0)
    }

    // Expression productions return the tree together with its height so
    // that long operator chains are bounded like explicit nesting.

    fn expr_tree(&mut self) -> Result<(Expression, usize)> {
        let (mut node, mut height) = self.term_tree()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            let kind = self.current.kind;
            self.eat(kind)?;
            let (right, right_height) = self.term_tree()?;
            height = self.grow(height.max(right_height))?;
            node = Expression::binary(op, node, right);
        }

        Ok((node, height))
    }

    fn term_tree(&mut self) -> Result<(Expression, usize)> {
        let (mut node, mut height) = self.factor_tree()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Mul => BinaryOp::Mul,
                TokenKind::IntegerDiv => BinaryOp::IntDiv,
                TokenKind::FloatDiv => BinaryOp::FloatDiv,
                _ => break,
            };
            let kind = self.current.kind;
            self.eat(kind)?;
            let (right, right_height) = self.factor_tree()?;
            height = self.grow(height.max(right_height))?;
            node = Expression::binary(op, node, right);
        }

        Ok((node, height))
    }

    fn factor_tree(&mut self) -> Result<(Expression, usize)> {
        // Numeric tokens arrive with the value the lexer already checked
        if let Some(number) = self.current.literal {
            let kind = self.current.kind;
            self.eat(kind)?;
            return Ok((Expression::Number(number), 0));
        }

        match self.current.kind {
            TokenKind::Plus => self.unary(TokenKind::Plus, UnaryOp::Plus),
            TokenKind::Minus => self.unary(TokenKind::Minus, UnaryOp::Minus),
            TokenKind::LeftParen => self.nested(|parser| {
                parser.eat(TokenKind::LeftParen)?;
                let inner = parser.expr_tree()?;
                parser.eat(TokenKind::RightParen)?;
                Ok(inner)
            }),
            TokenKind::Identifier => Ok((Expression::Variable(self.parse_identifier()?), 0)),
            _ => Err(self.unexpected("factor")),
        }
    }

    fn unary(&mut self, kind: TokenKind, op: UnaryOp) -> Result<(Expression, usize)> {
        self.nested(|parser| {
            parser.eat(kind)?;
            let (operand, height) = parser.factor_tree()?;
            let height = parser.grow(height)?;
            Ok((Expression::unary(op, operand), height))
        })
    }

    // Helper methods

    fn parse_identifier(&mut self) -> Result<String> {
        let token = self.eat(TokenKind::Identifier)?;
        Ok(token.value.unwrap_or_default())
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Consumes the current token if it has the expected kind
    ///
    /// Returns the consumed token. This is the only place a token mismatch
    /// becomes an error.
    fn eat(&mut self, expected: TokenKind) -> Result<Token> {
        if !self.check(expected) {
            return Err(self.unexpected(expected.name()));
        }
        let next = self.lexer.advance()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Runs `production` one nesting level deeper
    fn nested<T>(&mut self, production: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.too_deep());
        }
        self.depth += 1;
        let result = production(self);
        self.depth -= 1;
        result
    }

    /// Height of a new operator node above a child of height `child`
    fn grow(&self, child: usize) -> Result<usize> {
        if child >= MAX_NESTING_DEPTH {
            return Err(self.too_deep());
        }
        Ok(child + 1)
    }

    fn too_deep(&self) -> Error {
        Error::NestingTooDeep {
            limit: MAX_NESTING_DEPTH,
            offset: self.lexer.token_start(),
        }
    }

    fn unexpected(&self, expected: &str) -> Error {
        Error::UnexpectedToken {
            expected: expected.to_string(),
            found: self.current.to_string(),
            offset: self.lexer.token_start(),
        }
    }
}
