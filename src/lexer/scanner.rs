use super::token::{Token, TokenKind};
use crate::error::{Error, Result};
use crate::runtime::Number;

/// Pull-based lexer for minipascal source text
///
/// Tokens are produced one at a time by [`Lexer::advance`]; nothing is
/// tokenized ahead of the caller.
#[derive(Debug, Clone, Default)]
pub struct Lexer {
    /// Source text
    text: String,
    /// Byte offset of the next unread character
    pos: usize,
    /// Byte offset where the most recently produced token starts
    token_start: usize,
    /// Set once the iterator has yielded `Eof` or an error
    exhausted: bool,
}

impl Lexer {
    /// Creates a lexer positioned at the start of `text`
    pub fn new(text: &str) -> Self {
        Lexer {
            text: text.to_string(),
            pos: 0,
            token_start: 0,
            exhausted: false,
        }
    }

    /// Replaces the input and rewinds to its start
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.pos = 0;
        self.token_start = 0;
        self.exhausted = false;
    }

    /// Byte offset of the next unread character
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Byte offset where the last token returned by `advance` starts
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// Returns the next token, consuming input
    ///
    /// Once the input is exhausted every call returns `Eof`.
    pub fn advance(&mut self) -> Result<Token> {
        let token = self.scan_token()?;
        tracing::trace!(offset = self.token_start, token = %token, "lexed token");
        Ok(token)
    }

    fn scan_token(&mut self) -> Result<Token> {
        loop {
            self.token_start = self.pos;
            let c = match self.peek() {
                Some(c) => c,
                None => return Ok(Token::bare(TokenKind::Eof)),
            };

            match c {
                c if c.is_ascii_whitespace() => self.skip_whitespace(),
                '{' => self.skip_comment(),

                c if c.is_ascii_digit() => return self.scan_number(),
                c if c.is_ascii_alphabetic() || c == '_' => {
                    return Ok(self.scan_identifier_or_keyword())
                }

                '+' => return Ok(self.single(TokenKind::Plus)),
                '-' => return Ok(self.single(TokenKind::Minus)),
                '*' => return Ok(self.single(TokenKind::Mul)),
                '/' => return Ok(self.single(TokenKind::FloatDiv)),
                '(' => return Ok(self.single(TokenKind::LeftParen)),
                ')' => return Ok(self.single(TokenKind::RightParen)),
                ';' => return Ok(self.single(TokenKind::Semicolon)),
                '.' => return Ok(self.single(TokenKind::Dot)),
                ',' => return Ok(self.single(TokenKind::Comma)),
                ':' => {
                    self.pos += 1;
                    if self.match_char('=') {
                        return Ok(Token::bare(TokenKind::Assign));
                    }
                    return Ok(Token::bare(TokenKind::Colon));
                }

                _ => {
                    return Err(Error::Lex {
                        ch: c,
                        offset: self.pos,
                    })
                }
            }
        }
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        self.pos += 1;
        Token::bare(kind)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Skips `{ ... }`; an unterminated comment swallows the rest of the input
    fn skip_comment(&mut self) {
        match self.text[self.pos..].find('}') {
            Some(close) => self.pos += close + 1,
            None => self.pos = self.text.len(),
        }
    }

    fn scan_number(&mut self) -> Result<Token> {
        self.consume_digits();

        let mut is_real = false;
        if self.peek() == Some('.') && matches!(self.peek_next(), Some(c) if c.is_ascii_digit()) {
            is_real = true;
            self.pos += 1; // consume .
            self.consume_digits();
        }

        let text = &self.text[self.token_start..self.pos];

        let literal = if is_real {
            // Too many digits parse to infinity rather than failing
            let value = text
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| self.invalid_number(text))?;
            Number::Real(value)
        } else {
            Number::Int(text.parse::<i64>().map_err(|_| self.invalid_number(text))?)
        };
        Ok(Token::number(text, literal))
    }

    fn scan_identifier_or_keyword(&mut self) -> Token {
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.pos += 1;
        }

        let text = &self.text[self.token_start..self.pos];
        match TokenKind::keyword(text) {
            Some(kind) => Token::bare(kind),
            None => Token::new(TokenKind::Identifier, text),
        }
    }

    fn consume_digits(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    fn invalid_number(&self, text: &str) -> Error {
        Error::InvalidNumber {
            lexeme: text.to_string(),
            offset: self.token_start,
        }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        self.text[self.pos..].chars().nth(1)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }
}

/// Yields every token up to and including the single `Eof`, then `None`.
/// Iteration also stops after the first error.
impl Iterator for Lexer {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let item = self.advance();
        if !matches!(&item, Ok(token) if token.kind != TokenKind::Eof) {
            self.exhausted = true;
        }
        Some(item)
    }
}

/// Tokenizes `text` to completion, ending with exactly one `Eof`
pub fn tokenize(text: &str) -> Result<Vec<Token>> {
    Lexer::new(text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn test_simple_assignment() {
        let tokens = tokenize("x := 5;").unwrap();

        assert_eq!(tokens.len(), 5); // x := 5 ; EOF
        assert_eq!(tokens[0], Token::new(TokenKind::Identifier, "x"));
        assert_eq!(tokens[1].kind, TokenKind::Assign);
        assert_eq!(tokens[2], Token::number("5", Number::Int(5)));
        assert_eq!(tokens[3].kind, TokenKind::Semicolon);
        assert_eq!(tokens[4].kind, TokenKind::Eof);
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        assert_eq!(
            kinds("BEGIN begin Begin END div Div"),
            vec![
                TokenKind::Begin,
                TokenKind::Begin,
                TokenKind::Begin,
                TokenKind::End,
                TokenKind::IntegerDiv,
                TokenKind::IntegerDiv,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifier_keeps_case() {
        let tokens = tokenize("nUmber _c a1").unwrap();
        assert_eq!(tokens[0].value.as_deref(), Some("nUmber"));
        assert_eq!(tokens[1].value.as_deref(), Some("_c"));
        assert_eq!(tokens[2].value.as_deref(), Some("a1"));
    }

    #[test]
    fn test_real_needs_digit_after_dot() {
        let tokens = tokenize("3.14 7.").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::RealConst);
        assert_eq!(tokens[0].lexeme(), "3.14");
        assert_eq!(tokens[1], Token::number("7", Number::Int(7)));
        assert_eq!(tokens[2].kind, TokenKind::Dot);
        assert_eq!(tokens[3].kind, TokenKind::Eof);
    }

    #[test]
    fn test_colon_and_assign() {
        assert_eq!(
            kinds("a : INTEGER; b:=1"),
            vec![
                TokenKind::Identifier,
                TokenKind::Colon,
                TokenKind::Integer,
                TokenKind::Semicolon,
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::IntegerConst,
                TokenKind::Eof,
            ]
        );
        assert_eq!(kinds(":"), vec![TokenKind::Colon, TokenKind::Eof]);
    }

    #[test]
    fn test_comment_is_skipped() {
        assert_eq!(
            kinds("{ a comment := 1 } x { unterminated"),
            vec![TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn test_eof_repeats() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.advance().unwrap().kind, TokenKind::Identifier);
        for _ in 0..3 {
            assert_eq!(lexer.advance().unwrap().kind, TokenKind::Eof);
        }
    }

    #[test]
    fn test_set_text_rewinds() {
        let mut lexer = Lexer::new("a");
        lexer.advance().unwrap();
        lexer.set_text("b");
        assert_eq!(
            lexer.advance().unwrap(),
            Token::new(TokenKind::Identifier, "b")
        );
        assert_eq!(lexer.position(), 1);
    }

    #[test]
    fn test_unknown_character() {
        let err = tokenize("x := 1 # 2").unwrap_err();
        assert_eq!(err, Error::Lex { ch: '#', offset: 7 });
    }

    #[test]
    fn test_integer_overflow_is_lex_error() {
        let err = tokenize("99999999999999999999").unwrap_err();
        assert!(matches!(err, Error::InvalidNumber { offset: 0, .. }));
    }

    #[test]
    fn test_real_overflow_is_lex_error() {
        let huge = format!("{}.0", "9".repeat(400));
        let err = tokenize(&format!("x := {}", huge)).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidNumber {
                lexeme: huge,
                offset: 5
            }
        );
        assert_eq!(err.stage(), crate::error::Stage::Lex);
    }

    #[test]
    fn test_literal_value_is_attached() {
        let tokens = tokenize("12 0.5").unwrap();
        assert_eq!(tokens[0].literal, Some(Number::Int(12)));
        assert_eq!(tokens[1].literal, Some(Number::Real(0.5)));
        assert_eq!(tokens[2].literal, None);
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let mut lexer = Lexer::new("a ?");
        assert!(lexer.next().unwrap().is_ok());
        assert!(lexer.next().unwrap().is_err());
        assert!(lexer.next().is_none());
    }
}
