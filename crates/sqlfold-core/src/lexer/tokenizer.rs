//! SQL Tokenizer implementation.

use core::str::FromStr;

use rust_decimal::Decimal;

use super::{Keyword, Span, Token, TokenKind};

/// A lexer that tokenizes SQL input.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.advance();
        }
    }

    /// Skips whitespace and comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            self.advance_while(char::is_whitespace);

            // Skip single-line comments (-- ...)
            if self.peek() == Some('-') && self.peek_next() == Some('-') {
                self.advance_while(|c| c != '\n');
                continue;
            }

            // Skip multi-line comments (/* ... */)
            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.advance(); // /
                self.advance(); // *
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        None => break,
                        _ => {}
                    }
                }
                continue;
            }

            break;
        }
    }

    /// Creates a token spanning from the token start to the current position.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, Span::new(self.start, self.pos))
    }

    fn error(&self, message: impl Into<String>) -> Token {
        self.make_token(TokenKind::Error(message.into()))
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token {
        self.advance_while(|c| c.is_alphanumeric() || c == '_' || c == '$');
        let text = &self.input[self.start..self.pos];

        if let Some(keyword) = Keyword::from_str(text) {
            self.make_token(TokenKind::Keyword(keyword))
        } else {
            self.make_token(TokenKind::Identifier(String::from(text)))
        }
    }

    /// Scans a quoted body up to the closing `quote`. A doubled quote stands
    /// for one quote character.
    fn scan_quoted(&mut self, quote: char) -> Option<String> {
        self.advance(); // consume opening quote
        let mut value = String::new();
        loop {
            match self.advance()? {
                c if c == quote => {
                    if self.peek() == Some(quote) {
                        self.advance();
                        value.push(quote);
                    } else {
                        return Some(value);
                    }
                }
                c => value.push(c),
            }
        }
    }

    /// Scans a quoted identifier (e.g., "column name" or `column name`).
    fn scan_quoted_identifier(&mut self, quote: char) -> Token {
        match self.scan_quoted(quote) {
            Some(name) => self.make_token(TokenKind::QuotedIdentifier(name)),
            None => self.error("Unterminated quoted identifier"),
        }
    }

    /// Scans a string literal.
    fn scan_string(&mut self) -> Token {
        match self.scan_quoted('\'') {
            Some(value) => self.make_token(TokenKind::String(value)),
            None => self.error("Unterminated string literal"),
        }
    }

    /// Scans a number. Integers that do not fit `i64` become decimals.
    fn scan_number(&mut self) -> Token {
        let mut is_decimal = false;
        let mut has_exponent = false;

        self.advance_while(|c| c.is_ascii_digit());

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            is_decimal = true;
            self.advance(); // consume .
            self.advance_while(|c| c.is_ascii_digit());
        }

        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            has_exponent = true;
            self.advance(); // consume e/E
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            self.advance_while(|c| c.is_ascii_digit());
        }

        let text = &self.input[self.start..self.pos];

        if has_exponent {
            return match Decimal::from_scientific(text) {
                Ok(value) => self.make_token(TokenKind::Decimal(value)),
                Err(e) => self.error(format!("Invalid number {text}: {e}")),
            };
        }
        if !is_decimal {
            if let Ok(value) = text.parse::<i64>() {
                return self.make_token(TokenKind::Integer(value));
            }
        }
        match Decimal::from_str(text) {
            Ok(value) => self.make_token(TokenKind::Decimal(value)),
            Err(e) => self.error(format!("Invalid number {text}: {e}")),
        }
    }

    /// Scans a hex literal in `X'...'` form.
    fn scan_hex_string(&mut self) -> Token {
        self.advance(); // consume X/x
        let Some(digits) = self.scan_quoted('\'') else {
            return self.error("Unterminated hex literal");
        };
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return self.error("Invalid character in hex literal");
        }
        if digits.len() % 2 != 0 {
            return self.error("Odd number of hex digits in hex literal");
        }
        self.make_token(TokenKind::Hex(digits.to_ascii_uppercase()))
    }

    /// Scans a hex literal in `0x...` form.
    fn scan_hex_number(&mut self) -> Token {
        self.advance(); // 0
        self.advance(); // x
        let digits_start = self.pos;
        self.advance_while(|c| c.is_ascii_hexdigit());
        let digits = &self.input[digits_start..self.pos];
        if digits.is_empty() {
            return self.error("Empty hex literal");
        }
        // 0xABC reads as 0x0ABC.
        let padded = if digits.len() % 2 == 0 {
            digits.to_ascii_uppercase()
        } else {
            format!("0{}", digits.to_ascii_uppercase())
        };
        self.make_token(TokenKind::Hex(padded))
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();
        self.start = self.pos;

        let Some(c) = self.peek() else {
            return self.make_token(TokenKind::Eof);
        };

        match c {
            '\'' => return self.scan_string(),
            '"' | '`' => return self.scan_quoted_identifier(c),
            'X' | 'x' if self.peek_next() == Some('\'') => return self.scan_hex_string(),
            '0' if self.peek_next().is_some_and(|n| n == 'x' || n == 'X') => {
                return self.scan_hex_number();
            }
            c if c.is_ascii_digit() => return self.scan_number(),
            c if c.is_alphabetic() || c == '_' => return self.scan_identifier(),
            _ => {}
        }

        self.advance();
        match c {
            // Single-character tokens
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            ',' => self.make_token(TokenKind::Comma),
            ';' => self.make_token(TokenKind::Semicolon),
            '.' => self.make_token(TokenKind::Dot),
            '+' => self.make_token(TokenKind::Plus),
            '-' => self.make_token(TokenKind::Minus),
            '*' => self.make_token(TokenKind::Star),
            '/' => self.make_token(TokenKind::Slash),
            '%' => self.make_token(TokenKind::Percent),
            '~' => self.make_token(TokenKind::BitNot),
            '?' => self.make_token(TokenKind::Question),
            '&' => self.make_token(TokenKind::BitAnd),
            '=' => self.make_token(TokenKind::Eq),

            // Potentially multi-character tokens
            ':' if self.peek().is_some_and(|n| n.is_alphanumeric() || n == '_') => {
                let name_start = self.pos;
                self.advance_while(|n| n.is_alphanumeric() || n == '_');
                let name = String::from(&self.input[name_start..self.pos]);
                self.make_token(TokenKind::NamedParameter(name))
            }
            '<' => match self.peek() {
                Some('=') => self.two_char(TokenKind::LtEq),
                Some('>') => self.two_char(TokenKind::NotEq),
                Some('<') => self.two_char(TokenKind::LeftShift),
                _ => self.make_token(TokenKind::Lt),
            },
            '>' => match self.peek() {
                Some('=') => self.two_char(TokenKind::GtEq),
                Some('>') => self.two_char(TokenKind::RightShift),
                _ => self.make_token(TokenKind::Gt),
            },
            '!' if self.peek() == Some('=') => self.two_char(TokenKind::NotEq),
            '|' if self.peek() == Some('|') => self.two_char(TokenKind::Concat),
            '|' => self.make_token(TokenKind::BitOr),

            _ => self.error(format!("Unexpected character: {c}")),
        }
    }

    fn two_char(&mut self, kind: TokenKind) -> Token {
        self.advance();
        self.make_token(kind)
    }

    /// Tokenizes the entire input and returns all tokens.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}
