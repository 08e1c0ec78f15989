use anyhow::{bail, Result};

use crate::{
    diagnostics::Diagnostics,
    scanner::{
        identifier::{is_valid_identifier_start, is_valid_identifier_tail, LOX_KEYWORDS},
        input::Input,
    },
    token::{Token, TokenKind},
};

mod identifier;
mod input;

pub struct Scanner<'s> {
    input: Input<'s>,
    buffer: String,
    tokens: Vec<Token>,
    diagnostics: Diagnostics,
    line: usize,
    token_line: usize,
}

// The actual scanner implementation.
impl<'s> Scanner<'s> {
    /// Scans the source input string. Returns the produced tokens along with
    /// any lexical diagnostics; callers must discard the tokens if the
    /// diagnostic bag is non-empty.
    pub fn scan_tokens(mut self) -> (Vec<Token>, Diagnostics) {
        while {
            self.buffer.clear();
            self.token_line = self.line;
            !self.input.finished()
        } {
            match self.scan_token_kind() {
                Ok(Some(kind)) => self.add_token(kind),
                Ok(None) => {} // whitespace or comment
                Err(err) => self.diagnostics.diagnose(self.line, err.to_string()),
            }
        }
        self.add_token(TokenKind::Eof);
        (self.tokens, self.diagnostics)
    }

    /// Tries to scan the token starting at the current character. Trivia
    /// (whitespace and comments) yields `None`.
    fn scan_token_kind(&mut self) -> Result<Option<TokenKind>> {
        use TokenKind::*;
        let kind = match self.advance() {
            '(' => LeftParen,
            ')' => RightParen,
            '{' => LeftBrace,
            '}' => RightBrace,
            ';' => Semicolon,
            ',' => Comma,
            '.' => Dot,
            '+' => Plus,
            '-' => Minus,
            '*' => Star,
            '!' => self.take_select('=', BangEqual, Bang),
            '=' => self.take_select('=', EqualEqual, Equal),
            '>' => self.take_select('=', GreaterEqual, Greater),
            '<' => self.take_select('=', LessEqual, Less),
            '"' => self.string()?,
            '/' => match self.comment_or_slash() {
                Some(kind) => kind,
                None => return Ok(None),
            },
            '\n' => {
                self.line += 1;
                return Ok(None);
            }
            ' ' | '\t' | '\r' => return Ok(None),
            c if c.is_ascii_digit() => self.number()?,
            c if is_valid_identifier_start(c) => self.identifier_or_keyword(),
            unexpected => bail!("Unexpected character: '{}'", unexpected),
        };
        Ok(Some(kind))
    }

    /// Tries to scan a string literal. Strings may span multiple lines.
    fn string(&mut self) -> Result<TokenKind> {
        while self.input.peek() != '"' && !self.input.finished() {
            if self.input.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }
        if self.input.finished() {
            bail!("Unterminated string.");
        }
        self.advance(); // The closing `"`
        Ok(TokenKind::String(self.lexeme(1, -1)))
    }

    /// Consumes a `//` comment (to end of line) or produces a slash.
    fn comment_or_slash(&mut self) -> Option<TokenKind> {
        if self.take('/') {
            while self.input.peek() != '\n' && !self.input.finished() {
                self.advance();
            }
            None
        } else {
            Some(TokenKind::Slash)
        }
    }

    /// Tries to scan a number. The `.` is only consumed when a fractional
    /// digit follows it.
    fn number(&mut self) -> Result<TokenKind> {
        while self.input.peek().is_ascii_digit() {
            self.advance();
        }
        if self.input.peek() == '.' && self.input.peek_second().is_ascii_digit() {
            self.advance(); // The `.` separator
            while self.input.peek().is_ascii_digit() {
                self.advance();
            }
        }
        Ok(TokenKind::Number(self.buffer.parse()?))
    }

    /// Scans a keyword or an identifier.
    fn identifier_or_keyword(&mut self) -> TokenKind {
        while is_valid_identifier_tail(self.input.peek()) {
            self.advance();
        }
        match LOX_KEYWORDS.get(self.buffer.as_str()) {
            // Keyword token kinds carry no data, so the clone is cheap.
            Some(keyword_kind) => keyword_kind.clone(),
            None => TokenKind::Identifier(self.buffer.clone()),
        }
    }
}

// The scanner helper methods.
impl<'s> Scanner<'s> {
    /// Creates a new scanner.
    pub fn new(source: &'s str) -> Scanner<'s> {
        Scanner {
            input: Input::new(source),
            buffer: String::new(),
            tokens: Vec::new(),
            diagnostics: Diagnostics::new(),
            line: 1,
            token_line: 1,
        }
    }

    /// Consumes the next character into the current lexeme buffer.
    #[inline]
    fn advance(&mut self) -> char {
        let c = self.input.advance();
        self.buffer.push(c);
        c
    }

    /// Checks if the next character matches the given one. In such case
    /// advances and returns true. Otherwise returns false.
    #[inline]
    fn take(&mut self, expected: char) -> bool {
        if self.input.peek() != expected {
            return false;
        }
        self.advance();
        true
    }

    /// Checks if the next character matches the given one. In such case,
    /// advances and returns `a`, otherwise returns `b`.
    #[inline]
    fn take_select<T>(&mut self, expected: char, a: T, b: T) -> T {
        match self.take(expected) {
            true => a,
            false => b,
        }
    }

    /// Returns the current lexeme with the given bound offsets applied.
    #[inline]
    fn lexeme(&self, lower_bound_offset: usize, higher_bound_offset: isize) -> String {
        let hi = (self.buffer.len() as isize + higher_bound_offset) as usize;
        self.buffer[lower_bound_offset..hi].into()
    }

    /// Pushes a new token beginning at the recorded token line.
    #[inline]
    fn add_token(&mut self, kind: TokenKind) {
        self.tokens.push(Token {
            kind,
            line: self.token_line,
        });
    }
}
