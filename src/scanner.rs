//! Lexer for Lox source text.
//!
//! [`Scanner`] is an iterator of `Result<Token>`: a bad character or an
//! unterminated string yields one `Err` and scanning carries on, so a caller
//! can report every lexical problem in a single pass.  Exactly one `EOF` token
//! is produced, after which the iterator is fused.
//!
//! Keywords are looked up in a compile-time perfect hash map, and line
//! comments are skipped with a single `memchr` search for the next newline.
//!
//! ```rust
//! use rox::scanner::Scanner;
//!
//! let (tokens, errors) = Scanner::new("print 123; // example").scan_all();
//! assert_eq!(tokens.len(), 4); // PRINT NUMBER SEMICOLON EOF
//! assert!(errors.is_empty());
//! ```

use crate::error::{LoxError, Result};
use crate::token::{Token, TokenType};
use log::{debug, info};
use memchr::memchr;
use phf::phf_map;
use std::iter::FusedIterator;

static KEYWORDS: phf::Map<&'static [u8], TokenType> = phf_map! {
    b"and"    => TokenType::AND,
    b"class"  => TokenType::CLASS,
    b"else"   => TokenType::ELSE,
    b"false"  => TokenType::FALSE,
    b"fun"    => TokenType::FUN,
    b"for"    => TokenType::FOR,
    b"if"     => TokenType::IF,
    b"nil"    => TokenType::NIL,
    b"or"     => TokenType::OR,
    b"print"  => TokenType::PRINT,
    b"return" => TokenType::RETURN,
    b"super"  => TokenType::SUPER,
    b"this"   => TokenType::THIS,
    b"true"   => TokenType::TRUE,
    b"var"    => TokenType::VAR,
    b"while"  => TokenType::WHILE,
};

pub struct Scanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    start: usize, // first byte of the lexeme being scanned
    pos: usize,   // next byte to look at
    line: usize,
    done: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        info!("Scanner created over {} bytes", text.len());

        Self {
            text,
            bytes: text.as_bytes(),
            start: 0,
            pos: 0,
            line: 1,
            done: false,
        }
    }

    /// Drain the scanner, splitting tokens from errors.
    pub fn scan_all(self) -> (Vec<Token>, Vec<LoxError>) {
        let mut tokens = Vec::new();
        let mut errors = Vec::new();

        for result in self {
            match result {
                Ok(token) => tokens.push(token),
                Err(e) => errors.push(e),
            }
        }

        debug!("Scanned {} tokens, {} errors", tokens.len(), errors.len());
        (tokens, errors)
    }

    // ── byte cursor ──────────────────────────────────────────────────────

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    #[inline(always)]
    fn bump(&mut self) -> u8 {
        let b = self.bytes[self.pos];
        self.pos += 1;
        b
    }

    /// Byte `ahead` positions past the cursor, or `0` past the end.
    #[inline(always)]
    fn peek_at(&self, ahead: usize) -> u8 {
        self.bytes.get(self.pos + ahead).copied().unwrap_or(0)
    }

    #[inline(always)]
    fn eat(&mut self, expected: u8) -> bool {
        let hit = self.peek_at(0) == expected && !self.is_at_end();
        if hit {
            self.pos += 1;
        }
        hit
    }

    #[inline(always)]
    fn one_or_two(&mut self, second: u8, two: TokenType, one: TokenType) -> TokenType {
        if self.eat(second) {
            two
        } else {
            one
        }
    }

    fn lexeme(&self) -> &'a str {
        &self.text[self.start..self.pos]
    }

    // ── token rules ──────────────────────────────────────────────────────

    /// Scan from `self.start`.  `Ok(None)` means whitespace or a comment was
    /// consumed and nothing should be emitted.
    fn scan_token(&mut self) -> Result<Option<TokenType>> {
        let tt = match self.bump() {
            b'(' => TokenType::LEFT_PAREN,
            b')' => TokenType::RIGHT_PAREN,
            b'{' => TokenType::LEFT_BRACE,
            b'}' => TokenType::RIGHT_BRACE,
            b',' => TokenType::COMMA,
            b'.' => TokenType::DOT,
            b'-' => TokenType::MINUS,
            b'+' => TokenType::PLUS,
            b';' => TokenType::SEMICOLON,
            b'*' => TokenType::STAR,
            b'%' => TokenType::PERCENT,

            b'!' => self.one_or_two(b'=', TokenType::BANG_EQUAL, TokenType::BANG),
            b'=' => self.one_or_two(b'=', TokenType::EQUAL_EQUAL, TokenType::EQUAL),
            b'<' => self.one_or_two(b'=', TokenType::LESS_EQUAL, TokenType::LESS),
            b'>' => self.one_or_two(b'=', TokenType::GREATER_EQUAL, TokenType::GREATER),

            b'/' if self.eat(b'/') => {
                self.pos = memchr(b'\n', &self.bytes[self.pos..])
                    .map_or(self.bytes.len(), |offset| self.pos + offset);
                return Ok(None);
            }
            b'/' => TokenType::SLASH,

            b' ' | b'\r' | b'\t' => return Ok(None),
            b'\n' => {
                self.line += 1;
                return Ok(None);
            }

            b'"' => self.string()?,
            b'0'..=b'9' => self.number(),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.identifier(),

            _ => {
                // continuation bytes belong to the same character
                while self.peek_at(0) & 0xC0 == 0x80 {
                    self.pos += 1;
                }

                return Err(LoxError::lex(
                    self.line,
                    format!("Unexpected character: {}", self.lexeme()),
                ));
            }
        };

        Ok(Some(tt))
    }

    /// String literals may span lines; the token carries the text between
    /// the quotes.
    fn string(&mut self) -> Result<TokenType> {
        while !self.is_at_end() && self.peek_at(0) != b'"' {
            if self.bump() == b'\n' {
                self.line += 1;
            }
        }

        if self.is_at_end() {
            return Err(LoxError::lex(self.line, "Unterminated string."));
        }

        self.pos += 1;

        let body = &self.text[self.start + 1..self.pos - 1];
        Ok(TokenType::STRING(body.to_owned()))
    }

    fn number(&mut self) -> TokenType {
        while self.peek_at(0).is_ascii_digit() {
            self.pos += 1;
        }

        // a trailing '.' without digits is left for the DOT token
        if self.peek_at(0) == b'.' && self.peek_at(1).is_ascii_digit() {
            self.pos += 1;
            while self.peek_at(0).is_ascii_digit() {
                self.pos += 1;
            }
        }

        // digits with at most one interior '.' always parse
        TokenType::NUMBER(self.lexeme().parse().unwrap_or(0.0))
    }

    fn identifier(&mut self) -> TokenType {
        while matches!(self.peek_at(0), b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_') {
            self.pos += 1;
        }

        KEYWORDS
            .get(self.lexeme().as_bytes())
            .cloned()
            .unwrap_or(TokenType::IDENTIFIER)
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        while !self.is_at_end() {
            self.start = self.pos;

            match self.scan_token() {
                Ok(Some(tt)) => {
                    debug!("Scanned {:?} on line {}", tt, self.line);
                    return Some(Ok(Token::new(tt, self.lexeme(), self.line)));
                }
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }

        self.done = true;
        Some(Ok(Token::new(TokenType::EOF, "", self.line)))
    }
}

impl<'a> FusedIterator for Scanner<'a> {}
