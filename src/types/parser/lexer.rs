// Type Expression Lexer
//
// This module implements a lexer that tokenizes type expressions such as
// `ARRAY<STRUCT<f1 STRING, f2 NUMERIC(10, 2)>>`.

use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

/// Type expression token types
#[derive(Debug, PartialEq, Clone)]
pub enum TokenType {
    // Keywords, type names and field names
    IDENTIFIER(String),
    // Backtick-quoted field names
    QuotedIdentifier(String),
    // Parameter digits
    NUMBER(String),

    LessThan,       // <
    GreaterThan,    // >
    LeftParen,      // (
    RightParen,     // )
    COMMA,          // ,

    EOF,
    ILLEGAL(String),
}

/// A lexical unit of a type expression
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub literal: String,
    /// Byte offset of the token in the input
    pub position: usize,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.token_type {
            TokenType::EOF => write!(f, "end of input"),
            _ => write!(f, "'{}'", self.literal),
        }
    }
}

/// Lexer for breaking a type expression into tokens
pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    ch: Option<char>,
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer over a type expression
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer {
            input,
            chars: input.char_indices().peekable(),
            ch: None,
            position: 0,
        };
        lexer.read_char();
        lexer
    }

    /// Tokenize the whole input. The last token is always `EOF`.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.token_type == TokenType::EOF;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    fn read_char(&mut self) -> Option<char> {
        match self.chars.next() {
            Some((position, ch)) => {
                self.position = position;
                self.ch = Some(ch);
            }
            None => {
                self.position = self.input.len();
                self.ch = None;
            }
        }
        self.ch
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, ch)| ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.ch {
            if ch.is_whitespace() {
                self.read_char();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut identifier = String::new();
        if let Some(ch) = self.ch {
            identifier.push(ch);
        }

        while let Some(next_ch) = self.peek_char() {
            if is_letter(next_ch) || next_ch.is_ascii_digit() {
                identifier.push(next_ch);
                self.read_char();
            } else {
                break;
            }
        }

        self.read_char();
        identifier
    }

    fn read_number(&mut self) -> String {
        let mut number = String::new();
        if let Some(ch) = self.ch {
            number.push(ch);
        }

        while let Some(next_ch) = self.peek_char() {
            if next_ch.is_ascii_digit() {
                number.push(next_ch);
                self.read_char();
            } else {
                break;
            }
        }

        self.read_char();
        number
    }

    /// Read a backtick-quoted identifier. Returns `None` when the closing
    /// backtick is missing.
    fn read_quoted_identifier(&mut self) -> Option<String> {
        let mut identifier = String::new();

        // Skip opening backtick
        self.read_char();

        while let Some(ch) = self.ch {
            if ch == '`' {
                self.read_char();
                return Some(identifier);
            }
            identifier.push(ch);
            self.read_char();
        }

        None
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.position;
        let ch = match self.ch {
            Some(ch) => ch,
            None => {
                return Token {
                    token_type: TokenType::EOF,
                    literal: String::new(),
                    position: start,
                };
            }
        };

        let token_type = match ch {
            '<' => TokenType::LessThan,
            '>' => TokenType::GreaterThan,
            '(' => TokenType::LeftParen,
            ')' => TokenType::RightParen,
            ',' => TokenType::COMMA,
            '`' => {
                let token_type = match self.read_quoted_identifier() {
                    Some(name) => TokenType::QuotedIdentifier(name),
                    None => TokenType::ILLEGAL(self.input[start..].to_string()),
                };
                return Token {
                    token_type,
                    literal: self.input[start..self.position].to_string(),
                    position: start,
                };
            }
            _ if is_letter(ch) => {
                let identifier = self.read_identifier();
                return Token {
                    token_type: TokenType::IDENTIFIER(identifier.clone()),
                    literal: identifier,
                    position: start,
                };
            }
            _ if ch.is_ascii_digit() => {
                let number = self.read_number();
                return Token {
                    token_type: TokenType::NUMBER(number.clone()),
                    literal: number,
                    position: start,
                };
            }
            _ => TokenType::ILLEGAL(ch.to_string()),
        };

        self.read_char();
        Token {
            token_type,
            literal: ch.to_string(),
            position: start,
        }
    }
}

fn is_letter(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}
