// Type Expression Parser
//
// This module implements a recursive descent parser that converts type
// expression tokens into a `Type` value.
//
//   type       := simple | simple '(' params ')' | ARRAY '<' type '>' | STRUCT '<' fields '>'
//   fields     := field (',' field)*
//   field      := name type
//   params     := param (',' param)*

use log::trace;

use crate::types::{StructField, Type, TypeKind};
use super::error::{ParseResult, TypeParseError};
use super::lexer::{Lexer, Token, TokenType};

/// Deepest `ARRAY`/`STRUCT` nesting accepted by default
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Parser for a single type expression.
///
/// Each parser owns its tokens and cursor, so separate parsers can run on
/// separate threads without coordination. Nesting deeper than `max_depth`
/// fails with a `TypeParseError` instead of exhausting the stack.
pub struct TypeParser<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    cursor: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> TypeParser<'a> {
    /// Create a new parser from a type expression string
    pub fn new(input: &'a str) -> Self {
        TypeParser {
            input,
            tokens: Lexer::new(input).tokenize(),
            cursor: 0,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit how deeply types may nest
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse the whole input as exactly one type
    pub fn parse(mut self) -> ParseResult<Type> {
        self.check_brackets()?;

        let parsed = self.parse_type()?;

        let token = self.current();
        if token.token_type != TokenType::EOF {
            return Err(TypeParseError::new(
                "unexpected input after complete type",
                &self.input[token.position..],
                token.position,
            ));
        }

        trace!("Parsed type expression '{}' as {}", self.input, parsed);
        Ok(parsed)
    }

    fn current(&self) -> &Token {
        // The token list always ends with EOF and the cursor never moves past it
        &self.tokens[self.cursor.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) {
        if self.cursor < self.tokens.len() - 1 {
            self.cursor += 1;
        }
    }

    fn current_is(&self, token_type: &TokenType) -> bool {
        &self.current().token_type == token_type
    }

    fn error_at_current(&self, message: &str) -> TypeParseError {
        let token = self.current();
        let near = match &token.token_type {
            TokenType::EOF => self.input.to_string(),
            _ => token.literal.clone(),
        };
        TypeParseError::new(message, near, token.position)
    }

    fn expect(&mut self, expected: TokenType, description: &str) -> ParseResult<()> {
        if self.current_is(&expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.error_at_current(&format!("expected {}, found {}", description, self.current())))
        }
    }

    /// Verify that every `<` and `(` has a matching closer of the same kind
    fn check_brackets(&self) -> ParseResult<()> {
        let mut open: Vec<&Token> = Vec::new();

        for token in &self.tokens {
            match token.token_type {
                TokenType::LessThan | TokenType::LeftParen => open.push(token),
                TokenType::GreaterThan | TokenType::RightParen => {
                    let opener = match open.pop() {
                        Some(opener) => opener,
                        None => {
                            return Err(TypeParseError::new(
                                format!("unmatched '{}'", token.literal),
                                &self.input[token.position..],
                                token.position,
                            ));
                        }
                    };
                    let matches = matches!(
                        (&opener.token_type, &token.token_type),
                        (TokenType::LessThan, TokenType::GreaterThan)
                            | (TokenType::LeftParen, TokenType::RightParen)
                    );
                    if !matches {
                        return Err(TypeParseError::new(
                            format!("'{}' closed by '{}'", opener.literal, token.literal),
                            &self.input[opener.position..],
                            opener.position,
                        ));
                    }
                }
                _ => {}
            }
        }

        match open.pop() {
            Some(opener) => Err(TypeParseError::new(
                format!("unmatched '{}'", opener.literal),
                &self.input[opener.position..],
                opener.position,
            )),
            None => Ok(()),
        }
    }

    fn parse_type(&mut self) -> ParseResult<Type> {
        if self.depth >= self.max_depth {
            return Err(self.error_at_current(&format!(
                "type nesting too deep (limit {})",
                self.max_depth
            )));
        }

        self.depth += 1;
        let parsed = self.parse_type_at_depth();
        self.depth -= 1;
        parsed
    }

    fn parse_type_at_depth(&mut self) -> ParseResult<Type> {
        let name = match &self.current().token_type {
            TokenType::IDENTIFIER(name) => name.clone(),
            TokenType::ILLEGAL(_) => return Err(self.error_at_current("illegal character")),
            TokenType::EOF => return Err(self.error_at_current("unexpected end of input")),
            _ => return Err(self.error_at_current(&format!("expected a type, found {}", self.current()))),
        };

        if name.eq_ignore_ascii_case("ARRAY") {
            self.advance();
            self.parse_array()
        } else if name.eq_ignore_ascii_case("STRUCT") {
            self.advance();
            self.parse_struct()
        } else {
            let kind = TypeKind::from_name(&name)
                .ok_or_else(|| self.error_at_current("unknown type"))?;
            self.advance();

            // Parameters are validated but not kept
            if self.current_is(&TokenType::LeftParen) {
                self.parse_parameters()?;
            }
            Ok(Type::Simple(kind))
        }
    }

    fn parse_array(&mut self) -> ParseResult<Type> {
        self.expect(TokenType::LessThan, "'<' after ARRAY")?;
        let element_type = self.parse_type()?;
        self.expect(TokenType::GreaterThan, "'>' closing ARRAY")?;
        Ok(Type::array(element_type))
    }

    fn parse_struct(&mut self) -> ParseResult<Type> {
        self.expect(TokenType::LessThan, "'<' after STRUCT")?;

        if self.current_is(&TokenType::GreaterThan) {
            return Err(self.error_at_current("empty STRUCT field list"));
        }

        let mut fields = Vec::new();
        loop {
            let field_name = match &self.current().token_type {
                TokenType::IDENTIFIER(name) | TokenType::QuotedIdentifier(name) => name.clone(),
                _ => return Err(self.error_at_current(&format!("expected a field name, found {}", self.current()))),
            };
            self.advance();

            let field_type = self.parse_type()?;
            fields.push(StructField::new(field_name, field_type));

            if self.current_is(&TokenType::COMMA) {
                self.advance();
            } else {
                break;
            }
        }

        self.expect(TokenType::GreaterThan, "',' or '>' in STRUCT")?;
        Ok(Type::Struct(fields))
    }

    fn parse_parameters(&mut self) -> ParseResult<()> {
        self.expect(TokenType::LeftParen, "'('")?;

        loop {
            let is_parameter = matches!(
                self.current().token_type,
                TokenType::NUMBER(_) | TokenType::IDENTIFIER(_)
            );
            if !is_parameter {
                return Err(self.error_at_current("malformed type parameter list"));
            }
            self.advance();

            if self.current_is(&TokenType::COMMA) {
                self.advance();
            } else {
                break;
            }
        }

        self.expect(TokenType::RightParen, "')' closing type parameters")
    }
}

/// Parse a type expression such as `ARRAY<STRUCT<a STRING, b INT64>>`
pub fn parse_type(input: &str) -> ParseResult<Type> {
    TypeParser::new(input).parse()
}
