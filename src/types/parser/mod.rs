// Type Grammar Parser Module
//
// Turns textual type expressions into `Type` values.

pub mod error;
pub mod lexer;
pub mod parser;

pub use self::error::{ParseResult, TypeParseError};
pub use self::lexer::{Lexer, Token, TokenType};
pub use self::parser::{parse_type, TypeParser, DEFAULT_MAX_DEPTH};
