use std::{
    error::Error,
    fmt::{self, Display},
};

use crate::token::{Token, TokenKind};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    Error {
        message: String,
        line: usize,
    },

    UnexpectedToken {
        message: String,
        offending: Token,
    },
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParseError::*;
        match self {
            Error { message, line } => write!(f, "[line {}] Error: {}", line, message),
            UnexpectedToken { message, offending } => {
                if offending.kind == TokenKind::Eof {
                    write!(f, "[end of file] Error: {}", message)
                } else {
                    write!(f, "[line {}] Error: {}", offending.line, message)
                }
            }
        }
    }
}

impl Error for ParseError {}

impl ParseError {
    /// Checks if the error allows REPL continuation, i.e. whether the input
    /// was merely incomplete rather than malformed.
    pub fn allows_continuation(&self) -> bool {
        matches!(
            self,
            ParseError::UnexpectedToken { offending, .. } if offending.kind == TokenKind::Eof
        )
    }
}
