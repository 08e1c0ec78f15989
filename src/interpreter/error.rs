use std::{
    error::Error,
    fmt::{self, Display},
};

use crate::data::LoxIdent;

#[derive(Debug)]
pub enum RuntimeError {
    UnsupportedType {
        message: String,
        line: usize,
    },

    UndefinedVariable {
        ident: LoxIdent,
    },

    UndefinedProperty {
        ident: LoxIdent,
    },

    BadArity {
        expected: usize,
        got: usize,
        line: usize,
    },
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use RuntimeError::*;
        match self {
            UnsupportedType { message, line } => {
                write!(f, "[line {}] Error: {}", line, message)
            }
            UndefinedVariable { ident } => {
                write!(
                    f,
                    "[line {}] Error: Undefined variable '{}'.",
                    ident.line, ident.name
                )
            }
            UndefinedProperty { ident } => {
                write!(
                    f,
                    "[line {}] Error: Undefined property '{}'.",
                    ident.line, ident.name
                )
            }
            BadArity {
                expected,
                got,
                line,
            } => {
                write!(
                    f,
                    "[line {}] Error: Expected {} arguments but got {}.",
                    line, expected, got
                )
            }
        }
    }
}

impl Error for RuntimeError {}
