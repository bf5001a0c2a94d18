use std::result;
use std::fmt::{self, Display};

use crate::token::{Position, Token, TokenKind};

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    Lexical { position: Position },
    Syntactic { token: Token },
    Runtime { token: Token },
    Unexpected,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    pub fn lexical<S: Into<String>>(position: Position, message: S) -> Error {
        let kind = ErrorKind::Lexical { position };
        Error { kind, message: message.into() }
    }

    pub fn syntactic<S: Into<String>>(token: Token, message: S) -> Error {
        let kind = ErrorKind::Syntactic { token };
        Error { kind, message: message.into() }
    }

    pub fn runtime<S: Into<String>>(token: Token, message: S) -> Error {
        let kind = ErrorKind::Runtime { token };
        Error { kind, message: message.into() }
    }

    pub fn unexpected() -> Error {
        let kind = ErrorKind::Unexpected;
        Error { kind, message: "Unexpected end of input.".into() }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn is_runtime_error(&self) -> bool {
        match self.kind() {
            ErrorKind::Runtime { token: _ } => true,
            _ => false,
        }
    }

    fn position(&self) -> Option<&Position> {
        use ErrorKind::*;
        match self.kind() {
            Unexpected => None,
            Lexical { position } => Some(position),
            Syntactic { token } | Runtime { token } => Some(&token.position),
        }
    }

    fn loc(&self) -> String {
        use ErrorKind::*;
        match self.kind() {
            Syntactic { token } | Runtime { token } => {
                if token.kind == TokenKind::EndOfFile {
                    " at end".to_string()
                } else if token.lexeme.is_empty() {
                    "".to_string()
                } else {
                    format!(" at {}", token.lexeme)
                }
            },
            _ => "".to_string(),
        }
    }
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position() {
            Some(position) => write!(f, "[{}] Error{}: {}", position, self.loc(), self.message),
            None => write!(f, "Error: {}", self.message),
        }
    }
}

impl From<Error> for std::io::Error {
    fn from(e: Error) -> std::io::Error {
        use std::io::ErrorKind::*;
        std::io::Error::new(Other, e)
    }
}
