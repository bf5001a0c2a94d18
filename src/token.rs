use std::fmt::{self, Display};

#[derive(Debug, PartialEq, Clone)]
pub struct Position {
    pub(crate) file: String,
    pub(crate) line: usize,
    pub(crate) column: usize,
}

impl Position {
    pub(crate) fn new<S: Into<String>>(file: S, line: usize, column: usize) -> Self {
        Position { file: file.into(), line, column }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) lexeme: String,
    pub(crate) position: Position,
}

#[derive(Debug, PartialEq, Clone)]
pub enum TokenKind {
    LeftParen, RightParen, Comma, Colon,

    Plus, PlusPlus, Minus, Star, Slash, Caret,
    Bang, BangEqual, EqualEqual,
    And, Or, Assign,

    Identifier, Integer, String, Bool,

    Func,

    EndOfLine, BlockBegin, BlockEnd, EndOfFile,
}

#[cfg(test)]
impl Token {
    pub(crate) fn make<S: Into<String>>(kind: TokenKind, lexeme: S) -> Token {
        Token {
            kind,
            lexeme: lexeme.into(),
            position: Position::new("test", 1, 1),
        }
    }
}
