use crate::{
    error::{Error, Result},
    token::{Position, Token, TokenKind},
};
use peekmore::{PeekMore, PeekMoreIterator};
use phf::phf_map;
use std::str::Chars;

static KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "false" => TokenKind::Bool,
    "func" => TokenKind::Func,
    "true" => TokenKind::Bool,
};

pub struct Scanner<'a> {
    src: PeekMoreIterator<Chars<'a>>,
    file: String,
    lexeme_buffer: String,
    line: usize,
    column: usize,
    depth: usize,
    pending: Vec<Token>,
    done: bool,
}

impl <'a> Iterator for Scanner<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Result<Token>> {
        if let Some(token) = self.pending.pop() {
            return Some(Ok(token));
        }
        if self.done {
            return None;
        }
        if self.src.peek().is_none() {
            self.finish();
            return self.next();
        }

        let position = self.current_position();
        let kind = self.next_token_kind(&position);

        let lexeme = self.lexeme_buffer.clone();
        self.lexeme_buffer.clear();

        match kind {
            None => self.next(),
            Some(Ok(kind)) => Some(Ok(Token { kind, lexeme, position })),
            Some(Err(e)) => {
                self.done = true;
                Some(Err(e))
            },
        }
    }
}

impl <'a> Scanner<'a> {
    pub fn new(file_name: &str, src: &'a str) -> Self {
        Self {
            src: src.chars().peekmore(),
            file: file_name.to_string(),
            lexeme_buffer: String::new(),
            line: 1,
            column: 1,
            depth: 0,
            pending: Vec::new(),
            done: false,
        }
    }

    pub fn scan_tokens(self) -> Result<Vec<Token>> {
        self.collect()
    }

    fn next_token_kind(&mut self, position: &Position) -> Option<Result<TokenKind>> {
        let next_char = self.advance()?;
        self.lexeme_buffer.push(next_char);

        use TokenKind::*;
        match next_char {
            '(' => Some(Ok(LeftParen)),
            ')' => Some(Ok(RightParen)),
            ',' => Some(Ok(Comma)),
            '-' => Some(Ok(Minus)),
            '*' => Some(Ok(Star)),
            '/' => Some(Ok(Slash)),
            '^' => Some(Ok(Caret)),
            '+' => Some(Ok(if self.does_next_match('+') { PlusPlus } else { Plus })),
            ':' => Some(Ok(if self.does_next_match('=') { Assign } else { Colon })),
            '!' => Some(Ok(if self.does_next_match('=') { BangEqual } else { Bang })),
            '=' => Some(if self.does_next_match('=') {
                Ok(EqualEqual)
            } else {
                Err(Error::lexical(position.clone(), "Unexpected character '=', expected '=='"))
            }),
            '&' => Some(if self.does_next_match('&') {
                Ok(And)
            } else {
                Err(Error::lexical(position.clone(), "Unexpected character '&', expected '&&'"))
            }),
            '|' => Some(if self.does_next_match('|') {
                Ok(Or)
            } else {
                Err(Error::lexical(position.clone(), "Unexpected character '|', expected '||'"))
            }),
            ' ' | '\r' | '\t' => None,
            '\n' => {
                self.lexeme_buffer.clear();
                Some(self.classify_line_break(position))
            },
            '"' => Some(self.extract_string(position)),
            c if c.is_digit(10) => Some(Ok(self.extract_integer())),
            c if can_start_identifier(&c) => Some(Ok(self.extract_identifier())),
            c => Some(Err(Error::lexical(position.clone(), format!("Unexpected character '{}'", c)))),
        }
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.src.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn does_next_match(&mut self, c: char) -> bool {
        match self.src.peek() {
            Some(next) if c == *next => {
                let next = self.advance().unwrap();
                self.lexeme_buffer.push(next);
                true
            }
            _ => false,
        }
    }

    // One EndOfLine for an unchanged depth, one BlockBegin or BlockEnd per
    // level opened or closed. Blank lines never change the depth.
    fn classify_line_break(&mut self, position: &Position) -> Result<TokenKind> {
        let levels = match self.measure_indent()? {
            None => return Ok(TokenKind::EndOfLine),
            Some(levels) => levels,
        };

        use std::cmp::Ordering::*;
        match levels.cmp(&self.depth) {
            Equal => Ok(TokenKind::EndOfLine),
            Greater => {
                self.push_pending(TokenKind::BlockBegin, levels - self.depth - 1, position);
                self.depth = levels;
                Ok(TokenKind::BlockBegin)
            },
            Less => {
                self.push_pending(TokenKind::BlockEnd, self.depth - levels - 1, position);
                self.depth = levels;
                Ok(TokenKind::BlockEnd)
            },
        }
    }

    // A level is one tab or four spaces. Returns None for a blank line.
    fn measure_indent(&mut self) -> Result<Option<usize>> {
        let mut tabs = 0;
        let mut spaces = 0;

        loop {
            match self.src.peek() {
                Some(&'\t') => tabs += 1,
                Some(&' ') => spaces += 1,
                Some(&'\n') | None => return Ok(None),
                Some(_) => break,
            }
            self.advance();
        }

        if spaces % 4 != 0 {
            return Err(Error::lexical(self.current_position(), "Misaligned indentation."));
        }
        Ok(Some(tabs + spaces / 4))
    }

    fn push_pending(&mut self, kind: TokenKind, count: usize, position: &Position) {
        for _ in 0..count {
            self.pending.push(Token {
                kind: kind.clone(),
                lexeme: String::new(),
                position: position.clone(),
            });
        }
    }

    // Closes every still-open block, then ends the stream with EndOfFile.
    fn finish(&mut self) {
        self.done = true;
        let position = self.current_position();
        self.pending.push(Token {
            kind: TokenKind::EndOfFile,
            lexeme: String::new(),
            position: position.clone(),
        });
        self.push_pending(TokenKind::BlockEnd, self.depth, &position);
        self.depth = 0;
    }

    fn extract_string(&mut self, position: &Position) -> Result<TokenKind> {
        self.lexeme_buffer.clear();

        loop {
            match self.src.peek() {
                None | Some(&'\n') => {
                    return Err(Error::lexical(position.clone(), "Unterminated string literal."))
                },
                Some(&'"') => {
                    self.advance();
                    return Ok(TokenKind::String);
                },
                Some(&'\\') => {
                    self.advance();
                    let decoded = match self.advance() {
                        Some('\\') => '\\',
                        Some('"') => '"',
                        Some('n') => '\n',
                        Some(c) => {
                            return Err(Error::lexical(
                                position.clone(),
                                format!("Invalid escape sequence '\\{}'", c),
                            ))
                        },
                        None => {
                            return Err(Error::lexical(position.clone(), "Unterminated string literal."))
                        },
                    };
                    self.lexeme_buffer.push(decoded);
                },
                Some(_) => {
                    let next = self.advance().unwrap();
                    self.lexeme_buffer.push(next);
                },
            }
        }
    }

    fn extract_integer(&mut self) -> TokenKind {
        self.advance_until(|n| !n.is_digit(10));
        TokenKind::Integer
    }

    fn extract_identifier(&mut self) -> TokenKind {
        self.advance_until(|n| !is_part_of_valid_identifier(n));

        match KEYWORDS.get(self.lexeme_buffer.as_str()) {
            Some(kind) => kind.clone(),
            None => TokenKind::Identifier,
        }
    }

    fn advance_until(&mut self, should_stop: impl Fn(&char) -> bool) {
        let is_done = |nxt: Option<&char>| nxt.is_none() || should_stop(nxt.unwrap());
        while !is_done(self.src.peek()) {
            let next = self.advance().unwrap();
            self.lexeme_buffer.push(next);
        }
    }

    // A method named position would resolve to Iterator::position on &mut self.
    fn current_position(&self) -> Position {
        Position::new(self.file.as_str(), self.line, self.column)
    }
}

fn can_start_identifier(c: &char) -> bool {
    c.is_ascii_alphabetic() || c == &'_'
}

fn is_part_of_valid_identifier(c: &char) -> bool {
    can_start_identifier(c) || c.is_digit(10)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::io;

    fn scan_kinds(source: &str) -> Result<Vec<TokenKind>> {
        let tokens = Scanner::new("test", source).scan_tokens()?;
        Ok(tokens.into_iter().map(|t| t.kind).collect())
    }

    #[test]
    fn scans_a_flat_expression() -> io::Result<()> {
        use TokenKind::*;
        assert_eq!(
            vec![Integer, Plus, Integer, Star, Identifier, EndOfFile],
            scan_kinds("1 + 23 * foo")?
        );
        Ok(())
    }

    #[test]
    fn scans_two_character_operators() -> io::Result<()> {
        use TokenKind::*;
        assert_eq!(
            vec![
                Identifier, Assign, Integer, PlusPlus, Integer, EqualEqual, Bool, BangEqual,
                Bool, And, Bool, Or, Bool, EndOfFile,
            ],
            scan_kinds("x := 1 ++ 2 == true != false && true || false")?
        );
        Ok(())
    }

    #[test]
    fn scans_keywords_and_identifiers() -> io::Result<()> {
        use TokenKind::*;
        assert_eq!(
            vec![Func, Bool, Bool, Identifier, Identifier, EndOfFile],
            scan_kinds("func true false truthy func_2")?
        );
        Ok(())
    }

    #[test]
    fn decodes_string_escapes() -> io::Result<()> {
        let tokens = Scanner::new("test", r#""foo\n\"bar\"\\""#).scan_tokens()?;
        assert_eq!(TokenKind::String, tokens[0].kind);
        assert_eq!("foo\n\"bar\"\\", tokens[0].lexeme);
        Ok(())
    }

    #[test]
    fn invalid_escape_is_an_error() {
        assert!(scan_kinds(r#""a\qb""#).is_err());
    }

    #[test]
    fn classifies_indentation_changes() -> io::Result<()> {
        use TokenKind::*;
        assert_eq!(
            vec![
                Identifier, BlockBegin, Identifier, EndOfLine, Identifier, BlockEnd,
                Identifier, EndOfFile,
            ],
            scan_kinds("a\n\tb\n\tc\nd")?
        );
        Ok(())
    }

    #[test]
    fn four_spaces_open_one_level() -> io::Result<()> {
        use TokenKind::*;
        assert_eq!(
            vec![Identifier, BlockBegin, Identifier, BlockEnd, Identifier, EndOfFile],
            scan_kinds("a\n    b\nc")?
        );
        Ok(())
    }

    #[test]
    fn blank_lines_do_not_change_depth() -> io::Result<()> {
        use TokenKind::*;
        let source = indoc! {"
            a

            b
        "};
        assert_eq!(
            vec![Identifier, EndOfLine, EndOfLine, Identifier, EndOfLine, EndOfFile],
            scan_kinds(source)?
        );
        Ok(())
    }

    #[test]
    fn open_blocks_flush_at_end_of_input() -> io::Result<()> {
        use TokenKind::*;
        assert_eq!(
            vec![
                Identifier, BlockBegin, Identifier, BlockBegin, Identifier, BlockEnd,
                BlockEnd, EndOfFile,
            ],
            scan_kinds("a\n\tb\n\t\tc")?
        );
        Ok(())
    }

    #[test]
    fn multi_level_changes_emit_one_token_per_level() -> io::Result<()> {
        use TokenKind::*;
        assert_eq!(
            vec![
                Identifier, BlockBegin, BlockBegin, Identifier, BlockEnd, BlockEnd,
                Identifier, EndOfFile,
            ],
            scan_kinds("a\n\t\tb\nc")?
        );
        Ok(())
    }

    #[test]
    fn misaligned_indentation_reports_its_position() {
        let e = scan_kinds("a\n  b").unwrap_err();
        assert_eq!("[test:2:3] Error: Misaligned indentation.", e.to_string());
    }

    #[test]
    fn bare_comparison_halves_are_errors() {
        for source in ["12 = 34", "true & false", "true | false"] {
            assert!(scan_kinds(source).is_err(), "source: {}", source);
        }
    }

    #[test]
    fn unterminated_string_reports_its_position() {
        let e = scan_kinds("x := \"abc").unwrap_err();
        assert_eq!("[test:1:6] Error: Unterminated string literal.", e.to_string());
    }

    #[test]
    fn tracks_line_and_column_positions() -> io::Result<()> {
        let tokens = Scanner::new("test", "foo := 1\nbar ++ 2").scan_tokens()?;
        let positions: Vec<(usize, usize)> = tokens
            .iter()
            .map(|t| (t.position.line, t.position.column))
            .collect();
        assert_eq!(
            vec![(1, 1), (1, 5), (1, 8), (1, 9), (2, 1), (2, 5), (2, 8), (2, 9)],
            positions
        );
        Ok(())
    }

    #[test]
    fn stops_scanning_after_the_first_error() {
        let mut scanner = Scanner::new("test", "@ 12");
        assert!(matches!(scanner.next(), Some(Err(_))));
        assert!(scanner.next().is_none());
    }
}
