use crate::{
    ast::*,
    buffer::TokenBuffer,
    error::{Error, Result},
    scanner::Scanner,
    token::{Token, TokenKind},
};

const UNARY_TOKENS: &[TokenKind] = &[
    TokenKind::Plus,
    TokenKind::Minus,
    TokenKind::Bang,
];

pub fn parse(file_name: &str, source: &str) -> Result<SourceFile> {
    let scanner = Scanner::new(file_name, source);
    Parser::new(scanner).parse()
}

pub struct Parser<T> {
    buffer: TokenBuffer<T>,
}

impl <T: Iterator<Item = Result<Token>>> Parser<T> {
    pub fn new(tokens: T) -> Self {
        Parser { buffer: TokenBuffer::new(tokens) }
    }

    pub fn parse(&mut self) -> Result<SourceFile> {
        self.source_file()
    }

    fn source_file(&mut self) -> Result<SourceFile> {
        self.skip_line_breaks()?;

        let mut functions = Vec::new();
        while self.check_next(&TokenKind::Func)? {
            functions.push(self.function_decl()?);
            self.skip_line_breaks()?;
        }

        let statements = self.statement_list()?;
        self.consume(&TokenKind::EndOfFile)?;

        Ok(SourceFile { functions, statements })
    }

    fn function_decl(&mut self) -> Result<FunctionDecl> {
        self.consume(&TokenKind::Func)?;
        let name = self.consume(&TokenKind::Identifier)?;
        let parameters = self.parameter_list()?;
        self.consume(&TokenKind::Colon)?;
        let return_type = self.consume(&TokenKind::Identifier)?;
        self.skip_line_breaks()?;
        let body = self.block()?;

        Ok(FunctionDecl { name, parameters, return_type, body })
    }

    fn parameter_list(&mut self) -> Result<Vec<Parameter>> {
        self.consume(&TokenKind::LeftParen)?;

        let mut parameters = Vec::new();
        if !self.check_next(&TokenKind::RightParen)? {
            loop {
                let name = self.consume(&TokenKind::Identifier)?;
                self.consume(&TokenKind::Colon)?;
                let type_name = self.consume(&TokenKind::Identifier)?;
                parameters.push(Parameter { name, type_name });

                if self.match_single(&TokenKind::Comma)?.is_none() {
                    break;
                }
            }
        }

        self.consume(&TokenKind::RightParen)?;
        Ok(parameters)
    }

    fn statement_list(&mut self) -> Result<StatementList> {
        let mut statements = Vec::new();

        loop {
            self.skip_line_breaks()?;
            let next = self.buffer.look_ahead(0)?;
            if next.kind == TokenKind::EndOfFile || next.kind == TokenKind::BlockEnd {
                break;
            }
            statements.push(self.statement()?);
        }

        Ok(StatementList { statements })
    }

    fn statement(&mut self) -> Result<Node> {
        if self.check_next(&TokenKind::BlockBegin)? {
            Ok(Node::Block(self.block()?))
        } else {
            self.simple_statement()
        }
    }

    fn block(&mut self) -> Result<Block> {
        let begin = self.consume(&TokenKind::BlockBegin)?;
        let statements = self.statement_list()?;
        let end = self.consume(&TokenKind::BlockEnd)?;

        Ok(Block { begin, statements, end })
    }

    // An identifier followed by ':=' opens an assignment; any other leading
    // token means the statement is a bare expression.
    fn simple_statement(&mut self) -> Result<Node> {
        if self.buffer.look_ahead(0)?.kind == TokenKind::Identifier
            && self.buffer.look_ahead(1)?.kind == TokenKind::Assign
        {
            self.assignment()
        } else {
            self.expression()
        }
    }

    fn assignment(&mut self) -> Result<Node> {
        let target = self.identifier()?;
        let op = self.consume(&TokenKind::Assign)?;
        let value = Box::new(self.expression()?);

        Ok(Node::Assign(Assign { op, target, value }))
    }

    fn identifier(&mut self) -> Result<Identifier> {
        let token = self.consume(&TokenKind::Identifier)?;
        let name = token.lexeme.clone();
        Ok(Identifier { token, name })
    }

    fn expression(&mut self) -> Result<Node> {
        self.binary_expression(1)
    }

    // Precedence climbing: fold in binary operators at or above the given
    // precedence, recursing one precedence higher for left-associative
    // operators and at the same precedence for right-associative ones.
    fn binary_expression(&mut self, min_precedence: u8) -> Result<Node> {
        let mut left = self.unary_expression()?;

        loop {
            let (precedence, associativity) =
                match binary_operator(&self.buffer.look_ahead(0)?.kind) {
                    Some((precedence, _)) if precedence < min_precedence => break,
                    Some(op) => op,
                    None => break,
                };

            let op = self.buffer.consume()?;
            let next_min = match associativity {
                Associativity::Left => precedence + 1,
                Associativity::Right => precedence,
            };
            let right = Box::new(self.binary_expression(next_min)?);
            left = Node::Binary(Binary { left: Box::new(left), op, right });
        }

        Ok(left)
    }

    fn unary_expression(&mut self) -> Result<Node> {
        if let Some(op) = self.match_any(UNARY_TOKENS)? {
            let right = Box::new(self.unary_expression()?);
            Ok(Node::Unary(Unary { op, right }))
        } else {
            self.primary()
        }
    }

    fn primary(&mut self) -> Result<Node> {
        let token = self.buffer.consume()?;

        match token.kind {
            TokenKind::Integer => Ok(Node::IntegerLiteral(IntegerLiteral {
                text: token.lexeme.clone(),
                token,
            })),
            TokenKind::String => Ok(Node::StringLiteral(StringLiteral {
                text: token.lexeme.clone(),
                token,
            })),
            TokenKind::Bool => Ok(Node::BoolLiteral(BoolLiteral {
                text: token.lexeme.clone(),
                token,
            })),
            TokenKind::Identifier => Ok(Node::Identifier(Identifier {
                name: token.lexeme.clone(),
                token,
            })),
            TokenKind::LeftParen => {
                let expression = self.expression()?;
                self.consume(&TokenKind::RightParen)?;
                Ok(expression)
            },
            _ => Err(Error::syntactic(token, "Expected an expression.")),
        }
    }

    fn skip_line_breaks(&mut self) -> Result<()> {
        while self.match_single(&TokenKind::EndOfLine)?.is_some() {}
        Ok(())
    }

    fn consume(&mut self, kind: &TokenKind) -> Result<Token> {
        let token = self.buffer.consume()?;
        if &token.kind == kind {
            Ok(token)
        } else {
            let message = format!(
                "expected next token to be {:?}, got {:?} instead",
                kind, token.kind
            );
            Err(Error::syntactic(token, message))
        }
    }

    fn match_single(&mut self, kind: &TokenKind) -> Result<Option<Token>> {
        if self.check_next(kind)? {
            Ok(Some(self.buffer.consume()?))
        } else {
            Ok(None)
        }
    }

    fn match_any(&mut self, kinds: &[TokenKind]) -> Result<Option<Token>> {
        for kind in kinds.iter() {
            if let Some(token) = self.match_single(kind)? {
                return Ok(Some(token));
            }
        }
        Ok(None)
    }

    fn check_next(&mut self, kind: &TokenKind) -> Result<bool> {
        Ok(&self.buffer.look_ahead(0)?.kind == kind)
    }
}

enum Associativity {
    Left,
    Right,
}

fn binary_operator(kind: &TokenKind) -> Option<(u8, Associativity)> {
    use Associativity::*;
    use TokenKind::*;
    match kind {
        Or => Some((1, Left)),
        And => Some((2, Left)),
        EqualEqual | BangEqual => Some((3, Left)),
        Plus | Minus | PlusPlus => Some((4, Left)),
        Star | Slash => Some((5, Left)),
        Caret => Some((6, Right)),
        _ => None,
    }
}
