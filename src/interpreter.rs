use crate::{
    ast::{self, Node},
    environment::{Environment, GLOBAL_SCOPE},
    error::{Error, Result},
    parser,
    token::{Token, TokenKind},
    value::Value,
};

pub struct Interpreter {
    environment: Environment,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter { environment: Environment::new() }
    }

    // Runs a source unit and renders the value of its last statement. The
    // symbol table carries over between calls on the same instance, so a
    // prompt session accumulates bindings; errors leave bindings made by
    // earlier statements in place.
    pub fn interpret(&mut self, file_name: &str, source: &str) -> Result<String> {
        let tree = parser::parse(file_name, source)?;
        let value = self.evaluate(&Node::SourceFile(tree))?;
        Ok(value.to_string())
    }

    fn evaluate(&mut self, n: &Node) -> Result<Value> {
        n.accept(self)
    }

    fn execute_list(&mut self, list: &ast::StatementList) -> Result<Value> {
        let mut value = Value::Text(String::new());
        for statement in list.statements.iter() {
            value = self.evaluate(statement)?;
        }
        Ok(value)
    }
}

impl ast::Visitor<Result<Value>> for Interpreter {
    fn visit_integer_literal(&mut self, n: &ast::IntegerLiteral) -> Result<Value> {
        match n.text.parse::<i64>() {
            Ok(number) => Ok(Value::Integer(number)),
            Err(_) => Err(Error::runtime(
                n.token.clone(),
                format!("Could not convert {} into an integer", n.text),
            )),
        }
    }

    fn visit_string_literal(&mut self, n: &ast::StringLiteral) -> Result<Value> {
        Ok(Value::Text(n.text.clone()))
    }

    fn visit_bool_literal(&mut self, n: &ast::BoolLiteral) -> Result<Value> {
        match n.text.parse::<bool>() {
            Ok(b) => Ok(Value::Boolean(b)),
            Err(_) => Err(Error::runtime(
                n.token.clone(),
                format!("Could not convert {} into a boolean", n.text),
            )),
        }
    }

    fn visit_identifier(&mut self, n: &ast::Identifier) -> Result<Value> {
        self.environment.get(GLOBAL_SCOPE, &n.token)
    }

    fn visit_unary_expr(&mut self, n: &ast::Unary) -> Result<Value> {
        let right = self.evaluate(n.right.as_ref())?;

        use Value::{Boolean, Integer};
        match (&n.op.kind, right) {
            (TokenKind::Minus, Integer(right)) => Ok(Integer(right.wrapping_neg())),
            (TokenKind::Plus, Integer(right)) => Ok(Integer(right)),
            (TokenKind::Minus, _) | (TokenKind::Plus, _) => {
                Err(Error::runtime(n.op.clone(), "Operand must be an integer."))
            },
            (TokenKind::Bang, Boolean(right)) => Ok(Boolean(!right)),
            (TokenKind::Bang, _) => Err(Error::runtime(n.op.clone(), "Operand must be a boolean.")),
            _ => unreachable!(),
        }
    }

    // Both operands are always evaluated before the operator is applied;
    // '&&' and '||' do not short-circuit.
    fn visit_binary_expr(&mut self, n: &ast::Binary) -> Result<Value> {
        let left = self.evaluate(n.left.as_ref())?;
        let right = self.evaluate(n.right.as_ref())?;

        use TokenKind::*;
        match n.op.kind {
            Plus => compute_if_integers(&n.op, left, right, |l, r| l.wrapping_add(r)),
            Minus => compute_if_integers(&n.op, left, right, |l, r| l.wrapping_sub(r)),
            Star => compute_if_integers(&n.op, left, right, |l, r| l.wrapping_mul(r)),
            Slash => match (left, right) {
                (Value::Integer(_), Value::Integer(0)) => {
                    Err(Error::runtime(n.op.clone(), "Division by zero."))
                },
                (left, right) => compute_if_integers(&n.op, left, right, |l, r| l.wrapping_div(r)),
            },
            Caret => compute_if_integers(&n.op, left, right, |l, r| {
                (l as f64).powf(r as f64) as i64
            }),
            And => compute_if_booleans(&n.op, left, right, |l, r| l && r),
            Or => compute_if_booleans(&n.op, left, right, |l, r| l || r),
            PlusPlus => Ok(Value::Text(format!("{}{}", left, right))),
            EqualEqual => Ok(Value::Boolean(left.to_string() == right.to_string())),
            BangEqual => Ok(Value::Boolean(left.to_string() != right.to_string())),
            _ => unreachable!(),
        }
    }

    fn visit_assign_expr(&mut self, n: &ast::Assign) -> Result<Value> {
        let value = self.evaluate(n.value.as_ref())?;
        self.environment.define(GLOBAL_SCOPE, n.target.name.clone(), value.clone());
        Ok(value)
    }

    fn visit_block_stmt(&mut self, n: &ast::Block) -> Result<Value> {
        self.execute_list(&n.statements)
    }

    fn visit_statement_list(&mut self, n: &ast::StatementList) -> Result<Value> {
        self.execute_list(n)
    }

    // Declarations are checked by the parser but carry no runtime behavior;
    // there is no call operation to reach them.
    fn visit_function_decl(&mut self, _n: &ast::FunctionDecl) -> Result<Value> {
        Ok(Value::Text(String::new()))
    }

    fn visit_source_file(&mut self, n: &ast::SourceFile) -> Result<Value> {
        self.execute_list(&n.statements)
    }
}

fn compute_if_integers<T: Into<Value>>(
    op: &Token,
    left: Value,
    right: Value,
    f: impl Fn(i64, i64) -> T,
) -> Result<Value> {
    use Value::Integer;
    if let Integer(left) = left {
        if let Integer(right) = right {
            return Ok(f(left, right).into());
        }
    }
    Err(Error::runtime(op.clone(), "Operands must be integers."))
}

fn compute_if_booleans<T: Into<Value>>(
    op: &Token,
    left: Value,
    right: Value,
    f: impl Fn(bool, bool) -> T,
) -> Result<Value> {
    use Value::Boolean;
    if let Boolean(left) = left {
        if let Boolean(right) = right {
            return Ok(f(left, right).into());
        }
    }
    Err(Error::runtime(op.clone(), "Operands must be booleans."))
}
