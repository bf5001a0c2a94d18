use crate::ast::{self, Node};

pub fn print(n: &Node) -> String {
    let mut printer = AstPrinter {};
    n.accept(&mut printer)
}

struct AstPrinter;

impl AstPrinter {
    fn parenthesize(&mut self, name: &str, nodes: &[&Node]) -> String {
        let mut s = String::new();
        s.push('(');
        s.push_str(name);

        for n in nodes.iter() {
            s.push(' ');
            s.push_str(n.accept(self).as_str());
        }

        s.push(')');
        s
    }

    fn list(&mut self, l: &ast::StatementList) -> String {
        l.statements
            .iter()
            .map(|s| s.accept(self))
            .collect::<Vec<String>>()
            .join(" ")
    }

    fn block(&mut self, b: &ast::Block) -> String {
        format!("(block {})", self.list(&b.statements))
    }

    fn function(&mut self, f: &ast::FunctionDecl) -> String {
        let parameters = f
            .parameters
            .iter()
            .map(|p| format!("({} {})", p.name.lexeme, p.type_name.lexeme))
            .collect::<Vec<String>>()
            .join(" ");
        format!(
            "(func {} ({}) {} {})",
            f.name.lexeme,
            parameters,
            f.return_type.lexeme,
            self.block(&f.body)
        )
    }
}

impl ast::Visitor<String> for AstPrinter {
    fn visit_integer_literal(&mut self, n: &ast::IntegerLiteral) -> String {
        n.text.clone()
    }

    fn visit_string_literal(&mut self, n: &ast::StringLiteral) -> String {
        n.text.clone()
    }

    fn visit_bool_literal(&mut self, n: &ast::BoolLiteral) -> String {
        n.text.clone()
    }

    fn visit_identifier(&mut self, n: &ast::Identifier) -> String {
        n.name.clone()
    }

    fn visit_unary_expr(&mut self, n: &ast::Unary) -> String {
        self.parenthesize(n.op.lexeme.as_str(), &[n.right.as_ref()])
    }

    fn visit_binary_expr(&mut self, n: &ast::Binary) -> String {
        self.parenthesize(n.op.lexeme.as_str(), &[n.left.as_ref(), n.right.as_ref()])
    }

    fn visit_assign_expr(&mut self, n: &ast::Assign) -> String {
        let value = n.value.accept(self);
        format!("({} {} {})", n.op.lexeme, n.target.name, value)
    }

    fn visit_block_stmt(&mut self, n: &ast::Block) -> String {
        self.block(n)
    }

    fn visit_statement_list(&mut self, n: &ast::StatementList) -> String {
        self.list(n)
    }

    fn visit_function_decl(&mut self, n: &ast::FunctionDecl) -> String {
        self.function(n)
    }

    fn visit_source_file(&mut self, n: &ast::SourceFile) -> String {
        let mut parts = Vec::new();
        for function in n.functions.iter() {
            parts.push(self.function(function));
        }

        let statements = self.list(&n.statements);
        if !statements.is_empty() {
            parts.push(statements);
        }

        format!("(source {})", parts.join(" "))
    }
}
