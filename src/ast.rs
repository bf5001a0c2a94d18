use crate::token::Token;

macro_rules! generate_ast {
    ($($typename:ident => $($propname:ident: $proptype:ty),+);+) => {
        #[derive(Debug, PartialEq)]
        pub enum Node {
            $($typename($typename)),+
        }

        $(
            #[derive(Debug, PartialEq)]
            pub struct $typename {
                $(pub $propname: $proptype),+
            }
        )+
    }
}

macro_rules! generate_visitor {
    ($($typename:ident => $visitname:ident);+) => {
        pub(crate) trait Visitor<T> {
            $(fn $visitname(&mut self, n: &$typename) -> T;)+
        }

        impl Node {
            pub(crate) fn accept<T, V: Visitor<T>>(&self, v: &mut V) -> T {
                match self {
                    $(Node::$typename(n) => v.$visitname(n),)+
                }
            }
        }
    };
}

generate_ast!(
    IntegerLiteral => token: Token, text: String;
    StringLiteral => token: Token, text: String;
    BoolLiteral => token: Token, text: String;
    Identifier => token: Token, name: String;
    Unary => op: Token, right: Box<Node>;
    Binary => left: Box<Node>, op: Token, right: Box<Node>;
    Assign => op: Token, target: Identifier, value: Box<Node>;
    Block => begin: Token, statements: StatementList, end: Token;
    StatementList => statements: Vec<Node>;
    FunctionDecl => name: Token, parameters: Vec<Parameter>, return_type: Token, body: Block;
    SourceFile => functions: Vec<FunctionDecl>, statements: StatementList
);

#[derive(Debug, PartialEq)]
pub struct Parameter {
    pub name: Token,
    pub type_name: Token,
}

generate_visitor!(
    IntegerLiteral => visit_integer_literal;
    StringLiteral => visit_string_literal;
    BoolLiteral => visit_bool_literal;
    Identifier => visit_identifier;
    Unary => visit_unary_expr;
    Binary => visit_binary_expr;
    Assign => visit_assign_expr;
    Block => visit_block_stmt;
    StatementList => visit_statement_list;
    FunctionDecl => visit_function_decl;
    SourceFile => visit_source_file
);
