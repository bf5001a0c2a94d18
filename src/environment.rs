use std::collections::HashMap;

use crate::{
    error::{Error, Result},
    token::Token,
    value::Value,
};

pub(crate) const GLOBAL_SCOPE: &str = "global";

// Bindings are keyed by scope and name. Only the global scope is written
// today; the key shape leaves room for nested scopes without reshaping
// the table.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Environment {
    values: HashMap<(String, String), Value>,
}

impl Environment {
    pub(crate) fn new() -> Self {
        Self { values: HashMap::new() }
    }

    pub(crate) fn define<S: Into<String>>(&mut self, scope: &str, name: S, value: Value) {
        self.values.insert((scope.to_string(), name.into()), value);
    }

    pub(crate) fn get(&self, scope: &str, name: &Token) -> Result<Value> {
        self.values
            .get(&(scope.to_string(), name.lexeme.clone()))
            .cloned()
            .ok_or_else(|| undefined_var_error(name))
    }
}

fn undefined_var_error(name: &Token) -> Error {
    Error::runtime(
        name.clone(),
        format!("Undefined variable: {}", name.lexeme),
    )
}
