use std::fmt::{self, Display};

#[derive(Debug, PartialEq, Clone)]
pub(crate) enum Value {
    Boolean(bool),
    Integer(i64),
    Text(String),
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Value::*;
        match self {
            Boolean(b) => write!(f, "{}", b),
            Integer(n) => write!(f, "{}", n),
            Text(s) => write!(f, "{}", s),
        }
    }
}
