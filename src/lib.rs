pub mod ast;
pub mod buffer;
mod environment;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod printer;
pub mod scanner;
pub mod token;
mod value;

pub use crate::error::{Error, Result};
