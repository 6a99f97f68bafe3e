pub mod config;
pub mod evaluator;
pub mod logging;
pub mod printer;
pub mod reader;
pub mod repl;
mod stack;
pub mod syntax;
pub mod value;

pub use crate::evaluator::{eval, eval_str};
pub use crate::printer::render;
pub use crate::reader::read;
pub use crate::syntax::ParseError;
pub use crate::value::{EvalError, Sexpr, Value};

/// rep reads and evaluates one line of input without printing it.
pub fn rep(input: &str) -> Result<Value, ParseError> {
    eval_str(input)
}
