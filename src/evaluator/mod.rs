mod evaluator;
pub mod prelude;

use crate::reader;
use crate::syntax::{self, ParseError};
use crate::value::Value;

pub use self::evaluator::{eval, eval_sexpr};
pub use self::prelude::{apply, Builtin};

/// eval_str reads and evaluates `input`, failing only when it does not parse.
pub fn eval_str(input: &str) -> Result<Value, ParseError> {
    eval_str_with_max_depth(input, syntax::DEFAULT_MAX_DEPTH)
}

pub fn eval_str_with_max_depth(input: &str, max_depth: usize) -> Result<Value, ParseError> {
    let root = syntax::parse_with_max_depth(input, max_depth)?;
    Ok(eval(reader::read(&root)))
}
