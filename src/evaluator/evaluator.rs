use tracing::debug;

use super::prelude;
use crate::stack::ensure_sufficient_stack;
use crate::value::{EvalError, Sexpr, Value};

/// eval reduces `value` to its result. Numbers, symbols and errors evaluate to themselves.
pub fn eval(value: Value) -> Value {
    match value {
        Value::Sexpr(list) => ensure_sufficient_stack(|| eval_sexpr(list)),
        atom => atom,
    }
}

/// eval_sexpr evaluates every child left to right, then reduces the list.
///
/// All children are evaluated before any error is looked for, so the error
/// reported is the leftmost one in the evaluated list.
pub fn eval_sexpr(list: Sexpr) -> Value {
    let mut list = list.into_iter().map(eval).collect::<Sexpr>();

    if let Some(index) = list.position(Value::is_error) {
        debug!(
            index,
            discarded = list.len() - 1,
            "s-expression evaluated to an error"
        );
        return list.take(index).unwrap_or_else(Value::from);
    }

    match list.len() {
        0 => Value::Sexpr(list),
        1 => list.take(0).unwrap_or_else(Value::from),
        _ => match list.remove(0) {
            Ok(Value::Symbol(name)) => prelude::apply(list, &name),
            Ok(head) => {
                debug!(head = head.type_name(), "s-expression head is not a symbol");
                Value::error(EvalError::NotASymbol)
            }
            Err(e) => Value::from(e),
        },
    }
}
