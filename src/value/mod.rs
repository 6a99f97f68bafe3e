use std::fmt;
use std::iter::FromIterator;
use std::mem;
use std::slice;
use std::vec;

use itertools::Itertools;
use thiserror::Error;

use crate::stack::ensure_sufficient_stack;
use crate::syntax::{CLOSE_PAREN, OPEN_PAREN};

/// Value is the runtime representation of every expression, evaluated or not.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Value {
    Number(i64),
    Error(EvalError),
    Symbol(String),
    Sexpr(Sexpr),
}

impl Value {
    pub fn number(n: i64) -> Self {
        Value::Number(n)
    }

    pub fn error(kind: EvalError) -> Self {
        Value::Error(kind)
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Value::Symbol(name.into())
    }

    /// sexpr constructs an empty expression list.
    pub fn sexpr() -> Self {
        Value::Sexpr(Sexpr::new())
    }

    pub fn is_error(&self) -> bool {
        match self {
            Value::Error(_) => true,
            _ => false,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Error(_) => "error",
            Value::Symbol(_) => "symbol",
            Value::Sexpr(_) => "s-expression",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Error(e) => write!(f, "Error: {}", e),
            Value::Symbol(s) => write!(f, "{}", s),
            Value::Sexpr(list) => write!(f, "{}", list),
        }
    }
}

impl From<OutOfBounds> for Value {
    fn from(error: OutOfBounds) -> Self {
        Value::Error(error.into())
    }
}

impl From<Sexpr> for Value {
    fn from(list: Sexpr) -> Self {
        Value::Sexpr(list)
    }
}

/// EvalError is the kind of failure an error value carries. Its `Display` is the message shown to the user.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum EvalError {
    #[error("invalid number")]
    BadNumber,
    #[error("S-expression does not start with symbol.")]
    NotASymbol,
    #[error("Cannot operate on non-number.")]
    NonNumber,
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Invalid operator")]
    InvalidOperator,
    #[error("Integer overflow")]
    Overflow,
    #[error("Negative exponent")]
    NegativeExponent,
    #[error("Operator passed no operands.")]
    NoOperands,
    #[error("unexpected syntax node '{0}'")]
    MalformedNode(String),
    #[error(transparent)]
    OutOfBounds(#[from] OutOfBounds),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Error)]
#[error("index {index} out of bounds for expression of length {len}")]
pub struct OutOfBounds {
    pub index: usize,
    pub len: usize,
}

/// Sexpr is an ordered list of values that it owns exclusively.
///
/// Formatting, comparing and cloning grow the stack as they descend, and
/// dropping is iterative, so arbitrarily deep lists never overflow.
#[derive(Eq, Default)]
pub struct Sexpr {
    cells: Vec<Value>,
}

impl Sexpr {
    pub fn new() -> Self {
        Self { cells: vec![] }
    }

    /// append adds `item` to the end of the list, returning the list.
    pub fn append(mut self, item: Value) -> Self {
        self.cells.push(item);
        self
    }

    /// remove detaches the child at `index`, shifting the remaining children left.
    pub fn remove(&mut self, index: usize) -> Result<Value, OutOfBounds> {
        if index >= self.cells.len() {
            return Err(OutOfBounds {
                index,
                len: self.cells.len(),
            });
        }
        Ok(self.cells.remove(index))
    }

    /// take removes the child at `index` and drops the rest of the list.
    pub fn take(mut self, index: usize) -> Result<Value, OutOfBounds> {
        self.remove(index)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<Value> {
        self.cells.iter()
    }

    pub fn position(&self, predicate: impl Fn(&Value) -> bool) -> Option<usize> {
        self.cells.iter().position(predicate)
    }
}

impl fmt::Display for Sexpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        ensure_sufficient_stack(|| {
            write!(f, "{}", OPEN_PAREN)?;
            write!(f, "{}", self.cells.iter().format(" "))?;
            write!(f, "{}", CLOSE_PAREN)
        })
    }
}

impl fmt::Debug for Sexpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        ensure_sufficient_stack(|| {
            f.debug_struct("Sexpr")
                .field("cells", &self.cells)
                .finish()
        })
    }
}

impl PartialEq for Sexpr {
    fn eq(&self, other: &Self) -> bool {
        ensure_sufficient_stack(|| self.cells == other.cells)
    }
}

impl Clone for Sexpr {
    fn clone(&self) -> Self {
        Self {
            cells: ensure_sufficient_stack(|| self.cells.clone()),
        }
    }
}

impl Drop for Sexpr {
    fn drop(&mut self) {
        // detach nested lists before they drop so no drop recurses
        let mut pending = mem::take(&mut self.cells);
        while let Some(value) = pending.pop() {
            if let Value::Sexpr(mut list) = value {
                pending.append(&mut list.cells);
            }
        }
    }
}

impl FromIterator<Value> for Sexpr {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Sexpr {
    type Item = Value;
    type IntoIter = vec::IntoIter<Value>;

    fn into_iter(mut self) -> Self::IntoIter {
        mem::take(&mut self.cells).into_iter()
    }
}

impl<'a> IntoIterator for &'a Sexpr {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(ns: &[i64]) -> Sexpr {
        ns.iter().copied().map(Value::Number).collect()
    }

    #[test]
    fn can_append_in_order() {
        let list = Sexpr::new()
            .append(Value::symbol("+"))
            .append(Value::number(1))
            .append(Value::sexpr());

        assert_eq!(list.len(), 3);
        assert_eq!(
            list.iter().cloned().collect::<Vec<_>>(),
            vec![Value::symbol("+"), Value::number(1), Value::sexpr()]
        );
    }

    #[test]
    fn can_remove_and_shift() {
        let mut list = numbers(&[1, 2, 3]);

        assert_eq!(list.remove(1), Ok(Value::number(2)));
        assert_eq!(list, numbers(&[1, 3]));
        assert_eq!(list.remove(0), Ok(Value::number(1)));
        assert_eq!(list, numbers(&[3]));
    }

    #[test]
    fn can_detect_out_of_bounds() {
        let mut list = numbers(&[1, 2]);
        assert_eq!(list.remove(2), Err(OutOfBounds { index: 2, len: 2 }));
        assert_eq!(list.len(), 2);

        let mut empty = Sexpr::new();
        assert_eq!(empty.remove(0), Err(OutOfBounds { index: 0, len: 0 }));
    }

    #[test]
    fn can_take_child() {
        let list = numbers(&[4, 5, 6]);
        assert_eq!(list.take(2), Ok(Value::number(6)));
        assert!(numbers(&[]).take(0).is_err());
    }

    #[test]
    fn can_display_values() {
        assert_eq!(Value::number(-12).to_string(), "-12");
        assert_eq!(Value::symbol("+").to_string(), "+");
        assert_eq!(
            Value::error(EvalError::DivisionByZero).to_string(),
            "Error: Division by zero"
        );
        assert_eq!(Value::sexpr().to_string(), "()");

        let nested = Sexpr::new()
            .append(Value::symbol("*"))
            .append(Value::Sexpr(numbers(&[1, 2])))
            .append(Value::error(EvalError::BadNumber));
        assert_eq!(
            Value::from(nested).to_string(),
            "(* (1 2) Error: invalid number)"
        );
    }

    fn deep_list(depth: usize) -> Value {
        (0..depth).fold(Value::sexpr(), |inner, _| {
            Value::Sexpr(Sexpr::new().append(inner))
        })
    }

    const DEEP: usize = 200_000;

    #[test]
    fn can_render_deep_list() {
        let rendered = deep_list(DEEP).to_string();
        assert_eq!(rendered.len(), 2 * (DEEP + 1));
        assert!(rendered.starts_with("(((("));
        assert!(rendered.ends_with("))))"));
    }

    #[test]
    fn can_drop_deep_list() {
        let value = deep_list(DEEP);
        drop(value);
    }

    #[test]
    fn can_compare_and_clone_deep_list() {
        let value = deep_list(DEEP);
        let copy = value.clone();
        assert!(copy == value);
        assert!(deep_list(DEEP - 1) != value);
    }
}
