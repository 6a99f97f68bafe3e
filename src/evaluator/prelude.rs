use std::convert::TryFrom;
use std::result;

use tracing::debug;

use crate::value::{EvalError, Sexpr, Value};

pub type Result<T> = result::Result<T, EvalError>;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Builtin {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

static PRELUDE_BINDINGS: &[(&str, &str, Builtin)] = &[
    ("+", "add", Builtin::Add),
    ("-", "sub", Builtin::Sub),
    ("*", "mul", Builtin::Mul),
    ("/", "div", Builtin::Div),
    ("%", "rem", Builtin::Rem),
    ("^", "pow", Builtin::Pow),
];

impl Builtin {
    pub fn lookup(symbol: &str) -> Option<Builtin> {
        PRELUDE_BINDINGS
            .iter()
            .find(|(k, _, _)| *k == symbol)
            .map(|(_, _, builtin)| *builtin)
    }

    pub fn name(self) -> &'static str {
        PRELUDE_BINDINGS
            .iter()
            .find(|(_, _, builtin)| *builtin == self)
            .map_or("unknown", |(_, name, _)| *name)
    }

    /// fold combines the accumulator with the next operand.
    fn fold(self, acc: i64, operand: i64) -> Result<i64> {
        use self::Builtin::*;

        match self {
            Add => acc.checked_add(operand).ok_or(EvalError::Overflow),
            Sub => acc.checked_sub(operand).ok_or(EvalError::Overflow),
            Mul => acc.checked_mul(operand).ok_or(EvalError::Overflow),
            Div if operand == 0 => Err(EvalError::DivisionByZero),
            Div => acc.checked_div(operand).ok_or(EvalError::Overflow),
            Rem if operand == 0 => Err(EvalError::DivisionByZero),
            Rem => acc.checked_rem(operand).ok_or(EvalError::Overflow),
            Pow => pow(acc, operand),
        }
    }
}

fn pow(base: i64, exponent: i64) -> Result<i64> {
    if exponent < 0 {
        return Err(EvalError::NegativeExponent);
    }
    match u32::try_from(exponent) {
        Ok(exponent) => base.checked_pow(exponent).ok_or(EvalError::Overflow),
        // only bases whose powers never grow survive an exponent this large
        Err(_) => match base {
            0 | 1 => Ok(base),
            -1 if exponent % 2 == 0 => Ok(1),
            -1 => Ok(-1),
            _ => Err(EvalError::Overflow),
        },
    }
}

fn as_numbers(operands: Sexpr) -> Result<Vec<i64>> {
    operands
        .into_iter()
        .map(|operand| match operand {
            Value::Number(n) => Ok(n),
            _ => Err(EvalError::NonNumber),
        })
        .collect()
}

fn apply_numbers(operands: Sexpr, op_name: &str) -> Result<i64> {
    let numbers = as_numbers(operands)?;
    let (first, rest) = numbers.split_first().ok_or(EvalError::NoOperands)?;
    let builtin = Builtin::lookup(op_name);

    debug!(
        op = builtin.map_or(op_name, |b| b.name()),
        operands = numbers.len(),
        "applying builtin"
    );

    if builtin == Some(Builtin::Sub) && rest.is_empty() {
        return first.checked_neg().ok_or(EvalError::Overflow);
    }

    // an unknown operator only fails once a fold step needs it
    rest.iter().try_fold(*first, |acc, operand| {
        builtin
            .ok_or(EvalError::InvalidOperator)?
            .fold(acc, *operand)
    })
}

/// apply runs the builtin named `op_name` over `operands`, folding left to right.
/// Every operand must be a number; the first failure ends the fold and becomes the result.
pub fn apply(operands: Sexpr, op_name: &str) -> Value {
    match apply_numbers(operands, op_name) {
        Ok(n) => Value::number(n),
        Err(e) => Value::error(e),
    }
}
