use std::num::ParseIntError;

use tracing::trace;

use crate::stack::ensure_sufficient_stack;
use crate::syntax::{self, Node, NodeKind, ParseError};
use crate::value::{EvalError, Sexpr, Value};

static OPEN_TEXT: &str = "(";
static CLOSE_TEXT: &str = ")";

/// read converts a parse tree into a value tree. It never fails: a malformed
/// number becomes an error value at its position in the tree.
pub fn read(node: &Node) -> Value {
    ensure_sufficient_stack(|| match node.kind() {
        NodeKind::Number => read_number(&node.contents),
        NodeKind::Symbol => Value::symbol(node.contents.as_str()),
        NodeKind::Root | NodeKind::Sexpr => Value::Sexpr(read_sexpr(node)),
        NodeKind::Regex | NodeKind::Char | NodeKind::Unknown => {
            trace!(tag = %node.tag, "unexpected node in expression position");
            Value::error(EvalError::MalformedNode(node.tag.clone()))
        }
    })
}

/// read_str parses `input` and reads the resulting tree.
pub fn read_str(input: &str) -> Result<Value, ParseError> {
    syntax::parse(input).map(|root| read(&root))
}

fn parse_number(text: &str) -> Result<i64, ParseIntError> {
    text.parse::<i64>()
}

fn read_number(text: &str) -> Value {
    match parse_number(text) {
        Ok(n) => Value::number(n),
        Err(e) => {
            trace!(text, error = %e, "could not read number");
            Value::error(EvalError::BadNumber)
        }
    }
}

fn is_skipped(child: &Node) -> bool {
    child.contents == OPEN_TEXT
        || child.contents == CLOSE_TEXT
        || child.kind() == NodeKind::Regex
}

fn read_sexpr(node: &Node) -> Sexpr {
    node.children
        .iter()
        .filter(|child| !is_skipped(child))
        .fold(Sexpr::new(), |list, child| list.append(read(child)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(values: Vec<Value>) -> Value {
        Value::Sexpr(values.into_iter().collect())
    }

    macro_rules! read_tests {
        ($($name:ident: $value:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let (input, expected): (&str, Value) = $value;
                    let result = read_str(input).unwrap();
                    assert_eq!(expected, result);
                }
            )*
        }
    }

    read_tests! {
        can_read_empty_input: ("", list(vec![])),
        can_read_number: ("42", list(vec![Value::number(42)])),
        can_read_negative_number: ("-42", list(vec![Value::number(-42)])),
        can_read_symbol: ("foo", list(vec![Value::symbol("foo")])),
        can_read_expr: ("(+ 2 3)", list(vec![
            list(vec![Value::symbol("+"), Value::number(2), Value::number(3)])
        ])),
        can_read_bare_expr: ("* 2 3", list(vec![
            Value::symbol("*"), Value::number(2), Value::number(3)
        ])),
        can_read_nested_expr: ("(+ 1 (* 2 3))", list(vec![
            list(vec![
                Value::symbol("+"),
                Value::number(1),
                list(vec![Value::symbol("*"), Value::number(2), Value::number(3)]),
            ])
        ])),
        can_read_empty_list: ("()", list(vec![list(vec![])])),
        can_read_overflowing_number: ("(+ 1 99999999999999999999)", list(vec![
            list(vec![
                Value::symbol("+"),
                Value::number(1),
                Value::error(EvalError::BadNumber),
            ])
        ])),
    }

    #[test]
    fn can_read_extreme_numbers() {
        assert_eq!(
            read(&Node::leaf("number", "9223372036854775807")),
            Value::number(i64::max_value())
        );
        assert_eq!(
            read(&Node::leaf("number", "-9223372036854775808")),
            Value::number(i64::min_value())
        );
        assert_eq!(
            read(&Node::leaf("number", "9223372036854775808")),
            Value::error(EvalError::BadNumber)
        );
        assert_eq!(
            read(&Node::leaf("number", "12x")),
            Value::error(EvalError::BadNumber)
        );
    }

    #[test]
    fn can_skip_punctuation_and_anchors() {
        let root = Node::branch(
            ">",
            vec![
                Node::leaf("regex", ""),
                Node::branch(
                    "expr|sexpr|>",
                    vec![
                        Node::leaf("char", "("),
                        Node::leaf("expr|symbol|regex", "-"),
                        Node::leaf("expr|number|regex", "5"),
                        Node::leaf("char", ")"),
                    ],
                ),
                Node::leaf("regex", ""),
            ],
        );
        assert_eq!(
            read(&root),
            list(vec![list(vec![Value::symbol("-"), Value::number(5)])])
        );
    }

    #[test]
    fn can_flag_unknown_nodes() {
        let root = Node::branch(">", vec![Node::leaf("qexpr", "{")]);
        assert_eq!(
            read(&root),
            list(vec![Value::error(EvalError::MalformedNode("qexpr".into()))])
        );
    }

    #[test]
    fn can_round_trip_unevaluated() {
        let value = read_str("(+ 1 (* 2 3) ())").unwrap();
        assert_eq!(value.to_string(), "((+ 1 (* 2 3) ()))");
    }
}
