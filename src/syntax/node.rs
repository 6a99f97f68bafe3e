use std::fmt;
use std::mem;

use itertools::Itertools;

use crate::stack::ensure_sufficient_stack;

pub static ROOT_TAG: &str = ">";
pub static NUMBER_TAG: &str = "expr|number|regex";
pub static SYMBOL_TAG: &str = "expr|symbol|regex";
pub static SEXPR_TAG: &str = "expr|sexpr|>";
pub static REGEX_TAG: &str = "regex";
pub static CHAR_TAG: &str = "char";

/// Node is one node of the generic parse tree. The `tag` names the grammar rules that matched,
/// joined by `|`, leaves carry their literal text in `contents`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Node {
    pub tag: String,
    pub contents: String,
    pub children: Vec<Node>,
}

impl Node {
    pub fn leaf(tag: &str, contents: &str) -> Self {
        Self {
            tag: tag.into(),
            contents: contents.into(),
            children: vec![],
        }
    }

    pub fn branch(tag: &str, children: Vec<Node>) -> Self {
        Self {
            tag: tag.into(),
            contents: String::new(),
            children,
        }
    }

    pub fn kind(&self) -> NodeKind {
        NodeKind::classify(&self.tag)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.children.is_empty() {
            write!(f, "{} '{}'", self.tag, self.contents)
        } else {
            ensure_sufficient_stack(|| {
                write!(
                    f,
                    "{} [{}]",
                    self.tag,
                    self.children.iter().format(", ")
                )
            })
        }
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        // flatten the subtree so dropping a deep tree never recurses
        let mut pending = mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// NodeKind is the grammar rule a node was produced by, decided once from its tag.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NodeKind {
    Root,
    Number,
    Symbol,
    Sexpr,
    Regex,
    Char,
    Unknown,
}

impl NodeKind {
    /// classify follows the tag conventions of the grammar: rule names appear as substrings
    /// of the tag, and the root is tagged with exactly `>`.
    pub fn classify(tag: &str) -> Self {
        if tag.contains("number") {
            NodeKind::Number
        } else if tag.contains("symbol") {
            NodeKind::Symbol
        } else if tag == ROOT_TAG {
            NodeKind::Root
        } else if tag.contains("sexpr") {
            NodeKind::Sexpr
        } else if tag.contains(REGEX_TAG) {
            NodeKind::Regex
        } else if tag.contains(CHAR_TAG) {
            NodeKind::Char
        } else {
            NodeKind::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! classify_tests {
        ($($name:ident: $value:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let (tag, expected): (&str, NodeKind) = $value;
                    assert_eq!(expected, NodeKind::classify(tag));
                }
            )*
        }
    }

    classify_tests! {
        can_classify_root: (">", NodeKind::Root),
        can_classify_number: ("expr|number|regex", NodeKind::Number),
        can_classify_bare_number: ("number", NodeKind::Number),
        can_classify_symbol: ("expr|symbol|regex", NodeKind::Symbol),
        can_classify_sexpr: ("expr|sexpr|>", NodeKind::Sexpr),
        can_classify_anchor: ("regex", NodeKind::Regex),
        can_classify_punctuation: ("char", NodeKind::Char),
        can_classify_unknown: ("qexpr", NodeKind::Unknown),
    }

    #[test]
    fn can_display_tree() {
        let node = Node::branch(
            SEXPR_TAG,
            vec![
                Node::leaf(CHAR_TAG, "("),
                Node::leaf(NUMBER_TAG, "1"),
                Node::leaf(CHAR_TAG, ")"),
            ],
        );
        assert_eq!(
            node.to_string(),
            "expr|sexpr|> [char '(', expr|number|regex '1', char ')']"
        );
    }

    #[test]
    fn can_drop_deep_tree() {
        let tree = (0..200_000).fold(Node::leaf(NUMBER_TAG, "1"), |inner, _| {
            Node::branch(SEXPR_TAG, vec![inner])
        });
        drop(tree);
    }
}
