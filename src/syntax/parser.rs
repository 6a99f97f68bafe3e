use super::lexer::{Result, Token};
use super::node::{Node, CHAR_TAG, NUMBER_TAG, REGEX_TAG, ROOT_TAG, SEXPR_TAG, SYMBOL_TAG};
use super::ParseError;
use crate::stack::ensure_sufficient_stack;

pub const DEFAULT_MAX_DEPTH: usize = 512;

const INITIAL_NESTING_DEPTH: usize = 10;

static OPEN_TEXT: &str = "(";
static CLOSE_TEXT: &str = ")";

pub struct Parser {
    max_depth: usize,
    // token index of every `(` not yet closed, innermost last
    open_indices: Vec<usize>,
    token_index: Option<usize>,
}

impl<'a> Parser {
    pub fn new() -> Self {
        Parser::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            open_indices: Vec::with_capacity(INITIAL_NESTING_DEPTH),
            token_index: None,
        }
    }

    /// parse_tokens takes an `Iterator` over `Result<Token>` and attempts to build the full
    /// parse tree from them, anchored by a `regex` node at either end like the grammar's `/^/ <expr>* /$/`.
    // NOTE: we require a `&mut T` so that we can recurse over the token stream.
    pub fn parse_tokens<T>(&mut self, tokens: &mut T) -> Result<Node>
    where
        T: Iterator<Item = Result<Token<'a>>>,
    {
        let mut children = vec![Node::leaf(REGEX_TAG, "")];
        children.extend(self.parse_form(tokens)?);
        children.push(Node::leaf(REGEX_TAG, ""));

        Ok(Node::branch(ROOT_TAG, children))
    }

    /// parse_form collects nodes until the token stream ends or the enclosing list is closed.
    fn parse_form<T>(&mut self, tokens: &mut T) -> Result<Vec<Node>>
    where
        T: Iterator<Item = Result<Token<'a>>>,
    {
        let mut nodes = vec![];

        while let Some(result) = tokens.next() {
            let index = self.increment_token_index();

            let node = match result? {
                Token::Open => {
                    ensure_sufficient_stack(|| self.parse_seq(index, tokens.by_ref()))?
                }
                Token::Close => {
                    if self.open_indices.pop().is_none() {
                        return Err(ParseError::UnbalancedDelimiter(index));
                    }
                    break;
                }
                Token::Number(input) => Node::leaf(NUMBER_TAG, input),
                Token::Symbol(input) => Node::leaf(SYMBOL_TAG, input),
            };

            nodes.push(node)
        }

        Ok(nodes)
    }

    fn increment_token_index(&mut self) -> usize {
        let index = self.token_index.map_or(0, |index| index + 1);
        self.token_index = Some(index);
        index
    }

    fn inc_depth(&mut self, index: usize) -> Result<usize> {
        self.open_indices.push(index);
        let depth = self.open_indices.len();
        if depth > self.max_depth {
            return Err(ParseError::NestingTooDeep(self.max_depth));
        }
        Ok(depth)
    }

    fn parse_seq<T>(&mut self, open_index: usize, tokens: &mut T) -> Result<Node>
    where
        T: Iterator<Item = Result<Token<'a>>>,
    {
        let entry_depth = self.inc_depth(open_index)?;
        let inner = self.parse_form(tokens)?;

        // a matching `)` pops our entry; if it is still there the input ran out first
        if self.open_indices.len() >= entry_depth {
            let index = self.open_indices.last().copied().unwrap_or(open_index);
            return Err(ParseError::UnbalancedDelimiter(index));
        }

        let mut children = Vec::with_capacity(inner.len() + 2);
        children.push(Node::leaf(CHAR_TAG, OPEN_TEXT));
        children.extend(inner);
        children.push(Node::leaf(CHAR_TAG, CLOSE_TEXT));

        Ok(Node::branch(SEXPR_TAG, children))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new()
    }
}
