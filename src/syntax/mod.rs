//! The grammar of the language and the generic parse tree it produces.
//!
//! ```text
//! number : /-?[0-9]+/ ;
//! symbol : <any run of symbolic characters> ;
//! sexpr  : '(' <expr>* ')' ;
//! expr   : <number> | <symbol> | <sexpr> ;
//! lispy  : /^/ <expr>* /$/ ;
//! ```
mod lexer;
mod node;
mod parser;

use thiserror::Error;

use self::lexer::Lexer;
use self::parser::Parser;

pub use self::lexer::{lex, Result, Token, CLOSE_PAREN, OPEN_PAREN};
pub use self::node::{Node, NodeKind};
pub use self::parser::DEFAULT_MAX_DEPTH;

#[derive(Debug, PartialEq, Clone, Error)]
pub enum ParseError {
    /// UnbalancedDelimiter gives the index into the token stream of a `(` that is never
    /// closed or of a `)` that closes nothing.
    #[error("unbalanced delimiter at token {0}")]
    UnbalancedDelimiter(usize),
    /// UnrecognizedToken points to the byte in the input where an unrecognized char was found.
    #[error("unrecognized character {1:?} at byte {0}")]
    UnrecognizedToken(usize, char),
    #[error("expressions nested deeper than {0} levels")]
    NestingTooDeep(usize),
    // Internal represents a bug in the lexer: a token was peeked but could not be taken.
    #[error("internal lexer error")]
    Internal,
}

pub fn parse(input: &str) -> Result<Node> {
    parse_with_max_depth(input, DEFAULT_MAX_DEPTH)
}

pub fn parse_with_max_depth(input: &str, max_depth: usize) -> Result<Node> {
    let mut lexer = Lexer::new(input);

    let mut parser = Parser::with_max_depth(max_depth);
    parser.parse_tokens(&mut lexer)
}
