use std::collections::HashSet;
use std::iter;
use std::result;
use std::str;

use lazy_static::lazy_static;

use super::ParseError;

pub const OPEN_PAREN: char = '(';
pub const CLOSE_PAREN: char = ')';
const COMMENT_CHAR: char = ';';
const STRING_CHAR: char = '"';
const NEWLINE_CHAR: char = '\n';
const MINUS_CHAR: char = '-';

lazy_static! {
    /// SPECIAL_CHARS are characters that can never appear inside a symbol
    static ref SPECIAL_CHARS: HashSet<char> = {
        let mut set = HashSet::new();

        set.insert(OPEN_PAREN);
        set.insert(CLOSE_PAREN);
        set.insert(COMMENT_CHAR);
        set.insert(STRING_CHAR);
        set.insert(NEWLINE_CHAR);

        set
    };
}

/// Result binds the std::result::Result::Err type to the syntax error type.
pub type Result<T> = result::Result<T, ParseError>;

/// lex is a convenience function to take some `input` and produce the resulting `Vec<Token>`.
pub fn lex(input: &str) -> Result<Vec<Token>> {
    Lexer::new(input).tokens()
}

#[derive(Debug, PartialEq, Clone, Copy)]
/// Token represents an atomic component of this language's syntax.
pub enum Token<'input> {
    Open,
    Close,
    Number(&'input str),
    Symbol(&'input str),
}

/// Lexer contains the logic to lex individual tokens from the input source.
#[derive(Debug)]
pub struct Lexer<'input> {
    input: &'input str,
    iter: iter::Peekable<str::CharIndices<'input>>,
}

impl<'input> Lexer<'input> {
    /// new constructs a Lexer instance from the input but does not do any lexing.
    pub fn new(input: &'input str) -> Self {
        Self {
            input,
            iter: input.char_indices().peekable(),
        }
    }

    fn tokens(self) -> Result<Vec<Token<'input>>> {
        self.collect::<result::Result<Vec<_>, _>>()
    }

    /// advance_if advances the lexer over every char satisfying `predicate`. Returns the
    /// byte span advanced over as `(start, end)` with `end` exclusive, or None if nothing matched.
    fn advance_if<P>(&mut self, predicate: P) -> Option<(usize, usize)>
    where
        P: Fn(char) -> bool,
    {
        let start = match self.peek() {
            Some(&(index, ch)) if predicate(ch) => index,
            _ => return None,
        };
        let mut end = start;

        while let Some(&(index, ch)) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.consume();
            end = index + ch.len_utf8();
        }

        Some((start, end))
    }

    fn consume(&mut self) -> Option<(usize, char)> {
        self.iter.next()
    }

    fn peek(&mut self) -> Option<&(usize, char)> {
        self.iter.peek()
    }

    /// peek_second looks one char past the next one without consuming anything.
    fn peek_second(&self) -> Option<char> {
        let mut lookahead = self.iter.clone();
        lookahead.next();
        lookahead.next().map(|(_, ch)| ch)
    }

    fn consume_delimiter(&mut self, token: Token<'input>) -> Result<Token<'input>> {
        self.consume();
        Ok(token)
    }

    fn is_numeric(ch: char) -> bool {
        ch.is_ascii_digit()
    }

    fn starts_number(ch: char, next: Option<char>) -> bool {
        Lexer::is_numeric(ch) || (ch == MINUS_CHAR && next.map_or(false, Lexer::is_numeric))
    }

    fn consume_numeric(&mut self) -> Result<Token<'input>> {
        let start = match self.peek() {
            Some(&(index, MINUS_CHAR)) => {
                self.consume();
                index
            }
            Some(&(index, _)) => index,
            None => return Err(ParseError::Internal),
        };
        self.advance_if(Lexer::is_numeric)
            .map(|(_, end)| Token::Number(&self.input[start..end]))
            .ok_or(ParseError::Internal)
    }

    fn skip_comment(&mut self) {
        self.consume();
        self.advance_if(|ch| ch != NEWLINE_CHAR);
    }

    fn is_symbolic(ch: char) -> bool {
        (ch.is_alphanumeric() || ch.is_ascii_punctuation())
            && !SPECIAL_CHARS.contains(&ch)
            && !Lexer::is_whitespace(ch)
    }

    fn consume_symbol(&mut self) -> Result<Token<'input>> {
        self.advance_if(Lexer::is_symbolic)
            .map(|(start, end)| Token::Symbol(&self.input[start..end]))
            .ok_or(ParseError::Internal)
    }

    fn is_whitespace(ch: char) -> bool {
        ch.is_whitespace() || ch == ','
    }
}

impl<'a> iter::Iterator for Lexer<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.advance_if(Lexer::is_whitespace);
            match self.peek() {
                Some(&(_, COMMENT_CHAR)) => self.skip_comment(),
                _ => break,
            }
        }

        let next = self.peek_second();
        let next_token = match self.peek() {
            None => return None,
            // The order is important here
            Some(&(_, OPEN_PAREN)) => self.consume_delimiter(Token::Open),
            Some(&(_, CLOSE_PAREN)) => self.consume_delimiter(Token::Close),
            Some(&(_, ch)) if Lexer::starts_number(ch, next) => self.consume_numeric(),
            Some(&(_, ch)) if Lexer::is_symbolic(ch) => self.consume_symbol(),
            Some(&(index, ch)) => Err(ParseError::UnrecognizedToken(index, ch)),
        };
        Some(next_token)
    }
}
