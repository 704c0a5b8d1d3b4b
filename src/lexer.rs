//! Tokenization for psi
//!
//! Turns source text into the flat token stream the interpreter walks.
//! Blocks are not matched here: `{` and `}` come out as markers and the
//! interpreter pairs them up when it builds procedures.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_while},
    character::complete::{char, digit1, multispace0, satisfy},
    combinator::{map, opt, recognize, value},
    multi::many0,
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Integer literal: 42, -7
    Int(i64),
    /// Real literal: 3.14, -0.5
    Float(f64),
    /// String literal: (hello world)
    Str(String),
    /// Literal name: /x (pushed, never resolved)
    Name(String),
    /// Executable name: looked up in the operator table, then the dictionaries
    Operator(String),
    /// Procedure start: {
    BlockStart,
    /// Procedure end: }
    BlockEnd,
    /// Boolean literal: true / false
    Bool(bool),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Int(n) => write!(f, "{}", n),
            Token::Float(x) => write!(f, "{:?}", x),
            Token::Str(s) => write!(f, "({})", s),
            Token::Name(n) => write!(f, "/{}", n),
            Token::Operator(op) => f.write_str(op),
            Token::BlockStart => f.write_str("{"),
            Token::BlockEnd => f.write_str("}"),
            Token::Bool(b) => write!(f, "{}", b),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum LexError {
    #[error("Unexpected character: {0}")]
    UnexpectedChar(char),
    #[error("Unterminated string")]
    UnterminatedString,
    #[error("Parse error: {0}")]
    ParseError(String),
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Parse a string literal: (text). No escapes, ends at the first `)`.
fn string_literal(input: &str) -> IResult<&str, Token> {
    map(
        delimited(char('('), take_till(|c: char| c == ')'), char(')')),
        |s: &str| Token::Str(s.to_string()),
    )(input)
}

fn block_start(input: &str) -> IResult<&str, Token> {
    value(Token::BlockStart, char('{'))(input)
}

fn block_end(input: &str) -> IResult<&str, Token> {
    value(Token::BlockEnd, char('}'))(input)
}

/// Parse a literal name: /name
fn literal_name(input: &str) -> IResult<&str, Token> {
    map(preceded(char('/'), take_while(is_name_char)), |s: &str| {
        Token::Name(s.to_string())
    })(input)
}

/// Parse `==` or `=` (== must come first)
fn equals_op(input: &str) -> IResult<&str, Token> {
    alt((
        map(tag("=="), |_| Token::Operator("==".to_string())),
        map(tag("="), |_| Token::Operator("=".to_string())),
    ))(input)
}

/// Parse a number. A decimal point makes it a real; integers too large for
/// i64 fall back to reals.
fn number(input: &str) -> IResult<&str, Token> {
    map(
        recognize(tuple((
            opt(char('-')),
            digit1,
            opt(pair(char('.'), take_while(|c: char| c.is_ascii_digit()))),
        ))),
        |text: &str| {
            if text.contains('.') {
                Token::Float(text.parse().unwrap_or(f64::NAN))
            } else {
                text.parse()
                    .map(Token::Int)
                    .unwrap_or_else(|_| Token::Float(text.parse().unwrap_or(f64::NAN)))
            }
        },
    )(input)
}

/// Parse an executable word; `true` and `false` become boolean literals
fn word(input: &str) -> IResult<&str, Token> {
    map(
        recognize(pair(
            satisfy(|c| c.is_ascii_alphabetic()),
            take_while(is_name_char),
        )),
        |s: &str| match s {
            "true" => Token::Bool(true),
            "false" => Token::Bool(false),
            _ => Token::Operator(s.to_string()),
        },
    )(input)
}

/// Parse any single token
fn token(input: &str) -> IResult<&str, Token> {
    preceded(
        multispace0,
        alt((
            string_literal,
            block_start,
            block_end,
            literal_name,
            equals_op,
            number,
            word,
        )),
    )(input)
}

/// Strip `%` comments (to end of line), leaving string literals intact
fn strip_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut in_string = false;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match c {
            '(' if !in_string => {
                in_string = true;
                result.push(c);
            }
            ')' if in_string => {
                in_string = false;
                result.push(c);
            }
            '%' if !in_string => {
                for remaining in chars.by_ref() {
                    if remaining == '\n' {
                        result.push('\n');
                        break;
                    }
                }
            }
            _ => result.push(c),
        }
    }
    result
}

/// Tokenize a complete input string
pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
    let input = strip_comments(input);

    let (remaining, tokens) =
        many0(token)(input.as_str()).map_err(|e| LexError::ParseError(format!("{:?}", e)))?;

    match remaining.trim_start().chars().next() {
        None => Ok(tokens),
        Some('(') => Err(LexError::UnterminatedString),
        Some(c) => Err(LexError::UnexpectedChar(c)),
    }
}
