use std::fmt;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::errors::{CoverError, CoverResult};

/// Default marker for an absent node in level-order notation.
pub const DEFAULT_SENTINEL: &str = "N";

/// One slot of a level-order tree encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Value(i32),
    Absent,
}

impl Token {
    pub fn is_absent(&self) -> bool {
        matches!(self, Token::Absent)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Value(v) => write!(f, "{}", v),
            Token::Absent => write!(f, "{}", DEFAULT_SENTINEL),
        }
    }
}

/// Splits a level-order line into tokens.
///
/// Every token is either the sentinel or a base-10 `i32`. The whole line is
/// validated up front, so a malformed token anywhere fails the call even if
/// the tree builder would never have reached it.
#[instrument(level = "debug", skip(input), fields(bytes = input.len()))]
pub fn parse_tokens(input: &str, sentinel: &str) -> CoverResult<Vec<Token>> {
    let tokens = input
        .split_whitespace()
        .enumerate()
        .map(|(position, raw)| parse_token(position, raw, sentinel))
        .collect::<CoverResult<Vec<_>>>()?;
    debug!("parsed {} tokens", tokens.len());
    Ok(tokens)
}

fn parse_token(position: usize, raw: &str, sentinel: &str) -> CoverResult<Token> {
    if raw == sentinel {
        return Ok(Token::Absent);
    }
    raw.parse::<i32>()
        .map(Token::Value)
        .map_err(|source| CoverError::MalformedInput {
            position,
            token: raw.to_string(),
            source,
        })
}

/// Joins tokens with single spaces, writing absent slots as `sentinel`.
pub fn format_tokens(tokens: &[Token], sentinel: &str) -> String {
    tokens
        .iter()
        .map(|t| match t {
            Token::Value(v) => v.to_string(),
            Token::Absent => sentinel.to_string(),
        })
        .join(" ")
}
