//! Token model for statements.
//!
//! Statements never build SQL strings directly. Each builder call appends
//! [`Token`]s to an immutable [`TokenList`]; the serializer in
//! [`serialize`](crate::token::serialize()) is the single place that decides
//! spacing, grouping and `$n` numbering.

mod serialize;

#[cfg(test)]
mod tests;

pub use serialize::{SerializedQuery, serialize};

use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// An atomic SQL fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Raw SQL text, emitted verbatim.
    Literal(String),
    /// A bound value, emitted as `$n`.
    Parameter(Value),
    /// Children wrapped in parentheses.
    Group(Vec<Token>),
    /// Children emitted inline, without parentheses.
    Collection(Vec<Token>),
    /// Items flattened independently and joined by `glue` plus a space.
    Separator { glue: &'static str, items: Vec<Token> },
}

impl Token {
    pub fn literal(text: impl Into<String>) -> Self {
        Token::Literal(text.into())
    }

    pub fn param(value: impl Into<Value>) -> Self {
        Token::Parameter(value.into())
    }

    pub fn group(children: Vec<Token>) -> Self {
        Token::Group(children)
    }

    pub fn collection(children: Vec<Token>) -> Self {
        Token::Collection(children)
    }

    /// A `,`-separated list.
    pub fn comma_list(items: Vec<Token>) -> Self {
        Token::Separator { glue: ",", items }
    }

    pub fn separator(glue: &'static str, items: Vec<Token>) -> Self {
        Token::Separator { glue, items }
    }
}

/// A persistent, append-only list of tokens.
///
/// Appending never touches the receiver: the new list holds the appended
/// chunk plus an `Arc` to the old list, so every statement derived from a
/// common base shares the base's tokens.
#[derive(Clone, Default)]
pub struct TokenList {
    head: Option<Arc<Chunk>>,
}

struct Chunk {
    prev: TokenList,
    tokens: Vec<Token>,
    len: usize,
}

impl TokenList {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// A list holding exactly `tokens`.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self::new().append(tokens)
    }

    /// Return a new list with `tokens` appended.
    #[must_use]
    pub fn append(&self, tokens: impl IntoIterator<Item = Token>) -> Self {
        let tokens: Vec<Token> = tokens.into_iter().collect();
        if tokens.is_empty() {
            return self.clone();
        }
        let len = self.len() + tokens.len();
        Self {
            head: Some(Arc::new(Chunk {
                prev: self.clone(),
                tokens,
                len,
            })),
        }
    }

    pub fn len(&self) -> usize {
        self.head.as_ref().map_or(0, |chunk| chunk.len)
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Chunks in insertion order (oldest first).
    pub(crate) fn chunks(&self) -> Vec<&[Token]> {
        let mut out = Vec::new();
        let mut node = self.head.as_deref();
        while let Some(chunk) = node {
            out.push(chunk.tokens.as_slice());
            node = chunk.prev.head.as_deref();
        }
        out.reverse();
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.chunks().into_iter().flatten()
    }

    pub fn to_vec(&self) -> Vec<Token> {
        self.iter().cloned().collect()
    }

    /// Whether `base` is a (physically shared) prefix of this list.
    pub fn extends(&self, base: &TokenList) -> bool {
        let Some(target) = &base.head else {
            return true;
        };
        let mut node = self.head.as_ref();
        while let Some(chunk) = node {
            if Arc::ptr_eq(chunk, target) {
                return true;
            }
            node = chunk.prev.head.as_ref();
        }
        false
    }
}

impl fmt::Debug for TokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl PartialEq for TokenList {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl From<Vec<Token>> for TokenList {
    fn from(tokens: Vec<Token>) -> Self {
        Self::from_tokens(tokens)
    }
}
