use std::fmt;

use itertools::Itertools;
use thiserror::Error;

pub mod expand;
pub mod parser;
pub mod scanner;

pub const LIST_SEPARATOR: char = ',';
pub const SPAN_SEPARATOR: char = '-';
pub const STEP_SEPARATOR: char = ':';
pub const OPEN_BRACKET: char = '[';
pub const CLOSE_BRACKET: char = ']';

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unbalanced brackets in {0:?}")]
    UnbalancedBrackets(String),
    #[error("empty segment in {0:?}")]
    EmptySegment(String),
    #[error("malformed segment {0:?}")]
    MalformedSegment(String),
    #[error("wrong number of parts in range {0:?}")]
    InvalidArity(String),
    #[error("failed to cast {text:?}: {reason}")]
    Cast { text: String, reason: String },
    #[error("range step must not be zero")]
    ZeroStep,
}

/// A casted bracket-free value: `3`, `3-6` or `3:2:7`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leaf<T> {
    Scalar(T),
    Range { start: T, end: T },
    Stepped { start: T, step: T, end: T },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<T> {
    /// `1-3`
    Leaf(Leaf<T>),
    /// `1-3[2-3]`: a bare leaf with a sub-range.
    Suffixed(Leaf<T>, Vec<Node<T>>),
    /// One outer element of `[1,2][2-3]`, paired with the whole inner range.
    Nested(Box<Node<T>>, Vec<Node<T>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item<T> {
    Value(T),
    Pair(Box<Item<T>>, Vec<Item<T>>),
}

/// `Single` is kept for a bare value so callers can tell `"3"` apart from `"3-3"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    Single(Item<T>),
    Many(Vec<Item<T>>),
}

impl<T> Item<T> {
    pub fn pair(outer: Item<T>, inner: Vec<Item<T>>) -> Self {
        Item::Pair(Box::new(outer), inner)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Item::Value(value) => Some(value),
            Item::Pair(..) => None,
        }
    }
}

impl<T> Selection<T> {
    pub fn from_items(mut items: Vec<Item<T>>) -> Self {
        if items.len() == 1 {
            Selection::Single(items.remove(0))
        } else {
            Selection::Many(items)
        }
    }

    pub fn into_vec(self) -> Vec<Item<T>> {
        match self {
            Selection::Single(item) => vec![item],
            Selection::Many(items) => items,
        }
    }

    /// Returns the plain values, or `None` if any item carries a sub-range.
    pub fn values(&self) -> Option<Vec<&T>> {
        match self {
            Selection::Single(item) => item.value().map(|value| vec![value]),
            Selection::Many(items) => items.iter().map(Item::value).collect(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Leaf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leaf::Scalar(value) => write!(f, "{value}"),
            Leaf::Range { start, end } => write!(f, "{start}{SPAN_SEPARATOR}{end}"),
            Leaf::Stepped { start, step, end } => {
                write!(f, "{start}{STEP_SEPARATOR}{step}{STEP_SEPARATOR}{end}")
            }
        }
    }
}

impl<T: fmt::Display> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = LIST_SEPARATOR.to_string();
        match self {
            Node::Leaf(leaf) => write!(f, "{leaf}"),
            Node::Suffixed(leaf, inner) => {
                write!(f, "{leaf}{OPEN_BRACKET}{}{CLOSE_BRACKET}", inner.iter().join(&sep))
            }
            Node::Nested(outer, inner) => write!(
                f,
                "{OPEN_BRACKET}{outer}{CLOSE_BRACKET}{OPEN_BRACKET}{}{CLOSE_BRACKET}",
                inner.iter().join(&sep)
            ),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Item<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Value(value) => write!(f, "{value}"),
            Item::Pair(outer, inner) => write!(f, "[{outer}, [{}]]", inner.iter().join(", ")),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Single(item) => write!(f, "{item}"),
            Selection::Many(items) => write!(f, "[{}]", items.iter().join(", ")),
        }
    }
}
