use std::iter;

use super::{Error, Item, Leaf, Node};

/// Builds the values from `start` to `end`, both included.
pub trait InclusiveRange: Sized {
    fn inclusive(start: &Self, end: &Self, step: Option<&Self>) -> Result<Vec<Self>, Error>;
}

macro_rules! impl_inclusive_range {
    ($($ty:ty),*) => {
        $(
            impl InclusiveRange for $ty {
                fn inclusive(start: &Self, end: &Self, step: Option<&Self>) -> Result<Vec<Self>, Error> {
                    let (start, end) = (*start, *end);
                    let step = step.copied().unwrap_or(1);
                    if step == 0 {
                        return Err(Error::ZeroStep);
                    }
                    let ascending = step > 0;
                    Ok(iter::successors(Some(start), |value| value.checked_add(step))
                        .take_while(|&value| if ascending { value <= end } else { value >= end })
                        .collect())
                }
            }
        )*
    };
}

impl_inclusive_range!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

pub fn expand<T>(nodes: &[Node<T>]) -> Result<Vec<Item<T>>, Error>
where
    T: InclusiveRange + Clone,
{
    expand_with(nodes, &T::inclusive)
}

/// Plain values and ranges are flattened into one list. An element with a
/// sub-range becomes an [`Item::Pair`] of the outer value and the expanded
/// inner range; an outer range yields one pair per value, all sharing the
/// same inner list.
pub fn expand_with<T, R>(nodes: &[Node<T>], range: &R) -> Result<Vec<Item<T>>, Error>
where
    T: Clone,
    R: Fn(&T, &T, Option<&T>) -> Result<Vec<T>, Error>,
{
    tracing::debug!(nodes = nodes.len(), "expanding range");
    let mut items = Vec::new();
    for node in nodes {
        match expand_node(node, range)? {
            Expansion::Value(value) => items.push(Item::Value(value)),
            Expansion::List(list) => items.extend(list),
        }
    }
    Ok(items)
}

enum Expansion<T> {
    Value(T),
    List(Vec<Item<T>>),
}

fn expand_node<T, R>(node: &Node<T>, range: &R) -> Result<Expansion<T>, Error>
where
    T: Clone,
    R: Fn(&T, &T, Option<&T>) -> Result<Vec<T>, Error>,
{
    match node {
        Node::Leaf(leaf) => expand_leaf(leaf, range),
        Node::Suffixed(leaf, inner) => pair(expand_leaf(leaf, range)?, inner, range),
        Node::Nested(outer, inner) => pair(expand_node(outer, range)?, inner, range),
    }
}

fn expand_leaf<T, R>(leaf: &Leaf<T>, range: &R) -> Result<Expansion<T>, Error>
where
    R: Fn(&T, &T, Option<&T>) -> Result<Vec<T>, Error>,
    T: Clone,
{
    let values = match leaf {
        Leaf::Scalar(value) => return Ok(Expansion::Value(value.clone())),
        Leaf::Range { start, end } => range(start, end, None)?,
        Leaf::Stepped { start, step, end } => range(start, end, Some(step))?,
    };
    Ok(Expansion::List(values.into_iter().map(Item::Value).collect()))
}

fn pair<T, R>(outer: Expansion<T>, inner: &[Node<T>], range: &R) -> Result<Expansion<T>, Error>
where
    T: Clone,
    R: Fn(&T, &T, Option<&T>) -> Result<Vec<T>, Error>,
{
    let inner = expand_with(inner, range)?;
    let pairs = match outer {
        Expansion::Value(value) => vec![Item::pair(Item::Value(value), inner)],
        Expansion::List(list) => list
            .into_iter()
            .map(|item| Item::pair(item, inner.clone()))
            .collect(),
    };
    Ok(Expansion::List(pairs))
}
