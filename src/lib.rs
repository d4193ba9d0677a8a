use std::fmt;

use crate::range::{
    expand::{expand, InclusiveRange},
    parser::parse_range,
    Error, Item, Leaf, Node, Selection,
};

pub mod fileindex;
pub mod range;

pub use fileindex::split_filename_index;

/// Parses and expands a range string such as `"1-10[2-3]"`.
///
/// `cast` converts every bracket-free value, e.g. `str::parse::<i64>`. Only a
/// lone scalar such as `"3"` is returned as [`Selection::Single`]; every range,
/// even `"3-3"`, stays a list.
pub fn expand_range<T, E, F>(source: &str, cast: F) -> Result<Selection<T>, Error>
where
    T: InclusiveRange + Clone,
    E: fmt::Display,
    F: Fn(&str) -> Result<T, E>,
{
    let nodes = parse_range(source, cast)?;
    if let [Node::Leaf(Leaf::Scalar(value))] = &nodes[..] {
        return Ok(Selection::Single(Item::Value(value.clone())));
    }
    Ok(Selection::Many(expand(&nodes)?))
}
