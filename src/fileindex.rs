use std::fmt;

use crate::range::{
    expand::{expand, InclusiveRange},
    parser::parse_range,
    Error, Selection, CLOSE_BRACKET, OPEN_BRACKET,
};

/// Splits `file[1,2,3-6]` into the file name and its expanded indices.
///
/// Returns `None` for the indices when the name carries no bracket. Everything
/// from the first `[` to the final `]` is parsed as a range string. A missing
/// final `]` is an error rather than being tolerated.
pub fn split_filename_index<T, E, F>(
    source: &str,
    cast: F,
) -> Result<(&str, Option<Selection<T>>), Error>
where
    T: InclusiveRange + Clone,
    E: fmt::Display,
    F: Fn(&str) -> Result<T, E>,
{
    let Some((name, ranges)) = source.split_once(OPEN_BRACKET) else {
        return Ok((source, None));
    };
    let ranges = ranges
        .strip_suffix(CLOSE_BRACKET)
        .ok_or_else(|| Error::UnbalancedBrackets(source.to_owned()))?;

    tracing::debug!(name, ranges, "splitting file index");
    let items = expand(&parse_range(ranges, cast)?)?;
    Ok((name, Some(Selection::from_items(items))))
}
