use std::fmt;

use super::{
    scanner::{closing_bracket, RangeScanner},
    Error, Leaf, Node, OPEN_BRACKET, SPAN_SEPARATOR, STEP_SEPARATOR,
};

/// Parses a range string into its tree, casting every value with `cast`.
///
/// Whitespace anywhere in `source` is ignored.
pub fn parse_range<T, E, F>(source: &str, cast: F) -> Result<Vec<Node<T>>, Error>
where
    T: Clone,
    E: fmt::Display,
    F: Fn(&str) -> Result<T, E>,
{
    let source = source
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>();
    parse_list(&source, &cast)
}

fn parse_list<T, E, F>(source: &str, cast: &F) -> Result<Vec<Node<T>>, Error>
where
    T: Clone,
    E: fmt::Display,
    F: Fn(&str) -> Result<T, E>,
{
    let mut nodes = Vec::new();
    for token in RangeScanner::new(source) {
        nodes.extend(parse_segment(token?, cast)?);
    }
    Ok(nodes)
}

/// Classifies one balanced token.
///
/// `[outer][inner]` yields one node per element of `outer`, `name[inner]`
/// and a bare value yield a single node.
fn parse_segment<T, E, F>(token: &str, cast: &F) -> Result<Vec<Node<T>>, Error>
where
    T: Clone,
    E: fmt::Display,
    F: Fn(&str) -> Result<T, E>,
{
    let Some(open) = token.find(OPEN_BRACKET) else {
        if token.is_empty() {
            return Err(Error::EmptySegment(token.to_owned()));
        }
        tracing::debug!(token, "plain segment");
        return Ok(vec![Node::Leaf(parse_leaf(token, cast)?)]);
    };

    if open == 0 {
        let close = closing_bracket(token, open)
            .ok_or_else(|| Error::UnbalancedBrackets(token.to_owned()))?;
        let outer = &token[1..close];
        let inner = suffix_body(token, close + 1)?;
        tracing::debug!(token, outer, inner, "nested segment");
        let inner = parse_list(inner, cast)?;
        return Ok(parse_list(outer, cast)?
            .into_iter()
            .map(|node| Node::Nested(Box::new(node), inner.clone()))
            .collect());
    }

    let name = &token[..open];
    let inner = suffix_body(token, open)?;
    tracing::debug!(token, name, inner, "suffixed segment");
    Ok(vec![Node::Suffixed(
        parse_leaf(name, cast)?,
        parse_list(inner, cast)?,
    )])
}

/// Returns the body of the bracket group starting at `open`, which must run
/// to the end of `token`.
fn suffix_body(token: &str, open: usize) -> Result<&str, Error> {
    if !token[open..].starts_with(OPEN_BRACKET) {
        return Err(Error::MalformedSegment(token.to_owned()));
    }
    let close = closing_bracket(token, open)
        .ok_or_else(|| Error::UnbalancedBrackets(token.to_owned()))?;
    if close + 1 != token.len() {
        return Err(Error::MalformedSegment(token.to_owned()));
    }
    let body = &token[open + 1..close];
    if body.is_empty() {
        return Err(Error::EmptySegment(token.to_owned()));
    }
    Ok(body)
}

/// Casts a bracket-free value.
///
/// A step separator takes priority over a span separator, so `1:2:7` is a
/// stepped range and `1-7` a plain one.
pub fn parse_leaf<T, E, F>(source: &str, cast: &F) -> Result<Leaf<T>, Error>
where
    E: fmt::Display,
    F: Fn(&str) -> Result<T, E>,
{
    let cast_part = |part: &str| {
        cast(part).map_err(|err| Error::Cast {
            text: part.to_owned(),
            reason: err.to_string(),
        })
    };

    if source.contains(STEP_SEPARATOR) {
        let parts = source.split(STEP_SEPARATOR).collect::<Vec<_>>();
        match parts[..] {
            [start, end] => Ok(Leaf::Range {
                start: cast_part(start)?,
                end: cast_part(end)?,
            }),
            [start, step, end] => Ok(Leaf::Stepped {
                start: cast_part(start)?,
                step: cast_part(step)?,
                end: cast_part(end)?,
            }),
            _ => Err(Error::InvalidArity(source.to_owned())),
        }
    } else if let Some((start, end)) = source.split_once(SPAN_SEPARATOR) {
        if end.contains(SPAN_SEPARATOR) {
            return Err(Error::InvalidArity(source.to_owned()));
        }
        Ok(Leaf::Range {
            start: cast_part(start)?,
            end: cast_part(end)?,
        })
    } else {
        Ok(Leaf::Scalar(cast_part(source)?))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn int(s: &str) -> Result<i64, std::num::ParseIntError> {
        s.parse()
    }

    fn range(start: i64, end: i64) -> Leaf<i64> {
        Leaf::Range { start, end }
    }

    #[test]
    fn test_parse_leaf() {
        assert_eq!(parse_leaf("3", &int), Ok(Leaf::Scalar(3)));
        assert_eq!(parse_leaf("3-6", &int), Ok(range(3, 6)));
        assert_eq!(parse_leaf("3:6", &int), Ok(range(3, 6)));
        assert_eq!(
            parse_leaf("3:2:7", &int),
            Ok(Leaf::Stepped {
                start: 3,
                step: 2,
                end: 7
            })
        );
    }

    #[test]
    fn test_parse_leaf_float() {
        let float = |s: &str| s.parse::<f64>();
        assert_eq!(
            parse_leaf("3.2:6.3", &float),
            Ok(Leaf::Range {
                start: 3.2,
                end: 6.3
            })
        );
    }

    #[test]
    fn test_parse_leaf_errors() {
        assert_eq!(
            parse_leaf("1-2-3", &int),
            Err(Error::InvalidArity("1-2-3".to_owned()))
        );
        assert_eq!(
            parse_leaf("1:2:3:4", &int),
            Err(Error::InvalidArity("1:2:3:4".to_owned()))
        );
        assert!(matches!(
            parse_leaf("1-x", &int),
            Err(Error::Cast { text, .. }) if text == "x"
        ));
        // The step separator wins, so the dash is handed to the caster.
        assert!(matches!(
            parse_leaf("1-2:3", &int),
            Err(Error::Cast { text, .. }) if text == "1-2"
        ));
    }

    #[test]
    fn test_parse_plain() {
        assert_eq!(
            parse_range("1, 3 -5", int),
            Ok(vec![Node::Leaf(Leaf::Scalar(1)), Node::Leaf(range(3, 5))])
        );
    }

    #[test]
    fn test_parse_suffixed() {
        assert_eq!(
            parse_range("1-10[2-3]", int),
            Ok(vec![Node::Suffixed(
                range(1, 10),
                vec![Node::Leaf(range(2, 3))]
            )])
        );
        assert_eq!(
            parse_range("1[2[3,4]]", int),
            Ok(vec![Node::Suffixed(
                Leaf::Scalar(1),
                vec![Node::Suffixed(
                    Leaf::Scalar(2),
                    vec![Node::Leaf(Leaf::Scalar(3)), Node::Leaf(Leaf::Scalar(4))]
                )]
            )])
        );
    }

    #[test]
    fn test_parse_nested() {
        let inner = vec![Node::Leaf(range(2, 3))];
        assert_eq!(
            parse_range("[0,4-5][2-3]", int),
            Ok(vec![
                Node::Nested(Box::new(Node::Leaf(Leaf::Scalar(0))), inner.clone()),
                Node::Nested(Box::new(Node::Leaf(range(4, 5))), inner),
            ])
        );
    }

    #[test]
    fn test_display_round_trip() {
        for source in ["1,3-5", "1-10[2,3]", "[0][2-3]", "1:2:7[0[1]]"] {
            let nodes = parse_range(source, int).unwrap();
            let rendered = nodes.iter().map(ToString::to_string).collect::<Vec<_>>();
            assert_eq!(rendered.join(","), source);
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_range("1,,2", int),
            Err(Error::EmptySegment(String::new()))
        );
        assert_eq!(
            parse_range("1[]", int),
            Err(Error::EmptySegment("1[]".to_owned()))
        );
        assert_eq!(
            parse_range("1[2]3", int),
            Err(Error::MalformedSegment("1[2]3".to_owned()))
        );
        assert_eq!(
            parse_range("[1-2]", int),
            Err(Error::MalformedSegment("[1-2]".to_owned()))
        );
        assert_eq!(
            parse_range("1-10[2-3", int),
            Err(Error::UnbalancedBrackets("1-10[2-3".to_owned()))
        );
    }
}
