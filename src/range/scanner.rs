use super::{Error, CLOSE_BRACKET, LIST_SEPARATOR, OPEN_BRACKET};

/// Splits a range string on the commas that are not inside brackets.
///
/// Every yielded token has balanced brackets. A closing bracket without a
/// matching opening bracket, or an opening bracket that is never closed,
/// yields [`Error::UnbalancedBrackets`] and ends the scan.
#[derive(Debug)]
pub struct RangeScanner<'a> {
    source: &'a str,
    rest: Option<&'a str>,
}

impl<'a> RangeScanner<'a> {
    pub fn new(source: &'a str) -> Self {
        RangeScanner {
            source,
            rest: Some(source),
        }
    }
}

impl<'a> Iterator for RangeScanner<'a> {
    type Item = Result<&'a str, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;

        let mut depth = 0usize;
        for (i, c) in rest.char_indices() {
            match c {
                OPEN_BRACKET => depth += 1,
                CLOSE_BRACKET => {
                    if depth == 0 {
                        self.rest = None;
                        return Some(Err(Error::UnbalancedBrackets(self.source.to_owned())));
                    }
                    depth -= 1;
                }
                LIST_SEPARATOR if depth == 0 => {
                    self.rest = Some(&rest[i + c.len_utf8()..]);
                    let token = &rest[..i];
                    tracing::trace!(token, "scanned token");
                    return Some(Ok(token));
                }
                _ => {}
            }
        }

        self.rest = None;
        if depth != 0 {
            return Some(Err(Error::UnbalancedBrackets(self.source.to_owned())));
        }
        tracing::trace!(token = rest, "scanned final token");
        Some(Ok(rest))
    }
}

/// Returns the byte index of the bracket closing the one at `open`.
pub fn closing_bracket(source: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in source[open..].char_indices() {
        match c {
            OPEN_BRACKET => depth += 1,
            CLOSE_BRACKET => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn scan(source: &str) -> Result<Vec<&str>, Error> {
        RangeScanner::new(source).collect()
    }

    #[test]
    fn test_scanner() {
        assert_eq!(scan("1,3-5,7:2:11"), Ok(vec!["1", "3-5", "7:2:11"]));
    }

    #[test]
    fn test_inner_commas() {
        assert_eq!(
            scan("1-10[2,3],4[5[6,7],8]"),
            Ok(vec!["1-10[2,3]", "4[5[6,7],8]"])
        );
        assert_eq!(scan("[1,2][3,4]"), Ok(vec!["[1,2][3,4]"]));
    }

    #[test]
    fn test_empty_tokens() {
        assert_eq!(scan(""), Ok(vec![""]));
        assert_eq!(scan("1,,2,"), Ok(vec!["1", "", "2", ""]));
    }

    #[test]
    fn test_unbalanced() {
        assert_eq!(
            scan("1-10[2-3"),
            Err(Error::UnbalancedBrackets("1-10[2-3".to_owned()))
        );
        assert_eq!(
            scan("1],2[3"),
            Err(Error::UnbalancedBrackets("1],2[3".to_owned()))
        );
    }

    #[test]
    fn test_stops_after_error() {
        let mut scanner = RangeScanner::new("1,2]");
        assert_eq!(scanner.next(), Some(Ok("1")));
        assert!(matches!(scanner.next(), Some(Err(_))));
        assert_eq!(scanner.next(), None);
    }

    #[test]
    fn test_closing_bracket() {
        assert_eq!(closing_bracket("1[2[3]]", 1), Some(6));
        assert_eq!(closing_bracket("1[2[3]]", 3), Some(5));
        assert_eq!(closing_bracket("[1][2]", 0), Some(2));
        assert_eq!(closing_bracket("1[2", 1), None);
    }
}
