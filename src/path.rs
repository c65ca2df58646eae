//! Dotted field references (`user.profile.name`) as ordered segment lists.
use std::fmt;

/// Loop-body token for "the current item".
pub const SELF_KEYWORD: &str = "this";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path(Vec<String>);

impl Path {
    /// Split on `.`. Returns `None` if any segment is empty, so `a..b` or `.`
    /// never reach the schema.
    ///
    /// Bracket segments (`items[0]`) are not decomposed; they stay one opaque
    /// segment.
    pub fn parse(raw: &str) -> Option<Self> {
        let segments = raw
            .split('.')
            .map(|s| if s.is_empty() { None } else { Some(s.to_string()) })
            .collect::<Option<Vec<_>>>()?;
        Some(Self(segments))
    }

    pub fn segments(&self) -> &[String] { &self.0 }

    pub fn first(&self) -> &str {
        // parse() guarantees at least one segment
        &self.0[0]
    }

    /// `(last, parents)`
    pub fn split_last(&self) -> (&String, &[String]) {
        let (last, parents) = self.0.split_last().unwrap_or_else(|| unreachable!("empty path"));
        (last, parents)
    }

    /// True when the path points into the current loop item.
    pub fn is_self_reference(&self) -> bool {
        self.first() == SELF_KEYWORD
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}
