//! Dot-separated paths.
//!
//! A path like `params.0.*.uri` is split on `.` into segments. Whether a
//! numeric segment is an array index or an object key is decided by the
//! container it is applied to, so a segment keeps both readings.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// `*`: every element of an array or every key of an object.
    Wildcard,
    /// Literal object key; `index` is set when the token is all ASCII digits.
    Token { key: String, index: Option<usize> },
}

impl Segment {
    fn parse(token: &str) -> Self {
        if token == "*" {
            return Segment::Wildcard;
        }
        let index = if is_integer(token) {
            token.parse().ok()
        } else {
            None
        };
        Segment::Token {
            key: token.to_string(),
            index,
        }
    }
}

/// A parsed path. Parsing never fails: every string is a valid path, it just
/// may not resolve to anything in a given document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    source: String,
    segments: Vec<Segment>,
}

impl Path {
    pub fn parse(source: &str) -> Self {
        Path {
            source: source.to_string(),
            segments: source.split('.').map(Segment::parse).collect(),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl From<&str> for Path {
    fn from(source: &str) -> Self {
        Path::parse(source)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn is_integer(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
