//! Path templates for routing parameters.
//!
//! A template is a `/` separated sequence of segments. Each segment is a literal, a single
//! wildcard `*`, a multi-segment wildcard `**`, or a named capture `{name}` / `{name=pattern}`.
//!
//! ```text
//! {parent=projects/*}/topics/**
//! └──────┬──────────┘ └─┬──┘ └┬┘
//!     capture        literal  multi-wildcard
//! ```
//!
//! Templates are compiled once with [`compile`] into a [`CompiledPattern`], which can then be
//! matched against any number of values with [`CompiledPattern::match_capture`].

use std::fmt;

mod matcher;
mod parser;

pub use parser::compile;

/// A segment that may appear inside a capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlainSegment {
    Literal(String),
    SingleWildcard,
    MultiWildcard,
}

/// A segment of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSegment {
    /// Matches one segment equal to the text.
    Literal(String),
    /// Matches exactly one non-empty segment.
    SingleWildcard,
    /// Matches one or more segments, at least one of them non-empty. Only valid as the last
    /// segment of its sequence.
    MultiWildcard,
    /// A named group whose matched text is extracted.
    Capture(Capture),
}

/// A named capture and the segments it spans.
///
/// Equality compares the name and pattern only: `{name}` and `{name=*}` are the same capture.
#[derive(Debug, Clone)]
pub struct Capture {
    name: String,
    pattern: Vec<PlainSegment>,
    defaulted: bool,
}

impl Capture {
    pub(crate) fn new(name: impl Into<String>, pattern: Vec<PlainSegment>) -> Self {
        Self {
            name: name.into(),
            pattern,
            defaulted: false,
        }
    }

    /// A `{name}` capture with the implied single-segment pattern.
    pub(crate) fn single(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: vec![PlainSegment::SingleWildcard],
            defaulted: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &[PlainSegment] {
        &self.pattern
    }

    /// Returns true when the template wrote `{name}` without an explicit `=pattern`.
    pub fn is_defaulted(&self) -> bool {
        self.defaulted
    }
}

impl PartialEq for Capture {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.pattern == other.pattern
    }
}

impl Eq for Capture {}

/// A compiled path template.
///
/// Compiled patterns are immutable and can be shared freely between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    segments: Vec<PatternSegment>,
}

impl CompiledPattern {
    pub(crate) fn new(segments: Vec<PatternSegment>) -> Self {
        Self { segments }
    }

    /// The pattern `{name=**}`, capturing a whole value.
    pub fn capture_all(name: impl Into<String>) -> Self {
        Self::new(vec![PatternSegment::Capture(Capture::new(
            name,
            vec![PlainSegment::MultiWildcard],
        ))])
    }

    pub fn segments(&self) -> &[PatternSegment] {
        &self.segments
    }

    /// Iterate the captures of this pattern in template order.
    pub fn captures(&self) -> impl Iterator<Item = &Capture> {
        self.segments.iter().filter_map(|segment| match segment {
            PatternSegment::Capture(capture) => Some(capture),
            _ => None,
        })
    }
}

impl fmt::Display for PlainSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlainSegment::Literal(text) => f.write_str(text),
            PlainSegment::SingleWildcard => f.write_str("*"),
            PlainSegment::MultiWildcard => f.write_str("**"),
        }
    }
}

impl fmt::Display for Capture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}=", self.name)?;
        write_joined(f, &self.pattern)?;
        f.write_str("}")
    }
}

impl fmt::Display for PatternSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternSegment::Literal(text) => f.write_str(text),
            PatternSegment::SingleWildcard => f.write_str("*"),
            PatternSegment::MultiWildcard => f.write_str("**"),
            PatternSegment::Capture(capture) => write!(f, "{capture}"),
        }
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.segments)
    }
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str("/")?;
        }
        item.fmt(f)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_makes_defaults_explicit() {
        let pattern = compile("{parent}/topics/**").unwrap();
        assert_eq!(pattern.to_string(), "{parent=*}/topics/**");
    }

    #[test]
    fn test_capture_all() {
        let pattern = CompiledPattern::capture_all("parent");
        assert_eq!(pattern.to_string(), "{parent=**}");
        assert_eq!(pattern, compile("{parent=**}").unwrap());
    }

    #[test]
    fn test_default_capture_equals_explicit_form() {
        assert_eq!(compile("{p}").unwrap(), compile("{p=*}").unwrap());
        assert_eq!(
            compile("v1/{parent}/topics").unwrap(),
            compile("v1/{parent=*}/topics").unwrap()
        );
        assert_ne!(compile("{p}").unwrap(), compile("{p=**}").unwrap());
        assert_ne!(compile("{p}").unwrap(), compile("{q}").unwrap());
    }

    #[test]
    fn test_captures_in_order() {
        let pattern = compile("v1/{parent=projects/*}/{topic}").unwrap();
        let names: Vec<_> = pattern.captures().map(Capture::name).collect();
        assert_eq!(names, vec!["parent", "topic"]);

        let topic = pattern.captures().nth(1).unwrap();
        assert!(topic.is_defaulted());
        assert_eq!(topic.pattern(), &[PlainSegment::SingleWildcard]);
    }
}
