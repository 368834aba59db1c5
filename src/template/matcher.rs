use std::ops::Range;

use crate::template::{CompiledPattern, PatternSegment, PlainSegment};

/// A single matching step. Captures are flattened into the steps of their pattern.
enum Step<'p> {
    Literal(&'p str),
    Single,
    Multi,
}

impl PlainSegment {
    fn step(&self) -> Step<'_> {
        match self {
            PlainSegment::Literal(text) => Step::Literal(text),
            PlainSegment::SingleWildcard => Step::Single,
            PlainSegment::MultiWildcard => Step::Multi,
        }
    }
}

/// The value being matched, pre-split into segment byte ranges.
struct Walk<'v> {
    value: &'v str,
    spans: Vec<Range<usize>>,
    /// Segments consumed by the pattern's `**`, if it has one.
    multi_len: usize,
    cursor: usize,
}

impl<'v> Walk<'v> {
    fn consume(&mut self, step: Step<'_>) -> Option<()> {
        let span = self.spans.get(self.cursor)?.clone();
        match step {
            Step::Literal(text) => {
                (&self.value[span] == text).then_some(())?;
                self.cursor += 1;
            }
            Step::Single => {
                (!span.is_empty()).then_some(())?;
                self.cursor += 1;
            }
            Step::Multi => {
                let end = self.cursor + self.multi_len;
                let covered = self.spans.get(self.cursor..end)?;
                covered.iter().any(|span| !span.is_empty()).then_some(())?;
                self.cursor = end;
            }
        }
        Some(())
    }

    /// The text covered by segments `first..self.cursor`, internal `/` included.
    fn text_since(&self, first: usize) -> &'v str {
        let start = self.spans[first].start;
        let end = self.spans[self.cursor - 1].end;
        &self.value[start..end]
    }
}

impl CompiledPattern {
    /// Match `value` and return every capture as `(name, captured text)` in template order.
    ///
    /// Returns `None` if the value does not match the whole pattern. Since `**` is only
    /// admitted once and at the end of its sequence, the number of segments it consumes is
    /// fixed by the length of the value and the match is a single left-to-right walk.
    pub fn match_captures<'p, 'v>(&'p self, value: &'v str) -> Option<Vec<(&'p str, &'v str)>> {
        let spans = segment_spans(value);
        let (fixed, has_multi) = self.shape();

        let multi_len = match has_multi {
            true if spans.len() > fixed => spans.len() - fixed,
            false if spans.len() == fixed => 0,
            _ => return None,
        };

        let mut walk = Walk {
            value,
            spans,
            multi_len,
            cursor: 0,
        };
        let mut captured = Vec::new();

        for segment in self.segments() {
            match segment {
                PatternSegment::Literal(text) => walk.consume(Step::Literal(text))?,
                PatternSegment::SingleWildcard => walk.consume(Step::Single)?,
                PatternSegment::MultiWildcard => walk.consume(Step::Multi)?,
                PatternSegment::Capture(capture) => {
                    let first = walk.cursor;
                    for inner in capture.pattern() {
                        walk.consume(inner.step())?;
                    }
                    captured.push((capture.name(), walk.text_since(first)));
                }
            }
        }

        (walk.cursor == walk.spans.len()).then_some(captured)
    }

    /// Match `value` and return the text of the first capture.
    ///
    /// Returns `None` if the value does not match or the pattern has no capture.
    pub fn match_capture<'v>(&self, value: &'v str) -> Option<&'v str> {
        self.match_captures(value)?
            .into_iter()
            .next()
            .map(|(_, text)| text)
    }

    /// Returns true if `value` matches the whole pattern.
    pub fn is_match(&self, value: &str) -> bool {
        self.match_captures(value).is_some()
    }

    /// The number of single-segment steps, and whether a `**` is present.
    fn shape(&self) -> (usize, bool) {
        let mut fixed = 0;
        let mut has_multi = false;
        let mut count = |step: Step<'_>| match step {
            Step::Multi => has_multi = true,
            _ => fixed += 1,
        };

        for segment in self.segments() {
            match segment {
                PatternSegment::Literal(text) => count(Step::Literal(text)),
                PatternSegment::SingleWildcard => count(Step::Single),
                PatternSegment::MultiWildcard => count(Step::Multi),
                PatternSegment::Capture(capture) => {
                    capture.pattern().iter().for_each(|inner| count(inner.step()))
                }
            }
        }

        (fixed, has_multi)
    }
}

fn segment_spans(value: &str) -> Vec<Range<usize>> {
    let mut start = 0;
    value
        .split('/')
        .map(|part| {
            let span = start..start + part.len();
            start = span.end + 1;
            span
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::template::compile;

    fn capture(template: &str, value: &str) -> Option<String> {
        compile(template)
            .unwrap()
            .match_capture(value)
            .map(str::to_string)
    }

    #[test]
    fn test_capture_prefix_with_trailing_multi() {
        assert_eq!(
            capture("{parent=projects/*}/**", "projects/100/topics/t1").as_deref(),
            Some("projects/100")
        );
    }

    #[test]
    fn test_default_capture_is_single_segment() {
        assert_eq!(capture("{parent}", "abc").as_deref(), Some("abc"));
        assert_eq!(capture("{parent}", "a/b"), None);
    }

    #[test]
    fn test_capture_all() {
        assert_eq!(
            capture("{name=**}", "projects/p/instances/i").as_deref(),
            Some("projects/p/instances/i")
        );
        assert_eq!(capture("{name=**}", ""), None);
        assert_eq!(capture("{name=**}", "/"), None);
        assert_eq!(capture("{name=**}", "//"), None);
        assert_eq!(capture("{name=**}", "a//b").as_deref(), Some("a//b"));
        assert_eq!(capture("{name=**}", "/a").as_deref(), Some("/a"));
    }

    #[test]
    fn test_trailing_multi_needs_non_empty_text() {
        assert_eq!(capture("{parent=projects/*}/**", "projects/1/"), None);
        assert_eq!(capture("{parent=projects/*}/**", "projects/1//"), None);
        assert_eq!(
            capture("{parent=projects/*}/**", "projects/1//x").as_deref(),
            Some("projects/1")
        );
    }

    #[test]
    fn test_captured_text_is_never_empty() {
        let templates = ["{name=**}", "{name}", "{name=a/**}", "a/{name=*}/**"];
        let values = ["", "/", "a", "a/", "a//", "a/b", "/a", "a/b/c"];
        for template in templates {
            for value in values {
                if let Some(text) = capture(template, value) {
                    assert!(!text.is_empty(), "{template} on {value:?}");
                }
            }
        }
    }

    #[test]
    fn test_capture_in_the_middle() {
        let template = "projects/*/{instance=instances/*}/tables/*";
        assert_eq!(
            capture(template, "projects/p/instances/i/tables/t").as_deref(),
            Some("instances/i")
        );
        assert_eq!(capture(template, "projects/p/instances/i/tables/t/extra"), None);
        assert_eq!(capture(template, "extra/projects/p/instances/i/tables/t"), None);
        assert_eq!(capture(template, "projects/p/instances//tables/t"), None);
        assert_eq!(capture(template, "projects/p/i/tables/t"), None);
        assert_eq!(capture(template, "projects/p/instances/i"), None);
    }

    #[test]
    fn test_multi_inside_capture() {
        let template = "projects/*/{table=instances/*/tables/**}";
        assert_eq!(
            capture(template, "projects/p/instances/i/tables/t/extra").as_deref(),
            Some("instances/i/tables/t/extra")
        );
        assert_eq!(capture(template, "projects/p/instances/i/tables"), None);
        assert_eq!(capture(template, "projects/p/instances/i/tables/"), None);
    }

    #[test]
    fn test_multi_in_capture_followed_by_suffix() {
        let template = "{name=projects/**}/versions/*";
        assert_eq!(
            capture(template, "projects/p/secrets/s/versions/1").as_deref(),
            Some("projects/p/secrets/s")
        );
        assert_eq!(capture(template, "projects/versions/1"), None);
    }

    #[test]
    fn test_literal_mismatch() {
        assert_eq!(capture("{parent=projects/*}", "folders/1"), None);
        assert_eq!(capture("{parent=projects/*}", "projects/1/extra"), None);
    }

    #[test]
    fn test_single_wildcard_rejects_empty_segment() {
        assert_eq!(capture("{parent=projects/*}", "projects/"), None);
        assert_eq!(capture("{parent}", ""), None);
    }

    #[test]
    fn test_no_capture_pattern() {
        let pattern = compile("projects/*").unwrap();
        assert!(pattern.is_match("projects/1"));
        assert_eq!(pattern.match_capture("projects/1"), None);
    }

    #[test]
    fn test_multiple_captures() {
        let pattern = compile("{project=projects/*}/{topic=topics/*}").unwrap();
        assert_eq!(
            pattern.match_captures("projects/p/topics/t"),
            Some(vec![("project", "projects/p"), ("topic", "topics/t")])
        );
    }

    #[test]
    fn test_match_is_deterministic() {
        let pattern = compile("{parent=projects/*}/**").unwrap();
        let value = "projects/100/topics/t1";
        let first = pattern.match_capture(value);
        for _ in 0..8 {
            assert_eq!(pattern.match_capture(value), first);
        }
    }

    #[test]
    fn test_non_ascii_values() {
        assert_eq!(
            capture("{parent=projects/*}/**", "projects/üñí/x").as_deref(),
            Some("projects/üñí")
        );
    }
}
