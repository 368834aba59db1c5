use crate::error::{MalformedTemplate, TemplateErrorKind};
use crate::template::{Capture, CompiledPattern, PatternSegment, PlainSegment};

/// Compile a path template into a [`CompiledPattern`].
///
/// Parsing is purely syntactic. The template is split on `/` outside of captures, and every
/// segment is classified as a literal, `*`, `**` or a `{name}` / `{name=pattern}` capture.
///
/// # Errors
///
/// Returns [`MalformedTemplate`] if a capture is unclosed or nested, a capture name is empty,
/// a segment is empty, or `**` appears more than once or anywhere but at the end of its sequence.
pub fn compile(template: &str) -> Result<CompiledPattern, MalformedTemplate> {
    parse(template).map_err(|kind| MalformedTemplate::new(template, kind))
}

fn parse(template: &str) -> Result<CompiledPattern, TemplateErrorKind> {
    let segments = split_top_level(template)?
        .into_iter()
        .map(parse_segment)
        .collect::<Result<Vec<_>, _>>()?;

    check_multi_wildcards(&segments)?;

    Ok(CompiledPattern::new(segments))
}

/// Split on `/` while outside of braces, rejecting unbalanced or nested braces.
fn split_top_level(template: &str) -> Result<Vec<&str>, TemplateErrorKind> {
    let mut pieces = Vec::new();
    let mut in_capture = false;
    let mut start = 0;

    for (i, byte) in template.bytes().enumerate() {
        match byte {
            b'{' if in_capture => return Err(TemplateErrorKind::NestedCapture),
            b'{' => in_capture = true,
            b'}' if !in_capture => return Err(TemplateErrorKind::UnbalancedBrace),
            b'}' => in_capture = false,
            b'/' if !in_capture => {
                pieces.push(&template[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if in_capture {
        return Err(TemplateErrorKind::UnclosedCapture);
    }

    pieces.push(&template[start..]);
    Ok(pieces)
}

fn parse_segment(piece: &str) -> Result<PatternSegment, TemplateErrorKind> {
    if piece.is_empty() {
        return Err(TemplateErrorKind::EmptySegment);
    }

    let inner = piece.strip_prefix('{').and_then(|rest| rest.strip_suffix('}'));
    match inner {
        Some(inner) if !inner.contains(['{', '}']) => parse_capture(inner),
        _ if piece.contains(['{', '}']) => {
            Err(TemplateErrorKind::PartialSegmentCapture(piece.to_string()))
        }
        _ => Ok(match parse_plain(piece)? {
            PlainSegment::Literal(text) => PatternSegment::Literal(text),
            PlainSegment::SingleWildcard => PatternSegment::SingleWildcard,
            PlainSegment::MultiWildcard => PatternSegment::MultiWildcard,
        }),
    }
}

fn parse_capture(inner: &str) -> Result<PatternSegment, TemplateErrorKind> {
    let (name, pattern) = match inner.split_once('=') {
        Some((name, pattern)) => (name, Some(pattern)),
        None => (inner, None),
    };

    if name.is_empty() {
        return Err(TemplateErrorKind::EmptyCaptureName);
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
    {
        return Err(TemplateErrorKind::InvalidCaptureName(name.to_string()));
    }

    let capture = match pattern {
        None => Capture::single(name),
        Some(pattern) => Capture::new(
            name,
            pattern
                .split('/')
                .map(parse_plain)
                .collect::<Result<Vec<_>, _>>()?,
        ),
    };

    Ok(PatternSegment::Capture(capture))
}

fn parse_plain(piece: &str) -> Result<PlainSegment, TemplateErrorKind> {
    match piece {
        "" => Err(TemplateErrorKind::EmptySegment),
        "*" => Ok(PlainSegment::SingleWildcard),
        "**" => Ok(PlainSegment::MultiWildcard),
        literal => Ok(PlainSegment::Literal(literal.to_string())),
    }
}

/// At most one `**` per pattern, and only as the last segment of the sequence holding it.
fn check_multi_wildcards(segments: &[PatternSegment]) -> Result<(), TemplateErrorKind> {
    let mut seen = 0;

    for (i, segment) in segments.iter().enumerate() {
        match segment {
            PatternSegment::MultiWildcard => {
                seen += 1;
                if i + 1 != segments.len() {
                    return Err(TemplateErrorKind::MisplacedMultiWildcard);
                }
            }
            PatternSegment::Capture(capture) => {
                let pattern = capture.pattern();
                for (j, inner) in pattern.iter().enumerate() {
                    if *inner == PlainSegment::MultiWildcard {
                        seen += 1;
                        if j + 1 != pattern.len() {
                            return Err(TemplateErrorKind::MisplacedMultiWildcard);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    if seen > 1 {
        return Err(TemplateErrorKind::MisplacedMultiWildcard);
    }

    Ok(())
}
