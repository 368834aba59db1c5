//! Derive routing rules from an RPC's HTTP bindings.
//!
//! When a method has no explicit routing annotation, every named capture of its URI template
//! becomes a routing parameter: the field named by the capture is matched against the
//! capture's own pattern and emitted under the field name.

use ahash::AHashSet;
use bon::Builder;
use tracing::debug;

use crate::error::{MalformedTemplate, TemplateErrorKind};
use crate::rule::{RoutingRule, RuleSet};
use crate::template::{self, Capture, CompiledPattern, PatternSegment, PlainSegment};

/// The HTTP bindings of an RPC: one primary URI template and any additional bindings.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct HttpBinding {
    /// Primary URI path template, e.g. `/v1/{parent=projects/*}/topics`.
    #[builder(into)]
    pub template: String,

    /// Alternate URI path templates, in declaration order.
    #[builder(default)]
    pub additional_bindings: Vec<String>,
}

impl HttpBinding {
    /// Derive the implicit routing rules for these bindings. See [`synthesize`].
    pub fn rules(&self) -> Result<RuleSet, MalformedTemplate> {
        synthesize(&self.template, &self.additional_bindings)
    }
}

/// Build the implicit rule set for a primary URI template and its additional bindings.
///
/// Captures are visited in the primary template first, then in each additional template in
/// order. Each capture yields a rule for the field of the same name with the pattern
/// `{name=<capture pattern>}`; a capture written as plain `{name}` matches the whole field
/// value (`{name=**}`). Only the first rule for a given field is kept.
///
/// # Errors
///
/// Returns [`MalformedTemplate`] if any template fails to compile.
pub fn synthesize<S: AsRef<str>>(
    primary: &str,
    additional: &[S],
) -> Result<RuleSet, MalformedTemplate> {
    let mut seen = AHashSet::new();
    let mut rules = RuleSet::new();

    let templates = std::iter::once(primary).chain(additional.iter().map(AsRef::<str>::as_ref));
    for uri_template in templates {
        let Some(pattern) = compile_uri(uri_template)? else {
            continue;
        };

        for capture in pattern.captures() {
            if !seen.insert(capture.name().to_string()) {
                debug!(
                    field = %capture.name(),
                    template = %uri_template,
                    "Field already routed by an earlier binding"
                );
                continue;
            }

            if let Some(rule) = RoutingRule::from_pattern(capture.name(), routing_pattern(capture)) {
                rules.push(rule);
            }
        }
    }

    debug!(primary = %primary, rules = rules.len(), "Synthesized implicit routing rules");

    Ok(rules)
}

/// The single-capture routing pattern for a capture found in a URI template.
fn routing_pattern(capture: &Capture) -> CompiledPattern {
    let pattern = match capture.is_defaulted() {
        true => vec![PlainSegment::MultiWildcard],
        false => capture.pattern().to_vec(),
    };
    CompiledPattern::new(vec![PatternSegment::Capture(Capture::new(
        capture.name(),
        pattern,
    ))])
}

/// Compile the path portion of a URI template, without the leading `/` and any `:verb`.
///
/// Returns `None` for a template with no path segments.
fn compile_uri(uri_template: &str) -> Result<Option<CompiledPattern>, MalformedTemplate> {
    let path = uri_template.strip_prefix('/').unwrap_or(uri_template);

    // The verb, if any, follows the last segment and the last capture.
    let tail = path.rfind(['/', '}']).map_or(0, |i| i + 1);
    let path = match path[tail..].find(':') {
        Some(offset) => {
            let (path, verb) = path.split_at(tail + offset);
            if verb.len() == 1 || verb.contains(['{', '}']) {
                return Err(MalformedTemplate::new(
                    uri_template,
                    TemplateErrorKind::InvalidVerb,
                ));
            }
            path
        }
        None => path,
    };

    if path.is_empty() {
        return Ok(None);
    }

    template::compile(path)
        .map(Some)
        .map_err(|err| MalformedTemplate::new(uri_template, err.kind))
}
