use bon::Builder;

use crate::error::{MalformedTemplate, TemplateErrorKind};
use crate::template::{self, CompiledPattern};

/// A declared routing parameter, as written in an explicit routing annotation.
///
/// # Example
///
/// ```
/// use request_params::RoutingParameter;
///
/// let param = RoutingParameter::builder()
///     .field("parent")
///     .path_template("{project=projects/*}/**")
///     .build();
///
/// let rule = param.compile().unwrap();
/// assert_eq!(rule.key(), "project");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct RoutingParameter {
    /// Name of the request field the value is read from.
    #[builder(into)]
    pub field: String,

    /// Template with exactly one named capture. Absent or empty means `{field=**}`.
    #[builder(into)]
    pub path_template: Option<String>,

    /// Header key the capture is emitted under. Defaults to the capture name.
    #[builder(into)]
    pub key: Option<String>,
}

impl RoutingParameter {
    /// Compile this parameter into a [`RoutingRule`].
    pub fn compile(&self) -> Result<RoutingRule, MalformedTemplate> {
        RoutingRule::new(
            &self.field,
            self.path_template.as_deref(),
            self.key.as_deref(),
        )
    }
}

/// A compiled routing rule: read `field`, match it against `pattern`, emit the capture as `key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingRule {
    field: String,
    pattern: CompiledPattern,
    key: String,
}

impl RoutingRule {
    /// Build a rule from a field name, an optional path template and an optional output key.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedTemplate`] if the template fails to compile or does not contain
    /// exactly one named capture.
    pub fn new(
        field: impl Into<String>,
        path_template: Option<&str>,
        key: Option<&str>,
    ) -> Result<Self, MalformedTemplate> {
        let field = field.into();
        let template = path_template.filter(|template| !template.is_empty());
        let pattern = match template {
            Some(template) => template::compile(template)?,
            None => CompiledPattern::capture_all(field.as_str()),
        };

        let capture_name = {
            let mut captures = pattern.captures();
            match (captures.next(), captures.next()) {
                (Some(capture), None) => capture.name().to_string(),
                (None, _) => {
                    return Err(MalformedTemplate::new(
                        template.unwrap_or_default(),
                        TemplateErrorKind::MissingCapture,
                    ));
                }
                (Some(_), Some(_)) => {
                    return Err(MalformedTemplate::new(
                        template.unwrap_or_default(),
                        TemplateErrorKind::MultipleCaptures(pattern.captures().count()),
                    ));
                }
            }
        };

        Ok(Self {
            field,
            pattern,
            key: key.map_or(capture_name, str::to_string),
        })
    }

    /// Build a rule from an already compiled single-capture pattern, keyed by the capture name.
    pub(crate) fn from_pattern(field: impl Into<String>, pattern: CompiledPattern) -> Option<Self> {
        let key = pattern.captures().next()?.name().to_string();
        Some(Self {
            field: field.into(),
            pattern,
            key,
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Match `value` against this rule, returning the captured text.
    pub fn capture<'v>(&self, value: &'v str) -> Option<&'v str> {
        self.pattern.match_capture(value)
    }
}

/// An ordered list of routing rules. Later rules win over earlier ones for the same key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<RoutingRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: RoutingRule) {
        self.rules.push(rule);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RoutingRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Compile a list of declared parameters, preserving their order.
    pub fn from_parameters<'a>(
        params: impl IntoIterator<Item = &'a RoutingParameter>,
    ) -> Result<Self, MalformedTemplate> {
        params.into_iter().map(RoutingParameter::compile).collect()
    }
}

impl FromIterator<RoutingRule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = RoutingRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a RoutingRule;
    type IntoIter = std::slice::Iter<'a, RoutingRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
