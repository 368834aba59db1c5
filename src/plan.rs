use tracing::debug;

use crate::error::MalformedTemplate;
use crate::evaluate::{RoutingParams, evaluate};
use crate::fields::FieldValueLookup;
use crate::header::assemble;
use crate::rule::{RoutingParameter, RuleSet};
use crate::synthesize::HttpBinding;

/// How an RPC declares its routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingSpec {
    /// An explicit routing annotation. An empty list routes nothing.
    Explicit(Vec<RoutingParameter>),
    /// No routing annotation; rules are derived from the HTTP bindings.
    Implicit(HttpBinding),
}

/// Where the rules of a [`RoutingPlan`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSource {
    Explicit,
    Implicit,
}

/// The compiled routing of one RPC, ready to be evaluated against requests.
///
/// A plan is immutable once compiled and is intended to be built once per RPC and shared by
/// every call to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingPlan {
    rules: RuleSet,
    source: RuleSource,
}

impl RoutingPlan {
    /// Compile a routing declaration.
    ///
    /// Explicit parameters are compiled in declaration order. Otherwise the rules are
    /// synthesized from the HTTP bindings.
    pub fn compile(spec: &RoutingSpec) -> Result<Self, MalformedTemplate> {
        let plan = match spec {
            RoutingSpec::Explicit(params) => Self {
                rules: RuleSet::from_parameters(params)?,
                source: RuleSource::Explicit,
            },
            RoutingSpec::Implicit(binding) => Self {
                rules: binding.rules()?,
                source: RuleSource::Implicit,
            },
        };

        debug!(
            source = ?plan.source,
            rules = plan.rules.len(),
            "Compiled routing plan"
        );

        Ok(plan)
    }

    /// A plan evaluating an existing rule set.
    pub fn from_rules(rules: RuleSet) -> Self {
        Self {
            rules,
            source: RuleSource::Explicit,
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn source(&self) -> RuleSource {
        self.source
    }

    /// Select the routing params for a request.
    pub fn params<F: FieldValueLookup + ?Sized>(&self, fields: &F) -> RoutingParams {
        evaluate(&self.rules, fields)
    }

    /// Compute the routing header value for a request, or `None` if no header should be sent.
    pub fn route<F: FieldValueLookup + ?Sized>(&self, fields: &F) -> Option<String> {
        assemble(&self.params(fields))
    }
}
