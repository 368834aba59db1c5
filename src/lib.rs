//! # request_params
//!
//! Computes the `x-goog-request-params` routing header for an outgoing RPC.
//!
//! An RPC declares its routing either explicitly, as an ordered list of routing parameters, or
//! implicitly through the URI templates of its HTTP bindings. Either way the declaration is
//! compiled once into a [`RoutingPlan`], which is then evaluated against the field values of
//! every request sent to that RPC.
//!
//! ```text
//! RoutingSpec ──compile──▶ RoutingPlan ──evaluate(fields)──▶ RoutingParams ──assemble──▶ header
//!   Explicit: [RoutingParameter]           last matching rule         k1=v1&k2=v2
//!   Implicit: HttpBinding (synthesize)     wins per key
//! ```
//!
//! ## Example
//!
//! ```
//! use request_params::{RoutingParameter, RoutingPlan, RoutingSpec};
//!
//! let spec = RoutingSpec::Explicit(vec![
//!     RoutingParameter::builder()
//!         .field("parent")
//!         .path_template("{project=projects/*}/**")
//!         .build(),
//!     RoutingParameter::builder()
//!         .field("billing_project")
//!         .path_template("{project=**}")
//!         .build(),
//! ]);
//! let plan = RoutingPlan::compile(&spec).unwrap();
//!
//! let fields = [("parent", "projects/100/topics/t1")];
//! assert_eq!(plan.route(&fields).as_deref(), Some("project=projects%2F100"));
//!
//! let fields = [("parent", "projects/100/topics/t1"), ("billing_project", "acct/9")];
//! assert_eq!(plan.route(&fields).as_deref(), Some("project=acct%2F9"));
//! ```
//!
//! Evaluation never fails: unset fields, patterns that don't match and empty captures simply
//! contribute nothing. Only compiling a malformed template is an error.

pub mod client;
pub mod method;
pub mod route_table;
pub mod template;

mod error;
mod evaluate;
mod fields;
mod header;
mod plan;
mod rule;
mod synthesize;

pub use error::{MalformedTemplate, RoutingError, TemplateErrorKind};
pub use evaluate::{HeaderEntry, RoutingParams, evaluate};
pub use fields::FieldValueLookup;
pub use header::{REQUEST_PARAMS_HEADER, assemble};
pub use method::MethodPath;
pub use plan::{RoutingPlan, RoutingSpec, RuleSource};
pub use route_table::RouteTable;
pub use rule::{RoutingParameter, RoutingRule, RuleSet};
pub use synthesize::{HttpBinding, synthesize};
pub use template::{CompiledPattern, compile};
