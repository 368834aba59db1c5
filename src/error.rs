use thiserror::Error;

use crate::route_table::error::{MethodAlreadyRegistered, MethodNotFound};

/// Indicates that a path template could not be compiled.
///
/// This is a configuration error: it is raised when a routing plan is built, never while a
/// request is being routed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed path template '{template}': {kind}")]
pub struct MalformedTemplate {
    pub template: String,
    pub kind: TemplateErrorKind,
}

impl MalformedTemplate {
    pub(crate) fn new(template: impl Into<String>, kind: TemplateErrorKind) -> Self {
        Self {
            template: template.into(),
            kind,
        }
    }
}

/// The grammar rule a [`MalformedTemplate`] violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateErrorKind {
    #[error("capture is never closed")]
    UnclosedCapture,

    #[error("captures cannot be nested")]
    NestedCapture,

    #[error("'}}' without a matching '{{'")]
    UnbalancedBrace,

    /// `**` appeared twice, or somewhere other than the end of its sequence.
    #[error("'**' may appear once, as the last segment of its sequence")]
    MisplacedMultiWildcard,

    #[error("capture name is empty")]
    EmptyCaptureName,

    #[error("invalid capture name '{0}'")]
    InvalidCaptureName(String),

    #[error("empty path segment")]
    EmptySegment,

    #[error("capture must span a whole segment, found '{0}'")]
    PartialSegmentCapture(String),

    #[error("routing template must contain a named capture")]
    MissingCapture,

    #[error("routing template must contain exactly one capture, found {0}")]
    MultipleCaptures(usize),

    #[error("invalid verb suffix")]
    InvalidVerb,
}

/// Errors surfaced by the routing library.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// A routing template failed to compile.
    #[error(transparent)]
    Template(#[from] MalformedTemplate),

    /// The configured metadata key is not a valid ASCII metadata name.
    #[error("invalid metadata key")]
    MetadataKey(#[from] tonic::metadata::errors::InvalidMetadataKey),

    /// The computed header could not be represented as a metadata value.
    #[error("invalid metadata value")]
    MetadataValue(#[from] tonic::metadata::errors::InvalidMetadataValue),

    #[error(transparent)]
    AlreadyRegistered(#[from] MethodAlreadyRegistered),

    #[error(transparent)]
    NotFound(#[from] MethodNotFound),
}
