use std::fmt::Display;
use std::sync::Arc;

/// The fully-qualified name of an RPC method, e.g. `google.pubsub.v1.Publisher/CreateTopic`.
///
/// Cheap to clone; the name is shared.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct MethodPath(Arc<str>);

impl MethodPath {
    /// Create a new [`MethodPath`] from any type that can be converted into an `Arc<str>`.
    pub fn new(path: impl Into<Arc<str>>) -> Self {
        Self(path.into())
    }

    /// Returns the underlying string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The service part, e.g. `google.pubsub.v1.Publisher`.
    pub fn service(&self) -> Option<&str> {
        self.0.rsplit_once('/').map(|(service, _)| service)
    }

    /// The method part, e.g. `CreateTopic`.
    pub fn method(&self) -> &str {
        self.0.rsplit_once('/').map_or(self.as_str(), |(_, method)| method)
    }
}

impl Display for MethodPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for MethodPath {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for MethodPath {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}
