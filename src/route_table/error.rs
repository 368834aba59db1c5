use crate::method::MethodPath;

/// Indicates that a routing plan could not be registered because the method already has one.
#[derive(Debug, thiserror::Error)]
#[error("a routing plan is already registered for {method}")]
pub struct MethodAlreadyRegistered {
    pub method: MethodPath,
}

/// Indicates that no routing plan is registered for the method.
#[derive(Debug, thiserror::Error)]
#[error("no routing plan registered for {method}")]
pub struct MethodNotFound {
    pub method: MethodPath,
}
