use bon::Builder;

use crate::header::REQUEST_PARAMS_HEADER;

/// Configuration for the [`HeaderInjector`](super::HeaderInjector).
#[derive(Debug, Clone, Builder)]
pub struct InjectorConfig {
    /// Metadata key the routing header is written under.
    #[builder(into, default = REQUEST_PARAMS_HEADER.to_string())]
    pub metadata_key: String,

    /// Replace a routing header the caller already set on the request.
    /// If false, a request that already carries the key is left untouched.
    #[builder(default = true)]
    pub overwrite_existing: bool,
}

impl Default for InjectorConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
