//! Attaching routing headers to outgoing tonic requests.
//!
//! # Example
//!
//! ```ignore
//! use request_params::client::{HeaderInjector, InjectorConfig};
//!
//! let injector = HeaderInjector::new(InjectorConfig::default())?;
//!
//! let mut request = tonic::Request::new(CreateTopicRequest {
//!     parent: "projects/my-project".to_string(),
//!     ..Default::default()
//! });
//!
//! // Writes `x-goog-request-params: parent=projects%2Fmy-project`
//! injector.inject(&plan, &mut request)?;
//!
//! let response = client.create_topic(request).await?;
//! ```

mod config;
mod injector;

pub use config::InjectorConfig;
pub use injector::HeaderInjector;
