use tonic::Request;
use tonic::metadata::{Ascii, MetadataKey, MetadataValue};
use tracing::debug;

use crate::client::config::InjectorConfig;
use crate::error::RoutingError;
use crate::fields::FieldValueLookup;
use crate::method::MethodPath;
use crate::plan::RoutingPlan;
use crate::route_table::RouteTable;

/// Computes the routing header of an outgoing request and writes it into the request metadata.
///
/// The injector holds no per-call state and can be shared between any number of tasks.
#[derive(Debug, Clone)]
pub struct HeaderInjector {
    key: MetadataKey<Ascii>,
    config: InjectorConfig,
}

impl HeaderInjector {
    /// Create a new injector.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::MetadataKey`] if the configured key is not a valid ASCII
    /// metadata name.
    pub fn new(config: InjectorConfig) -> Result<Self, RoutingError> {
        let key = MetadataKey::from_bytes(config.metadata_key.as_bytes())?;
        Ok(Self { key, config })
    }

    /// Route `request` through `plan` and attach the resulting header.
    ///
    /// Returns `true` if a header was attached. When no rule produces a value the request is
    /// left untouched and `false` is returned.
    pub fn inject<T>(&self, plan: &RoutingPlan, request: &mut Request<T>) -> Result<bool, RoutingError>
    where
        T: FieldValueLookup,
    {
        if !self.config.overwrite_existing && request.metadata().contains_key(&self.key) {
            debug!(key = %self.config.metadata_key, "Routing header already present, leaving it");
            return Ok(false);
        }

        let Some(header) = plan.route(request.get_ref()) else {
            debug!(key = %self.config.metadata_key, "No routing params for request");
            return Ok(false);
        };

        let value = MetadataValue::try_from(header.as_str())?;
        request.metadata_mut().insert(self.key.clone(), value);

        debug!(key = %self.config.metadata_key, value = %header, "Attached routing header");
        Ok(true)
    }

    /// Look up the plan for `method` in `table` and [`inject`](Self::inject) it.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::NotFound`] if `method` has no registered plan.
    pub fn inject_for<T>(
        &self,
        table: &RouteTable,
        method: &MethodPath,
        request: &mut Request<T>,
    ) -> Result<bool, RoutingError>
    where
        T: FieldValueLookup,
    {
        let plan = table.get(method)?;
        self.inject(&plan, request)
    }

    /// Get the injector configuration.
    pub fn config(&self) -> &InjectorConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::rule::{RoutingParameter, RuleSet};

    fn plan() -> RoutingPlan {
        let params = [RoutingParameter::builder()
            .field("parent")
            .path_template("{project=projects/*}/**")
            .build()];
        RoutingPlan::from_rules(RuleSet::from_parameters(&params).unwrap())
    }

    fn request(parent: &str) -> Request<HashMap<String, String>> {
        let mut fields = HashMap::new();
        fields.insert("parent".to_string(), parent.to_string());
        Request::new(fields)
    }

    #[test]
    fn test_inject_attaches_header() {
        let injector = HeaderInjector::new(InjectorConfig::default()).unwrap();
        let mut request = request("projects/100/topics/t");

        assert!(injector.inject(&plan(), &mut request).unwrap());
        assert_eq!(
            request
                .metadata()
                .get("x-goog-request-params")
                .and_then(|value| value.to_str().ok()),
            Some("project=projects%2F100")
        );
    }

    #[test]
    fn test_no_header_without_match() {
        let injector = HeaderInjector::new(InjectorConfig::default()).unwrap();
        let mut request = request("folders/1");

        assert!(!injector.inject(&plan(), &mut request).unwrap());
        assert!(request.metadata().get("x-goog-request-params").is_none());
    }

    #[test]
    fn test_existing_header_is_kept_when_not_overwriting() {
        let config = InjectorConfig::builder().overwrite_existing(false).build();
        let injector = HeaderInjector::new(config).unwrap();
        let mut request = request("projects/100/topics/t");
        request
            .metadata_mut()
            .insert("x-goog-request-params", MetadataValue::from_static("custom=1"));

        assert!(!injector.inject(&plan(), &mut request).unwrap());
        assert_eq!(
            request.metadata().get("x-goog-request-params"),
            Some(&MetadataValue::from_static("custom=1"))
        );
    }

    #[test]
    fn test_existing_header_is_replaced_by_default() {
        let injector = HeaderInjector::new(InjectorConfig::default()).unwrap();
        let mut request = request("projects/100/topics/t");
        request
            .metadata_mut()
            .insert("x-goog-request-params", MetadataValue::from_static("custom=1"));

        assert!(injector.inject(&plan(), &mut request).unwrap());
        assert_eq!(
            request.metadata().get_all("x-goog-request-params").iter().count(),
            1
        );
    }

    #[test]
    fn test_custom_metadata_key() {
        let config = InjectorConfig::builder()
            .metadata_key("x-routing-params")
            .build();
        let injector = HeaderInjector::new(config).unwrap();
        let mut request = request("projects/100/topics/t");

        assert!(injector.inject(&plan(), &mut request).unwrap());
        assert!(request.metadata().get("x-routing-params").is_some());
    }

    #[test]
    fn test_invalid_metadata_key() {
        let config = InjectorConfig::builder()
            .metadata_key("not a valid key")
            .build();
        let result = HeaderInjector::new(config);
        assert!(matches!(result, Err(RoutingError::MetadataKey(_))));
    }

    #[test]
    fn test_inject_for_unknown_method() {
        let injector = HeaderInjector::new(InjectorConfig::default()).unwrap();
        let table = RouteTable::new();
        let mut request = request("projects/100/topics/t");

        let result = injector.inject_for(
            &table,
            &MethodPath::from("google.pubsub.v1.Publisher/CreateTopic"),
            &mut request,
        );
        assert!(matches!(result, Err(RoutingError::NotFound(_))));
    }
}
