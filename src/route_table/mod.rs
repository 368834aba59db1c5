use std::sync::Arc;

pub use crate::method::MethodPath;
use dashmap::{DashMap, Entry};
use tracing::debug;

use self::error::{MethodAlreadyRegistered, MethodNotFound};
use crate::plan::RoutingPlan;

pub mod error;

/// A table of compiled [`RoutingPlan`]s keyed by the RPC [`MethodPath`] they route.
///
/// Plans are compiled once and handed out as shared references, so any number of concurrent
/// calls can route through the same plan without copying it.
#[derive(Debug)]
pub struct RouteTable {
    plans: DashMap<MethodPath, Arc<RoutingPlan>, ahash::RandomState>,
}

impl RouteTable {
    /// Construct a new empty [`RouteTable`].
    pub fn new() -> RouteTable {
        Self::default()
    }

    /// Register the routing `plan` for `method`.
    pub fn register(
        &self,
        method: impl Into<MethodPath>,
        plan: RoutingPlan,
    ) -> Result<Arc<RoutingPlan>, MethodAlreadyRegistered> {
        match self.plans.entry(method.into()) {
            Entry::Occupied(entry) => Err(MethodAlreadyRegistered {
                method: entry.key().clone(),
            }),

            Entry::Vacant(slot) => {
                debug!(method = %slot.key(), rules = plan.rules().len(), "Registered routing plan");
                let plan = Arc::new(plan);
                slot.insert(Arc::clone(&plan));
                Ok(plan)
            }
        }
    }

    /// Remove the routing plan for `method`, returning it.
    pub fn remove(&self, method: &MethodPath) -> Result<Arc<RoutingPlan>, MethodNotFound> {
        self.plans
            .remove(method)
            .map(|(_, plan)| plan)
            .ok_or_else(|| MethodNotFound {
                method: method.clone(),
            })
    }

    /// Get the routing plan for `method`.
    pub fn get(&self, method: &MethodPath) -> Result<Arc<RoutingPlan>, MethodNotFound> {
        self.plans
            .get(method)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| MethodNotFound {
                method: method.clone(),
            })
    }

    pub fn contains(&self, method: &MethodPath) -> bool {
        self.plans.contains_key(method)
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            plans: DashMap::default(),
        }
    }
}
