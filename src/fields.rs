use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Read access to the top-level string fields of a request message.
///
/// Generated request types implement this by mapping each routable field name to its value.
/// A field that is unset must return `None`; for proto3 `string` fields the empty string is
/// the unset value.
///
/// ```
/// use request_params::FieldValueLookup;
///
/// struct CreateTopicRequest {
///     parent: String,
/// }
///
/// impl FieldValueLookup for CreateTopicRequest {
///     fn field_value(&self, name: &str) -> Option<&str> {
///         match name {
///             "parent" if !self.parent.is_empty() => Some(&self.parent),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait FieldValueLookup {
    /// Returns the value of the field `name`, or `None` if it is unset or unknown.
    fn field_value(&self, name: &str) -> Option<&str>;
}

impl<T: FieldValueLookup + ?Sized> FieldValueLookup for &T {
    fn field_value(&self, name: &str) -> Option<&str> {
        (**self).field_value(name)
    }
}

impl<S: BuildHasher> FieldValueLookup for HashMap<String, String, S> {
    fn field_value(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl<S: BuildHasher> FieldValueLookup for HashMap<&str, &str, S> {
    fn field_value(&self, name: &str) -> Option<&str> {
        self.get(name).copied()
    }
}

impl FieldValueLookup for BTreeMap<String, String> {
    fn field_value(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// Pairs are searched in order; the first pair with a matching name is used.
impl FieldValueLookup for [(&str, &str)] {
    fn field_value(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| *value)
    }
}

impl<const N: usize> FieldValueLookup for [(&str, &str); N] {
    fn field_value(&self, name: &str) -> Option<&str> {
        self.as_slice().field_value(name)
    }
}

impl FieldValueLookup for Vec<(&str, &str)> {
    fn field_value(&self, name: &str) -> Option<&str> {
        self.as_slice().field_value(name)
    }
}
