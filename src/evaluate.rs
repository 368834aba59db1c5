use tracing::{debug, trace};

use crate::fields::FieldValueLookup;
use crate::rule::RuleSet;

/// A single routing header pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderEntry {
    pub key: String,
    pub value: String,
}

/// The key/value pairs selected for one request.
///
/// Keys keep the position of their first insertion; overwriting a key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingParams {
    entries: Vec<HeaderEntry>,
}

impl RoutingParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, returning the previous value if the key was present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => Some(std::mem::replace(&mut entry.value, value)),
            None => {
                self.entries.push(HeaderEntry { key, value });
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HeaderEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RoutingParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl<'a> IntoIterator for &'a RoutingParams {
    type Item = &'a HeaderEntry;
    type IntoIter = std::slice::Iter<'a, HeaderEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Evaluate `rules` in order against the request `fields`.
///
/// A rule contributes only when its field is set, its pattern matches, and the captured text is
/// non-empty. A contributing rule overwrites whatever an earlier rule stored under the same key,
/// so the last matching rule in list order wins.
pub fn evaluate<F>(rules: &RuleSet, fields: &F) -> RoutingParams
where
    F: FieldValueLookup + ?Sized,
{
    let mut params = RoutingParams::new();

    for rule in rules {
        let Some(value) = fields.field_value(rule.field()) else {
            debug!(field = %rule.field(), key = %rule.key(), "Routing field unset, skipping rule");
            continue;
        };

        let captured = match rule.capture(value) {
            Some(captured) if !captured.is_empty() => captured,
            // The matcher never captures empty text; an empty value is still never emitted.
            Some(_) => {
                debug!(field = %rule.field(), key = %rule.key(), "Empty capture, skipping rule");
                continue;
            }
            None => {
                debug!(
                    field = %rule.field(),
                    key = %rule.key(),
                    pattern = %rule.pattern(),
                    "Routing field did not match, skipping rule"
                );
                continue;
            }
        };

        trace!(field = %rule.field(), key = %rule.key(), value = %captured, "Captured routing value");

        if let Some(previous) = params.insert(rule.key(), captured) {
            debug!(
                key = %rule.key(),
                previous = %previous,
                value = %captured,
                "Later rule overrides routing value"
            );
        }
    }

    params
}
