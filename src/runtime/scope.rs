use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::runtime::Number;

/// How variable names are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamePolicy {
    /// Names match ignoring ASCII case; the first spelling stored wins
    CaseInsensitive,
    /// Names match only when identical
    Exact,
}

impl NamePolicy {
    fn matches(&self, stored: &str, wanted: &str) -> bool {
        match self {
            NamePolicy::CaseInsensitive => stored.eq_ignore_ascii_case(wanted),
            NamePolicy::Exact => stored == wanted,
        }
    }
}

/// Variable storage for one evaluation run
///
/// Entries iterate in sorted name order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    /// Variables keyed by the spelling of their first assignment
    variables: BTreeMap<String, Number>,
    /// Name comparison policy
    policy: NamePolicy,
}

impl Scope {
    /// Creates an empty scope
    pub fn new(policy: NamePolicy) -> Self {
        Scope {
            variables: BTreeMap::new(),
            policy,
        }
    }

    /// Name comparison policy of this scope
    pub fn policy(&self) -> NamePolicy {
        self.policy
    }

    /// Gets the value of a variable by name
    pub fn get(&self, name: &str) -> Result<Number> {
        self.lookup_key(name)
            .and_then(|key| self.variables.get(key))
            .copied()
            .ok_or_else(|| Error::UndefinedVariable {
                name: name.to_string(),
            })
    }

    /// Sets a variable, overwriting any entry whose name matches under the policy
    pub fn set(&mut self, name: &str, value: Number) {
        let key = self
            .lookup_key(name)
            .map(str::to_string)
            .unwrap_or_else(|| name.to_string());
        self.variables.insert(key, value);
    }

    /// Checks whether a variable is defined
    pub fn contains(&self, name: &str) -> bool {
        self.lookup_key(name).is_some()
    }

    /// Number of variables
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether no variable has been assigned
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Iterates over `(name, value)` pairs in sorted name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Number)> {
        self.variables.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Consumes the scope, returning the stored variables
    pub fn into_map(self) -> BTreeMap<String, Number> {
        self.variables
    }

    fn lookup_key(&self, name: &str) -> Option<&str> {
        match self.policy {
            NamePolicy::Exact => self
                .variables
                .get_key_value(name)
                .map(|(key, _)| key.as_str()),
            NamePolicy::CaseInsensitive => self
                .variables
                .keys()
                .find(|key| self.policy.matches(key, name))
                .map(String::as_str),
        }
    }
}

impl Default for Scope {
    fn default() -> Self {
        Scope::new(NamePolicy::CaseInsensitive)
    }
}
