//! Input parameter providers

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Source of named input parameters for an execution
pub trait ParameterProvider: fmt::Debug {
    /// Look up a parameter value
    fn parameter(&self, name: &str) -> Option<Value>;

    /// Names this provider can answer for
    fn parameter_names(&self) -> Vec<String>;
}

/// Parameter provider backed by a map
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimpleParameterProvider {
    values: HashMap<String, Value>,
}

impl SimpleParameterProvider {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder form of [`set`](Self::set)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }
}

impl ParameterProvider for SimpleParameterProvider {
    fn parameter(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned()
    }

    fn parameter_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.values.keys().cloned().collect();
        names.sort();
        names
    }
}

/// Providers keyed by scope (`request`, `session`, ...), consulted in
/// insertion order
#[derive(Debug, Default)]
pub struct ParameterProviders {
    entries: Vec<(String, Box<dyn ParameterProvider>)>,
}

impl ParameterProviders {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the provider for `scope`
    pub fn insert(&mut self, scope: impl Into<String>, provider: Box<dyn ParameterProvider>) {
        let scope = scope.into();
        match self.entries.iter_mut().find(|(key, _)| *key == scope) {
            Some(entry) => entry.1 = provider,
            None => self.entries.push((scope, provider)),
        }
    }

    /// Provider registered for `scope`
    pub fn get(&self, scope: &str) -> Option<&dyn ParameterProvider> {
        self.entries
            .iter()
            .find(|(key, _)| key == scope)
            .map(|(_, provider)| provider.as_ref())
    }

    /// First value for `name`, searching providers in insertion order
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.entries
            .iter()
            .find_map(|(_, provider)| provider.parameter(name))
    }

    /// Scope names in insertion order
    pub fn scopes(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Number of providers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no providers are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
