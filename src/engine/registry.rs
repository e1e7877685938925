//! Engine factory registry
//!
//! Callers build an [`EngineRegistry`], register engine factories by name,
//! and hand the registry (usually behind an `Arc`) to whatever needs to
//! execute action sequences. Each lookup produces a fresh engine bound to
//! the requesting session.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use super::SolutionEngine;
use crate::error::{EngineError, EngineResult};
use crate::session::Session;

/// Factory producing an engine for a session
pub type EngineFactory =
    Arc<dyn Fn(&Session) -> EngineResult<Box<dyn SolutionEngine>> + Send + Sync>;

/// Named engine factories
#[derive(Default)]
pub struct EngineRegistry {
    factories: RwLock<HashMap<String, EngineFactory>>,
}

impl EngineRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the factory for `name`
    pub fn register<F>(&self, name: impl Into<String>, factory: F)
    where
        F: Fn(&Session) -> EngineResult<Box<dyn SolutionEngine>> + Send + Sync + 'static,
    {
        let mut factories = self.factories.write();
        factories.insert(name.into(), Arc::new(factory));
    }

    /// Register an engine type that implements `Default`
    pub fn register_default<T>(&self, name: impl Into<String>)
    where
        T: SolutionEngine + Default + 'static,
    {
        self.register(name, |_session| Ok(Box::new(T::default())));
    }

    /// Instantiate the engine registered as `name` for `session`
    pub fn create(&self, name: &str, session: &Session) -> EngineResult<Box<dyn SolutionEngine>> {
        // Clone the factory out so the lock is not held while it runs.
        let factory = self
            .factories
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| EngineError::NotRegistered(name.to_string()))?;

        tracing::debug!(engine = name, session = %session.id, "creating solution engine");
        factory(session)
    }

    /// Check whether a factory is registered under `name`
    pub fn has_engine(&self, name: &str) -> bool {
        self.factories.read().contains_key(name)
    }

    /// Names of all registered factories, sorted
    pub fn list_engines(&self) -> Vec<String> {
        let mut names: Vec<_> = self.factories.read().keys().cloned().collect();
        names.sort();
        names
    }
}
