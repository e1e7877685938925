//! In-memory solution engine
//!
//! Serves canned outputs from a [`MemoryCatalog`] keyed by action path.
//! Used by the CLI and the test suites; the catalog has a JSON form:
//!
//! ```json
//! {
//!   "actions": {
//!     "/samples/filters/regions.xaction": [
//!       { "name": "row-count", "type": "string", "value": "2" },
//!       { "name": "regions", "type": "result-set",
//!         "columns": ["code", "label"],
//!         "rows": [["EU", "Europe"], ["NA", "North America"]] }
//!     ]
//!   }
//! }
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{
    ActionParameter, ExecutionRequest, LogLevel, ParameterValue, RuntimeContext, SolutionEngine,
};
use crate::error::{EngineError, EngineResult};
use crate::resultset::MemoryResultSet;
use crate::session::{Session, SessionId};

/// Registry name conventionally used for [`MemoryEngine`]
pub const MEMORY_ENGINE: &str = "memory";

/// One canned output of an action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputFixture {
    /// Output name
    pub name: String,
    /// Declared type tag
    #[serde(rename = "type")]
    pub param_type: String,
    /// Columns, present for tabular outputs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    /// Rows of a tabular output
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<Vec<Value>>,
    /// Scalar value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl OutputFixture {
    fn to_parameter(&self) -> ActionParameter {
        let value = match (&self.columns, &self.value) {
            (Some(columns), _) => {
                let mut set = MemoryResultSet::new(columns.iter().cloned());
                for row in &self.rows {
                    set.add_row(row.clone());
                }
                ParameterValue::ResultSet(Arc::new(set))
            }
            (None, Some(value)) => ParameterValue::Scalar(value.clone()),
            (None, None) => ParameterValue::Empty,
        };
        ActionParameter::new(&self.name, &self.param_type, value)
    }
}

/// Canned outputs per action path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryCatalog {
    /// Ordered outputs keyed by action path
    #[serde(default)]
    pub actions: HashMap<String, Vec<OutputFixture>>,
}

impl MemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from JSON text
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load a catalog from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read(path).with_context(|| format!("Failed to read file: {:?}", path))?;
        serde_json::from_slice(&data).context("Failed to deserialize catalog")
    }

    /// Add (or replace) the outputs for `action_path`
    pub fn insert(&mut self, action_path: impl Into<String>, outputs: Vec<OutputFixture>) {
        self.actions.insert(action_path.into(), outputs);
    }
}

/// Engine answering from a [`MemoryCatalog`]
#[derive(Debug, Default)]
pub struct MemoryEngine {
    catalog: Arc<MemoryCatalog>,
    logging_level: Option<LogLevel>,
    session: Option<SessionId>,
    disposals: Arc<AtomicUsize>,
}

impl MemoryEngine {
    /// Create an engine over a shared catalog
    pub fn new(catalog: Arc<MemoryCatalog>) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    /// Share a disposal counter with every context this engine creates
    pub fn with_disposal_counter(mut self, counter: Arc<AtomicUsize>) -> Self {
        self.disposals = counter;
        self
    }

    /// Level last requested through [`SolutionEngine::set_logging_level`]
    pub fn logging_level(&self) -> Option<LogLevel> {
        self.logging_level
    }

    /// Number of contexts created by this engine that have been disposed
    pub fn disposals(&self) -> usize {
        self.disposals.load(Ordering::SeqCst)
    }
}

impl SolutionEngine for MemoryEngine {
    fn set_logging_level(&mut self, level: LogLevel) {
        self.logging_level = Some(level);
    }

    fn init(&mut self, session: &Session) {
        self.session = Some(session.id.clone());
    }

    fn execute(&mut self, mut request: ExecutionRequest<'_>) -> EngineResult<Box<dyn RuntimeContext>> {
        let session = self.session.as_ref().ok_or(EngineError::NotInitialized)?;
        let fixtures = self
            .catalog
            .actions
            .get(request.action_path)
            .ok_or_else(|| EngineError::ActionNotFound(request.action_path.to_string()))?;

        tracing::debug!(
            path = request.action_path,
            process = request.process_id,
            %session,
            level = ?self.logging_level,
            providers = request.parameter_providers.len(),
            "executing action sequence"
        );
        request
            .messages
            .push(format!("executed {}", request.action_path));

        Ok(Box::new(MemoryContext {
            outputs: fixtures.iter().map(OutputFixture::to_parameter).collect(),
            disposals: self.disposals.clone(),
        }))
    }
}

/// Context over a fixed list of outputs
#[derive(Debug)]
pub struct MemoryContext {
    outputs: Vec<ActionParameter>,
    disposals: Arc<AtomicUsize>,
}

impl MemoryContext {
    /// Wrap outputs, counting disposals in `disposals`
    pub fn new(outputs: Vec<ActionParameter>, disposals: Arc<AtomicUsize>) -> Self {
        Self { outputs, disposals }
    }
}

impl RuntimeContext for MemoryContext {
    fn output_names(&self) -> Vec<String> {
        self.outputs.iter().map(|output| output.name.clone()).collect()
    }

    fn output_parameter(&self, name: &str) -> EngineResult<Option<&ActionParameter>> {
        Ok(self.outputs.iter().find(|output| output.name == name))
    }

    fn dispose(&mut self) {
        self.outputs.clear();
        self.disposals.fetch_add(1, Ordering::SeqCst);
    }
}
