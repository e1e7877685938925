//! Solution engine abstractions
//!
//! An engine executes a path-addressed action sequence and returns a
//! [`RuntimeContext`] exposing the run's named outputs. The context must
//! be disposed once the caller is done with it; [`ContextGuard`] does
//! that on every exit path.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::error::EngineResult;
use crate::resultset::ResultSet;
use crate::session::Session;

pub mod context;
pub mod memory;
pub mod output;
pub mod params;
pub mod path;
pub mod registry;

pub use context::ContextGuard;
pub use output::{DiscardOutputHandler, OutputHandler};
pub use params::{ParameterProvider, ParameterProviders, SimpleParameterProvider};
pub use registry::EngineRegistry;

/// Type tag of outputs carrying a tabular result set
pub const TYPE_RESULT_SET: &str = "result-set";
/// Type tag of string outputs
pub const TYPE_STRING: &str = "string";

/// Diagnostic verbosity requested from an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything
    Trace,
    /// Verbose diagnostics
    Debug,
    /// Normal operation
    Info,
    /// Recoverable problems
    Warn,
    /// Failures only
    Error,
}

impl LogLevel {
    /// Matching `tracing` level
    pub fn as_tracing(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_tracing(), f)
    }
}

/// Value carried by an output parameter
#[derive(Debug, Clone)]
pub enum ParameterValue {
    /// No value was produced
    Empty,
    /// Tabular data
    ResultSet(Arc<dyn ResultSet>),
    /// Any other value
    Scalar(Value),
}

/// A named output produced by an action sequence run
#[derive(Debug, Clone)]
pub struct ActionParameter {
    /// Output name
    pub name: String,
    /// Declared type tag (e.g. `result-set`)
    pub param_type: String,
    /// Produced value
    pub value: ParameterValue,
}

impl ActionParameter {
    /// Create a parameter with an explicit type tag
    pub fn new(name: impl Into<String>, param_type: impl Into<String>, value: ParameterValue) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            value,
        }
    }

    /// Result-set output
    pub fn result_set(name: impl Into<String>, set: Arc<dyn ResultSet>) -> Self {
        Self::new(name, TYPE_RESULT_SET, ParameterValue::ResultSet(set))
    }

    /// Whether the declared type is the result-set tag (case-insensitive)
    pub fn is_result_set_type(&self) -> bool {
        self.param_type.eq_ignore_ascii_case(TYPE_RESULT_SET)
    }

    /// The value as a result set, if it is one
    pub fn value_as_result_set(&self) -> Option<&dyn ResultSet> {
        match &self.value {
            ParameterValue::ResultSet(set) => Some(set.as_ref()),
            _ => None,
        }
    }
}

/// Everything an engine needs to run one action sequence
pub struct ExecutionRequest<'a> {
    /// Full action path (see [`path::build_solution_path`])
    pub action_path: &'a str,
    /// Identifier of the calling process
    pub process_id: &'a str,
    /// Existing instance to resume, if any
    pub instance_id: Option<&'a str>,
    /// Run in the background
    pub asynchronous: bool,
    /// Whether the instance ends with this execution
    pub instance_ends: bool,
    /// Whether the runtime should persist the instance
    pub persisted: bool,
    /// Input parameter providers
    pub parameter_providers: &'a ParameterProviders,
    /// Destination for streamed output
    pub output_handler: &'a mut dyn OutputHandler,
    /// Messages the engine reports back
    pub messages: &'a mut Vec<String>,
}

/// Executes action sequences
pub trait SolutionEngine {
    /// Set diagnostic verbosity for subsequent executions
    fn set_logging_level(&mut self, level: LogLevel);

    /// Bind the engine to a session
    fn init(&mut self, session: &Session);

    /// Execute synchronously and return the run's context
    fn execute(&mut self, request: ExecutionRequest<'_>) -> EngineResult<Box<dyn RuntimeContext>>;
}

/// Per-execution view of a run's outputs
pub trait RuntimeContext {
    /// Output names in iteration order
    fn output_names(&self) -> Vec<String>;

    /// Output parameter by name
    fn output_parameter(&self, name: &str) -> EngineResult<Option<&ActionParameter>>;

    /// Release resources held by the run
    fn dispose(&mut self);
}
