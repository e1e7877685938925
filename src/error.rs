//! Error types for actionseq
//!
//! Domain errors use thiserror, one enum per subsystem, rolled up into
//! [`Error`] at the crate boundary.

use thiserror::Error;

/// Top-level crate error
#[derive(Debug, Error)]
pub enum Error {
    /// Engine and execution-context errors
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Descriptor parsing errors
    #[error("Descriptor error: {0}")]
    Descriptor(#[from] DescriptorError),

    /// Filter definition errors
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    /// Bean property errors
    #[error("Bean error: {0}")]
    Bean(#[from] BeanError),
}

/// Errors raised by a solution engine or its runtime context
#[derive(Debug, Error)]
pub enum EngineError {
    /// No engine factory registered under the requested name
    #[error("No solution engine registered as '{0}'")]
    NotRegistered(String),

    /// The engine does not know the requested action sequence
    #[error("Action sequence '{0}' not found")]
    ActionNotFound(String),

    /// The engine was used before `init` was called
    #[error("Solution engine not initialized")]
    NotInitialized,

    /// Execution of the action sequence failed
    #[error("Execution of '{path}' failed: {detail}")]
    ExecutionFailed {
        /// Action path that was executed
        path: String,
        /// Failure details
        detail: String,
    },

    /// Reading an output parameter failed
    #[error("Output '{name}' unavailable: {detail}")]
    Output {
        /// Output parameter name
        name: String,
        /// Failure details
        detail: String,
    },
}

/// Convenience result alias for engine operations
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Errors raised while reading XML descriptors
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// Underlying XML syntax error
    #[error("Malformed XML at byte {position}: {detail}")]
    Xml {
        /// Reader position when the error was seen
        position: u64,
        /// Error details
        detail: String,
    },

    /// Document contained no element
    #[error("Descriptor document has no root element")]
    Empty,

    /// Closing tag without a matching opening tag
    #[error("Unbalanced closing tag '{0}'")]
    Unbalanced(String),

    /// Root element had an unexpected name
    #[error("Expected <{expected}> element, found <{found}>")]
    UnexpectedRoot {
        /// Element name the caller asked for
        expected: String,
        /// Element name actually present
        found: String,
    },
}

/// Convenience result alias for descriptor operations
pub type DescriptorResult<T> = std::result::Result<T, DescriptorError>;

/// Errors raised by filter definitions
#[derive(Debug, Error)]
pub enum FilterError {
    /// `populate` has not been called, or produced no result set
    #[error("Filter '{0}' has no data")]
    NoData(String),

    /// A configured column is not in the result set
    #[error("Column '{column}' not found in result set for filter '{filter}'")]
    UnknownColumn {
        /// Filter name
        filter: String,
        /// Missing column name
        column: String,
    },

    /// Fetching the result set failed
    #[error("Fetching data failed: {0}")]
    Engine(#[from] EngineError),
}

/// Convenience result alias for filter operations
pub type FilterResult<T> = std::result::Result<T, FilterError>;

/// Errors raised while setting bean properties
#[derive(Debug, Error)]
pub enum BeanError {
    /// Property does not exist or cannot be written
    #[error("Property '{property}' on {bean} is not writable")]
    NotWritable {
        /// Bean type name
        bean: String,
        /// Property name
        property: String,
    },

    /// Value could not be converted to the declared type
    #[error("Cannot assign {value} to '{property}' of type {expected}")]
    TypeMismatch {
        /// Property name
        property: String,
        /// Declared property type
        expected: String,
        /// Rendered value
        value: String,
    },

    /// A callback escalated a failure
    #[error("Setting '{property}' failed: {detail}")]
    SetFailed {
        /// Property name
        property: String,
        /// Failure details
        detail: String,
    },
}

/// Convenience result alias for bean operations
pub type BeanResult<T> = std::result::Result<T, BeanError>;

/// Result type using the top-level [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
