//! Action descriptors read from filter XML
//!
//! A descriptor names the action sequence to run (solution, path, action)
//! and, optionally, which output carries the result set:
//!
//! ```xml
//! <filter>
//!   <data-solution>samples</data-solution>
//!   <data-path>filters</data-path>
//!   <data-action>regions.xaction</data-action>
//!   <data-output>rule-result</data-output>
//! </filter>
//! ```

use serde::{Deserialize, Serialize};

use crate::engine::path::build_solution_path;
use crate::error::DescriptorResult;
use crate::util::xml::XmlNode;

/// Child element naming the solution
pub const DATA_SOLUTION: &str = "data-solution";
/// Child element naming the path inside the solution
pub const DATA_PATH: &str = "data-path";
/// Child element naming the action sequence file
pub const DATA_ACTION: &str = "data-action";
/// Child element naming the output parameter holding the result set
pub const DATA_OUTPUT: &str = "data-output";

/// Where to find an action sequence and which output to read
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ActionDescriptor {
    /// Solution name
    pub solution: Option<String>,
    /// Path within the solution
    pub path: Option<String>,
    /// Action sequence name
    pub action: Option<String>,
    /// Explicit output parameter name; `None` selects the first result set
    pub output: Option<String>,
}

impl ActionDescriptor {
    /// Read the four `data-*` children of `node`.
    pub fn from_node(node: &XmlNode) -> Self {
        Self {
            solution: node.child_text(DATA_SOLUTION),
            path: node.child_text(DATA_PATH),
            action: node.child_text(DATA_ACTION),
            output: node.child_text(DATA_OUTPUT),
        }
    }

    /// Parse an XML document and read the descriptor from its root.
    pub fn from_xml(source: &str) -> DescriptorResult<Self> {
        let node = XmlNode::parse(source)?;
        Ok(Self::from_node(&node))
    }

    /// The action path handed to the engine.
    pub fn action_path(&self) -> String {
        build_solution_path(
            self.solution.as_deref(),
            self.path.as_deref(),
            self.action.as_deref(),
        )
    }
}
