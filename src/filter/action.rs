//! Filter source backed by an action sequence
//!
//! The source runs the action named by its [`ActionDescriptor`] and takes
//! the result set from the run's outputs. With `<data-output>` present, the
//! output of that name is used; otherwise the first output whose declared
//! type is `result-set` wins. The returned set is a memory copy, since the
//! runtime context is disposed before this returns.

use std::sync::Arc;

use super::FilterSource;
use crate::config::ExtractorConfig;
use crate::descriptor::ActionDescriptor;
use crate::engine::{
    ActionParameter, ContextGuard, DiscardOutputHandler, EngineRegistry, ExecutionRequest,
    ParameterProviders, RuntimeContext,
};
use crate::error::EngineResult;
use crate::resultset::MemoryResultSet;
use crate::session::Session;
use crate::util::xml::XmlNode;

/// How the result set was (or was not) found among the outputs
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Copy of the selected output's result set
    Found {
        /// Output the set came from
        output: String,
        /// Detached copy of the data
        results: MemoryResultSet,
    },
    /// The selected output holds no result-set value
    EmptyValue(String),
    /// The explicitly named output was not produced by the run
    MissingOutput(String),
    /// No output name was given and no output is typed `result-set`
    NoResultSet,
}

impl Selection {
    /// The copied result set, if one was found
    pub fn into_result_set(self) -> Option<MemoryResultSet> {
        match self {
            Selection::Found { results, .. } => Some(results),
            _ => None,
        }
    }
}

/// Runs an action sequence and extracts a result set from its outputs
pub struct ActionFilterSource {
    descriptor: ActionDescriptor,
    session: Session,
    registry: Arc<EngineRegistry>,
    config: ExtractorConfig,
}

impl ActionFilterSource {
    /// Read the descriptor from `node`
    pub fn new(
        node: &XmlNode,
        session: Session,
        registry: Arc<EngineRegistry>,
        config: ExtractorConfig,
    ) -> Self {
        Self::from_descriptor(ActionDescriptor::from_node(node), session, registry, config)
    }

    /// Use an already parsed descriptor
    pub fn from_descriptor(
        descriptor: ActionDescriptor,
        session: Session,
        registry: Arc<EngineRegistry>,
        config: ExtractorConfig,
    ) -> Self {
        Self {
            descriptor,
            session,
            registry,
            config,
        }
    }

    /// The descriptor this source executes
    pub fn descriptor(&self) -> &ActionDescriptor {
        &self.descriptor
    }

    /// Process id reported to the engine
    pub fn process_id(&self) -> &str {
        self.config
            .process_id
            .as_deref()
            .unwrap_or(std::any::type_name::<Self>())
    }

    /// Execute the action and report how the result set was selected
    ///
    /// Engine failures are returned as errors. The runtime context is
    /// disposed before this returns on every path.
    pub fn extract_detailed(
        &self,
        parameter_providers: &ParameterProviders,
    ) -> EngineResult<Selection> {
        let mut engine = self.registry.create(&self.config.engine, &self.session)?;
        engine.set_logging_level(self.config.logging_level);
        engine.init(&self.session);

        let action_path = self.descriptor.action_path();
        let mut output_handler = DiscardOutputHandler::new();
        let mut messages = Vec::new();

        let context = ContextGuard::new(engine.execute(ExecutionRequest {
            action_path: &action_path,
            process_id: self.process_id(),
            instance_id: None,
            asynchronous: false,
            instance_ends: true,
            persisted: false,
            parameter_providers,
            output_handler: &mut output_handler,
            messages: &mut messages,
        })?);

        for message in &messages {
            tracing::debug!(path = %action_path, "{message}");
        }

        let selection = select(&*context, self.descriptor.output.as_deref())?;
        match &selection {
            Selection::Found { output, results } => {
                tracing::debug!(
                    path = %action_path,
                    output = %output,
                    rows = results.rows().len(),
                    "result set selected"
                );
            }
            Selection::EmptyValue(output) => {
                tracing::debug!(
                    path = %action_path,
                    output = %output,
                    "selected output holds no result set"
                );
            }
            Selection::MissingOutput(output) => {
                tracing::warn!(
                    path = %action_path,
                    output = %output,
                    "named output not produced by action"
                );
            }
            Selection::NoResultSet => {
                tracing::debug!(path = %action_path, "no result-set output produced");
            }
        }

        Ok(selection)
    }
}

impl FilterSource for ActionFilterSource {
    fn result_set(
        &self,
        parameter_providers: &ParameterProviders,
    ) -> EngineResult<Option<MemoryResultSet>> {
        self.extract_detailed(parameter_providers)
            .map(Selection::into_result_set)
    }
}

/// Pick the result set out of a finished run
fn select(context: &dyn RuntimeContext, output: Option<&str>) -> EngineResult<Selection> {
    match output {
        Some(name) => {
            if !context.output_names().iter().any(|candidate| candidate == name) {
                return Ok(Selection::MissingOutput(name.to_string()));
            }
            let parameter = context.output_parameter(name)?;
            Ok(copy_out(name, parameter))
        }
        None => {
            for name in context.output_names() {
                match context.output_parameter(&name)? {
                    Some(parameter) if parameter.is_result_set_type() => {
                        return Ok(copy_out(&name, Some(parameter)));
                    }
                    _ => {}
                }
            }
            Ok(Selection::NoResultSet)
        }
    }
}

fn copy_out(name: &str, parameter: Option<&ActionParameter>) -> Selection {
    match parameter.and_then(ActionParameter::value_as_result_set) {
        Some(set) => Selection::Found {
            output: name.to_string(),
            results: set.memory_copy(),
        },
        None => Selection::EmptyValue(name.to_string()),
    }
}
