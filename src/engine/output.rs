//! Destinations for content streamed by an action sequence

use std::io::{self, Write};

/// Receives content streamed by an action sequence
pub trait OutputHandler {
    /// Whether the engine may ask the user for missing inputs
    fn allow_feedback(&self) -> bool;

    /// Writer for content named `name` with the given MIME type
    fn content_writer(&mut self, name: &str, mime_type: &str) -> &mut dyn Write;
}

/// Output handler that throws all streamed content away
#[derive(Debug)]
pub struct DiscardOutputHandler {
    sink: io::Sink,
}

impl DiscardOutputHandler {
    /// Create a discarding handler
    pub fn new() -> Self {
        Self { sink: io::sink() }
    }
}

impl Default for DiscardOutputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputHandler for DiscardOutputHandler {
    fn allow_feedback(&self) -> bool {
        false
    }

    fn content_writer(&mut self, _name: &str, _mime_type: &str) -> &mut dyn Write {
        &mut self.sink
    }
}
