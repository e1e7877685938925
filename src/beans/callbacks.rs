//! Ready-made failure policies for [`BeanUtil`](super::BeanUtil)

use serde_json::Value;

use super::{Bean, ValueSetErrorCallback};
use crate::error::{BeanError, BeanResult};

/// Treats every failure as terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictCallback;

impl ValueSetErrorCallback for StrictCallback {
    fn failed_to_set_value(
        &mut self,
        _bean: &dyn Bean,
        property_name: &str,
        _value: &Value,
        bean_property_type: &str,
        cause: &BeanError,
    ) -> BeanResult<()> {
        Err(BeanError::SetFailed {
            property: property_name.to_string(),
            detail: format!("{cause} (declared {bean_property_type})"),
        })
    }

    fn property_not_writable(&mut self, bean: &dyn Bean, property_name: &str) -> BeanResult<()> {
        Err(BeanError::NotWritable {
            bean: bean.type_name().to_string(),
            property: property_name.to_string(),
        })
    }
}

/// Logs failures and carries on, keeping a tally
#[derive(Debug, Clone, Default)]
pub struct LoggingCallback {
    skipped: Vec<String>,
}

impl LoggingCallback {
    /// Create a callback with an empty tally
    pub fn new() -> Self {
        Self::default()
    }

    /// Properties that were skipped, in order
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }
}

impl ValueSetErrorCallback for LoggingCallback {
    fn failed_to_set_value(
        &mut self,
        bean: &dyn Bean,
        property_name: &str,
        value: &Value,
        bean_property_type: &str,
        cause: &BeanError,
    ) -> BeanResult<()> {
        tracing::warn!(
            bean = bean.type_name(),
            property = property_name,
            %value,
            declared = bean_property_type,
            error = %cause,
            "ignoring failed property assignment"
        );
        self.skipped.push(property_name.to_string());
        Ok(())
    }

    fn property_not_writable(&mut self, bean: &dyn Bean, property_name: &str) -> BeanResult<()> {
        tracing::warn!(
            bean = bean.type_name(),
            property = property_name,
            "ignoring non-writable property"
        );
        self.skipped.push(property_name.to_string());
        Ok(())
    }
}
