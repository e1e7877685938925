//! Property assignment driven by a failure callback

use serde_json::Value;

use super::{Bean, ValueSetErrorCallback};
use crate::error::BeanResult;

/// Rewrites an incoming property name before it is looked up
pub trait PropertyNameFormatter {
    /// Formatted name
    fn format(&self, name: &str) -> String;
}

/// Maps `data-output` style names onto `data_output`
#[derive(Debug, Clone, Copy, Default)]
pub struct KebabToSnake;

impl PropertyNameFormatter for KebabToSnake {
    fn format(&self, name: &str) -> String {
        name.replace('-', "_")
    }
}

/// Sets values on a borrowed bean
pub struct BeanUtil<'a> {
    bean: &'a mut dyn Bean,
}

impl<'a> BeanUtil<'a> {
    /// Wrap `bean`
    pub fn new(bean: &'a mut dyn Bean) -> Self {
        Self { bean }
    }

    /// Apply `formatters` to `property_name`, in order
    pub fn format_property_name(
        property_name: &str,
        formatters: &[&dyn PropertyNameFormatter],
    ) -> String {
        formatters
            .iter()
            .fold(property_name.to_string(), |name, formatter| formatter.format(&name))
    }

    /// Whether the formatted property accepts writes
    pub fn is_writable(
        &self,
        property_name: &str,
        formatters: &[&dyn PropertyNameFormatter],
    ) -> bool {
        self.bean
            .is_writable(&Self::format_property_name(property_name, formatters))
    }

    /// Assign `value` to `property_name` after formatting the name.
    ///
    /// A property that fails the write check is reported through
    /// [`ValueSetErrorCallback::property_not_writable`] and not assigned.
    /// A failed assignment is reported through
    /// [`ValueSetErrorCallback::failed_to_set_value`]. Whatever the
    /// callback returns is the result of this call.
    pub fn set_value(
        &mut self,
        property_name: &str,
        value: Value,
        callback: &mut dyn ValueSetErrorCallback,
        formatters: &[&dyn PropertyNameFormatter],
    ) -> BeanResult<()> {
        let property = Self::format_property_name(property_name, formatters);

        if !self.bean.is_writable(&property) {
            tracing::debug!(
                bean = self.bean.type_name(),
                property = %property,
                "property not writable"
            );
            return callback.property_not_writable(&*self.bean, &property);
        }

        let declared = self
            .bean
            .property_type(&property)
            .unwrap_or_else(|| "unknown".to_string());

        match self.bean.set_property(&property, value.clone()) {
            Ok(()) => Ok(()),
            Err(cause) => {
                tracing::debug!(
                    bean = self.bean.type_name(),
                    property = %property,
                    error = %cause,
                    "failed to set property"
                );
                callback.failed_to_set_value(&*self.bean, &property, &value, &declared, &cause)
            }
        }
    }
}
