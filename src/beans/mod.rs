//! Bean property assignment
//!
//! [`BeanUtil`] writes named values onto anything implementing [`Bean`].
//! What happens when a write is refused or fails is decided by the caller
//! through a [`ValueSetErrorCallback`], so every caller runs the same
//! assignment logic while choosing its own failure policy.

use serde_json::Value;

use crate::error::{BeanError, BeanResult};

pub mod bag;
pub mod callbacks;
pub mod util;

pub use bag::{PropertyBag, PropertyType};
pub use callbacks::{LoggingCallback, StrictCallback};
pub use util::{BeanUtil, KebabToSnake, PropertyNameFormatter};

/// An object with named, typed, writable properties
pub trait Bean {
    /// Name of the bean's type, for diagnostics
    fn type_name(&self) -> &str;

    /// Whether `property` exists and accepts writes
    fn is_writable(&self, property: &str) -> bool;

    /// Declared type name of `property`
    fn property_type(&self, property: &str) -> Option<String>;

    /// Assign `value` to `property`
    fn set_property(&mut self, property: &str, value: Value) -> BeanResult<()>;
}

/// Notified when [`BeanUtil`] cannot set a value on a bean
///
/// Returning `Err` marks the event as terminal and the error is passed
/// back to the caller of [`BeanUtil::set_value`]; returning `Ok(())`
/// suppresses it.
pub trait ValueSetErrorCallback {
    /// Assigning `value` to `property_name` on `bean` failed with `cause`.
    ///
    /// `bean_property_type` is the declared type of the property, which
    /// need not match the type of `value`.
    fn failed_to_set_value(
        &mut self,
        bean: &dyn Bean,
        property_name: &str,
        value: &Value,
        bean_property_type: &str,
        cause: &BeanError,
    ) -> BeanResult<()>;

    /// The write check on `property_name` failed before any assignment.
    fn property_not_writable(&mut self, bean: &dyn Bean, property_name: &str) -> BeanResult<()>;
}
