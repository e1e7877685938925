//! Filter definitions
//!
//! A filter definition describes a selectable list (e.g. a region picker):
//! its name, labels, and which columns of a result set provide the value
//! and display text of each choice. The rows themselves come from a
//! [`FilterSource`]; [`FilterDefinition::populate`] fetches them once and
//! keeps the copy so later selections can be validated against the same
//! data the user was shown.
//!
//! ```xml
//! <filter>
//!   <name>region</name>
//!   <title>Region</title>
//!   <data-value-name>code</data-value-name>
//!   <data-display-name>label</data-display-name>
//!   <data-solution>samples</data-solution>
//!   <data-action>regions.xaction</data-action>
//! </filter>
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::engine::ParameterProviders;
use crate::error::{EngineResult, FilterError, FilterResult};
use crate::resultset::{MemoryResultSet, ResultSet};
use crate::util::xml::XmlNode;

pub mod action;

pub use action::{ActionFilterSource, Selection};

/// Supplies the rows behind a filter
pub trait FilterSource {
    /// Produce the filter's result set, or `None` when there is none
    fn result_set(
        &self,
        parameter_providers: &ParameterProviders,
    ) -> EngineResult<Option<MemoryResultSet>>;
}

/// A fixed result set is its own source
impl FilterSource for MemoryResultSet {
    fn result_set(
        &self,
        _parameter_providers: &ParameterProviders,
    ) -> EngineResult<Option<MemoryResultSet>> {
        Ok(Some(self.memory_copy()))
    }
}

/// One selectable entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Choice {
    /// Value submitted when selected
    pub value: Value,
    /// Text shown to the user
    pub display: String,
}

/// A named filter backed by a [`FilterSource`]
pub struct FilterDefinition {
    name: String,
    title: Option<String>,
    description: Option<String>,
    value_column: Option<String>,
    display_column: Option<String>,
    source: Box<dyn FilterSource>,
    results: Option<MemoryResultSet>,
}

impl FilterDefinition {
    /// Read the filter header from `node` and attach `source`
    pub fn from_node(node: &XmlNode, source: Box<dyn FilterSource>) -> Self {
        Self {
            name: node.child_text("name").unwrap_or_default(),
            title: node.child_text("title"),
            description: node.child_text("description"),
            value_column: node.child_text("data-value-name"),
            display_column: node.child_text("data-display-name"),
            source,
            results: None,
        }
    }

    /// Filter name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Title shown above the list
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Longer description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Result set cached by the last [`populate`](Self::populate)
    pub fn results(&self) -> Option<&MemoryResultSet> {
        self.results.as_ref()
    }

    /// Fetch and cache the rows; returns whether any result set was produced
    pub fn populate(&mut self, parameter_providers: &ParameterProviders) -> FilterResult<bool> {
        self.results = self.source.result_set(parameter_providers)?;
        tracing::debug!(
            filter = %self.name,
            rows = self.results.as_ref().map(|r| r.row_count()),
            "filter populated"
        );
        Ok(self.results.is_some())
    }

    /// The choices derived from the cached rows
    pub fn choices(&self) -> FilterResult<Vec<Choice>> {
        let results = self.cached()?;
        let value_index = self.column_index(results, self.value_column.as_deref())?;
        let display_index = match self.display_column.as_deref() {
            Some(column) => self.column_index(results, Some(column))?,
            None => value_index,
        };

        Ok(results
            .rows()
            .iter()
            .map(|row| Choice {
                value: row.get(value_index).cloned().unwrap_or(Value::Null),
                display: row.get(display_index).map(render).unwrap_or_default(),
            })
            .collect())
    }

    /// Whether every selection is one of the cached values
    pub fn is_valid<S: AsRef<str>>(&self, selections: &[S]) -> FilterResult<bool> {
        let results = self.cached()?;
        let value_index = self.column_index(results, self.value_column.as_deref())?;
        let values: Vec<String> = results.column(value_index).map(render).collect();

        Ok(selections
            .iter()
            .all(|selection| values.iter().any(|value| value == selection.as_ref())))
    }

    fn cached(&self) -> FilterResult<&MemoryResultSet> {
        self.results
            .as_ref()
            .ok_or_else(|| FilterError::NoData(self.name.clone()))
    }

    /// Index of `column`, defaulting to the first column
    fn column_index(&self, results: &MemoryResultSet, column: Option<&str>) -> FilterResult<usize> {
        match column {
            Some(column) => results
                .column_index(column)
                .ok_or_else(|| FilterError::UnknownColumn {
                    filter: self.name.clone(),
                    column: column.to_string(),
                }),
            None if results.column_names().is_empty() => Err(FilterError::UnknownColumn {
                filter: self.name.clone(),
                column: "#0".to_string(),
            }),
            None => Ok(0),
        }
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn regions() -> MemoryResultSet {
        MemoryResultSet::new(["code", "label"])
            .with_row(vec![json!("EU"), json!("Europe")])
            .with_row(vec![json!("NA"), json!("North America")])
            .with_row(vec![json!(7), json!(null)])
    }

    fn definition(xml: &str) -> FilterDefinition {
        let node = XmlNode::parse(xml).unwrap();
        FilterDefinition::from_node(&node, Box::new(regions()))
    }

    #[test]
    fn test_header_fields() {
        let filter = definition(
            "<filter><name>region</name><title>Region</title>\
             <description>Sales region</description></filter>",
        );

        assert_eq!(filter.name(), "region");
        assert_eq!(filter.title(), Some("Region"));
        assert_eq!(filter.description(), Some("Sales region"));
        assert!(filter.results().is_none());
    }

    #[test]
    fn test_choices_use_configured_columns() {
        let mut filter = definition(
            "<filter><name>region</name>\
             <data-value-name>code</data-value-name>\
             <data-display-name>label</data-display-name></filter>",
        );
        assert!(filter.populate(&ParameterProviders::new()).unwrap());

        let choices = filter.choices().unwrap();
        assert_eq!(choices.len(), 3);
        assert_eq!(choices[1].value, json!("NA"));
        assert_eq!(choices[1].display, "North America");
        assert_eq!(choices[2].display, "");
    }

    #[test]
    fn test_display_defaults_to_value_column() {
        let mut filter = definition("<filter><name>region</name></filter>");
        filter.populate(&ParameterProviders::new()).unwrap();

        let choices = filter.choices().unwrap();
        assert_eq!(choices[0].display, "EU");
        assert_eq!(choices[2].display, "7");
    }

    #[test]
    fn test_is_valid_checks_cached_values() {
        let mut filter = definition(
            "<filter><name>region</name><data-value-name>code</data-value-name></filter>",
        );
        assert!(matches!(filter.is_valid(&["EU"]), Err(FilterError::NoData(_))));

        filter.populate(&ParameterProviders::new()).unwrap();
        assert!(filter.is_valid(&["EU", "7"]).unwrap());
        assert!(!filter.is_valid(&["EU", "SA"]).unwrap());
        assert!(filter.is_valid::<&str>(&[]).unwrap());
    }

    #[test]
    fn test_unknown_column() {
        let mut filter = definition(
            "<filter><name>region</name><data-value-name>iso</data-value-name></filter>",
        );
        filter.populate(&ParameterProviders::new()).unwrap();

        assert!(matches!(
            filter.choices(),
            Err(FilterError::UnknownColumn { column, .. }) if column == "iso"
        ));
    }
}
