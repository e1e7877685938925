//! Bean property assignment tests
//!
//! Verifies that `BeanUtil` reports refused and failed writes through the
//! caller's `ValueSetErrorCallback` and honours its terminal/suppress
//! decision.

use actionseq::beans::{
    Bean, BeanUtil, KebabToSnake, LoggingCallback, PropertyBag, PropertyType, StrictCallback,
    ValueSetErrorCallback,
};
use actionseq::error::{BeanError, BeanResult};
use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Failed {
        bean: String,
        property: String,
        value: Value,
        declared: String,
    },
    NotWritable {
        bean: String,
        property: String,
    },
}

/// Records every notification; escalates when `terminal` is set
#[derive(Default)]
struct RecordingCallback {
    terminal: bool,
    events: Vec<Event>,
}

impl ValueSetErrorCallback for RecordingCallback {
    fn failed_to_set_value(
        &mut self,
        bean: &dyn Bean,
        property_name: &str,
        value: &Value,
        bean_property_type: &str,
        cause: &BeanError,
    ) -> BeanResult<()> {
        self.events.push(Event::Failed {
            bean: bean.type_name().to_string(),
            property: property_name.to_string(),
            value: value.clone(),
            declared: bean_property_type.to_string(),
        });
        if self.terminal {
            Err(BeanError::SetFailed {
                property: property_name.to_string(),
                detail: cause.to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn property_not_writable(&mut self, bean: &dyn Bean, property_name: &str) -> BeanResult<()> {
        self.events.push(Event::NotWritable {
            bean: bean.type_name().to_string(),
            property: property_name.to_string(),
        });
        if self.terminal {
            Err(BeanError::NotWritable {
                bean: bean.type_name().to_string(),
                property: property_name.to_string(),
            })
        } else {
            Ok(())
        }
    }
}

fn settings() -> PropertyBag {
    PropertyBag::new("FilterSettings")
        .with_property("max_rows", PropertyType::Integer)
        .with_property("title", PropertyType::String)
        .with_read_only("id", PropertyType::String, json!("f-1"))
}

#[test]
fn test_successful_set_does_not_notify() {
    let mut bag = settings();
    let mut callback = RecordingCallback::default();

    BeanUtil::new(&mut bag)
        .set_value("max-rows", json!("50"), &mut callback, &[&KebabToSnake])
        .unwrap();

    assert!(callback.events.is_empty());
    assert_eq!(bag.get("max_rows"), Some(&json!(50)));
}

#[test]
fn test_failed_set_reports_payload() {
    let mut bag = settings();
    let mut callback = RecordingCallback::default();

    BeanUtil::new(&mut bag)
        .set_value("max_rows", json!("lots"), &mut callback, &[])
        .unwrap();

    assert_eq!(
        callback.events,
        vec![Event::Failed {
            bean: "FilterSettings".to_string(),
            property: "max_rows".to_string(),
            value: json!("lots"),
            declared: "integer".to_string(),
        }]
    );
    assert_eq!(bag.get("max_rows"), Some(&Value::Null));
}

#[test]
fn test_terminal_failure_is_returned() {
    let mut bag = settings();
    let mut callback = RecordingCallback {
        terminal: true,
        ..RecordingCallback::default()
    };

    let err = BeanUtil::new(&mut bag)
        .set_value("max_rows", json!([1, 2]), &mut callback, &[])
        .unwrap_err();

    assert!(matches!(err, BeanError::SetFailed { ref property, .. } if property == "max_rows"));
    assert_eq!(callback.events.len(), 1);
}

#[test]
fn test_not_writable_skips_assignment() {
    let mut bag = settings();
    let mut callback = RecordingCallback::default();

    let mut util = BeanUtil::new(&mut bag);
    util.set_value("id", json!("f-2"), &mut callback, &[]).unwrap();
    util.set_value("missing", json!(1), &mut callback, &[]).unwrap();

    assert_eq!(
        callback.events,
        vec![
            Event::NotWritable {
                bean: "FilterSettings".to_string(),
                property: "id".to_string(),
            },
            Event::NotWritable {
                bean: "FilterSettings".to_string(),
                property: "missing".to_string(),
            },
        ]
    );
    assert_eq!(bag.get("id"), Some(&json!("f-1")));
}

#[test]
fn test_stock_callbacks() {
    let mut bag = settings();

    let strict = BeanUtil::new(&mut bag).set_value("id", json!("x"), &mut StrictCallback, &[]);
    assert!(matches!(strict, Err(BeanError::NotWritable { .. })));

    let strict = BeanUtil::new(&mut bag).set_value("max_rows", json!(true), &mut StrictCallback, &[]);
    assert!(matches!(strict, Err(BeanError::SetFailed { .. })));

    let mut logging = LoggingCallback::new();
    let mut util = BeanUtil::new(&mut bag);
    util.set_value("id", json!("x"), &mut logging, &[]).unwrap();
    util.set_value("max_rows", json!(true), &mut logging, &[]).unwrap();
    util.set_value("title", json!("Regions"), &mut logging, &[]).unwrap();

    assert_eq!(logging.skipped(), ["id", "max_rows"]);
    assert_eq!(bag.get("title"), Some(&json!("Regions")));
}
