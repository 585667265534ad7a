use super::*;
use serde_json::json;

// =============================================================================
// form_cache_key
// =============================================================================

#[test]
fn cache_key_uses_form_id() {
    assert_eq!(form_cache_key(Some("f1")), "form#f1");
    assert_eq!(form_cache_key(Some("checkout")), "form#checkout");
}

#[test]
fn cache_key_falls_back_for_missing_or_empty_id() {
    assert_eq!(form_cache_key(None), "form#unknown");
    assert_eq!(form_cache_key(Some("")), "form#unknown");
}

// =============================================================================
// FieldValue coercion
// =============================================================================

#[test]
fn toggle_coercion_is_emptiness_not_parsing() {
    assert!(!FieldValue::Text(String::new()).as_toggle());
    // The literal "false" is a non-empty string, so it checks the box.
    assert!(FieldValue::Text("false".to_owned()).as_toggle());
    assert!(FieldValue::Text("anything".to_owned()).as_toggle());
    assert!(FieldValue::Toggle(true).as_toggle());
    assert!(!FieldValue::Toggle(false).as_toggle());
}

#[test]
fn text_coercion_renders_toggles() {
    assert_eq!(FieldValue::Toggle(true).as_text(), "true");
    assert_eq!(FieldValue::Toggle(false).as_text(), "false");
    assert_eq!(FieldValue::Text("John Doe".to_owned()).as_text(), "John Doe");
}

#[test]
fn field_value_serde_is_untagged() {
    assert_eq!(serde_json::to_value(FieldValue::Toggle(true)).unwrap(), json!(true));
    assert_eq!(serde_json::to_value(FieldValue::Text("hi".to_owned())).unwrap(), json!("hi"));

    let toggled: FieldValue = serde_json::from_value(json!(false)).unwrap();
    assert_eq!(toggled, FieldValue::Toggle(false));

    // A JSON string stays text even when it spells a boolean.
    let text: FieldValue = serde_json::from_value(json!("true")).unwrap();
    assert_eq!(text, FieldValue::Text("true".to_owned()));
}

// =============================================================================
// FieldEntry wire shape
// =============================================================================

#[test]
fn entry_serializes_as_single_entry_map() {
    let entry = FieldEntry::new("name", "Alice");
    assert_eq!(serde_json::to_value(&entry).unwrap(), json!({"name": "Alice"}));

    let entry = FieldEntry::new("agree", true);
    assert_eq!(serde_json::to_value(&entry).unwrap(), json!({"agree": true}));
}

#[test]
fn entry_deserializes_first_entry_and_ignores_extras() {
    let entry: FieldEntry = serde_json::from_str(r#"{"zz": "first", "aa": "second"}"#).unwrap();
    assert_eq!(entry.id, "zz");
    assert_eq!(entry.value, FieldValue::Text("first".to_owned()));
}

#[test]
fn entry_rejects_empty_map() {
    assert!(serde_json::from_str::<FieldEntry>("{}").is_err());
}

// =============================================================================
// FormRecord
// =============================================================================

#[test]
fn record_wire_shape_round_trips_in_order() {
    let record = FormRecord::new(vec![
        FieldEntry::new("name", "Alice"),
        FieldEntry::new("agree", true),
        FieldEntry::new("about", ""),
    ]);

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value, json!({"values": [{"name": "Alice"}, {"agree": true}, {"about": ""}]}));

    let restored: FormRecord = serde_json::from_value(value).unwrap();
    assert_eq!(restored, record);
}

#[test]
fn empty_record_is_empty() {
    let record = FormRecord::default();
    assert!(record.is_empty());
    assert_eq!(serde_json::to_value(&record).unwrap(), json!({"values": []}));
}

#[test]
fn value_of_returns_first_match() {
    let record = FormRecord::new(vec![
        FieldEntry::new("dup", "first"),
        FieldEntry::new("dup", "second"),
    ]);
    assert_eq!(record.value_of("dup"), Some(&FieldValue::Text("first".to_owned())));
    assert_eq!(record.value_of("missing"), None);
}
