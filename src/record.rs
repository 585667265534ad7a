//! Form record — the cached snapshot of one form's field values.
//!
//! DESIGN
//! ======
//! - Wire shape is `{"values": [{<field-id>: <value>}, ...]}`: an ordered
//!   list of single-entry maps. Order is capture traversal order; it carries
//!   no meaning but must round-trip.
//! - Values are strings or booleans, nothing else. Cross-kind coercion is
//!   explicit: an empty string is a false toggle, any other string is true,
//!   and booleans render as `"true"` / `"false"`.
//! - Cache keys are `form#<identifier>`, with a shared `form#unknown`
//!   fallback for forms that carry no identifier.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// =============================================================================
// CACHE KEYS
// =============================================================================

/// Prefix for every form cache key.
pub const FORM_KEY_PREFIX: &str = "form#";

/// Identifier used for forms without one. All such forms share one record.
pub const FALLBACK_FORM_ID: &str = "unknown";

/// Derive the cache key for a form identifier.
///
/// `None` and the empty string both map to the [`FALLBACK_FORM_ID`] key, so
/// every identifier-less form on a page reads and writes the same record.
#[must_use]
pub fn form_cache_key(form_id: Option<&str>) -> String {
    let id = match form_id {
        Some(id) if !id.is_empty() => id,
        _ => FALLBACK_FORM_ID,
    };
    format!("{FORM_KEY_PREFIX}{id}")
}

// =============================================================================
// FIELD VALUE
// =============================================================================

/// A captured field value: textual or boolean, the two ways a form control
/// carries state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Checked state of a boolean-toggle control.
    Toggle(bool),
    /// Textual value of any other control.
    Text(String),
}

impl FieldValue {
    /// Coerce to a toggle state. Empty text is unchecked and anything else
    /// is checked, so the literal `"false"` still checks the box.
    #[must_use]
    pub fn as_toggle(&self) -> bool {
        match self {
            FieldValue::Toggle(checked) => *checked,
            FieldValue::Text(text) => !text.is_empty(),
        }
    }

    /// Coerce to text. Toggles render as `"true"` / `"false"`.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Toggle(checked) => checked.to_string(),
            FieldValue::Text(text) => text.clone(),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(checked: bool) -> Self {
        FieldValue::Toggle(checked)
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

// =============================================================================
// FIELD ENTRY
// =============================================================================

/// One field's identifier-to-value mapping within a record.
///
/// Serialized as a single-entry JSON map (`{"name": "Alice"}`), not a
/// struct, to keep the wire shape flat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    /// The field's identifier attribute. Never empty for captured entries;
    /// apply skips empty ids defensively all the same.
    pub id: String,
    /// The captured value.
    pub value: FieldValue,
}

impl FieldEntry {
    #[must_use]
    pub fn new(id: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self { id: id.into(), value: value.into() }
    }
}

impl Serialize for FieldEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.id, &self.value)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntryVisitor;

        impl<'de> Visitor<'de> for EntryVisitor {
            type Value = FieldEntry;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a single-entry map of field id to value")
            }

            fn visit_map<A>(self, mut access: A) -> Result<FieldEntry, A::Error>
            where
                A: MapAccess<'de>,
            {
                // First entry wins; extra keys are drained and ignored.
                let mut first: Option<(String, FieldValue)> = None;
                while let Some((id, value)) = access.next_entry::<String, FieldValue>()? {
                    if first.is_none() {
                        first = Some((id, value));
                    }
                }
                let (id, value) = first.ok_or_else(|| de::Error::invalid_length(0, &self))?;
                Ok(FieldEntry { id, value })
            }
        }

        deserializer.deserialize_map(EntryVisitor)
    }
}

// =============================================================================
// FORM RECORD
// =============================================================================

/// The cached snapshot for one form: field entries in capture order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormRecord {
    pub values: Vec<FieldEntry>,
}

impl FormRecord {
    #[must_use]
    pub fn new(values: Vec<FieldEntry>) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Look up the first entry for a field identifier.
    #[must_use]
    pub fn value_of(&self, id: &str) -> Option<&FieldValue> {
        self.values.iter().find(|entry| entry.id == id).map(|entry| &entry.value)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
