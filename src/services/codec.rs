//! Snapshot codec — form state to record and back.
//!
//! DESIGN
//! ======
//! Capture is a pure read of field state; apply mutates fields through their
//! handles only and never emits events, so hydration cannot re-enter the
//! cache-update path. Both directions skip identifier-less fields and both
//! enforce the upload exclusion: upload controls are captured as empty
//! strings and never written back, whatever the cached record claims.

use crate::dom::{ControlKind, FormHandle};
use crate::record::{FieldEntry, FieldValue, FormRecord};

/// Capture a form's current field values in document order.
///
/// Fields with an empty identifier are skipped silently; they are a
/// deliberate exclusion, not an error.
#[must_use]
pub fn capture(form: &dyn FormHandle) -> FormRecord {
    let mut values = Vec::new();
    for field in form.fields() {
        let id = field.id();
        if id.is_empty() {
            continue;
        }
        let value = match ControlKind::classify(&field.control_type()) {
            ControlKind::Toggle => FieldValue::Toggle(field.checked()),
            ControlKind::Upload => FieldValue::Text(String::new()),
            ControlKind::Text => FieldValue::Text(field.text_value()),
        };
        values.push(FieldEntry { id, value });
    }
    FormRecord::new(values)
}

/// Apply a cached record onto a form's fields.
///
/// Entries with an empty identifier or no matching field are skipped; the
/// form may have changed shape since the snapshot was taken. Dispatch runs
/// on the found field's own kind, with cross-kind values coerced.
pub fn apply(form: &dyn FormHandle, record: &FormRecord) {
    for entry in &record.values {
        if entry.id.is_empty() {
            continue;
        }
        let Some(field) = form.field_by_id(&entry.id) else {
            continue;
        };
        match ControlKind::classify(&field.control_type()) {
            ControlKind::Toggle => field.set_checked(entry.value.as_toggle()),
            // Upload controls are never restored.
            ControlKind::Upload => {}
            ControlKind::Text => field.set_text_value(&entry.value.as_text()),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "codec_test.rs"]
mod tests;
