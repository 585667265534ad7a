//! DOM contract — the element layer consumed, not owned, by this crate.
//!
//! ARCHITECTURE
//! ============
//! The library never touches a document directly. A host injects a
//! [`FormSource`] (the current candidate forms) and each form is driven
//! through [`FormHandle`] / [`FieldHandle`]: attribute reads, field
//! enumeration and lookup, value access, and event subscription. That keeps
//! the lifecycle testable without a live document and makes re-discovery a
//! repeated `forms()` call.
//!
//! Adapters for a real element tree implement these traits; tests use the
//! stubs in [`test_helpers`].

use std::sync::Arc;

use tokio::sync::mpsc;

// =============================================================================
// MARKER ATTRIBUTE
// =============================================================================

/// Boolean opt-in attribute. Only forms carrying it are ever attached.
pub const CACHE_MARKER_ATTR: &str = "data-cache";

// =============================================================================
// EVENTS
// =============================================================================

/// User-driven form events the lifecycle reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    /// A field's value changed; the form should be re-captured and saved.
    Change,
    /// The form was submitted; its cached record should be removed.
    Submit,
}

// =============================================================================
// CONTROL KIND
// =============================================================================

/// Closed set of control kinds, resolved once per field from its type-like
/// attribute. Capture and apply dispatch on this instead of re-comparing
/// attribute strings at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Plain textual control: text, email, textarea, select, and anything
    /// not matched below.
    Text,
    /// Boolean-toggle control: captured and restored as a checked flag.
    Toggle,
    /// Upload control: captured as an empty string, never restored.
    Upload,
}

impl ControlKind {
    /// Classify a type-like attribute by its literal value. The platform
    /// lowercases the attribute, so matching is exact.
    #[must_use]
    pub fn classify(type_attr: &str) -> Self {
        match type_attr {
            "checkbox" | "radio" => ControlKind::Toggle,
            "file" => ControlKind::Upload,
            _ => ControlKind::Text,
        }
    }
}

// =============================================================================
// HANDLES
// =============================================================================

/// One input-capable element inside a form.
///
/// Setters mutate element state only. They must not emit [`FormEvent`]s:
/// hydration writes through them and must not be observable as user-driven
/// changes, or restoring a form would loop back into the cache-update path.
pub trait FieldHandle: Send + Sync {
    /// Identifier attribute. Empty when the element carries none; such
    /// fields never participate in capture or apply.
    fn id(&self) -> String;

    /// Type-like attribute (`"text"`, `"checkbox"`, `"file"`, ...). Controls
    /// without one report their element kind (`"textarea"`, `"select"`).
    fn control_type(&self) -> String;

    /// Current textual value.
    fn text_value(&self) -> String;

    /// Set the textual value.
    fn set_text_value(&self, value: &str);

    /// Current checked state.
    fn checked(&self) -> bool;

    /// Set the checked state.
    fn set_checked(&self, checked: bool);
}

/// One form element plus its event stream.
pub trait FormHandle: Send + Sync {
    /// The form's identifier attribute, if any. Forms without one share the
    /// fallback cache key.
    fn form_id(&self) -> Option<String>;

    /// Whether the form carries a boolean attribute.
    fn has_attribute(&self, name: &str) -> bool;

    /// The form's input-capable fields, in document order.
    fn fields(&self) -> Vec<Arc<dyn FieldHandle>>;

    /// First field whose identifier equals `id`, searching across all
    /// input-capable element kinds.
    fn field_by_id(&self, id: &str) -> Option<Arc<dyn FieldHandle>>;

    /// Register a new listener and return its event stream. Every call adds
    /// an independent subscription; dropping the receiver detaches it.
    fn subscribe(&self) -> mpsc::UnboundedReceiver<FormEvent>;
}

/// Provider of the current candidate forms. Re-discovery is a repeated
/// `forms()` call.
///
/// Implementations must hand out stable handles: the same underlying form
/// yields the same `Arc` across calls, since attachment is deduplicated by
/// handle identity.
pub trait FormSource: Send + Sync {
    /// All candidate forms at this instant, marked or not. The controller
    /// filters on [`CACHE_MARKER_ATTR`].
    fn forms(&self) -> Vec<Arc<dyn FormHandle>>;
}

// =============================================================================
// TEST HELPERS
// =============================================================================


// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "dom_test.rs"]
mod tests;
