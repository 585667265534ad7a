use super::*;
use super::test_helpers::{StubField, StubForm, StubPage};

// =============================================================================
// ControlKind::classify
// =============================================================================

#[test]
fn classify_matches_type_literals() {
    assert_eq!(ControlKind::classify("checkbox"), ControlKind::Toggle);
    assert_eq!(ControlKind::classify("radio"), ControlKind::Toggle);
    assert_eq!(ControlKind::classify("file"), ControlKind::Upload);
    assert_eq!(ControlKind::classify("text"), ControlKind::Text);
    assert_eq!(ControlKind::classify("email"), ControlKind::Text);
    assert_eq!(ControlKind::classify("textarea"), ControlKind::Text);
    assert_eq!(ControlKind::classify("select"), ControlKind::Text);
}

#[test]
fn classify_is_exact_not_case_folded() {
    // The platform lowercases type attributes before we ever see them.
    assert_eq!(ControlKind::classify("Checkbox"), ControlKind::Text);
    assert_eq!(ControlKind::classify("FILE"), ControlKind::Text);
}

// =============================================================================
// StubForm events
// =============================================================================

#[tokio::test]
async fn fire_fans_out_to_every_subscription() {
    let form = StubForm::marked(Some("f"), vec![]);
    let mut first = form.subscribe();
    let mut second = form.subscribe();

    form.fire(FormEvent::Change);
    form.fire(FormEvent::Submit);

    assert_eq!(first.recv().await, Some(FormEvent::Change));
    assert_eq!(first.recv().await, Some(FormEvent::Submit));
    assert_eq!(second.recv().await, Some(FormEvent::Change));
    assert_eq!(second.recv().await, Some(FormEvent::Submit));
}

#[test]
fn listener_count_tracks_live_receivers() {
    let form = StubForm::marked(None, vec![]);
    assert_eq!(form.listener_count(), 0);

    let rx = form.subscribe();
    assert_eq!(form.listener_count(), 1);

    drop(rx);
    assert_eq!(form.listener_count(), 0);
}

// =============================================================================
// Attributes and field lookup
// =============================================================================

#[test]
fn marker_attribute_gates_discovery() {
    let marked = StubForm::marked(Some("a"), vec![]);
    let unmarked = StubForm::unmarked(Some("b"), vec![]);

    assert!(marked.has_attribute(CACHE_MARKER_ATTR));
    assert!(!marked.has_attribute("data-other"));
    assert!(!unmarked.has_attribute(CACHE_MARKER_ATTR));
}

#[test]
fn field_lookup_never_matches_anonymous_fields() {
    let form = StubForm::marked(None, vec![StubField::anonymous("text"), StubField::text("name")]);

    assert!(form.field_by_id("").is_none());
    assert_eq!(form.field_by_id("name").unwrap().id(), "name");
    assert!(form.field_by_id("missing").is_none());
}

#[test]
fn fields_preserve_document_order() {
    let form = StubForm::marked(
        None,
        vec![StubField::text("one"), StubField::checkbox("two"), StubField::textarea("three")],
    );
    let ids: Vec<String> = form.fields().iter().map(|field| field.id()).collect();
    assert_eq!(ids, ["one", "two", "three"]);
}

// =============================================================================
// StubPage
// =============================================================================

#[test]
fn page_hands_out_stable_handles() {
    let form = StubForm::marked(Some("f"), vec![]);
    let page = StubPage::with_forms(vec![Arc::clone(&form)]);

    let first = page.forms();
    let second = page.forms();
    assert!(Arc::ptr_eq(&first[0], &second[0]));
}

#[test]
fn page_add_appears_in_next_discovery() {
    let page = StubPage::new();
    assert!(page.forms().is_empty());

    page.add(StubForm::marked(Some("late"), vec![]));
    assert_eq!(page.forms().len(), 1);
}
