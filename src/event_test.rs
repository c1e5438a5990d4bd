use super::*;

// =============================================================
// DragData
// =============================================================

#[test]
fn drag_data_starts_empty() {
    let data = DragData::new();
    assert!(data.element_id().is_none());
    assert_eq!(data.effect_allowed(), DropEffect::None);
    assert_eq!(data.drop_effect(), DropEffect::None);
}

#[test]
fn element_id_roundtrips_through_format_key() {
    let mut data = DragData::new();
    data.set_element_id("42");
    assert_eq!(data.element_id(), Some("42"));
    assert_eq!(data.get_data(ELEMENT_ID_FORMAT), Some("42"));
}

#[test]
fn empty_element_id_counts_as_missing() {
    let mut data = DragData::new();
    data.set_data(ELEMENT_ID_FORMAT, "");
    assert!(data.element_id().is_none());
}

#[test]
fn set_data_overwrites() {
    let mut data = DragData::new();
    data.set_data("text/plain", "a");
    data.set_data("text/plain", "b");
    assert_eq!(data.get_data("text/plain"), Some("b"));
    assert_eq!(data.entries().count(), 1);
}

#[test]
fn drop_effect_keywords() {
    assert_eq!(DropEffect::None.as_str(), "none");
    assert_eq!(DropEffect::Copy.as_str(), "copy");
    assert_eq!(DropEffect::Move.as_str(), "move");
    assert_eq!(DropEffect::Link.as_str(), "link");
}

// =============================================================
// EventResponse
// =============================================================

#[test]
fn response_constants() {
    assert_eq!(EventResponse::default(), EventResponse::IGNORED);
    assert!(EventResponse::CLAIMED.prevent_default && EventResponse::CLAIMED.stop_propagation);
    assert!(!EventResponse::STOP.prevent_default && EventResponse::STOP.stop_propagation);
    assert!(EventResponse::PREVENT.prevent_default && !EventResponse::PREVENT.stop_propagation);
}
