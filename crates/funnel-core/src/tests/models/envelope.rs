use crate::{Envelope, ItemEnvelope, WorkItem};

use serde_json::json;

fn ids(items: &[WorkItem]) -> Vec<&str> {
    items.iter().map(|item| item.id.as_str()).collect()
}

#[test]
fn given_bare_array_when_normalized_then_items() {
    let envelope: Envelope<WorkItem> =
        serde_json::from_value(json!([{ "id": "a" }, { "id": "b" }])).unwrap();

    assert!(matches!(envelope, Envelope::List(_)));
    assert_eq!(ids(&envelope.into_items()), vec!["a", "b"]);
}

#[test]
fn given_paginated_content_when_normalized_then_items() {
    let envelope: Envelope<WorkItem> = serde_json::from_value(json!({
        "content": [{ "id": "a" }],
        "totalElements": 1,
        "number": 0
    }))
    .unwrap();

    assert!(matches!(envelope, Envelope::Page { .. }));
    assert_eq!(ids(&envelope.into_items()), vec!["a"]);
}

#[test]
fn given_data_wrapper_when_normalized_then_items() {
    let envelope: Envelope<WorkItem> =
        serde_json::from_value(json!({ "data": [{ "id": "x" }, { "id": "y" }] })).unwrap();

    assert!(matches!(envelope, Envelope::Data { .. }));
    assert_eq!(ids(&envelope.into_items()), vec!["x", "y"]);
}

#[test]
fn given_single_object_when_normalized_then_one_item() {
    let envelope: Envelope<WorkItem> =
        serde_json::from_value(json!({ "id": "solo", "stage": "IDEATION" })).unwrap();

    assert!(matches!(envelope, Envelope::Single(_)));
    assert_eq!(ids(&envelope.into_items()), vec!["solo"]);
}

#[test]
fn given_empty_array_when_normalized_then_empty() {
    let envelope: Envelope<WorkItem> = serde_json::from_value(json!([])).unwrap();
    assert!(envelope.into_items().is_empty());
}

#[test]
fn given_unrecognised_shape_when_decoded_then_error() {
    let result: Result<Envelope<WorkItem>, _> =
        serde_json::from_value(json!({ "items": [{ "id": "a" }] }));
    assert!(result.is_err());
}

#[test]
fn given_item_envelope_shapes_when_unwrapped_then_same_item() {
    let wrapped: ItemEnvelope<WorkItem> =
        serde_json::from_value(json!({ "data": { "id": "w" } })).unwrap();
    let bare: ItemEnvelope<WorkItem> = serde_json::from_value(json!({ "id": "w" })).unwrap();

    assert_eq!(wrapped.into_item().id, "w");
    assert_eq!(bare.into_item().id, "w");
}

#[test]
fn given_one_item_with_malformed_created_at_when_normalized_then_all_items_kept() {
    let envelope: Envelope<WorkItem> = serde_json::from_value(json!([
        { "id": "c1", "stage": "IDEATION", "createdAt": "2024-01-15T10:30:00Z" },
        { "id": "c2", "stage": "PRE_SCREENING", "createdAt": "15/01/2024 10h30" }
    ]))
    .unwrap();

    let items = envelope.into_items();
    assert_eq!(ids(&items), vec!["c1", "c2"]);
    assert!(items[0].created_at.is_some());
    assert_eq!(items[1].created_at, None);
}
