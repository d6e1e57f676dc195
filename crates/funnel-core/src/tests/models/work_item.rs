use crate::{NewWorkItem, Priority, Stage, WorkItem, WorkItemPatch};

use chrono::{TimeZone, Utc};
use serde_json::json;

#[test]
fn given_full_backend_payload_when_deserialized_then_all_fields_read() {
    let item: WorkItem = serde_json::from_value(json!({
        "id": "c1",
        "title": "Reduce onboarding time",
        "description": "Find startups for document automation",
        "priority": "high",
        "status": "OPEN",
        "stage": "PRE_SCREENING",
        "assignee": "ana",
        "dueDate": "2024-06-30",
        "createdAt": "2024-01-15T10:30:00Z",
        "updatedAt": "2024-01-16T08:00:00",
        "companyId": "acme"
    }))
    .unwrap();

    assert_eq!(item.id, "c1");
    assert_eq!(item.priority, Priority::High);
    assert_eq!(item.stage_value(), Some(Stage::PreScreening));
    assert_eq!(item.due_date.as_deref(), Some("2024-06-30"));
    assert_eq!(
        item.created_at,
        Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap())
    );
    assert_eq!(
        item.updated_at,
        Some(Utc.with_ymd_and_hms(2024, 1, 16, 8, 0, 0).unwrap())
    );
    assert_eq!(item.company_id.as_deref(), Some("acme"));
}

#[test]
fn given_numeric_ids_when_deserialized_then_normalized_to_strings() {
    let item: WorkItem = serde_json::from_value(json!({
        "id": 42,
        "title": "Numeric",
        "stage": "IDEATION",
        "companyId": 7
    }))
    .unwrap();

    assert_eq!(item.id, "42");
    assert_eq!(item.company_id.as_deref(), Some("7"));
}

#[test]
fn given_nulls_and_missing_fields_when_deserialized_then_defaults() {
    let item: WorkItem = serde_json::from_value(json!({
        "id": "c2",
        "title": "Sparse",
        "description": null,
        "priority": null,
        "createdAt": null
    }))
    .unwrap();

    assert_eq!(item.description, "");
    assert_eq!(item.priority, Priority::Medium);
    assert_eq!(item.stage, "");
    assert_eq!(item.stage_value(), None);
    assert!(item.created_at.is_none());
}

#[test]
fn given_epoch_millis_timestamp_when_deserialized_then_parsed() {
    let item: WorkItem = serde_json::from_value(json!({
        "id": "c3",
        "createdAt": 1_704_067_200_000_i64
    }))
    .unwrap();

    assert_eq!(
        item.created_at,
        Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    );
}

#[test]
fn given_unknown_stage_when_deserialized_then_kept_verbatim() {
    let item: WorkItem = serde_json::from_value(json!({
        "id": "c4",
        "stage": "ARCHIVED"
    }))
    .unwrap();

    assert_eq!(item.stage, "ARCHIVED");
    assert_eq!(item.stage_value(), None);
}

#[test]
fn given_missing_id_when_deserialized_then_error() {
    let result: Result<WorkItem, _> = serde_json::from_value(json!({ "title": "No id" }));
    assert!(result.is_err());
}

#[test]
fn test_set_stage_writes_wire_value() {
    let mut item = WorkItem::new("c5", "Move me", Stage::Ideation);
    item.set_stage(Stage::Experimentation);
    assert_eq!(item.stage, "EXPERIMENTATION");
}

#[test]
fn test_work_item_serializes_camel_case() {
    let mut item = WorkItem::new("c6", "Serialize", Stage::Ideation);
    item.due_date = Some("2024-02-01".to_string());

    let value = serde_json::to_value(&item).unwrap();
    assert_eq!(value["dueDate"], "2024-02-01");
    assert_eq!(value["stage"], "IDEATION");
    assert!(value.get("createdAt").is_none());
}

#[test]
fn test_new_work_item_omits_absent_fields() {
    let mut new_item = NewWorkItem::new("Fresh idea");
    new_item.stage = Some(Stage::Ideation);

    let value = serde_json::to_value(&new_item).unwrap();
    assert_eq!(
        value,
        json!({ "title": "Fresh idea", "priority": "medium", "stage": "IDEATION" })
    );
}

#[test]
fn test_patch_is_empty() {
    assert!(WorkItemPatch::default().is_empty());

    let patch = WorkItemPatch {
        status: Some("CLOSED".to_string()),
        ..WorkItemPatch::default()
    };
    assert!(!patch.is_empty());
    assert_eq!(
        serde_json::to_value(&patch).unwrap(),
        json!({ "status": "CLOSED" })
    );
}

#[test]
fn given_date_only_timestamp_when_deserialized_then_midnight_utc() {
    let item: WorkItem = serde_json::from_value(json!({
        "id": "c3",
        "createdAt": "2024-01-15"
    }))
    .unwrap();

    assert_eq!(
        item.created_at,
        Some(Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap())
    );
}

#[test]
fn given_unreadable_timestamps_when_deserialized_then_item_kept_without_them() {
    let item: WorkItem = serde_json::from_value(json!({
        "id": "c4",
        "title": "Bad clock",
        "stage": "IDEATION",
        "createdAt": "yesterday-ish",
        "updatedAt": { "epochSecond": 1 }
    }))
    .unwrap();

    assert_eq!(item.id, "c4");
    assert_eq!(item.stage_value(), Some(Stage::Ideation));
    assert_eq!(item.created_at, None);
    assert_eq!(item.updated_at, None);
}
