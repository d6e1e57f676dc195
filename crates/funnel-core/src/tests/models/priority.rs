use crate::Priority;

use std::str::FromStr;

#[test]
fn test_priority_from_str() {
    assert_eq!(Priority::from_str("low").unwrap(), Priority::Low);
    assert_eq!(Priority::from_str("MEDIUM").unwrap(), Priority::Medium);
    assert_eq!(Priority::from_str("High").unwrap(), Priority::High);
    assert!(Priority::from_str("urgent").is_err());
}

#[test]
fn test_priority_default() {
    assert_eq!(Priority::default(), Priority::Medium);
}

#[test]
fn test_priority_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
}

#[test]
fn given_uppercase_priority_when_deserialized_then_accepted() {
    let priority: Priority = serde_json::from_str("\"HIGH\"").unwrap();
    assert_eq!(priority, Priority::High);
}

#[test]
fn given_null_or_unknown_priority_when_deserialized_then_default() {
    let from_null: Priority = serde_json::from_str("null").unwrap();
    let from_unknown: Priority = serde_json::from_str("\"critical\"").unwrap();

    assert_eq!(from_null, Priority::Medium);
    assert_eq!(from_unknown, Priority::Medium);
}
