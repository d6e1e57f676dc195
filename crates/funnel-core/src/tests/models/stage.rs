use crate::{STAGE_TABLE, Stage};

use std::collections::HashSet;
use std::str::FromStr;

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok};

#[test]
fn test_stage_table_in_declaration_order() {
    for (index, (stage, _, _)) in STAGE_TABLE.iter().enumerate() {
        assert_eq!(stage.position(), index);
        assert_eq!(Stage::ALL[index], *stage);
    }
}

#[test]
fn test_stage_wire_values() {
    assert_eq!(Stage::Ideation.as_str(), "IDEATION");
    assert_eq!(Stage::PreScreening.as_str(), "PRE_SCREENING");
    assert_eq!(Stage::IdeaGeneration.as_str(), "IDEA_GENERATION");
    assert_eq!(Stage::DetailedScreening.as_str(), "DETAILED_SCREENING");
    assert_eq!(Stage::Experimentation.as_str(), "EXPERIMENTATION");
}

#[test]
fn test_stage_column_keys() {
    assert_eq!(Stage::Ideation.column_key(), "ideacao");
    assert_eq!(Stage::PreScreening.column_key(), "pretriagem");
    assert_eq!(Stage::IdeaGeneration.column_key(), "colaboracao");
    assert_eq!(Stage::DetailedScreening.column_key(), "avaliacao");
    assert_eq!(Stage::Experimentation.column_key(), "experimentacao");
}

#[test]
fn given_every_stage_when_mapped_both_ways_then_round_trips() {
    for stage in Stage::ALL {
        assert_that!(Stage::from_column_key(stage.column_key()).unwrap(), eq(stage));
        assert_that!(Stage::from_str(stage.as_str()).unwrap(), eq(stage));
    }
}

#[test]
fn given_stage_table_then_keys_and_values_are_unique() {
    let columns: HashSet<_> = STAGE_TABLE.iter().map(|(_, column, _)| *column).collect();
    let wires: HashSet<_> = STAGE_TABLE.iter().map(|(_, _, wire)| *wire).collect();

    assert_eq!(columns.len(), STAGE_TABLE.len());
    assert_eq!(wires.len(), STAGE_TABLE.len());
}

#[test]
fn given_unknown_column_when_resolved_then_error() {
    assert_that!(Stage::from_column_key("not-a-real-column"), err(anything()));
    assert_that!(Stage::from_column_key("IDEATION"), err(anything()));
    assert!(!Stage::is_column_key("not-a-real-column"));
    assert!(Stage::is_column_key("avaliacao"));
}

#[test]
fn given_wire_value_in_wrong_case_when_parsed_then_error() {
    assert_that!(Stage::from_str("ideation"), err(anything()));
    assert_that!(Stage::from_str("IDEATION"), ok(anything()));
}

#[test]
fn test_stage_serde_uses_wire_values() {
    let json = serde_json::to_string(&Stage::DetailedScreening).unwrap();
    assert_eq!(json, "\"DETAILED_SCREENING\"");

    let stage: Stage = serde_json::from_str("\"IDEA_GENERATION\"").unwrap();
    assert_eq!(stage, Stage::IdeaGeneration);
}

#[test]
fn test_stage_display() {
    assert_eq!(Stage::PreScreening.to_string(), "PRE_SCREENING");
}
