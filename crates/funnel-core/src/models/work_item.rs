use crate::models::wire;
use crate::{Priority, Stage};

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A challenge as the backend reports it.
///
/// `stage` keeps the raw wire value so that an unknown stage survives
/// decoding; use [`WorkItem::stage_value`] to resolve it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    #[serde(deserialize_with = "wire::string_or_number")]
    pub id: String,

    // Core fields
    #[serde(default, deserialize_with = "wire::string_or_default")]
    pub title: String,
    #[serde(default, deserialize_with = "wire::string_or_default")]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,

    // Workflow
    #[serde(default, deserialize_with = "wire::string_or_default")]
    pub status: String,
    #[serde(default, deserialize_with = "wire::string_or_default")]
    pub stage: String,

    // Display metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    // Audit
    #[serde(
        default,
        deserialize_with = "wire::optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "wire::optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,

    // Tenant
    #[serde(
        default,
        deserialize_with = "wire::optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub company_id: Option<String>,
}

impl WorkItem {
    /// Minimal item, mostly useful for fixtures and fakes.
    pub fn new(id: impl Into<String>, title: impl Into<String>, stage: Stage) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            priority: Priority::default(),
            status: String::new(),
            stage: stage.as_str().to_string(),
            assignee: None,
            due_date: None,
            created_at: None,
            updated_at: None,
            company_id: None,
        }
    }

    /// The stage this item claims to be in, if it is a known wire value.
    pub fn stage_value(&self) -> Option<Stage> {
        Stage::from_str(&self.stage).ok()
    }

    pub fn set_stage(&mut self, stage: Stage) {
        self.stage = stage.as_str().to_string();
    }
}
