use std::collections::{BTreeMap, HashSet};

use funnel_core::{Stage, WorkItem};
use log::warn;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One stage column and the challenges believed to be in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub stage: Stage,
    pub items: Vec<WorkItem>,
}

impl Column {
    pub fn key(&self) -> &'static str {
        self.stage.column_key()
    }
}

/// Challenges partitioned into stage columns.
///
/// Every stage has a column, in pipeline order, and an id is in at most
/// one column. Only the controller mutates a board.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    columns: Vec<Column>,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            columns: Stage::ALL
                .into_iter()
                .map(|stage| Column {
                    stage,
                    items: Vec::new(),
                })
                .collect(),
        }
    }

    /// Place each item in the column for its stage.
    ///
    /// Items with an unknown stage go to `default_stage` and are logged.
    /// Repeated ids keep their first occurrence.
    pub fn partition(items: Vec<WorkItem>, default_stage: Stage) -> Self {
        let mut board = Self::empty();
        let mut seen = HashSet::new();

        for item in items {
            if !seen.insert(item.id.clone()) {
                warn!("Duplicate challenge {} in backend response, ignoring", item.id);
                continue;
            }

            let stage = match item.stage_value() {
                Some(stage) => stage,
                None => {
                    warn!(
                        "Challenge {} has unmapped stage '{}', placing it in '{}'",
                        item.id,
                        item.stage,
                        default_stage.column_key()
                    );
                    default_stage
                }
            };

            board.column_mut(stage).items.push(item);
        }

        board
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column by key, `None` for a key that is not on the board
    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.key() == key)
    }

    /// Items of a column; empty for an unknown key
    pub fn items(&self, key: &str) -> &[WorkItem] {
        self.column(key)
            .map(|column| column.items.as_slice())
            .unwrap_or(&[])
    }

    pub fn find(&self, id: &str) -> Option<&WorkItem> {
        self.locate(id)
            .map(|(stage, index)| &self.columns[stage.position()].items[index])
    }

    /// Stage column currently holding `id`
    pub fn stage_of(&self, id: &str) -> Option<Stage> {
        self.locate(id).map(|(stage, _)| stage)
    }

    /// Key of the column currently holding `id`
    pub fn column_of(&self, id: &str) -> Option<&'static str> {
        self.stage_of(id).map(|stage| stage.column_key())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.locate(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.columns.iter().map(|column| column.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// id -> column key, for comparing boards by placement only
    pub fn membership(&self) -> BTreeMap<String, &'static str> {
        self.columns
            .iter()
            .flat_map(|column| {
                column
                    .items
                    .iter()
                    .map(move |item| (item.id.clone(), column.key()))
            })
            .collect()
    }

    pub(crate) fn locate(&self, id: &str) -> Option<(Stage, usize)> {
        self.columns.iter().find_map(|column| {
            column
                .items
                .iter()
                .position(|item| item.id == id)
                .map(|index| (column.stage, index))
        })
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<WorkItem> {
        let (stage, index) = self.locate(id)?;
        Some(self.column_mut(stage).items.remove(index))
    }

    pub(crate) fn push(&mut self, stage: Stage, item: WorkItem) {
        self.column_mut(stage).items.push(item);
    }

    /// Swap in a fresh copy of an item, re-homing it if its stage moved.
    ///
    /// Returns false when the item is no longer on the board.
    pub(crate) fn replace(&mut self, item: WorkItem) -> bool {
        let Some((current, index)) = self.locate(&item.id) else {
            return false;
        };

        match item.stage_value() {
            Some(stage) if stage != current => {
                self.column_mut(current).items.remove(index);
                self.push(stage, item);
            }
            _ => self.column_mut(current).items[index] = item,
        }

        true
    }

    fn column_mut(&mut self, stage: Stage) -> &mut Column {
        &mut self.columns[stage.position()]
    }
}

/// Serializes as `{ "<column key>": [items...] }` in pipeline order.
impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for column in &self.columns {
            map.serialize_entry(column.key(), &column.items)?;
        }
        map.end()
    }
}
