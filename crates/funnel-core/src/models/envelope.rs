use serde::Deserialize;

/// Every shape a list endpoint is known to answer with.
///
/// Variant order matters: serde tries them top to bottom.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    /// `[ ... ]`
    List(Vec<T>),
    /// `{ "content": [ ... ], "totalElements": .. }`
    Page { content: Vec<T> },
    /// `{ "data": [ ... ] }`
    Data { data: Vec<T> },
    /// `{ ... }`
    Single(T),
}

impl<T> Envelope<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Envelope::List(items) => items,
            Envelope::Page { content } => content,
            Envelope::Data { data } => data,
            Envelope::Single(item) => vec![item],
        }
    }
}

/// Response of endpoints that return one item: bare or `{ "data": { ... } }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ItemEnvelope<T> {
    Data { data: T },
    Bare(T),
}

impl<T> ItemEnvelope<T> {
    pub fn into_item(self) -> T {
        match self {
            ItemEnvelope::Data { data } => data,
            ItemEnvelope::Bare(item) => item,
        }
    }
}
