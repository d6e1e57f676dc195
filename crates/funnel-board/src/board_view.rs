use crate::Board;

use serde::Serialize;

/// Everything a UI needs to render the board, published on every change.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoardView {
    pub board: Board,
    /// A load is in flight
    pub loading: bool,
    /// Message of the current user-facing failure
    pub error: Option<String>,
    /// A rollback may have discarded changes made after its snapshot
    pub needs_resync: bool,
    /// Bumped on every board mutation
    pub revision: u64,
}
