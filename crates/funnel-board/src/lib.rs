//! funnel-board
//!
//! In-memory kanban board of challenges grouped by funnel stage, kept in
//! sync with the challenge backend through optimistic updates that roll
//! back on failure.

mod board;
mod board_options;
mod board_view;
mod controller;
mod error;
mod poller;
mod snapshot;

#[cfg(test)]
mod tests;

pub use board::{Board, Column};
pub use board_options::BoardOptions;
pub use board_view::BoardView;
pub use controller::{FunnelBoardController, LoadOutcome, MoveOutcome};
pub use error::{BoardError, MutationKind, Result as BoardResult};
pub use poller::{BoardPoller, spawn_poller};
pub use snapshot::BoardSnapshot;
