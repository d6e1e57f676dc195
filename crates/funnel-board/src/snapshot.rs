use crate::{Board, BoardView};

/// Copy of the board taken just before an optimistic mutation.
#[derive(Debug, Clone)]
pub struct BoardSnapshot {
    board: Board,
    revision: u64,
}

impl BoardSnapshot {
    pub(crate) fn capture(view: &BoardView) -> Self {
        Self {
            board: view.board.clone(),
            revision: view.revision,
        }
    }

    /// Revision the view had when the snapshot was taken
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Put the snapshot back into `view`.
    ///
    /// Returns false if anything other than the mutation that took this
    /// snapshot changed the board in between.
    pub(crate) fn restore_into(self, view: &mut BoardView) -> bool {
        let clean = view.revision == self.revision + 1;
        view.board = self.board;
        view.revision += 1;
        clean
    }
}
