use crate::{
    Board, BoardError, BoardOptions, BoardResult, BoardSnapshot, BoardView, MutationKind,
};

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use funnel_client::ChallengeBackend;
use funnel_core::{NewWorkItem, Stage, WorkItem, WorkItemPatch};
use futures::future::join_all;
use log::{debug, error, warn};
use tokio::sync::watch;

/// How a `load()` call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response replaced the board
    Applied { items: usize },
    /// A newer load started first; the response was dropped
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// The item was already in the destination column
    Unchanged,
}

/// State shared with background tasks (error timers)
struct Shared {
    state: watch::Sender<BoardView>,
    error_seq: AtomicU64,
}

impl Shared {
    /// Clear the error only if no later error replaced it
    fn clear_error(&self, seq: u64) {
        self.state.send_if_modified(|view| {
            if self.error_seq.load(Ordering::SeqCst) != seq || view.error.is_none() {
                return false;
            }
            view.error = None;
            true
        });
    }
}

/// Result of the synchronous half of an optimistic operation
enum Optimistic {
    Missing,
    Unchanged,
    Applied(BoardSnapshot),
}

/// Owner of the funnel board.
///
/// Every mutation runs inside a `watch` send closure, so subscribers see
/// each change immediately and no lock is held across a backend call.
/// Share it as `Arc<FunnelBoardController<B>>` to run operations
/// concurrently.
pub struct FunnelBoardController<B> {
    backend: B,
    options: BoardOptions,
    default_stage: Stage,
    shared: Arc<Shared>,
    latest_load: AtomicU64,
}

impl<B: ChallengeBackend> FunnelBoardController<B> {
    pub fn new(backend: B, options: BoardOptions) -> BoardResult<Self> {
        options.validate()?;
        let default_stage = options.default_stage()?;
        let (state, _) = watch::channel(BoardView::default());

        Ok(Self {
            backend,
            options,
            default_stage,
            shared: Arc::new(Shared {
                state,
                error_seq: AtomicU64::new(0),
            }),
            latest_load: AtomicU64::new(0),
        })
    }

    /// Current state, cloned
    pub fn view(&self) -> BoardView {
        self.shared.state.borrow().clone()
    }

    pub fn board(&self) -> Board {
        self.shared.state.borrow().board.clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<BoardView> {
        self.shared.state.subscribe()
    }

    // =========================================================================
    // Load
    // =========================================================================

    /// Replace the board with the backend's current contents.
    ///
    /// A load that finishes after a newer one started is dropped without
    /// touching the view.
    pub async fn load(&self) -> BoardResult<LoadOutcome> {
        let token = self.latest_load.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Loading board (load #{})", token);

        self.shared.state.send_if_modified(|view| {
            let changed = !view.loading;
            view.loading = true;
            changed
        });

        let fetched = self.fetch_items().await;

        match fetched {
            Ok(items) => {
                let board = Board::partition(items, self.default_stage);
                let count = board.len();

                let applied = self.shared.state.send_if_modified(|view| {
                    if !self.is_current_load(token) {
                        return false;
                    }
                    view.board = board;
                    view.revision += 1;
                    view.loading = false;
                    view.error = None;
                    view.needs_resync = false;
                    true
                });

                if applied {
                    debug!("Load #{} applied ({} challenges)", token, count);
                    Ok(LoadOutcome::Applied { items: count })
                } else {
                    warn!("Discarding stale response for load #{}", token);
                    Ok(LoadOutcome::Stale)
                }
            }
            Err(err) => {
                let message = err.user_message();
                let applied = self.shared.state.send_if_modified(|view| {
                    if !self.is_current_load(token) {
                        return false;
                    }
                    self.shared.error_seq.fetch_add(1, Ordering::SeqCst);
                    view.loading = false;
                    view.error = Some(message);
                    true
                });

                if applied {
                    error!("Load #{} failed: {}", token, err);
                    Err(err)
                } else {
                    warn!("Discarding stale failure for load #{}: {}", token, err);
                    Ok(LoadOutcome::Stale)
                }
            }
        }
    }

    fn is_current_load(&self, token: u64) -> bool {
        self.latest_load.load(Ordering::SeqCst) == token
    }

    /// Bulk fetch, falling back to one concurrent request per stage
    async fn fetch_items(&self) -> BoardResult<Vec<WorkItem>> {
        let bulk_error = match self.backend.list_all().await {
            Ok(items) => return Ok(items),
            Err(e) => e,
        };
        warn!(
            "Bulk challenge fetch failed, falling back to per-stage fetch: {}",
            bulk_error
        );

        let results = join_all(Stage::ALL.into_iter().map(|stage| async move {
            (stage, self.backend.list_by_stage(stage).await)
        }))
        .await;

        let mut items = Vec::new();
        let mut succeeded = 0;

        for (stage, result) in results {
            match result {
                Ok(stage_items) => {
                    succeeded += 1;
                    items.extend(stage_items.into_iter().map(|mut item| {
                        if item.stage.is_empty() {
                            item.set_stage(stage);
                        }
                        item
                    }));
                }
                Err(e) => warn!("Fetching stage {} failed, treating as empty: {}", stage, e),
            }
        }

        if succeeded == 0 {
            return Err(BoardError::load(format!(
                "bulk fetch and all {} per-stage fetches failed (bulk: {})",
                Stage::ALL.len(),
                bulk_error
            )));
        }

        Ok(items)
    }

    // =========================================================================
    // Move
    // =========================================================================

    /// Move a challenge to another column.
    ///
    /// The board changes before the backend is called and is restored
    /// from a snapshot if the call fails.
    pub async fn move_item(&self, id: &str, destination: &str) -> BoardResult<MoveOutcome> {
        let Ok(stage) = Stage::from_column_key(destination) else {
            warn!("Rejected move of {} to unmapped column '{}'", id, destination);
            return Err(BoardError::move_rejected(destination));
        };

        let mut step = Optimistic::Missing;
        self.shared.state.send_if_modified(|view| {
            step = match view.board.stage_of(id) {
                None => Optimistic::Missing,
                Some(current) if current == stage => Optimistic::Unchanged,
                Some(_) => {
                    let snapshot = BoardSnapshot::capture(view);
                    if let Some(mut item) = view.board.remove(id) {
                        item.set_stage(stage);
                        view.board.push(stage, item);
                    }
                    view.revision += 1;
                    Optimistic::Applied(snapshot)
                }
            };
            matches!(step, Optimistic::Applied(_))
        });

        let snapshot = match step {
            Optimistic::Missing => {
                warn!("Rejected move of unknown challenge {}", id);
                return Err(BoardError::unknown_item(id));
            }
            Optimistic::Unchanged => {
                debug!("Challenge {} is already in '{}'", id, destination);
                return Ok(MoveOutcome::Unchanged);
            }
            Optimistic::Applied(snapshot) => snapshot,
        };

        debug!("Moving {} to {}", id, stage);
        match self.backend.update_stage(id, stage).await {
            Ok(()) => {
                debug!("Move of {} to {} confirmed", id, stage);
                Ok(MoveOutcome::Moved)
            }
            Err(source) => {
                let err = BoardError::sync(id, stage, source);
                warn!("{}; rolling back", err);
                self.revert(snapshot);
                self.show_transient_error(err.user_message());
                Err(err)
            }
        }
    }

    // =========================================================================
    // Create / update / delete
    // =========================================================================

    /// Create a challenge and add the stored copy to the board.
    pub async fn create(&self, mut data: NewWorkItem) -> BoardResult<WorkItem> {
        if data.stage.is_none() {
            data.stage = Some(self.options.creation_stage);
        }

        let mut item = match self.backend.create(&data).await {
            Ok(item) => item,
            Err(source) => {
                let err = BoardError::mutation(MutationKind::Create, data.title.as_str(), source);
                warn!("{}", err);
                self.show_transient_error(err.user_message());
                return Err(err);
            }
        };

        let stage = match item.stage_value() {
            Some(stage) => stage,
            None => {
                if !item.stage.is_empty() {
                    warn!(
                        "Created challenge {} has unmapped stage '{}', using {}",
                        item.id, item.stage, self.options.creation_stage
                    );
                }
                item.set_stage(self.options.creation_stage);
                self.options.creation_stage
            }
        };

        let placed = item.clone();
        self.shared.state.send_modify(|view| {
            // A reload may already have brought the new item in
            view.board.remove(&placed.id);
            view.board.push(stage, placed);
            view.revision += 1;
        });

        debug!("Created challenge {} in {}", item.id, stage);
        Ok(item)
    }

    /// Apply a field patch and swap the stored copy into the board.
    pub async fn update(&self, id: &str, patch: WorkItemPatch) -> BoardResult<WorkItem> {
        if !self.shared.state.borrow().board.contains(id) {
            warn!("Rejected update of unknown challenge {}", id);
            return Err(BoardError::unknown_item(id));
        }

        let item = match self.backend.update(id, &patch).await {
            Ok(item) => item,
            Err(source) => {
                let err = BoardError::mutation(MutationKind::Update, id, source);
                warn!("{}", err);
                self.show_transient_error(err.user_message());
                return Err(err);
            }
        };

        let replacement = item.clone();
        let replaced = self.shared.state.send_if_modified(|view| {
            let replaced = view.board.replace(replacement);
            if replaced {
                view.revision += 1;
            }
            replaced
        });

        if !replaced {
            debug!("Challenge {} left the board before its update returned", id);
        }

        Ok(item)
    }

    /// Remove a challenge, restoring it if the backend refuses.
    pub async fn delete(&self, id: &str) -> BoardResult<()> {
        let mut step = Optimistic::Missing;
        self.shared.state.send_if_modified(|view| {
            if view.board.contains(id) {
                let snapshot = BoardSnapshot::capture(view);
                view.board.remove(id);
                view.revision += 1;
                step = Optimistic::Applied(snapshot);
            }
            matches!(step, Optimistic::Applied(_))
        });

        let Optimistic::Applied(snapshot) = step else {
            warn!("Rejected delete of unknown challenge {}", id);
            return Err(BoardError::unknown_item(id));
        };

        match self.backend.delete(id).await {
            Ok(()) => {
                debug!("Deleted challenge {}", id);
                Ok(())
            }
            Err(source) => {
                let err = BoardError::mutation(MutationKind::Delete, id, source);
                warn!("{}; rolling back", err);
                self.revert(snapshot);
                self.show_transient_error(err.user_message());
                Err(err)
            }
        }
    }

    // =========================================================================
    // Rollback and errors
    // =========================================================================

    /// Restore the board from a snapshot.
    ///
    /// Changes made after the snapshot are lost, so the view is flagged
    /// for a reload when there were any.
    pub fn revert(&self, snapshot: BoardSnapshot) {
        let revision = snapshot.revision();
        self.shared.state.send_modify(|view| {
            if !snapshot.restore_into(view) {
                warn!(
                    "Board changed since snapshot at revision {}; rollback discarded those changes",
                    revision
                );
                view.needs_resync = true;
            }
        });
    }

    /// Show an error until the display window passes or a newer error replaces it
    fn show_transient_error(&self, message: String) {
        let seq = self.shared.error_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.shared.state.send_modify(|view| view.error = Some(message));

        let shared = Arc::clone(&self.shared);
        let display = self.options.error_display;
        tokio::spawn(async move {
            tokio::time::sleep(display).await;
            shared.clear_error(seq);
        });
    }
}
