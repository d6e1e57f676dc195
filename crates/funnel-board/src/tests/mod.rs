
use crate::{BoardOptions, FunnelBoardController};

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use funnel_client::{ChallengeBackend, ClientError, ClientResult};
use funnel_core::{NewWorkItem, Stage, WorkItem, WorkItemPatch};
use tokio::sync::oneshot;

type ListGate = oneshot::Receiver<ClientResult<Vec<WorkItem>>>;
type StageGate = oneshot::Receiver<ClientResult<()>>;

/// In-memory backend with switchable failures and gates that hold a call
/// open until the test releases it.
#[derive(Default)]
pub(crate) struct FakeBackend {
    items: Mutex<Vec<WorkItem>>,
    calls: Mutex<Vec<String>>,
    fail_list_all: AtomicBool,
    fail_writes: AtomicBool,
    failing_stages: Mutex<HashSet<Stage>>,
    stage_responses: Mutex<HashMap<Stage, Vec<WorkItem>>>,
    created_stage: Mutex<Option<String>>,
    list_all_gates: Mutex<VecDeque<ListGate>>,
    update_stage_gates: Mutex<VecDeque<StageGate>>,
}

impl FakeBackend {
    pub(crate) fn with_items(items: Vec<WorkItem>) -> Self {
        let backend = Self::default();
        *backend.items.lock().unwrap() = items;
        backend
    }

    pub(crate) fn set_items(&self, items: Vec<WorkItem>) {
        *self.items.lock().unwrap() = items;
    }

    pub(crate) fn fail_list_all(&self, fail: bool) {
        self.fail_list_all.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_stage(&self, stage: Stage) {
        self.failing_stages.lock().unwrap().insert(stage);
    }

    pub(crate) fn fail_all_stages(&self) {
        self.failing_stages.lock().unwrap().extend(Stage::ALL);
    }

    /// Return exactly `items` for a per-stage request
    pub(crate) fn respond_for_stage(&self, stage: Stage, items: Vec<WorkItem>) {
        self.stage_responses.lock().unwrap().insert(stage, items);
    }

    /// Stage value the backend reports for created items
    pub(crate) fn report_created_stage(&self, stage: &str) {
        *self.created_stage.lock().unwrap() = Some(stage.to_string());
    }

    /// Hold the next `list_all` call until the sender resolves it
    pub(crate) fn gate_list_all(&self) -> oneshot::Sender<ClientResult<Vec<WorkItem>>> {
        let (tx, rx) = oneshot::channel();
        self.list_all_gates.lock().unwrap().push_back(rx);
        tx
    }

    /// Hold the next `update_stage` call until the sender resolves it
    pub(crate) fn gate_update_stage(&self) -> oneshot::Sender<ClientResult<()>> {
        let (tx, rx) = oneshot::channel();
        self.update_stage_gates.lock().unwrap().push_back(rx);
        tx
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls whose name starts with `prefix`
    pub(crate) fn count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    pub(crate) fn stored_stage(&self, id: &str) -> Option<String> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .find(|item| item.id == id)
            .map(|item| item.stage.clone())
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_writes(&self) -> ClientResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        Ok(())
    }
}

#[async_trait]
impl ChallengeBackend for FakeBackend {
    async fn list_all(&self) -> ClientResult<Vec<WorkItem>> {
        self.record(String::from("list_all"));

        let gate = self.list_all_gates.lock().unwrap().pop_front();
        if let Some(gate) = gate {
            return gate.await.unwrap_or_else(|_| Err(server_error()));
        }

        if self.fail_list_all.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        Ok(self.items.lock().unwrap().clone())
    }

    async fn list_by_stage(&self, stage: Stage) -> ClientResult<Vec<WorkItem>> {
        self.record(format!("list_by_stage:{}", stage));

        if self.failing_stages.lock().unwrap().contains(&stage) {
            return Err(server_error());
        }
        if let Some(items) = self.stage_responses.lock().unwrap().get(&stage) {
            return Ok(items.clone());
        }
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|item| item.stage_value() == Some(stage))
            .cloned()
            .collect())
    }

    async fn create(&self, item: &NewWorkItem) -> ClientResult<WorkItem> {
        self.record(format!(
            "create:{}",
            item.stage.map(|stage| stage.as_str()).unwrap_or("")
        ));
        self.check_writes()?;

        let mut items = self.items.lock().unwrap();
        let mut created = WorkItem::new(
            format!("new-{}", items.len() + 1),
            item.title.clone(),
            item.stage.unwrap_or(Stage::INITIAL),
        );
        if let Some(stage) = self.created_stage.lock().unwrap().clone() {
            created.stage = stage;
        }
        items.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, patch: &WorkItemPatch) -> ClientResult<WorkItem> {
        self.record(format!("update:{}", id));
        self.check_writes()?;

        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| not_found(id))?;
        if let Some(ref title) = patch.title {
            item.title = title.clone();
        }
        if let Some(ref description) = patch.description {
            item.description = description.clone();
        }
        if let Some(priority) = patch.priority {
            item.priority = priority;
        }
        Ok(item.clone())
    }

    async fn update_stage(&self, id: &str, stage: Stage) -> ClientResult<()> {
        self.record(format!("update_stage:{}:{}", id, stage));

        let gate = self.update_stage_gates.lock().unwrap().pop_front();
        match gate {
            Some(gate) => gate.await.unwrap_or_else(|_| Err(server_error()))?,
            None => self.check_writes()?,
        }

        let mut items = self.items.lock().unwrap();
        match items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.set_stage(stage);
                Ok(())
            }
            None => Err(not_found(id)),
        }
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        self.record(format!("delete:{}", id));
        self.check_writes()?;

        self.items.lock().unwrap().retain(|item| item.id != id);
        Ok(())
    }
}

pub(crate) fn server_error() -> ClientError {
    ClientError::api_error(
        500,
        String::from("INTERNAL"),
        String::from("backend unavailable"),
    )
}

fn not_found(id: &str) -> ClientError {
    ClientError::api_error(
        404,
        String::from("NOT_FOUND"),
        format!("challenge {} not found", id),
    )
}

pub(crate) fn challenge(id: &str, stage: Stage) -> WorkItem {
    WorkItem::new(id, format!("Challenge {}", id), stage)
}

pub(crate) fn controller(backend: Arc<FakeBackend>) -> FunnelBoardController<Arc<FakeBackend>> {
    FunnelBoardController::new(backend, BoardOptions::default()).unwrap()
}

/// Let spawned tasks run until they block
pub(crate) async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}
