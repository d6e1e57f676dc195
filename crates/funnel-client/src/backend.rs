use crate::ClientResult;

use std::sync::Arc;

use async_trait::async_trait;
use funnel_core::{NewWorkItem, Stage, WorkItem, WorkItemPatch};

/// Remote store of challenges.
///
/// The board controller only talks to the backend through this trait.
#[async_trait]
pub trait ChallengeBackend: Send + Sync {
    /// Every challenge visible to the caller
    async fn list_all(&self) -> ClientResult<Vec<WorkItem>>;

    /// Challenges currently in `stage`
    async fn list_by_stage(&self, stage: Stage) -> ClientResult<Vec<WorkItem>>;

    async fn create(&self, item: &NewWorkItem) -> ClientResult<WorkItem>;

    async fn update(&self, id: &str, patch: &WorkItemPatch) -> ClientResult<WorkItem>;

    /// Move a challenge to `stage`. No response body is expected.
    async fn update_stage(&self, id: &str, stage: Stage) -> ClientResult<()>;

    async fn delete(&self, id: &str) -> ClientResult<()>;
}

#[async_trait]
impl<T> ChallengeBackend for Arc<T>
where
    T: ChallengeBackend + ?Sized,
{
    async fn list_all(&self) -> ClientResult<Vec<WorkItem>> {
        (**self).list_all().await
    }

    async fn list_by_stage(&self, stage: Stage) -> ClientResult<Vec<WorkItem>> {
        (**self).list_by_stage(stage).await
    }

    async fn create(&self, item: &NewWorkItem) -> ClientResult<WorkItem> {
        (**self).create(item).await
    }

    async fn update(&self, id: &str, patch: &WorkItemPatch) -> ClientResult<WorkItem> {
        (**self).update(id, patch).await
    }

    async fn update_stage(&self, id: &str, stage: Stage) -> ClientResult<()> {
        (**self).update_stage(id, stage).await
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        (**self).delete(id).await
    }
}
