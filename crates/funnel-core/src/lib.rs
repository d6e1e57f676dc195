pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result as CoreErrorResult};
pub use models::envelope::{Envelope, ItemEnvelope};
pub use models::new_work_item::NewWorkItem;
pub use models::priority::Priority;
pub use models::stage::{STAGE_TABLE, Stage};
pub use models::work_item::WorkItem;
pub use models::work_item_patch::WorkItemPatch;
