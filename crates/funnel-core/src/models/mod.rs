pub mod envelope;
pub mod new_work_item;
pub mod priority;
pub mod stage;
pub mod wire;
pub mod work_item;
pub mod work_item_patch;
