mod envelope;
mod priority;
mod stage;
mod work_item;
