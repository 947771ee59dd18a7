pub mod store;
pub mod workflow;
