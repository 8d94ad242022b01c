pub mod engine;
pub mod handlers;
pub mod repo;
pub mod scoring;
pub mod skills;
pub mod store;
