//! Link store implementations

pub mod in_memory;
pub mod seed;

pub use in_memory::InMemoryLinkStore;
pub use seed::seed_sample_data;
