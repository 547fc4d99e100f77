//! HTTP surface of the two insert-only entity types

pub mod contract;
pub mod exposure_file;

pub use contract::ContractDescriptor;
pub use exposure_file::ExposureFileDescriptor;
