pub mod descriptor;
pub mod handlers;

pub use descriptor::ContractDescriptor;
pub use handlers::{ContractAppState, create_contract, fetch_contract, get_contract, list_contracts};
