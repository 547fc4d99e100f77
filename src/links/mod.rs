//! Link management module
//!
//! Handlers for listing, creating and deleting the links of a contract.

pub mod handlers;

pub use handlers::{
    AppState, CreateLinkRequest, create_link, delete_link, linked_exposure_files,
    list_linked_exposure_files, list_links,
};
