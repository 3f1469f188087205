//! Paged entity lists for the biobank administration tools.
//!
//! [`list::PagedListController`] holds filter, sort and paging state for one
//! list and fetches pages through a [`list::ListSource`]. The concrete
//! sources in [`sources`] bind it to the REST client.

pub mod error;
pub mod list;
pub mod sources;

pub use error::ListError;
pub use list::{ListConfig, ListItem, ListSource, Navigation, PagedListController};
