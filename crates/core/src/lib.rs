//! Domain model of the biobank admin client.
//!
//! No I/O lives here: entities, their lifecycle rules, the list filter and
//! sort grammar, and validation of server representations.

pub mod annotation;
pub mod centre;
pub mod collection_event_type;
pub mod entity;
pub mod error;
pub mod filter;
pub mod membership;
pub mod paging;
pub mod participant;
pub mod schema;
pub mod shipment;
pub mod sort;
pub mod state;
pub mod study;
pub mod types;
pub mod user;
