//! REST client for the biobank server.
//!
//! Every mutation follows the expected-version protocol: the request carries
//! the version the caller last observed and the reply is the server's full,
//! validated representation, which replaces the caller's copy.

pub mod centres;
pub mod client;
pub mod collection_event_types;
pub mod config;
pub mod error;
pub mod http;
pub mod memberships;
pub mod participants;
pub mod shipments;
pub mod studies;
pub mod transport;
pub mod users;

pub use client::BiobankClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
