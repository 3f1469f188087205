//! Test support: a deterministic entity factory and a recording transport.

pub mod factory;
pub mod transport;

pub use factory::EntityFactory;
pub use transport::MockTransport;
