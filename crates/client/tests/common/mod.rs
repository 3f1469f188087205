#![allow(dead_code)]

use std::sync::Arc;

use biobank_client::BiobankClient;
use biobank_fixtures::MockTransport;

/// A client wired to a fresh recording transport.
pub fn mock_client() -> (Arc<MockTransport>, BiobankClient) {
    let transport = Arc::new(MockTransport::new());
    let client = BiobankClient::new(transport.clone());
    (transport, client)
}

/// The conflict reply the server sends when the expected version is stale.
pub fn version_conflict(transport: &MockTransport) {
    transport.fail(
        400,
        "InvalidVersion: expected version doesn't match current version",
    );
}
