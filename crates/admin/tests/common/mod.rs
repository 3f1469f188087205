#![allow(dead_code)]

use std::sync::Arc;

use biobank_client::BiobankClient;
use biobank_fixtures::MockTransport;

pub fn mock_client() -> (Arc<MockTransport>, BiobankClient) {
    let transport = Arc::new(MockTransport::new());
    let client = BiobankClient::new(transport.clone());
    (transport, client)
}
