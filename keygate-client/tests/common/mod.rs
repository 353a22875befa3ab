//! Shared test helpers for client tests.

#![allow(dead_code)]

use keygate_client::transport::mock::MockGateway;
use keygate_client::{Cipher, Client, ClientConfig, EncryptionScheme};
use serde_json::{json, Value};
use std::sync::Arc;

/// 64-char hex key, usable with every fixed-key scheme.
pub const TEST_KEY: &str = "632005a33ebb7619c1efd3853c7109f1c075c7bb86164e35da72916f9d4ef037";

pub const TEST_PROJECT: &str = "f3b2c6d8-proj-uuid";

/// Builds a client wired to a scripted mock gateway sharing its cipher.
pub fn make_client_with(scheme: EncryptionScheme, key: &str) -> (Client, Arc<MockGateway>) {
    let config = ClientConfig::new("https://license.example.com", TEST_PROJECT, key)
        .with_scheme(scheme);
    let cipher = Cipher::new(scheme, key).unwrap();
    let gateway = Arc::new(MockGateway::new(cipher));
    let client = Client::new(config, gateway.clone()).unwrap();
    (client, gateway)
}

pub fn make_client() -> (Client, Arc<MockGateway>) {
    make_client_with(EncryptionScheme::Aes256Gcm, TEST_KEY)
}

/// A canned card snapshot as the server would return it.
pub fn card_json(activated: bool) -> Value {
    json!({
        "id": 42,
        "card_key": "ABC-123",
        "activated": activated,
        "activated_at": "2026-01-10T08:30:00Z",
        "frozen": false,
        "duration": 2_592_000,
        "expire_at": "2026-02-09T08:30:00Z",
        "note": "",
        "card_type": "month",
        "custom_data": "{}",
        "hwid_list": ["device-1"],
        "ip_list": [],
        "max_hwid": 3,
        "max_ip": -1,
        "created_at": "2026-01-01T00:00:00Z",
        "updated_at": "2026-01-10T08:30:00Z"
    })
}

/// A canned successful login payload.
pub fn login_data(token: &str) -> Value {
    json!({
        "token": token,
        "expire_at": "2026-02-09T08:30:00Z",
        "card": card_json(true),
    })
}

/// Logs the client in against one scripted success reply.
pub async fn login_ok(client: &Client, gateway: &MockGateway) {
    gateway.enqueue_ok(login_data("tok-1"));
    client.login("ABC-123", Some("device-1"), None).await.unwrap();
}
