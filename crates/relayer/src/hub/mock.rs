//! Helpers standing up a fake hub REST server.

use core::time::Duration;

use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::config::{HubConfig, SignerConfig};

pub const SIGNER_ADDRESS: &str = "cosmos1signer";

pub fn hub_config(rest_addr: &str) -> HubConfig {
    HubConfig {
        rest_addr: rest_addr.to_string(),
        namespace: "hh".to_string(),
        chain_id: "hhchain".to_string(),
        account_number: 0,
        request_timeout: Duration::from_secs(2),
        signer: SignerConfig {
            name: "jack".to_string(),
            password: "12345678".to_string(),
            address: SIGNER_ADDRESS.to_string(),
        },
    }
}

/// Serve `value` as the signer's account.
pub async fn mount_account(server: &MockServer, value: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/auth/accounts/{SIGNER_ADDRESS}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "type": "cosmos-sdk/Account",
            "value": value,
        })))
        .mount(server)
        .await;
}

/// Answer every sell request with `status`.
pub async fn mount_sell(server: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path("/hh/nft/sell"))
        .respond_with(ResponseTemplate::new(status).set_body_string(r#"{"txhash":"ABCD"}"#))
        .mount(server)
        .await;
}

/// Bodies of the sell requests the server received, in order.
pub async fn sell_requests(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.method == wiremock::http::Method::Post)
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}
