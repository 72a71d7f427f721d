use serde_json::Value;
use tracing::debug;

use crate::error::Error;

/// The parts of a hub account needed to sign a request for it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AccountInfo {
    /// Next transaction sequence (nonce) of the account.
    pub sequence: u64,
    /// Account number, when the hub reports one.
    pub account_number: Option<u64>,
}

/// Query the hub's REST server for the current state of `address`.
///
/// Both the legacy `{"value": {...}}` response and the newer
/// `{"result": {"value": {...}}}` envelope are accepted. Counters may be
/// encoded as decimal strings or as JSON numbers.
pub async fn query_account(
    client: &reqwest::Client,
    rest_addr: &str,
    address: &str,
) -> Result<AccountInfo, Error> {
    let url = format!("{rest_addr}/auth/accounts/{address}");

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| Error::http_request(url.clone(), e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| Error::http_request(url.clone(), e))?;

    if !status.is_success() {
        return Err(Error::nonce_resolution(
            address.to_string(),
            format!("account query returned status {status}: {body}"),
        ));
    }

    let account = parse_account(&body)
        .map_err(|reason| Error::nonce_resolution(address.to_string(), reason))?;

    debug!(
        %address,
        sequence = account.sequence,
        account_number = ?account.account_number,
        "retrieved hub account"
    );

    Ok(account)
}

fn parse_account(body: &str) -> Result<AccountInfo, String> {
    let json: Value =
        serde_json::from_str(body).map_err(|e| format!("invalid account response: {e}"))?;

    let value = json
        .get("value")
        .or_else(|| json.pointer("/result/value"))
        .ok_or_else(|| "account response has no `value`".to_string())?;

    let sequence = match value.get("sequence") {
        // A missing sequence is rejected.
        None | Some(Value::Null) => return Err("sequence is missing".to_string()),
        Some(raw) => parse_u64(raw).ok_or_else(|| format!("invalid sequence number `{raw}`"))?,
    };

    let account_number = value.get("account_number").and_then(parse_u64);

    Ok(AccountInfo {
        sequence,
        account_number,
    })
}

fn parse_u64(value: &Value) -> Option<u64> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    }
}
