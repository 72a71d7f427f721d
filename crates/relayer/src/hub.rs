//! Submission of sell orders to the marketplace hub's REST server.

pub mod account;
pub mod request;

#[cfg(test)]
pub mod mock;

use tracing::debug;

use nft_relayer_types::applications::nft::coin::Coin;
use nft_relayer_types::applications::nft::token::NftDescriptor;

use crate::config::HubConfig;
use crate::error::Error;

use self::account::query_account;
use self::request::{BaseReq, SellRequest};

/// A successful submission, as acknowledged by the hub.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Confirmation {
    /// HTTP status of the submission.
    pub status: u16,
    /// Raw response body, usually the signed transaction or its hash.
    pub body: String,
    /// Account sequence the request was built with.
    pub account_sequence: u64,
}

/// Turns decoded packets into sell orders on the hub.
///
/// Each call to [`Forwarder::forward`] resolves the signer's nonce anew and
/// makes exactly one submission attempt. Nothing is retried or remembered
/// across calls, so forwarding the same packet twice submits it twice.
pub struct Forwarder {
    client: reqwest::Client,
    config: HubConfig,
    rest_addr: String,
}

impl Forwarder {
    pub fn new(config: HubConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(Error::http_client_build)?;

        let rest_addr = config.rest_addr.trim_end_matches('/').to_string();

        Ok(Self {
            client,
            config,
            rest_addr,
        })
    }

    fn sell_url(&self) -> String {
        format!("{}/{}/nft/sell", self.rest_addr, self.config.namespace)
    }

    /// Put `token` up for sale at `price`, on behalf of the configured signer.
    pub async fn forward(&self, token: &NftDescriptor, price: &Coin) -> Result<Confirmation, Error> {
        let signer = &self.config.signer;

        let account = query_account(&self.client, &self.rest_addr, &signer.address).await?;

        let request = SellRequest {
            base_req: BaseReq {
                from: signer.address.clone(),
                chain_id: self.config.chain_id.clone(),
                sequence: account.sequence,
                account_number: account
                    .account_number
                    .unwrap_or(self.config.account_number),
            },
            owner: signer.address.clone(),
            token: token.clone(),
            price: price.clone(),
            name: signer.name.clone(),
            password: signer.password.clone(),
        };

        debug!(?request, "submitting sell request");

        let url = self.sell_url();
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::http_request(url.clone(), e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::http_request(url.clone(), e))?;

        if !status.is_success() {
            return Err(Error::forward(status.as_u16(), body));
        }

        Ok(Confirmation {
            status: status.as_u16(),
            body,
            account_sequence: account.sequence,
        })
    }
}
