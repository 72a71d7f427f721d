use core::future::Future;
use core::time::Duration;

use async_trait::async_trait;
use tendermint_rpc::{Client, HttpClient};
use tracing::{debug, trace};

use nft_relayer_types::core::host::identifier::ChainId;
use nft_relayer_types::core::host::path::query_path;
use nft_relayer_types::proofs::Proof;
use nft_relayer_types::Height;

use crate::chain::endpoint::{ChainQuery, QueryResponse};
use crate::chain::requests::QueryHeight;
use crate::config::ChainConfig;
use crate::error::Error;

/// A Tendermint-based chain, read through the node's RPC endpoint.
pub struct CosmosChain {
    config: ChainConfig,
    rpc_client: HttpClient,
    query_path: String,
}

impl CosmosChain {
    pub fn new(config: ChainConfig) -> Result<Self, Error> {
        let rpc_client = HttpClient::new(config.rpc_addr.clone())
            .map_err(|e| Error::rpc(config.rpc_addr.clone(), e))?;

        let query_path = query_path(&config.store_prefix);

        Ok(Self {
            config,
            rpc_client,
            query_path,
        })
    }

    async fn with_timeout<T, F>(&self, operation: &str, fut: F) -> Result<T, Error>
    where
        F: Future<Output = Result<T, Error>>,
    {
        let timeout: Duration = self.config.rpc_timeout;

        tokio::time::timeout(timeout, fut)
            .await
            .map_err(|_| Error::timeout(format!("{operation} on chain '{}'", self.config.id), timeout))?
    }

    /// Perform an `abci_query` on the store path of the chain.
    async fn abci_query(&self, key: Vec<u8>, height: QueryHeight) -> Result<QueryResponse, Error> {
        let response = self
            .rpc_client
            .abci_query(
                Some(self.query_path.clone()),
                key.clone(),
                height.to_rpc_height(),
                true,
            )
            .await
            .map_err(|e| Error::rpc(self.config.rpc_addr.clone(), e))?;

        if !response.code.is_ok() {
            // Fail with response log.
            return Err(Error::abci_query(
                self.config.id.clone(),
                response.code.value(),
                response.log,
            ));
        }

        if response.proof.is_none() {
            return Err(Error::empty_response_proof(self.config.id.clone()));
        }

        trace!(
            chain = %self.config.id,
            key = %String::from_utf8_lossy(&key),
            height = %response.height,
            value_len = response.value.len(),
            "abci query",
        );

        Ok(QueryResponse {
            proof: Proof::new(key, response.proof, response.height),
            value: response.value,
            height: response.height,
        })
    }
}

#[async_trait]
impl ChainQuery for CosmosChain {
    fn id(&self) -> &ChainId {
        &self.config.id
    }

    async fn query_latest_height(&self) -> Result<Height, Error> {
        let status = self
            .with_timeout("status query", async {
                self.rpc_client
                    .status()
                    .await
                    .map_err(|e| Error::rpc(self.config.rpc_addr.clone(), e))
            })
            .await?;

        let height = status.sync_info.latest_block_height;
        debug!(chain = %self.config.id, %height, "latest height");

        Ok(height)
    }

    async fn query(&self, key: Vec<u8>, height: QueryHeight) -> Result<QueryResponse, Error> {
        self.with_timeout("abci query", self.abci_query(key, height))
            .await
    }
}
