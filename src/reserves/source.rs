use std::future::Future;

use alloy::eips::BlockId;
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::transports::TransportError;
use log::debug;
use url::Url;

use super::decoder::{decode_reserves, get_reserves_calldata, PoolReserves};
use crate::error::{Result, ScanError};

/// Something that can run a read-only `getReserves()` call against a pool
/// and hand back the raw return bytes.
pub trait ReserveSource {
    fn call_get_reserves(&self, pool: Address) -> impl Future<Output = Result<Bytes>> + Send;
}

impl<T: ReserveSource + Sync> ReserveSource for &T {
    fn call_get_reserves(&self, pool: Address) -> impl Future<Output = Result<Bytes>> + Send {
        (**self).call_get_reserves(pool)
    }
}

/// [`ReserveSource`] backed by a JSON-RPC node, queried with `eth_call` at `latest`.
#[derive(Clone)]
pub struct RpcReserveSource {
    provider: DynProvider,
}

impl RpcReserveSource {
    pub fn new(rpc_url: Url) -> Self {
        let client = ProviderBuilder::new().connect_http(rpc_url);

        Self {
            provider: DynProvider::new(client),
        }
    }
}

impl ReserveSource for RpcReserveSource {
    async fn call_get_reserves(&self, pool: Address) -> Result<Bytes> {
        let tx = TransactionRequest::default()
            .with_to(pool)
            .with_input(get_reserves_calldata());

        debug!("eth_call getReserves on {pool}");

        self.provider
            .call(tx)
            .block(BlockId::latest())
            .await
            .map_err(|e| classify_call_error(pool, e))
    }
}

/// A JSON-RPC error response means the node answered but the contract did not
/// produce a reserves tuple (typically a revert), so it is a decode failure.
/// Anything else never reached the contract.
fn classify_call_error(pool: Address, err: TransportError) -> ScanError {
    if let Some(payload) = err.as_error_resp() {
        return ScanError::Decode(format!("pool {pool} rejected getReserves: {payload}"));
    }

    ScanError::Transport { pool, source: err }
}

/// Query a pool and decode its current reserves.
pub async fn fetch_reserves<S: ReserveSource>(source: &S, pool: Address) -> Result<PoolReserves> {
    let raw = source.call_get_reserves(pool).await?;

    decode_reserves(&raw).map_err(|e| match e {
        ScanError::Decode(msg) => ScanError::Decode(format!("pool {pool}: {msg}")),
        other => other,
    })
}
