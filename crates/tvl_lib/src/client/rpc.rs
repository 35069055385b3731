use solana_client::nonblocking::rpc_client::RpcClient;
use solana_commitment_config::{CommitmentConfig, CommitmentLevel};
use std::time::Duration;

pub struct Rpc {
    inner: RpcClient,
    commitment_cfg: CommitmentConfig,
}

impl Rpc {
    pub fn new(rpc_url: &str, timeout_ms: u64, commitment: CommitmentLevel) -> Self {
        let commitment_cfg = CommitmentConfig { commitment };
        let inner = RpcClient::new_with_timeout_and_commitment(
            rpc_url.to_string(),
            Duration::from_millis(timeout_ms),
            commitment_cfg,
        );

        Self {
            inner,
            commitment_cfg,
        }
    }

    /// Wrap an already built client, e.g. one backed by a mock sender.
    pub fn from_client(inner: RpcClient, commitment: CommitmentLevel) -> Self {
        Self {
            inner,
            commitment_cfg: CommitmentConfig { commitment },
        }
    }

    pub fn client(&self) -> &RpcClient {
        &self.inner
    }

    pub fn commitment_cfg(&self) -> &CommitmentConfig {
        &self.commitment_cfg
    }
}
