use std::sync::Arc;

use crate::{
    config::Config,
    contract::{
        aggregator::BlsSignatureAggregator::{self, BlsSignatureAggregatorInstance},
        escrow::PaymentEscrow::{self, PaymentEscrowInstance},
        paymaster::GasPaymaster::{self, GasPaymasterInstance},
        stake_viewer::StakeViewer::{self, StakeViewerInstance},
        token::SettlementToken::{self, SettlementTokenInstance},
    },
    error::{ClientError, WatchError},
    events::EventWatcher,
};
use alloy::{
    primitives::Address,
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
};

use self::{
    aggregator::AggregatorClient, escrow::EscrowClient, paymaster::PaymasterClient,
    staking::StakingClient, token::TokenClient,
};

pub mod aggregator;
pub mod escrow;
pub mod model;
pub mod paymaster;
pub mod staking;
pub mod token;

struct Inner {
    cfg: Config,
    provider: DynProvider,
}

/// Session composite: one provider and signer shared by every per-contract
/// wrapper, with the bound addresses taken from the config.
#[derive(Clone)]
struct ClientCtx(Arc<Inner>);

impl ClientCtx {
    async fn new(cfg: Config) -> Result<Self, ClientError> {
        let provider = ProviderBuilder::new()
            .wallet(cfg.wallet_private_key.clone())
            .connect(cfg.ethereum_http_rpc_url.as_str())
            .await
            .map_err(|e| ClientError::Provider(e.to_string()))?
            .erased();

        Ok(Self(Arc::new(Inner { cfg, provider })))
    }

    fn token_contract(&self) -> SettlementTokenInstance<DynProvider> {
        SettlementToken::new(self.0.cfg.token_address, self.0.provider.clone())
    }

    fn paymaster_contract(&self) -> GasPaymasterInstance<DynProvider> {
        GasPaymaster::new(self.0.cfg.paymaster_address, self.0.provider.clone())
    }

    fn aggregator_contract(&self) -> BlsSignatureAggregatorInstance<DynProvider> {
        BlsSignatureAggregator::new(self.0.cfg.aggregator_address, self.0.provider.clone())
    }

    fn escrow_contract(&self) -> PaymentEscrowInstance<DynProvider> {
        PaymentEscrow::new(self.0.cfg.escrow_address, self.0.provider.clone())
    }

    fn stake_viewer_contract(&self) -> StakeViewerInstance<DynProvider> {
        StakeViewer::new(self.0.cfg.stake_viewer_address, self.0.provider.clone())
    }

    fn provider(&self) -> &DynProvider {
        &self.0.provider
    }

    fn token_address(&self) -> Address {
        self.0.cfg.token_address
    }

    fn paymaster_address(&self) -> Address {
        self.0.cfg.paymaster_address
    }

    fn aggregator_address(&self) -> Address {
        self.0.cfg.aggregator_address
    }

    fn escrow_address(&self) -> Address {
        self.0.cfg.escrow_address
    }

    fn signer(&self) -> &PrivateKeySigner {
        &self.0.cfg.wallet_private_key
    }

    fn watcher(&self, address: Address) -> Result<EventWatcher, WatchError> {
        let ws_url = self
            .0
            .cfg
            .ethereum_ws_rpc_url
            .clone()
            .ok_or(WatchError::MissingWsUrl)?;
        Ok(EventWatcher::new(ws_url, address))
    }
}

#[derive(Clone)]
pub struct Client {
    pub token: TokenClient,
    pub paymaster: PaymasterClient,
    pub aggregator: AggregatorClient,
    pub escrow: EscrowClient,
    pub staking: StakingClient,
}

impl Client {
    pub async fn new(cfg: Config) -> Result<Self, ClientError> {
        let ctx = ClientCtx::new(cfg).await?;

        Ok(Self {
            token: TokenClient::new(ctx.clone()),
            paymaster: PaymasterClient::new(ctx.clone()),
            aggregator: AggregatorClient::new(ctx.clone()),
            escrow: EscrowClient::new(ctx.clone()),
            staking: StakingClient::new(ctx.clone()),
        })
    }

    /// Address of the wallet every transaction is signed with.
    pub fn signer_address(&self) -> Address {
        self.token.signer_address()
    }
}
