use alloy::primitives::{Address, Bytes, U256};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    client::ClientCtx,
    contract::aggregator::BlsSignatureAggregator::{G2Point, PackedUserOperation},
    error::{
        AggregateError, AggregatorAddStakeError, EventQueryError, RegisterPublicKeyError,
        ValidateSignaturesError, WatchError,
    },
    events::{AggregatorEvent, query_events},
};

#[derive(Clone)]
pub struct AggregatorClient {
    ctx: ClientCtx,
}

impl AggregatorClient {
    pub(super) fn new(ctx: ClientCtx) -> Self {
        Self { ctx }
    }

    /// Returns `Ok(())` when `signature` is a valid aggregate over `ops`;
    /// the contract reverts otherwise.
    pub async fn validate_signatures(
        &self,
        ops: Vec<PackedUserOperation>,
        signature: Bytes,
    ) -> Result<(), ValidateSignaturesError> {
        self.ctx
            .aggregator_contract()
            .validateSignatures(ops, signature)
            .call()
            .await?;
        Ok(())
    }

    /// Per-op signature to embed in a bundle validated by this aggregator.
    pub async fn validate_user_op_signature(
        &self,
        user_op: PackedUserOperation,
    ) -> Result<Bytes, ValidateSignaturesError> {
        let sig = self
            .ctx
            .aggregator_contract()
            .validateUserOpSignature(user_op)
            .call()
            .await?;
        Ok(sig)
    }

    pub async fn aggregate_signatures(
        &self,
        ops: Vec<PackedUserOperation>,
    ) -> Result<Bytes, AggregateError> {
        let aggregated = self
            .ctx
            .aggregator_contract()
            .aggregateSignatures(ops)
            .call()
            .await?;
        Ok(aggregated)
    }

    pub async fn get_user_op_public_key(
        &self,
        user_op: PackedUserOperation,
    ) -> Result<G2Point, AggregateError> {
        let pubkey = self
            .ctx
            .aggregator_contract()
            .getUserOpPublicKey(user_op)
            .call()
            .await?;
        Ok(pubkey)
    }

    pub async fn register_public_key(&self, pubkey: G2Point) -> Result<(), RegisterPublicKeyError> {
        let send_result = self
            .ctx
            .aggregator_contract()
            .registerPublicKey(pubkey)
            .send()
            .await?;
        let _receipt = send_result
            .watch()
            .await
            .map_err(alloy::contract::Error::from)?;

        Ok(())
    }

    pub async fn add_stake(
        &self,
        entry_point: Address,
        delay_sec: u32,
        amount: U256,
    ) -> Result<(), AggregatorAddStakeError> {
        let send_result = self
            .ctx
            .aggregator_contract()
            .addStake(entry_point, delay_sec)
            .value(amount)
            .send()
            .await?;
        let _receipt = send_result
            .watch()
            .await
            .map_err(alloy::contract::Error::from)?;

        Ok(())
    }

    pub async fn query_events(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<AggregatorEvent>, EventQueryError> {
        query_events(
            self.ctx.provider(),
            self.ctx.aggregator_address(),
            from_block,
            to_block,
        )
        .await
    }

    pub fn watch_events(
        &self,
        sink: mpsc::Sender<AggregatorEvent>,
    ) -> Result<JoinHandle<()>, WatchError> {
        Ok(self.ctx.watcher(self.ctx.aggregator_address())?.spawn(sink))
    }
}
