use alloy::primitives::{Address, B256, U256, aliases::U48};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    client::ClientCtx,
    contract::paymaster::GasPaymaster,
    error::{
        AddStakeError, EventQueryError, PaymasterDepositError, PaymasterQueryError, SetSignerError,
        UnlockStakeError, WatchError, WithdrawStakeError, WithdrawToError,
    },
    events::{PaymasterEvent, query_events},
};

#[derive(Clone)]
pub struct PaymasterClient {
    ctx: ClientCtx,
}

impl PaymasterClient {
    pub(super) fn new(ctx: ClientCtx) -> Self {
        Self { ctx }
    }

    pub async fn entry_point(&self) -> Result<Address, PaymasterQueryError> {
        let entry_point = self.ctx.paymaster_contract().entryPoint().call().await?;
        Ok(entry_point)
    }

    pub async fn verifying_signer(&self) -> Result<Address, PaymasterQueryError> {
        let signer = self
            .ctx
            .paymaster_contract()
            .verifyingSigner()
            .call()
            .await?;
        Ok(signer)
    }

    /// Paymaster's current deposit with the entry point.
    pub async fn get_deposit(&self) -> Result<U256, PaymasterQueryError> {
        let deposit = self.ctx.paymaster_contract().getDeposit().call().await?;
        Ok(deposit)
    }

    /// Hash the verifying signer signs over to sponsor `user_op` within the
    /// given validity window.
    pub async fn get_hash(
        &self,
        user_op: GasPaymaster::PackedUserOperation,
        valid_until: U48,
        valid_after: U48,
    ) -> Result<B256, PaymasterQueryError> {
        let hash = self
            .ctx
            .paymaster_contract()
            .getHash(user_op, valid_until, valid_after)
            .call()
            .await?;
        Ok(hash)
    }

    /// Simulates entry-point validation of `user_op` via `eth_call`, returning
    /// the paymaster context and packed validation data.
    pub async fn validate_paymaster_user_op(
        &self,
        user_op: GasPaymaster::PackedUserOperation,
        user_op_hash: B256,
        max_cost: U256,
    ) -> Result<GasPaymaster::validatePaymasterUserOpReturn, PaymasterQueryError> {
        let validation = self
            .ctx
            .paymaster_contract()
            .validatePaymasterUserOp(user_op, user_op_hash, max_cost)
            .call()
            .await?;
        Ok(validation)
    }

    pub async fn deposit(&self, amount: U256) -> Result<(), PaymasterDepositError> {
        let send_result = self
            .ctx
            .paymaster_contract()
            .deposit()
            .value(amount)
            .send()
            .await?;
        let _receipt = send_result
            .watch()
            .await
            .map_err(alloy::contract::Error::from)?;

        Ok(())
    }

    pub async fn withdraw_to(
        &self,
        recipient: Address,
        amount: U256,
    ) -> Result<(), WithdrawToError> {
        let send_result = self
            .ctx
            .paymaster_contract()
            .withdrawTo(recipient, amount)
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
        unstake_delay_sec: u32,
        amount: U256,
    ) -> Result<(), AddStakeError> {
        let send_result = self
            .ctx
            .paymaster_contract()
            .addStake(unstake_delay_sec)
            .value(amount)
            .send()
            .await?;
        let _receipt = send_result
            .watch()
            .await
            .map_err(alloy::contract::Error::from)?;

        Ok(())
    }

    pub async fn unlock_stake(&self) -> Result<(), UnlockStakeError> {
        let send_result = self.ctx.paymaster_contract().unlockStake().send().await?;
        let _receipt = send_result
            .watch()
            .await
            .map_err(alloy::contract::Error::from)?;

        Ok(())
    }

    pub async fn withdraw_stake(&self, recipient: Address) -> Result<(), WithdrawStakeError> {
        let send_result = self
            .ctx
            .paymaster_contract()
            .withdrawStake(recipient)
            .send()
            .await?;
        let _receipt = send_result
            .watch()
            .await
            .map_err(alloy::contract::Error::from)?;

        Ok(())
    }

    pub async fn set_verifying_signer(&self, new_signer: Address) -> Result<(), SetSignerError> {
        let send_result = self
            .ctx
            .paymaster_contract()
            .setVerifyingSigner(new_signer)
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
    ) -> Result<Vec<PaymasterEvent>, EventQueryError> {
        query_events(
            self.ctx.provider(),
            self.ctx.paymaster_address(),
            from_block,
            to_block,
        )
        .await
    }

    pub fn watch_events(
        &self,
        sink: mpsc::Sender<PaymasterEvent>,
    ) -> Result<JoinHandle<()>, WatchError> {
        Ok(self.ctx.watcher(self.ctx.paymaster_address())?.spawn(sink))
    }
}
