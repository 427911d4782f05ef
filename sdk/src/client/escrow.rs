use alloy::{
    primitives::{Address, B256, Bytes, U256},
    rpc::types::TransactionReceipt,
};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    client::{
        ClientCtx,
        model::{EscrowAccount, RedemptionStatus},
    },
    contract::escrow::PaymentEscrow::G2Point,
    error::{
        CancelWithdrawalError, DepositError, EventQueryError, FinalizeWithdrawalError,
        GetAccountError, RecordPaymentError, RedeemError, RedemptionStatusError,
        RequestWithdrawalError, WatchError,
    },
    events::{EscrowEvent, query_events},
};

#[derive(Clone)]
pub struct EscrowClient {
    ctx: ClientCtx,
}

impl EscrowClient {
    pub(super) fn new(ctx: ClientCtx) -> Self {
        Self { ctx }
    }

    pub async fn deposit(&self, amount: U256) -> Result<(), DepositError> {
        let send_result = self
            .ctx
            .escrow_contract()
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

    pub async fn deposit_token(&self, asset: Address, amount: U256) -> Result<(), DepositError> {
        let send_result = self
            .ctx
            .escrow_contract()
            .depositToken(asset, amount)
            .send()
            .await?;
        let _receipt = send_result
            .watch()
            .await
            .map_err(alloy::contract::Error::from)?;

        Ok(())
    }

    pub async fn request_withdrawal(&self, amount: U256) -> Result<(), RequestWithdrawalError> {
        let send_result = self
            .ctx
            .escrow_contract()
            .requestWithdrawal(amount)
            .send()
            .await?;
        let _receipt = send_result
            .watch()
            .await
            .map_err(alloy::contract::Error::from)?;

        Ok(())
    }

    pub async fn cancel_withdrawal(&self) -> Result<(), CancelWithdrawalError> {
        let send_result = self.ctx.escrow_contract().cancelWithdrawal().send().await?;
        let _receipt = send_result
            .watch()
            .await
            .map_err(alloy::contract::Error::from)?;

        Ok(())
    }

    pub async fn finalize_withdrawal(&self) -> Result<(), FinalizeWithdrawalError> {
        let send_result = self
            .ctx
            .escrow_contract()
            .finalizeWithdrawal()
            .send()
            .await?;
        let _receipt = send_result
            .watch()
            .await
            .map_err(alloy::contract::Error::from)?;

        Ok(())
    }

    /// Pays out an escrow to the payee named by a signed payment intent.
    pub async fn redeem(
        &self,
        intent_data: Bytes,
        signature: G2Point,
    ) -> Result<TransactionReceipt, RedeemError> {
        let send_result = self
            .ctx
            .escrow_contract()
            .redeem(intent_data, signature)
            .send()
            .await
            .map_err(RedeemError::from)?;

        let receipt = send_result
            .get_receipt()
            .await
            .map_err(alloy::contract::Error::from)
            .map_err(RedeemError::from)?;

        Ok(receipt)
    }

    pub async fn record_payment(
        &self,
        escrow_id: U256,
        amount: U256,
    ) -> Result<(), RecordPaymentError> {
        let send_result = self
            .ctx
            .escrow_contract()
            .recordPayment(escrow_id, amount)
            .send()
            .await?;
        let _receipt = send_result
            .watch()
            .await
            .map_err(alloy::contract::Error::from)?;

        Ok(())
    }

    pub async fn get_account(&self, account: Address) -> Result<EscrowAccount, GetAccountError> {
        let info = self
            .ctx
            .escrow_contract()
            .getAccount(account)
            .call()
            .await?;
        Ok(info.into())
    }

    pub async fn get_redemption_status(
        &self,
        escrow_id: U256,
    ) -> Result<RedemptionStatus, RedemptionStatusError> {
        let status = self
            .ctx
            .escrow_contract()
            .getRedemptionStatus(escrow_id)
            .call()
            .await?;
        Ok(status.into())
    }

    pub async fn collateral(&self, account: Address) -> Result<U256, GetAccountError> {
        let collateral = self
            .ctx
            .escrow_contract()
            .collateral(account)
            .call()
            .await?;
        Ok(collateral)
    }

    pub async fn intent_domain_separator(&self) -> Result<B256, GetAccountError> {
        let domain = self
            .ctx
            .escrow_contract()
            .intentDomainSeparator()
            .call()
            .await?;
        Ok(domain)
    }

    pub async fn withdrawal_grace_period(&self) -> Result<U256, GetAccountError> {
        let period = self
            .ctx
            .escrow_contract()
            .withdrawalGracePeriod()
            .call()
            .await?;
        Ok(period)
    }

    pub async fn redemption_grace_period(&self) -> Result<U256, GetAccountError> {
        let period = self
            .ctx
            .escrow_contract()
            .redemptionGracePeriod()
            .call()
            .await?;
        Ok(period)
    }

    pub async fn intent_expiration_time(&self) -> Result<U256, GetAccountError> {
        let expiration = self
            .ctx
            .escrow_contract()
            .intentExpirationTime()
            .call()
            .await?;
        Ok(expiration)
    }

    pub async fn query_events(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<EscrowEvent>, EventQueryError> {
        query_events(
            self.ctx.provider(),
            self.ctx.escrow_address(),
            from_block,
            to_block,
        )
        .await
    }

    pub fn watch_events(
        &self,
        sink: mpsc::Sender<EscrowEvent>,
    ) -> Result<JoinHandle<()>, WatchError> {
        Ok(self.ctx.watcher(self.ctx.escrow_address())?.spawn(sink))
    }
}
