use alloy::primitives::{Address, U256};

use crate::{
    client::{
        ClientCtx,
        model::{DepositSnapshot, StakeSnapshot},
    },
    error::StakeQueryError,
};

/// Read-only view over the staking aggregator. All methods are `eth_call`s,
/// so no wallet interaction ever happens here.
#[derive(Clone)]
pub struct StakingClient {
    ctx: ClientCtx,
}

impl StakingClient {
    pub(super) fn new(ctx: ClientCtx) -> Self {
        Self { ctx }
    }

    pub async fn get_stake_info(&self, account: Address) -> Result<StakeSnapshot, StakeQueryError> {
        let info = self
            .ctx
            .stake_viewer_contract()
            .getStakeInfo(account)
            .call()
            .await?;
        Ok(info.into())
    }

    pub async fn batch_stake_info(
        &self,
        accounts: Vec<Address>,
    ) -> Result<Vec<StakeSnapshot>, StakeQueryError> {
        let infos = self
            .ctx
            .stake_viewer_contract()
            .batchStakeInfo(accounts)
            .call()
            .await?;
        Ok(infos.into_iter().map(Into::into).collect())
    }

    pub async fn get_deposit_info(
        &self,
        account: Address,
    ) -> Result<DepositSnapshot, StakeQueryError> {
        let info = self
            .ctx
            .stake_viewer_contract()
            .getDepositInfo(account)
            .call()
            .await?;
        Ok(info.into())
    }

    pub async fn total_staked(&self, accounts: Vec<Address>) -> Result<U256, StakeQueryError> {
        let total = self
            .ctx
            .stake_viewer_contract()
            .totalStaked(accounts)
            .call()
            .await?;
        Ok(total)
    }
}
