use alloy::primitives::{Address, U256};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    client::ClientCtx,
    error::{
        ApproveError, BurnError, EventQueryError, MintError, TokenQueryError, TransferError,
        WatchError,
    },
    events::{TokenEvent, query_events},
};

#[derive(Clone)]
pub struct TokenClient {
    ctx: ClientCtx,
}

impl TokenClient {
    pub(super) fn new(ctx: ClientCtx) -> Self {
        Self { ctx }
    }

    pub fn signer_address(&self) -> Address {
        self.ctx.signer().address()
    }

    pub async fn name(&self) -> Result<String, TokenQueryError> {
        let name = self.ctx.token_contract().name().call().await?;
        Ok(name)
    }

    pub async fn symbol(&self) -> Result<String, TokenQueryError> {
        let symbol = self.ctx.token_contract().symbol().call().await?;
        Ok(symbol)
    }

    pub async fn decimals(&self) -> Result<u8, TokenQueryError> {
        let decimals = self.ctx.token_contract().decimals().call().await?;
        Ok(decimals)
    }

    pub async fn total_supply(&self) -> Result<U256, TokenQueryError> {
        let supply = self.ctx.token_contract().totalSupply().call().await?;
        Ok(supply)
    }

    pub async fn balance_of(&self, account: Address) -> Result<U256, TokenQueryError> {
        let balance = self.ctx.token_contract().balanceOf(account).call().await?;
        Ok(balance)
    }

    pub async fn allowance(
        &self,
        owner: Address,
        spender: Address,
    ) -> Result<U256, TokenQueryError> {
        let allowance = self
            .ctx
            .token_contract()
            .allowance(owner, spender)
            .call()
            .await?;
        Ok(allowance)
    }

    pub async fn approve(&self, spender: Address, value: U256) -> Result<(), ApproveError> {
        let send_result = self
            .ctx
            .token_contract()
            .approve(spender, value)
            .send()
            .await?;
        let _receipt = send_result
            .watch()
            .await
            .map_err(alloy::contract::Error::from)?;

        Ok(())
    }

    pub async fn transfer(&self, to: Address, value: U256) -> Result<(), TransferError> {
        let send_result = self.ctx.token_contract().transfer(to, value).send().await?;
        let _receipt = send_result
            .watch()
            .await
            .map_err(alloy::contract::Error::from)?;

        Ok(())
    }

    pub async fn transfer_from(
        &self,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<(), TransferError> {
        let send_result = self
            .ctx
            .token_contract()
            .transferFrom(from, to, value)
            .send()
            .await?;
        let _receipt = send_result
            .watch()
            .await
            .map_err(alloy::contract::Error::from)?;

        Ok(())
    }

    pub async fn mint(&self, to: Address, value: U256) -> Result<(), MintError> {
        let send_result = self.ctx.token_contract().mint(to, value).send().await?;
        let _receipt = send_result
            .watch()
            .await
            .map_err(alloy::contract::Error::from)?;

        Ok(())
    }

    pub async fn burn(&self, value: U256) -> Result<(), BurnError> {
        let send_result = self.ctx.token_contract().burn(value).send().await?;
        let _receipt = send_result
            .watch()
            .await
            .map_err(alloy::contract::Error::from)?;

        Ok(())
    }

    /// Decoded token events over an inclusive block range.
    pub async fn query_events(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<TokenEvent>, EventQueryError> {
        query_events(
            self.ctx.provider(),
            self.ctx.token_address(),
            from_block,
            to_block,
        )
        .await
    }

    /// Forwards live token events to `sink` until the receiver is dropped.
    pub fn watch_events(&self, sink: mpsc::Sender<TokenEvent>) -> Result<JoinHandle<()>, WatchError> {
        Ok(self.ctx.watcher(self.ctx.token_address())?.spawn(sink))
    }
}
