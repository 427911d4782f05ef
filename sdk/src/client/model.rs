use alloy::primitives::{Address, U256};

use crate::contract::escrow::PaymentEscrow;
use crate::contract::stake_viewer::StakeViewer;

#[derive(Debug, Clone)]
pub struct EscrowAccount {
    pub collateral: U256,
    pub withdrawal_request_amount: U256,
    pub withdrawal_request_timestamp: u64,
}

impl From<PaymentEscrow::getAccountReturn> for EscrowAccount {
    fn from(value: PaymentEscrow::getAccountReturn) -> Self {
        Self {
            collateral: value._collateral,
            withdrawal_request_amount: value.withdrawal_request_amount,
            withdrawal_request_timestamp: value.withdrawal_request_timestamp.to(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RedemptionStatus {
    pub paid: U256,
    pub redeemed: bool,
}

impl From<PaymentEscrow::getRedemptionStatusReturn> for RedemptionStatus {
    fn from(value: PaymentEscrow::getRedemptionStatusReturn) -> Self {
        Self {
            paid: value.paid,
            redeemed: value.redeemed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StakeSnapshot {
    pub account: Address,
    pub stake: U256,
    pub unstake_delay_sec: u64,
    pub withdraw_time: u64,
    pub staked: bool,
}

impl From<StakeViewer::StakeInfo> for StakeSnapshot {
    fn from(value: StakeViewer::StakeInfo) -> Self {
        Self {
            account: value.account,
            stake: value.stake,
            unstake_delay_sec: value.unstakeDelaySec.to(),
            withdraw_time: value.withdrawTime.to(),
            staked: value.staked,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DepositSnapshot {
    pub deposit: U256,
    pub staked: bool,
    pub stake: U256,
    pub unstake_delay_sec: u32,
    pub withdraw_time: u64,
}

impl From<StakeViewer::DepositInfo> for DepositSnapshot {
    fn from(value: StakeViewer::DepositInfo) -> Self {
        Self {
            deposit: value.deposit,
            staked: value.staked,
            stake: value.stake.to(),
            unstake_delay_sec: value.unstakeDelaySec,
            withdraw_time: value.withdrawTime.to(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redemption_status_from_return() {
        let status: RedemptionStatus = PaymentEscrow::getRedemptionStatusReturn {
            paid: U256::from(5u64),
            redeemed: true,
        }
        .into();

        assert_eq!(status.paid, U256::from(5u64));
        assert!(status.redeemed);
    }

    #[test]
    fn test_escrow_account_from_return() {
        let account: EscrowAccount = PaymentEscrow::getAccountReturn {
            _collateral: U256::from(1_000u64),
            withdrawal_request_timestamp: U256::from(1_700_000_000u64),
            withdrawal_request_amount: U256::from(250u64),
        }
        .into();

        assert_eq!(account.collateral, U256::from(1_000u64));
        assert_eq!(account.withdrawal_request_amount, U256::from(250u64));
        assert_eq!(account.withdrawal_request_timestamp, 1_700_000_000);
    }
}
