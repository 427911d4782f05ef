use alloy::contract as alloy_contract;
use alloy::primitives::Bytes;
use thiserror::Error;

use crate::contract::aggregator::BlsSignatureAggregator;
use crate::contract::escrow::PaymentEscrow;
use crate::contract::paymaster::GasPaymaster;
use crate::contract::token::SettlementToken;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid config value: {0}")]
    InvalidValue(String),
    #[error("missing config: {0}")]
    Missing(String),
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("client provider error: {0}")]
    Provider(String),
}

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("no websocket RPC endpoint configured")]
    MissingWsUrl,

    #[error("provider error: {0}")]
    Provider(String),
}

#[derive(Error, Debug)]
pub enum EventQueryError {
    #[error("failed to decode log: {0}")]
    Decode(#[from] alloy::sol_types::Error),

    #[error("provider/transport error: {0}")]
    Transport(String),
}

// ========= Token operations =========

#[derive(Debug, Error)]
pub enum TokenQueryError {
    #[error("unknown revert (selector {selector:#x})")]
    UnknownRevert { selector: u32, data: Vec<u8> },
    #[error("provider/transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("invalid params: {0}")]
    InvalidParams(String),
    #[error("insufficient balance")]
    InsufficientBalance,
    #[error("insufficient allowance")]
    InsufficientAllowance,

    #[error("unknown revert (selector {selector:#x})")]
    UnknownRevert { selector: u32, data: Vec<u8> },
    #[error("provider/transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum ApproveError {
    #[error("invalid params: {0}")]
    InvalidParams(String),

    #[error("unknown revert (selector {selector:#x})")]
    UnknownRevert { selector: u32, data: Vec<u8> },
    #[error("provider/transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum MintError {
    #[error("caller is not the minter")]
    NotMinter,

    #[error("unknown revert (selector {selector:#x})")]
    UnknownRevert { selector: u32, data: Vec<u8> },
    #[error("provider/transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum BurnError {
    #[error("insufficient balance")]
    InsufficientBalance,

    #[error("unknown revert (selector {selector:#x})")]
    UnknownRevert { selector: u32, data: Vec<u8> },
    #[error("provider/transport error: {0}")]
    Transport(String),
}

// ========= Paymaster operations =========

#[derive(Debug, Error)]
pub enum PaymasterQueryError {
    #[error("unknown revert (selector {selector:#x})")]
    UnknownRevert { selector: u32, data: Vec<u8> },
    #[error("provider/transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum PaymasterDepositError {
    #[error("invalid params: {0}")]
    InvalidParams(String),

    #[error("unknown revert (selector {selector:#x})")]
    UnknownRevert { selector: u32, data: Vec<u8> },
    #[error("provider/transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum WithdrawToError {
    #[error("invalid params: {0}")]
    InvalidParams(String),
    #[error("withdraw amount is zero")]
    WithdrawAmountZero,
    #[error("deposit too low")]
    DepositTooLow,

    #[error("unknown revert (selector {selector:#x})")]
    UnknownRevert { selector: u32, data: Vec<u8> },
    #[error("provider/transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum AddStakeError {
    #[error("invalid params: {0}")]
    InvalidParams(String),

    #[error("unknown revert (selector {selector:#x})")]
    UnknownRevert { selector: u32, data: Vec<u8> },
    #[error("provider/transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum UnlockStakeError {
    #[error("unknown revert (selector {selector:#x})")]
    UnknownRevert { selector: u32, data: Vec<u8> },
    #[error("provider/transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum WithdrawStakeError {
    #[error("stake still locked until {0}")]
    StakeStillLocked(u64),
    #[error("stake not unlocked")]
    StakeNotUnlocked,

    #[error("unknown revert (selector {selector:#x})")]
    UnknownRevert { selector: u32, data: Vec<u8> },
    #[error("provider/transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum SetSignerError {
    #[error("invalid params: {0}")]
    InvalidParams(String),

    #[error("unknown revert (selector {selector:#x})")]
    UnknownRevert { selector: u32, data: Vec<u8> },
    #[error("provider/transport error: {0}")]
    Transport(String),
}

// ========= Aggregator operations =========

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("empty user operation batch")]
    EmptyUserOps,
    #[error("no public key registered for account")]
    PublicKeyNotRegistered,

    #[error("unknown revert (selector {selector:#x})")]
    UnknownRevert { selector: u32, data: Vec<u8> },
    #[error("provider/transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum ValidateSignaturesError {
    #[error("invalid aggregated signature")]
    InvalidAggregatedSignature,
    #[error("empty user operation batch")]
    EmptyUserOps,

    #[error("unknown revert (selector {selector:#x})")]
    UnknownRevert { selector: u32, data: Vec<u8> },
    #[error("provider/transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum RegisterPublicKeyError {
    #[error("invalid params: {0}")]
    InvalidParams(String),

    #[error("unknown revert (selector {selector:#x})")]
    UnknownRevert { selector: u32, data: Vec<u8> },
    #[error("provider/transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum AggregatorAddStakeError {
    #[error("invalid params: {0}")]
    InvalidParams(String),

    #[error("unknown revert (selector {selector:#x})")]
    UnknownRevert { selector: u32, data: Vec<u8> },
    #[error("provider/transport error: {0}")]
    Transport(String),
}

// ========= Escrow operations =========

#[derive(Debug, Error)]
pub enum DepositError {
    #[error("invalid params: {0}")]
    InvalidParams(String),
    #[error("amount is zero")]
    AmountZero,
    #[error("transfer failed")]
    TransferFailed,

    #[error("unknown revert (selector {selector:#x})")]
    UnknownRevert { selector: u32, data: Vec<u8> },
    #[error("provider/transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum RequestWithdrawalError {
    #[error("invalid params: {0}")]
    InvalidParams(String),
    #[error("amount is zero")]
    AmountZero,
    #[error("insufficient available")]
    InsufficientAvailable,

    #[error("unknown revert (selector {selector:#x})")]
    UnknownRevert { selector: u32, data: Vec<u8> },
    #[error("provider/transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum CancelWithdrawalError {
    #[error("no withdrawal requested")]
    NoWithdrawalRequested,

    #[error("unknown revert (selector {selector:#x})")]
    UnknownRevert { selector: u32, data: Vec<u8> },
    #[error("provider/transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum FinalizeWithdrawalError {
    #[error("no withdrawal requested")]
    NoWithdrawalRequested,
    #[error("grace period not elapsed")]
    GracePeriodNotElapsed,
    #[error("transfer failed")]
    TransferFailed,

    #[error("unknown revert (selector {selector:#x})")]
    UnknownRevert { selector: u32, data: Vec<u8> },
    #[error("provider/transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum RedeemError {
    #[error("invalid params: {0}")]
    InvalidParams(String),
    #[error("intent not yet overdue")]
    IntentNotYetOverdue,
    #[error("intent expired")]
    IntentExpired,
    #[error("already redeemed")]
    AlreadyRedeemed,
    #[error("already paid")]
    AlreadyPaid,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("invalid payee")]
    InvalidPayee,
    #[error("amount is zero")]
    AmountZero,
    #[error("transfer failed")]
    TransferFailed,
    #[error("intent domain mismatch")]
    IntentDomainMismatch,
    #[error("unsupported intent version: {0}")]
    UnsupportedIntentVersion(u64),

    #[error("unknown revert (selector {selector:#x})")]
    UnknownRevert { selector: u32, data: Vec<u8> },
    #[error("provider/transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum RecordPaymentError {
    #[error("invalid params: {0}")]
    InvalidParams(String),
    #[error("amount is zero")]
    AmountZero,
    #[error("already paid")]
    AlreadyPaid,

    #[error("unknown revert (selector {selector:#x})")]
    UnknownRevert { selector: u32, data: Vec<u8> },
    #[error("provider/transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum GetAccountError {
    #[error("unknown revert (selector {selector:#x})")]
    UnknownRevert { selector: u32, data: Vec<u8> },
    #[error("provider/transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum RedemptionStatusError {
    #[error("unknown revert (selector {selector:#x})")]
    UnknownRevert { selector: u32, data: Vec<u8> },
    #[error("provider/transport error: {0}")]
    Transport(String),
}

// ========= Staking views =========

#[derive(Debug, Error)]
pub enum StakeQueryError {
    #[error("unknown revert (selector {selector:#x})")]
    UnknownRevert { selector: u32, data: Vec<u8> },
    #[error("provider/transport error: {0}")]
    Transport(String),
}

fn extract_selector_and_data(e: &alloy_contract::Error) -> Option<(u32, Vec<u8>)> {
    e.as_revert_data().map(|bytes: Bytes| {
        let data = bytes.to_vec();
        let selector = if data.len() >= 4 {
            u32::from_be_bytes([data[0], data[1], data[2], data[3]])
        } else {
            0
        };
        (selector, data)
    })
}

macro_rules! impl_from_contract_error {
    ($target:ty, $interface:ty, { $($contract_err:pat => $target_err:expr),* $(,)? }) => {
        impl From<alloy_contract::Error> for $target {
            fn from(e: alloy_contract::Error) -> Self {
                if let Some(decoded) = e.as_decoded_interface_error::<$interface>() {
                    return match decoded {
                        $(
                            $contract_err => $target_err,
                        )*
                        _ => match extract_selector_and_data(&e) {
                            Some((selector, data)) => Self::UnknownRevert { selector, data },
                            None => Self::Transport(e.to_string()),
                        },
                    };
                }

                match extract_selector_and_data(&e) {
                    Some((selector, data)) => Self::UnknownRevert { selector, data },
                    None => Self::Transport(e.to_string()),
                }
            }
        }
    };
    ($target:ty) => {
        impl From<alloy_contract::Error> for $target {
            fn from(e: alloy_contract::Error) -> Self {
                match extract_selector_and_data(&e) {
                    Some((selector, data)) => Self::UnknownRevert { selector, data },
                    None => Self::Transport(e.to_string()),
                }
            }
        }
    };
}

type TokenErrors = SettlementToken::SettlementTokenErrors;
type PaymasterErrors = GasPaymaster::GasPaymasterErrors;
type AggregatorErrors = BlsSignatureAggregator::BlsSignatureAggregatorErrors;
type EscrowErrors = PaymentEscrow::PaymentEscrowErrors;

impl_from_contract_error!(TransferError, TokenErrors, {
    TokenErrors::InsufficientBalance(_) => Self::InsufficientBalance,
    TokenErrors::InsufficientAllowance(_) => Self::InsufficientAllowance,
});

impl_from_contract_error!(MintError, TokenErrors, {
    TokenErrors::NotMinter(_) => Self::NotMinter,
});

impl_from_contract_error!(BurnError, TokenErrors, {
    TokenErrors::InsufficientBalance(_) => Self::InsufficientBalance,
});

impl_from_contract_error!(ApproveError);

impl_from_contract_error!(TokenQueryError);

impl_from_contract_error!(WithdrawToError, PaymasterErrors, {
    PaymasterErrors::WithdrawAmountZero(_) => Self::WithdrawAmountZero,
    PaymasterErrors::DepositTooLow(_) => Self::DepositTooLow,
});

impl_from_contract_error!(WithdrawStakeError, PaymasterErrors, {
    PaymasterErrors::StakeStillLocked(err) => Self::StakeStillLocked(err.withdrawTime.to()),
    PaymasterErrors::StakeNotUnlocked(_) => Self::StakeNotUnlocked,
});

impl_from_contract_error!(PaymasterQueryError);

impl_from_contract_error!(PaymasterDepositError);

impl_from_contract_error!(AddStakeError);

impl_from_contract_error!(UnlockStakeError);

impl_from_contract_error!(SetSignerError);

impl_from_contract_error!(AggregateError, AggregatorErrors, {
    AggregatorErrors::EmptyUserOps(_) => Self::EmptyUserOps,
    AggregatorErrors::PublicKeyNotRegistered(_) => Self::PublicKeyNotRegistered,
});

impl_from_contract_error!(ValidateSignaturesError, AggregatorErrors, {
    AggregatorErrors::InvalidAggregatedSignature(_) => Self::InvalidAggregatedSignature,
    AggregatorErrors::EmptyUserOps(_) => Self::EmptyUserOps,
});

impl_from_contract_error!(RegisterPublicKeyError);

impl_from_contract_error!(AggregatorAddStakeError);

impl_from_contract_error!(DepositError, EscrowErrors, {
    EscrowErrors::AmountZero(_) => Self::AmountZero,
    EscrowErrors::TransferFailed(_) => Self::TransferFailed,
});

impl_from_contract_error!(RequestWithdrawalError, EscrowErrors, {
    EscrowErrors::AmountZero(_) => Self::AmountZero,
    EscrowErrors::InsufficientAvailable(_) => Self::InsufficientAvailable,
});

impl_from_contract_error!(CancelWithdrawalError, EscrowErrors, {
    EscrowErrors::NoWithdrawalRequested(_) => Self::NoWithdrawalRequested,
});

impl_from_contract_error!(FinalizeWithdrawalError, EscrowErrors, {
    EscrowErrors::NoWithdrawalRequested(_) => Self::NoWithdrawalRequested,
    EscrowErrors::GracePeriodNotElapsed(_) => Self::GracePeriodNotElapsed,
    EscrowErrors::TransferFailed(_) => Self::TransferFailed,
});

impl_from_contract_error!(RedeemError, EscrowErrors, {
    EscrowErrors::IntentNotYetOverdue(_) => Self::IntentNotYetOverdue,
    EscrowErrors::IntentExpired(_) => Self::IntentExpired,
    EscrowErrors::AlreadyRedeemed(_) => Self::AlreadyRedeemed,
    EscrowErrors::AlreadyPaid(_) => Self::AlreadyPaid,
    EscrowErrors::InvalidSignature(_) => Self::InvalidSignature,
    EscrowErrors::InvalidPayee(_) => Self::InvalidPayee,
    EscrowErrors::AmountZero(_) => Self::AmountZero,
    EscrowErrors::TransferFailed(_) => Self::TransferFailed,
    EscrowErrors::InvalidIntentDomain(_) => Self::IntentDomainMismatch,
    EscrowErrors::UnsupportedIntentVersion(err) => Self::UnsupportedIntentVersion(err.version),
});

impl_from_contract_error!(RecordPaymentError, EscrowErrors, {
    EscrowErrors::AmountZero(_) => Self::AmountZero,
    EscrowErrors::AlreadyPaid(_) => Self::AlreadyPaid,
});

impl_from_contract_error!(GetAccountError);

impl_from_contract_error!(RedemptionStatusError);

impl_from_contract_error!(StakeQueryError);
