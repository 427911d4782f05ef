use alloy::primitives::{B256, FixedBytes};

use crate::contract::aggregator::BlsSignatureAggregator;
use crate::contract::escrow::PaymentEscrow;
use crate::contract::paymaster::GasPaymaster;

impl From<[[u8; 32]; 8]> for PaymentEscrow::G2Point {
    fn from(value: [[u8; 32]; 8]) -> Self {
        let [x0_hi, x0_lo, x1_hi, x1_lo, y0_hi, y0_lo, y1_hi, y1_lo] = value;
        PaymentEscrow::G2Point {
            x_c0_a: FixedBytes::from(x0_hi),
            x_c0_b: FixedBytes::from(x0_lo),
            x_c1_a: FixedBytes::from(x1_hi),
            x_c1_b: FixedBytes::from(x1_lo),
            y_c0_a: FixedBytes::from(y0_hi),
            y_c0_b: FixedBytes::from(y0_lo),
            y_c1_a: FixedBytes::from(y1_hi),
            y_c1_b: FixedBytes::from(y1_lo),
        }
    }
}

impl From<[[u8; 32]; 8]> for BlsSignatureAggregator::G2Point {
    fn from(value: [[u8; 32]; 8]) -> Self {
        let [x0_hi, x0_lo, x1_hi, x1_lo, y0_hi, y0_lo, y1_hi, y1_lo] = value;
        BlsSignatureAggregator::G2Point {
            x_c0_a: FixedBytes::from(x0_hi),
            x_c0_b: FixedBytes::from(x0_lo),
            x_c1_a: FixedBytes::from(x1_hi),
            x_c1_b: FixedBytes::from(x1_lo),
            y_c0_a: FixedBytes::from(y0_hi),
            y_c0_b: FixedBytes::from(y0_lo),
            y_c1_a: FixedBytes::from(y1_hi),
            y_c1_b: FixedBytes::from(y1_lo),
        }
    }
}

// The paymaster and aggregator interfaces each declare the packed user
// operation struct; the encodings are identical.
impl From<GasPaymaster::PackedUserOperation> for BlsSignatureAggregator::PackedUserOperation {
    fn from(op: GasPaymaster::PackedUserOperation) -> Self {
        BlsSignatureAggregator::PackedUserOperation {
            sender: op.sender,
            nonce: op.nonce,
            initCode: op.initCode,
            callData: op.callData,
            accountGasLimits: op.accountGasLimits,
            preVerificationGas: op.preVerificationGas,
            gasFees: op.gasFees,
            paymasterAndData: op.paymasterAndData,
            signature: op.signature,
        }
    }
}

impl From<BlsSignatureAggregator::PackedUserOperation> for GasPaymaster::PackedUserOperation {
    fn from(op: BlsSignatureAggregator::PackedUserOperation) -> Self {
        GasPaymaster::PackedUserOperation {
            sender: op.sender,
            nonce: op.nonce,
            initCode: op.initCode,
            callData: op.callData,
            accountGasLimits: op.accountGasLimits,
            preVerificationGas: op.preVerificationGas,
            gasFees: op.gasFees,
            paymasterAndData: op.paymasterAndData,
            signature: op.signature,
        }
    }
}

/// Packs `verificationGasLimit` (high 16 bytes) and `callGasLimit`
/// (low 16 bytes) into the `accountGasLimits` word.
pub fn pack_account_gas_limits(verification_gas_limit: u128, call_gas_limit: u128) -> B256 {
    pack_words(verification_gas_limit, call_gas_limit)
}

pub fn unpack_account_gas_limits(word: B256) -> (u128, u128) {
    unpack_words(word)
}

/// Packs `maxPriorityFeePerGas` (high 16 bytes) and `maxFeePerGas`
/// (low 16 bytes) into the `gasFees` word.
pub fn pack_gas_fees(max_priority_fee_per_gas: u128, max_fee_per_gas: u128) -> B256 {
    pack_words(max_priority_fee_per_gas, max_fee_per_gas)
}

pub fn unpack_gas_fees(word: B256) -> (u128, u128) {
    unpack_words(word)
}

fn pack_words(high: u128, low: u128) -> B256 {
    let mut word = [0u8; 32];
    word[..16].copy_from_slice(&high.to_be_bytes());
    word[16..].copy_from_slice(&low.to_be_bytes());
    B256::from(word)
}

fn unpack_words(word: B256) -> (u128, u128) {
    let mut high = [0u8; 16];
    let mut low = [0u8; 16];
    high.copy_from_slice(&word[..16]);
    low.copy_from_slice(&word[16..]);
    (u128::from_be_bytes(high), u128::from_be_bytes(low))
}
