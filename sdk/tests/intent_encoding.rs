use alloy::{
    primitives::{Address, B256, U256},
    sol_types::SolValue,
};
use paygate_sdk::contract::{
    BlsSignatureAggregator, GasPaymaster, PaymentEscrow,
    utils::{pack_account_gas_limits, pack_gas_fees, unpack_account_gas_limits, unpack_gas_fees},
};

fn sample_intent() -> PaymentEscrow::PaymentIntent {
    PaymentEscrow::PaymentIntent {
        domain: B256::repeat_byte(0x11),
        escrow_id: U256::from(9u64),
        req_id: U256::from(1u64),
        payer: Address::repeat_byte(0xaa),
        payee: Address::repeat_byte(0xbb),
        amount: U256::from(1_000_000u64),
        asset: Address::ZERO,
        timestamp: 1_700_000_000,
        version: 1,
    }
}

#[test]
fn test_payment_intent_abi_roundtrip() {
    let intent = sample_intent();
    let encoded = intent.abi_encode();

    // Nine static fields, one word each
    assert_eq!(encoded.len(), 9 * 32);

    let decoded = PaymentEscrow::PaymentIntent::abi_decode(&encoded).expect("valid encoding");
    assert_eq!(decoded, intent);
}

#[test]
fn test_g2_point_from_raw_words() {
    let mut words = [[0u8; 32]; 8];
    for (i, word) in words.iter_mut().enumerate() {
        word[0] = 0x80 + i as u8;
    }

    let escrow_point = PaymentEscrow::G2Point::from(words);
    let aggregator_point = BlsSignatureAggregator::G2Point::from(words);

    assert_eq!(escrow_point.x_c0_a[0], 0x80);
    assert_eq!(escrow_point.y_c1_b[0], 0x87);
    // Both interfaces must see byte-identical encodings of the same key
    assert_eq!(escrow_point.abi_encode(), aggregator_point.abi_encode());
}

#[test]
fn test_user_op_gas_words_roundtrip() {
    let op = GasPaymaster::PackedUserOperation {
        sender: Address::repeat_byte(0x22),
        nonce: U256::from(3u64),
        initCode: vec![].into(),
        callData: vec![0xab, 0xcd].into(),
        accountGasLimits: pack_account_gas_limits(400_000, 120_000),
        preVerificationGas: U256::from(50_000u64),
        gasFees: pack_gas_fees(1_500_000_000, 40_000_000_000),
        paymasterAndData: vec![0x01; 52].into(),
        signature: vec![0xff; 65].into(),
    };

    let (verification, call) = unpack_account_gas_limits(op.accountGasLimits);
    assert_eq!(verification, 400_000);
    assert_eq!(call, 120_000);

    let (priority, max) = unpack_gas_fees(op.gasFees);
    assert_eq!(priority, 1_500_000_000);
    assert_eq!(max, 40_000_000_000);

    // The aggregator-side struct encodes identically
    let converted: BlsSignatureAggregator::PackedUserOperation = op.clone().into();
    assert_eq!(converted.abi_encode(), op.abi_encode());
}
