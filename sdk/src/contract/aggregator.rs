use alloy::sol;
use alloy::sol_types::SolEvent;

sol! {
    #[sol(rpc)]
    #[derive(Debug, PartialEq)]
    contract BlsSignatureAggregator {
        // ========= Errors =========
        error InvalidAggregatedSignature();
        error PublicKeyNotRegistered(address account);
        error EmptyUserOps();

        // ========= Events =========
        event PublicKeyRegistered(address indexed account, bytes32 keyHash);

        // ========= Structs =========
        struct PackedUserOperation {
            address sender;
            uint256 nonce;
            bytes initCode;
            bytes callData;
            bytes32 accountGasLimits;
            uint256 preVerificationGas;
            bytes32 gasFees;
            bytes paymasterAndData;
            bytes signature;
        }

        struct G1Point {
            bytes32 x_a;
            bytes32 x_b;
            bytes32 y_a;
            bytes32 y_b;
        }

        struct G2Point {
            bytes32 x_c0_a;
            bytes32 x_c0_b;
            bytes32 x_c1_a;
            bytes32 x_c1_b;
            bytes32 y_c0_a;
            bytes32 y_c0_b;
            bytes32 y_c1_a;
            bytes32 y_c1_b;
        }

        // ========= Views =========
        /// Reverts unless `signature` is a valid aggregate over `ops`
        function validateSignatures(PackedUserOperation[] calldata ops, bytes calldata signature) external view;

        /// Per-op signature to include in a bundle validated by this aggregator
        function validateUserOpSignature(PackedUserOperation calldata userOp)
            external
            view
            returns (bytes memory sigForUserOp);

        function aggregateSignatures(PackedUserOperation[] calldata ops)
            external
            view
            returns (bytes memory aggregatedSignature);

        function getUserOpPublicKey(PackedUserOperation calldata userOp)
            external
            view
            returns (G2Point memory);

        // ========= Transactions =========
        function registerPublicKey(G2Point calldata pubkey) external;
        function addStake(address entryPoint, uint32 delay) external payable;
    }
}

pub fn aggregator_event_signatures() -> Vec<&'static str> {
    vec![BlsSignatureAggregator::PublicKeyRegistered::SIGNATURE]
}
