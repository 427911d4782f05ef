use alloy::sol;
use alloy::sol_types::SolEvent;

sol! {
    #[sol(rpc)]
    #[derive(Debug, PartialEq)]
    contract GasPaymaster {
        // ========= Errors =========
        error SenderNotEntryPoint(address sender);
        error InvalidPaymasterSignature();
        error DepositTooLow(uint256 needed, uint256 available);
        error StakeStillLocked(uint256 withdrawTime);
        error StakeNotUnlocked();
        error WithdrawAmountZero();

        // ========= Events =========
        event Deposited(address indexed account, uint256 totalDeposit);
        event Withdrawn(address indexed account, address recipient, uint256 amount);
        event StakeLocked(address indexed account, uint256 totalStaked, uint256 unstakeDelaySec);
        event StakeUnlocked(address indexed account, uint256 withdrawTime);
        event StakeWithdrawn(address indexed account, address recipient, uint256 amount);
        event VerifyingSignerChanged(address indexed oldSigner, address indexed newSigner);

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

        // ========= Constructor =========
        /// @param entryPoint_ Address of the entry point this paymaster serves
        /// @param verifyingSigner_ Key authorized to sponsor user operations
        constructor(address entryPoint_, address verifyingSigner_);

        // ========= Views =========
        function entryPoint() external view returns (address);
        function verifyingSigner() external view returns (address);
        function getDeposit() external view returns (uint256);

        /// Hash the paymaster signs over to sponsor a user operation
        function getHash(
            PackedUserOperation calldata userOp,
            uint48 validUntil,
            uint48 validAfter
        ) external view returns (bytes32);

        function validatePaymasterUserOp(
            PackedUserOperation calldata userOp,
            bytes32 userOpHash,
            uint256 maxCost
        ) external returns (bytes memory context, uint256 validationData);

        // ========= Transactions =========
        function deposit() external payable;
        function withdrawTo(address recipient, uint256 amount) external;
        function addStake(uint32 unstakeDelaySec) external payable;
        function unlockStake() external;
        function withdrawStake(address recipient) external;
        function setVerifyingSigner(address newSigner) external;
    }
}

pub fn paymaster_event_signatures() -> Vec<&'static str> {
    vec![
        GasPaymaster::Deposited::SIGNATURE,
        GasPaymaster::Withdrawn::SIGNATURE,
        GasPaymaster::StakeLocked::SIGNATURE,
        GasPaymaster::StakeUnlocked::SIGNATURE,
        GasPaymaster::StakeWithdrawn::SIGNATURE,
        GasPaymaster::VerifyingSignerChanged::SIGNATURE,
    ]
}
