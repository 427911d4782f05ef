use alloy::sol;
use alloy::sol_types::SolEvent;

sol! {
    #[sol(rpc)]
    #[derive(Debug, PartialEq)]
    contract PaymentEscrow {
        // ========= Errors =========
        error AmountZero();
        error InsufficientAvailable();
        error TransferFailed();
        error GracePeriodNotElapsed();
        error NoWithdrawalRequested();
        error IntentNotYetOverdue();
        error IntentExpired();
        error AlreadyRedeemed();
        error AlreadyPaid();
        error InvalidSignature();
        error InvalidPayee();
        error InvalidIntentDomain();
        error UnsupportedIntentVersion(uint64 version);

        // ========= Storage =========
        function withdrawalGracePeriod() external view returns (uint256);
        function redemptionGracePeriod() external view returns (uint256);
        function intentExpirationTime() external view returns (uint256);

        // ========= Events =========
        event CollateralDeposited(address indexed account, uint256 amount);
        event CollateralWithdrawn(address indexed account, uint256 amount);
        event WithdrawalRequested(address indexed account, uint256 when, uint256 amount);
        event WithdrawalCanceled(address indexed account);
        event PayeeRedeemed(uint256 indexed escrow_id, uint256 amount);
        event PaymentRecorded(uint256 indexed escrow_id, uint256 amount);

        // ========= Structs =========
        struct PaymentIntent {
            bytes32 domain;
            uint256 escrow_id;
            uint256 req_id;
            address payer;
            address payee;
            uint256 amount;
            address asset;
            uint64 timestamp;
            uint64 version;
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

        // ========= Constructor =========
        /// @param manager Address of the access manager
        /// @param verificationKey Initial aggregate verification key
        constructor(address manager, (bytes32,bytes32,bytes32,bytes32) verificationKey);

        // ========= Payer flows =========
        function deposit() external payable;
        function depositToken(address asset, uint256 amount) external;
        function requestWithdrawal(uint256 amount) external;
        function cancelWithdrawal() external;
        function finalizeWithdrawal() external;

        /// Pay out an escrow to the payee named by a signed payment intent
        function redeem(
            bytes calldata intentData,
            G2Point calldata signature
        ) external;

        // ========= Manager =========
        function recordPayment(uint256 escrow_id, uint256 amount) external;

        // ========= Views =========
        function getAccount(address account)
            external
            view
            returns (
                uint256 _collateral,
                uint256 withdrawal_request_timestamp,
                uint256 withdrawal_request_amount
            );

        function getRedemptionStatus(uint256 escrow_id)
            external
            view
            returns (uint256 paid, bool redeemed);

        function intentDomainSeparator() external view returns (bytes32);

        function collateral(address account) external view returns (uint256);
    }
}

pub fn escrow_event_signatures() -> Vec<&'static str> {
    vec![
        PaymentEscrow::CollateralDeposited::SIGNATURE,
        PaymentEscrow::CollateralWithdrawn::SIGNATURE,
        PaymentEscrow::WithdrawalRequested::SIGNATURE,
        PaymentEscrow::WithdrawalCanceled::SIGNATURE,
        PaymentEscrow::PayeeRedeemed::SIGNATURE,
        PaymentEscrow::PaymentRecorded::SIGNATURE,
    ]
}
