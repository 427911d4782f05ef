use alloy::sol;

sol! {
    #[sol(rpc)]
    #[derive(Debug, PartialEq)]
    contract StakeViewer {
        // ========= Structs =========
        struct StakeInfo {
            address account;
            uint256 stake;
            uint256 unstakeDelaySec;
            uint256 withdrawTime;
            bool staked;
        }

        struct DepositInfo {
            uint256 deposit;
            bool staked;
            uint112 stake;
            uint32 unstakeDelaySec;
            uint48 withdrawTime;
        }

        // ========= Views =========
        function getStakeInfo(address account) external view returns (StakeInfo memory);

        function batchStakeInfo(address[] calldata accounts)
            external
            view
            returns (StakeInfo[] memory);

        function getDepositInfo(address account) external view returns (DepositInfo memory);

        function totalStaked(address[] calldata accounts) external view returns (uint256);
    }
}
