use alloy::sol;
use alloy::sol_types::SolEvent;

sol! {
    #[sol(rpc)]
    #[derive(Debug, PartialEq)]
    contract SettlementToken {
        // ========= Errors =========
        error InsufficientBalance(address account, uint256 needed, uint256 available);
        error InsufficientAllowance(address spender, uint256 needed, uint256 available);
        error NotMinter(address account);

        // ========= Events =========
        event Transfer(address indexed from, address indexed to, uint256 value);
        event Approval(address indexed owner, address indexed spender, uint256 value);

        // ========= Constructor =========
        constructor(string memory name_, string memory symbol_, address minter_);

        // ========= Views =========
        function name() external view returns (string memory);
        function symbol() external view returns (string memory);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);

        // ========= Transactions =========
        function approve(address spender, uint256 value) external returns (bool);
        function transfer(address to, uint256 value) external returns (bool);
        function transferFrom(address from, address to, uint256 value) external returns (bool);
        function mint(address to, uint256 value) external;
        function burn(uint256 value) external;
    }
}

/// Human-readable signatures of every event the token emits, in the form
/// `Filter::events` expects.
pub fn token_event_signatures() -> Vec<&'static str> {
    vec![
        SettlementToken::Transfer::SIGNATURE,
        SettlementToken::Approval::SIGNATURE,
    ]
}
