pub mod client;
pub mod config;
pub mod contract;
pub mod error;
pub mod events;

pub use alloy::primitives::{Address, B256, Bytes, U256};

pub use client::Client;
pub use client::model::{DepositSnapshot, EscrowAccount, RedemptionStatus, StakeSnapshot};
pub use config::{Config, ConfigBuilder};
pub use events::{
    AggregatorEvent, ContractEvent, EscrowEvent, EventWatcher, PaymasterEvent, TokenEvent,
};
