pub mod aggregator;
pub mod escrow;
pub mod paymaster;
pub mod stake_viewer;
pub mod token;
pub mod utils;

pub use aggregator::{BlsSignatureAggregator, aggregator_event_signatures};
pub use escrow::{PaymentEscrow, escrow_event_signatures};
pub use paymaster::{GasPaymaster, paymaster_event_signatures};
pub use stake_viewer::StakeViewer;
pub use token::{SettlementToken, token_event_signatures};
