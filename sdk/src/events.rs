//! Event-log plumbing shared by all contracts in the suite: historical range
//! queries and a live watcher that forwards decoded events to a caller-supplied
//! sink until the sink is dropped.

use alloy::{
    eips::BlockNumberOrTag,
    primitives::Address,
    providers::{DynProvider, Provider, ProviderBuilder, WsConnect},
    rpc::types::{Filter, Log},
    sol_types::SolEvent,
};
use futures_util::{Stream, StreamExt};
use log::{error, info, warn};
use std::time::Duration;
use tokio::{sync::mpsc, task::JoinHandle};
use url::Url;

use crate::contract::aggregator::{BlsSignatureAggregator, aggregator_event_signatures};
use crate::contract::escrow::{PaymentEscrow, escrow_event_signatures};
use crate::contract::paymaster::{GasPaymaster, paymaster_event_signatures};
use crate::contract::token::{SettlementToken, token_event_signatures};
use crate::error::{EventQueryError, WatchError};

/// A decoded contract event, dispatched by `topic0`.
pub trait ContractEvent: Sized + Send + 'static {
    /// Human-readable event signatures, in the form `Filter::events` expects.
    fn signatures() -> Vec<&'static str>;

    /// Decodes a log into a typed event. `Ok(None)` means the log's `topic0`
    /// belongs to no event of this contract.
    fn decode(log: &Log) -> Result<Option<Self>, EventQueryError>;
}

#[derive(Clone, Debug)]
pub enum TokenEvent {
    Transfer(SettlementToken::Transfer),
    Approval(SettlementToken::Approval),
}

impl ContractEvent for TokenEvent {
    fn signatures() -> Vec<&'static str> {
        token_event_signatures()
    }

    fn decode(log: &Log) -> Result<Option<Self>, EventQueryError> {
        let event = match log.topic0() {
            Some(&SettlementToken::Transfer::SIGNATURE_HASH) => {
                Self::Transfer(log.log_decode()?.inner.data)
            }
            Some(&SettlementToken::Approval::SIGNATURE_HASH) => {
                Self::Approval(log.log_decode()?.inner.data)
            }
            _ => return Ok(None),
        };
        Ok(Some(event))
    }
}

#[derive(Clone, Debug)]
pub enum PaymasterEvent {
    Deposited(GasPaymaster::Deposited),
    Withdrawn(GasPaymaster::Withdrawn),
    StakeLocked(GasPaymaster::StakeLocked),
    StakeUnlocked(GasPaymaster::StakeUnlocked),
    StakeWithdrawn(GasPaymaster::StakeWithdrawn),
    VerifyingSignerChanged(GasPaymaster::VerifyingSignerChanged),
}

impl ContractEvent for PaymasterEvent {
    fn signatures() -> Vec<&'static str> {
        paymaster_event_signatures()
    }

    fn decode(log: &Log) -> Result<Option<Self>, EventQueryError> {
        let event = match log.topic0() {
            Some(&GasPaymaster::Deposited::SIGNATURE_HASH) => {
                Self::Deposited(log.log_decode()?.inner.data)
            }
            Some(&GasPaymaster::Withdrawn::SIGNATURE_HASH) => {
                Self::Withdrawn(log.log_decode()?.inner.data)
            }
            Some(&GasPaymaster::StakeLocked::SIGNATURE_HASH) => {
                Self::StakeLocked(log.log_decode()?.inner.data)
            }
            Some(&GasPaymaster::StakeUnlocked::SIGNATURE_HASH) => {
                Self::StakeUnlocked(log.log_decode()?.inner.data)
            }
            Some(&GasPaymaster::StakeWithdrawn::SIGNATURE_HASH) => {
                Self::StakeWithdrawn(log.log_decode()?.inner.data)
            }
            Some(&GasPaymaster::VerifyingSignerChanged::SIGNATURE_HASH) => {
                Self::VerifyingSignerChanged(log.log_decode()?.inner.data)
            }
            _ => return Ok(None),
        };
        Ok(Some(event))
    }
}

#[derive(Clone, Debug)]
pub enum AggregatorEvent {
    PublicKeyRegistered(BlsSignatureAggregator::PublicKeyRegistered),
}

impl ContractEvent for AggregatorEvent {
    fn signatures() -> Vec<&'static str> {
        aggregator_event_signatures()
    }

    fn decode(log: &Log) -> Result<Option<Self>, EventQueryError> {
        match log.topic0() {
            Some(&BlsSignatureAggregator::PublicKeyRegistered::SIGNATURE_HASH) => Ok(Some(
                Self::PublicKeyRegistered(log.log_decode()?.inner.data),
            )),
            _ => Ok(None),
        }
    }
}

#[derive(Clone, Debug)]
pub enum EscrowEvent {
    CollateralDeposited(PaymentEscrow::CollateralDeposited),
    CollateralWithdrawn(PaymentEscrow::CollateralWithdrawn),
    WithdrawalRequested(PaymentEscrow::WithdrawalRequested),
    WithdrawalCanceled(PaymentEscrow::WithdrawalCanceled),
    PayeeRedeemed(PaymentEscrow::PayeeRedeemed),
    PaymentRecorded(PaymentEscrow::PaymentRecorded),
}

impl ContractEvent for EscrowEvent {
    fn signatures() -> Vec<&'static str> {
        escrow_event_signatures()
    }

    fn decode(log: &Log) -> Result<Option<Self>, EventQueryError> {
        let event = match log.topic0() {
            Some(&PaymentEscrow::CollateralDeposited::SIGNATURE_HASH) => {
                Self::CollateralDeposited(log.log_decode()?.inner.data)
            }
            Some(&PaymentEscrow::CollateralWithdrawn::SIGNATURE_HASH) => {
                Self::CollateralWithdrawn(log.log_decode()?.inner.data)
            }
            Some(&PaymentEscrow::WithdrawalRequested::SIGNATURE_HASH) => {
                Self::WithdrawalRequested(log.log_decode()?.inner.data)
            }
            Some(&PaymentEscrow::WithdrawalCanceled::SIGNATURE_HASH) => {
                Self::WithdrawalCanceled(log.log_decode()?.inner.data)
            }
            Some(&PaymentEscrow::PayeeRedeemed::SIGNATURE_HASH) => {
                Self::PayeeRedeemed(log.log_decode()?.inner.data)
            }
            Some(&PaymentEscrow::PaymentRecorded::SIGNATURE_HASH) => {
                Self::PaymentRecorded(log.log_decode()?.inner.data)
            }
            _ => return Ok(None),
        };
        Ok(Some(event))
    }
}

/// Fetches and decodes every event the contract emitted in the given
/// (inclusive) block range.
pub async fn query_events<E: ContractEvent>(
    provider: &DynProvider,
    address: Address,
    from_block: u64,
    to_block: u64,
) -> Result<Vec<E>, EventQueryError> {
    let filter = Filter::new()
        .address(address)
        .events(E::signatures())
        .from_block(from_block)
        .to_block(BlockNumberOrTag::Number(to_block));

    let logs = provider
        .get_logs(&filter)
        .await
        .map_err(|e| EventQueryError::Transport(e.to_string()))?;

    let mut events = Vec::with_capacity(logs.len());
    for log in &logs {
        if let Some(event) = E::decode(log)? {
            events.push(event);
        }
    }
    Ok(events)
}

/// Live event watcher bound to one contract address. Reconnects with
/// exponential backoff and stops once the caller's sink is closed.
pub struct EventWatcher {
    ws_url: Url,
    address: Address,
}

#[derive(Debug)]
enum SinkState {
    Open,
    Closed,
}

impl EventWatcher {
    pub fn new(ws_url: Url, address: Address) -> Self {
        Self { ws_url, address }
    }

    /// Subscribes to the contract's logs and forwards every decoded event to
    /// `sink`. Runs until the receiving side of `sink` is dropped.
    pub fn spawn<E: ContractEvent>(self, sink: mpsc::Sender<E>) -> JoinHandle<()> {
        let filter = Filter::new()
            .address(self.address)
            .events(E::signatures())
            .from_block(BlockNumberOrTag::Latest);

        tokio::spawn(Self::watch_loop(self.ws_url, filter, self.address, sink))
    }

    async fn watch_loop<E: ContractEvent>(
        ws_url: Url,
        filter: Filter,
        address: Address,
        sink: mpsc::Sender<E>,
    ) {
        let mut delay = Duration::from_secs(5);

        loop {
            match Self::watch_once(&ws_url, &filter, address, &sink).await {
                Ok(SinkState::Closed) => {
                    info!("Event sink closed; stopping watcher for {address:?}");
                    return;
                }
                Ok(SinkState::Open) => {
                    warn!("Log subscription for {address:?} ended. Restarting in {delay:?}...")
                }
                Err(err) => {
                    error!("Event watcher for {address:?} failed: {err}. Restarting in {delay:?}...")
                }
            }

            tokio::time::sleep(delay).await;
            delay = (delay * 2).min(Duration::from_secs(300));
        }
    }

    /// Runs a single subscription session until the stream ends or the sink
    /// is closed.
    async fn watch_once<E: ContractEvent>(
        ws_url: &Url,
        filter: &Filter,
        address: Address,
        sink: &mpsc::Sender<E>,
    ) -> Result<SinkState, WatchError> {
        let ws = WsConnect::new(ws_url.as_str());
        let provider = ProviderBuilder::new()
            .connect_ws(ws)
            .await
            .map_err(|e| WatchError::Provider(e.to_string()))?;

        let sub = provider
            .subscribe_logs(filter)
            .await
            .map_err(|e| WatchError::Provider(e.to_string()))?;
        info!("Listening for events from {address:?}");

        let stream = sub.into_stream();
        Ok(Self::forward_stream(stream, sink).await)
    }

    /// Drains `stream`, forwarding each decodable log to `sink`. All logs the
    /// subscription already delivered are forwarded before this returns.
    async fn forward_stream<E: ContractEvent>(
        mut stream: impl Stream<Item = Log> + Unpin,
        sink: &mpsc::Sender<E>,
    ) -> SinkState {
        while let Some(log) = stream.next().await {
            match E::decode(&log) {
                Ok(Some(event)) => {
                    if sink.send(event).await.is_err() {
                        return SinkState::Closed;
                    }
                }
                Ok(None) => info!("Unknown log: {log:?}"),
                Err(e) => error!("Failed to decode log: {e}"),
            }
        }
        SinkState::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, LogData, U256};
    use futures_util::stream;

    fn escrow_log(address: Address, event: &impl SolEvent) -> Log {
        let data: LogData = event.encode_log_data();
        Log {
            inner: alloy::primitives::Log { address, data },
            ..Default::default()
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_forward_stream_delivers_in_order_then_ends() {
        let address = Address::repeat_byte(0x42);
        let logs = vec![
            escrow_log(
                address,
                &PaymentEscrow::CollateralDeposited {
                    account: Address::repeat_byte(0x01),
                    amount: U256::from(10u64),
                },
            ),
            escrow_log(
                address,
                &PaymentEscrow::PaymentRecorded {
                    escrow_id: U256::from(7u64),
                    amount: U256::from(3u64),
                },
            ),
        ];

        let (tx, mut rx) = mpsc::channel(8);
        let state = EventWatcher::forward_stream::<EscrowEvent>(stream::iter(logs), &tx).await;
        drop(tx);

        assert!(matches!(state, SinkState::Open));

        let first = rx.recv().await.expect("first event");
        assert!(
            matches!(first, EscrowEvent::CollateralDeposited(ref ev) if ev.amount == U256::from(10u64))
        );

        let second = rx.recv().await.expect("second event");
        assert!(
            matches!(second, EscrowEvent::PaymentRecorded(ref ev) if ev.escrow_id == U256::from(7u64))
        );

        assert!(rx.recv().await.is_none());
    }

    #[test_log::test(tokio::test)]
    async fn test_forward_stream_stops_when_sink_closed() {
        let address = Address::repeat_byte(0x42);
        let logs = vec![
            escrow_log(
                address,
                &PaymentEscrow::WithdrawalCanceled {
                    account: Address::repeat_byte(0x01),
                },
            ),
            escrow_log(
                address,
                &PaymentEscrow::WithdrawalCanceled {
                    account: Address::repeat_byte(0x02),
                },
            ),
        ];

        let (tx, rx) = mpsc::channel(8);
        drop(rx);

        let state = EventWatcher::forward_stream::<EscrowEvent>(stream::iter(logs), &tx).await;
        assert!(matches!(state, SinkState::Closed));
    }

    #[test_log::test(tokio::test)]
    async fn test_watch_once_surfaces_connect_failure() {
        let address = Address::repeat_byte(0x42);
        let ws_url = Url::parse("ws://127.0.0.1:9/").unwrap();
        let filter = Filter::new().address(address);
        let (tx, _rx) = mpsc::channel::<EscrowEvent>(1);

        let err = EventWatcher::watch_once(&ws_url, &filter, address, &tx)
            .await
            .expect_err("nothing listens on the discard port");
        assert!(matches!(err, WatchError::Provider(_)));
    }

    #[test_log::test(tokio::test)]
    async fn test_forward_stream_skips_foreign_logs() {
        let address = Address::repeat_byte(0x42);
        let logs = vec![
            // A token Transfer surfacing on an escrow subscription is ignored
            escrow_log(
                address,
                &SettlementToken::Transfer {
                    from: Address::repeat_byte(0x01),
                    to: Address::repeat_byte(0x02),
                    value: U256::from(5u64),
                },
            ),
            escrow_log(
                address,
                &PaymentEscrow::PayeeRedeemed {
                    escrow_id: U256::from(1u64),
                    amount: U256::from(2u64),
                },
            ),
        ];

        let (tx, mut rx) = mpsc::channel(8);
        let _ = EventWatcher::forward_stream::<EscrowEvent>(stream::iter(logs), &tx).await;
        drop(tx);

        let only = rx.recv().await.expect("redeemed event");
        assert!(matches!(only, EscrowEvent::PayeeRedeemed(_)));
        assert!(rx.recv().await.is_none());
    }
}
