//! The transaction settlement pipeline.
//!
//! Simulates asynchronous, eventually-consistent settlement of ownership
//! transfers. Creating a transaction returns the `Pending` record
//! immediately; the caller never blocks on settlement. A background worker
//! consumes settlement jobs, waits out the configured confirmation delay,
//! and then moves each transaction to a terminal state:
//!
//! - On success: a fresh transaction hash is generated, status becomes
//!   `Completed`, and when the transaction references an NFT its ownership
//!   transfers to the recipient.
//! - On any fault: status becomes `Failed`, no ownership mutation occurs,
//!   and the fault is logged; there is no caller left to propagate to.
//!
//! Each transaction gets exactly one settlement attempt, and the transition
//! is at-most-once: a transaction already in a terminal state is left
//! untouched. There is no cancellation; a submitted job always runs to a
//! terminal outcome. Dropping every [`SettlementHandle`] drains the queue
//! and stops the worker.

use std::time::Duration;

use pusaka_types::{
    error::InternalSnafu, generate_transaction_hash, NftId, Result, TransactionId,
    TransactionStatus,
};
use snafu::ensure;
use tokio::{sync::mpsc, task::JoinHandle, time::Instant};
use tracing::{debug, error, info, warn};

use crate::{config::MarketConfig, store::MarketStore};

/// A queued settlement attempt.
struct SettlementJob {
    /// Transaction to settle.
    transaction_id: TransactionId,
    /// Earliest instant the attempt may run, set at submission time so
    /// concurrent jobs wait out their delays in parallel rather than
    /// queueing behind each other.
    not_before: Instant,
}

/// Clonable submission handle for the settlement worker.
#[derive(Clone)]
pub struct SettlementHandle {
    jobs: mpsc::Sender<SettlementJob>,
    delay: Duration,
}

impl SettlementHandle {
    /// Schedules a settlement attempt for a transaction.
    ///
    /// Returns immediately; the attempt runs after the configured delay.
    ///
    /// # Errors
    ///
    /// Returns [`pusaka_types::MarketError::Internal`] if the job queue is full or the
    /// worker has stopped: a scheduled transaction must always reach a
    /// terminal state, so a rejected submission is surfaced instead of
    /// silently dropped.
    pub fn submit(&self, transaction_id: TransactionId) -> Result<()> {
        let job = SettlementJob { transaction_id, not_before: Instant::now() + self.delay };
        self.jobs.try_send(job).map_err(|e| {
            InternalSnafu { message: format!("settlement queue rejected {transaction_id}: {e}") }
                .build()
        })
    }
}

/// The settlement worker.
pub struct SettlementPipeline;

impl SettlementPipeline {
    /// Spawns the settlement worker on the current tokio runtime.
    ///
    /// Returns the submission handle and the worker's join handle. The
    /// worker runs until every submission handle has been dropped and the
    /// queue is drained.
    #[must_use]
    pub fn spawn(store: MarketStore, config: &MarketConfig) -> (SettlementHandle, JoinHandle<()>) {
        let (jobs, rx) = mpsc::channel(config.settlement_queue_depth);
        let delay = Duration::from_millis(config.settlement_delay_ms);
        let worker = tokio::spawn(run(store, rx));
        (SettlementHandle { jobs, delay }, worker)
    }
}

/// Worker loop: wait out each job's delay, then settle it.
async fn run(store: MarketStore, mut jobs: mpsc::Receiver<SettlementJob>) {
    while let Some(job) = jobs.recv().await {
        tokio::time::sleep_until(job.not_before).await;
        settle(&store, job.transaction_id);
    }
    debug!("settlement worker stopped");
}

/// Outcome of a settlement attempt.
enum Outcome {
    /// Moved to `Completed`; ownership transferred when an NFT was involved.
    Completed { nft_id: Option<NftId> },
    /// Nothing to do: already terminal, or the record is gone.
    Skipped,
}

/// Runs one settlement attempt and records the terminal state.
fn settle(store: &MarketStore, transaction_id: TransactionId) {
    match try_settle(store, transaction_id) {
        Ok(Outcome::Completed { nft_id }) => {
            info!(transaction = %transaction_id, nft = ?nft_id, "transaction settled");
        },
        Ok(Outcome::Skipped) => {},
        Err(err) => {
            error!(transaction = %transaction_id, %err, "settlement failed");
            store.update_transaction_status(transaction_id, TransactionStatus::Failed, None);
        },
    }
}

/// The fallible part of settlement.
///
/// Verifies every reference the transfer touches before mutating anything,
/// so a fault leaves ownership untouched.
fn try_settle(store: &MarketStore, transaction_id: TransactionId) -> Result<Outcome> {
    let Some(transaction) = store.transaction(transaction_id) else {
        warn!(transaction = %transaction_id, "settlement job for unknown transaction");
        return Ok(Outcome::Skipped);
    };
    if transaction.status.is_terminal() {
        // At-most-once: a second job for the same transaction is a no-op.
        return Ok(Outcome::Skipped);
    }

    ensure!(
        store.user(transaction.to_user_id).is_some(),
        pusaka_types::error::DanglingReferenceSnafu {
            entity: "user",
            id: transaction.to_user_id.value(),
        }
    );
    if let Some(nft_id) = transaction.nft_id {
        ensure!(
            store.nft(nft_id).is_some(),
            pusaka_types::error::DanglingReferenceSnafu { entity: "nft", id: nft_id.value() }
        );
    }

    let hash = generate_transaction_hash();
    store.update_transaction_status(transaction_id, TransactionStatus::Completed, Some(hash));
    if let Some(nft_id) = transaction.nft_id {
        store.update_nft_owner(nft_id, transaction.to_user_id);
    }

    Ok(Outcome::Completed { nft_id: transaction.nft_id })
}
