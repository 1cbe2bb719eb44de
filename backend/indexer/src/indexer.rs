//! Long-running background task that polls the Soroban RPC and writes
//! decoded crowdfunder events to the database.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use sqlx::SqlitePool;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::db;
use crate::events::EventKind;
use crate::rpc;

pub struct IndexerState {
    pub pool: SqlitePool,
    pub config: Config,
    pub client: Client,
}

/// Where to resume scanning from: a ledger sequence plus an optional
/// pagination cursor within that ledger range. Persisted after every
/// successful poll so restarts pick up exactly where they left off.
struct Checkpoint {
    ledger: u32,
    cursor: Option<String>,
}

impl Checkpoint {
    /// Restore from the database, falling back to the configured start
    /// ledger on a fresh install.
    async fn restore(pool: &SqlitePool, config: &Config) -> Self {
        let last_ledger = db::get_last_ledger(pool).await.unwrap_or(0);
        let cursor = db::get_cursor_string(pool).await.unwrap_or(None);

        let ledger = if last_ledger > 0 {
            last_ledger as u32
        } else {
            config.start_ledger
        };
        Checkpoint { ledger, cursor }
    }

    async fn persist(&self, pool: &SqlitePool) -> crate::errors::Result<()> {
        db::save_cursor(pool, self.ledger as i64, self.cursor.as_deref()).await?;
        Ok(())
    }
}

/// Spawn the indexer loop as a background [`tokio`] task.
pub async fn run(state: Arc<IndexerState>) {
    info!("Indexer starting — contract: {}", state.config.contract_id);

    let mut checkpoint = Checkpoint::restore(&state.pool, &state.config).await;
    info!("Resuming from ledger {}", checkpoint.ledger);

    let mut consecutive_failures: u32 = 0;
    loop {
        match poll_once(&state, &mut checkpoint).await {
            Ok(()) => consecutive_failures = 0,
            Err(e) => {
                consecutive_failures += 1;
                if consecutive_failures >= 5 {
                    warn!(
                        "Indexer poll has failed {consecutive_failures} times in a row \
                         (last: {e}); still retrying"
                    );
                } else {
                    error!("Indexer poll error: {e}");
                }
            }
        }

        tokio::time::sleep(Duration::from_secs(state.config.poll_interval_secs)).await;
    }
}

/// Perform a single poll iteration and advance the checkpoint.
async fn poll_once(
    state: &IndexerState,
    checkpoint: &mut Checkpoint,
) -> crate::errors::Result<()> {
    let config = &state.config;
    let (raw_events, next_cursor, latest_ledger) = rpc::fetch_events(
        &state.client,
        &config.rpc_url,
        &config.contract_id,
        checkpoint.ledger,
        checkpoint.cursor.as_deref(),
        config.events_per_page,
    )
    .await?;

    if !raw_events.is_empty() {
        let decoded = rpc::decode_events(&raw_events, &config.contract_id);
        let inserted = db::insert_events(&state.pool, &decoded).await?;

        // Summarize by kind so the log tells the campaign's story at a glance.
        let count_of = |kind: EventKind| {
            decoded
                .iter()
                .filter(|e| e.event_type == kind.as_str())
                .count()
        };
        info!(
            mints = count_of(EventKind::ReceiptMinted),
            refunds = count_of(EventKind::ReceiptRefunded),
            transfers = count_of(EventKind::ReceiptTransferred),
            withdrawals = count_of(EventKind::FundsWithdrawn),
            cancellations = count_of(EventKind::CampaignCancelled),
            "Stored {inserted} new of {} fetched events",
            raw_events.len(),
        );
    }

    // Advance the checkpoint:
    // - If there is a next_cursor string, keep the same start ledger so the
    //   next call paginates within the same ledger range.
    // - Otherwise advance to the latest known ledger.
    checkpoint.ledger = latest_ledger
        .map(|l| (l as u32).max(checkpoint.ledger))
        .unwrap_or(checkpoint.ledger);
    checkpoint.cursor = next_cursor;
    checkpoint.persist(&state.pool).await
}
