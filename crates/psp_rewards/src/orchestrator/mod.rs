//! Refresh-cycle sequencing: balance and yields in, one consistent snapshot out.
//!
//! A cycle starts whenever the trigger key (pool index, principal) changes.
//! Cycles are tagged with a monotonically increasing id; commits from a
//! superseded cycle are discarded, so a late completion can never overwrite
//! a newer cycle's snapshot (last trigger wins). In-flight lookups are not
//! aborted, only their results are dropped.

mod snapshot;

pub use snapshot::RewardSnapshot;

use crate::compute::convert_rates;
use crate::ledger::{BalanceResolver, LedgerClient};
use crate::yields::YieldFeed;
use rust_decimal::prelude::ToPrimitive;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tokio::sync::watch;
use tracing::{debug, warn};

/// The trigger key. Defaults match first load: pool 0, no principal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub pool_index: usize,
    pub principal: String,
}

/// Sole owner of the `RewardSnapshot`; serializes all writes to it.
pub struct RewardOrchestrator<L, Y> {
    balances: BalanceResolver<L>,
    yields: Y,
    selection: Mutex<Selection>,
    cycle: AtomicU64,
    snapshot_tx: watch::Sender<RewardSnapshot>,
}

impl<L: LedgerClient, Y: YieldFeed> RewardOrchestrator<L, Y> {
    pub fn new(balances: BalanceResolver<L>, yields: Y) -> Self {
        let (snapshot_tx, _) = watch::channel(RewardSnapshot::default());
        Self {
            balances,
            yields,
            selection: Mutex::new(Selection::default()),
            cycle: AtomicU64::new(0),
            snapshot_tx,
        }
    }

    /// Watch snapshot updates; every send is one atomic commit.
    pub fn subscribe(&self) -> watch::Receiver<RewardSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Clone of the last committed snapshot.
    pub fn snapshot(&self) -> RewardSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    pub fn selection(&self) -> Selection {
        self.selection.lock().unwrap().clone()
    }

    /// Number of cycles triggered so far.
    pub fn cycle_count(&self) -> u64 {
        self.cycle.load(Ordering::SeqCst)
    }

    /// Change the selected pool; runs a cycle when it actually changed.
    pub async fn select_pool(&self, pool_index: usize) {
        let changed = {
            let mut sel = self.selection.lock().unwrap();
            if sel.pool_index == pool_index {
                false
            } else {
                sel.pool_index = pool_index;
                true
            }
        };
        if changed {
            self.refresh().await;
        }
    }

    /// Change the principal identifier; runs a cycle when it actually changed.
    pub async fn set_principal(&self, principal: &str) {
        let changed = {
            let mut sel = self.selection.lock().unwrap();
            if sel.principal == principal {
                false
            } else {
                sel.principal = principal.to_string();
                true
            }
        };
        if changed {
            self.refresh().await;
        }
    }

    /// Update both trigger inputs at once; runs a cycle when either changed.
    pub async fn select(&self, pool_index: usize, principal: &str) {
        let changed = {
            let mut sel = self.selection.lock().unwrap();
            let next = Selection {
                pool_index,
                principal: principal.to_string(),
            };
            if *sel == next {
                false
            } else {
                *sel = next;
                true
            }
        };
        if changed {
            self.refresh().await;
        }
    }

    /// Run one full refresh cycle for the current selection.
    pub async fn refresh(&self) {
        let cycle = self.cycle.fetch_add(1, Ordering::SeqCst) + 1;
        let sel = self.selection();
        self.run_cycle(cycle, sel).await;
    }

    async fn run_cycle(&self, cycle: u64, sel: Selection) {
        debug!(cycle, pool_index = sel.pool_index, "cycle start");
        self.commit(cycle, |s| s.loading = true);

        // Independent lookups: a balance failure is absorbed as zero inside
        // the resolver, so neither side can block the other.
        let (balance, stats) = tokio::join!(
            self.balances.resolve(&sel.principal, sel.pool_index),
            self.yields.fetch_all(),
        );

        let stats = match stats {
            Ok(stats) => stats,
            Err(e) => {
                // Abandon the cycle: prior snapshot stays stale and loading
                // stays true until the next trigger. No retry timer.
                warn!(cycle, error = %e, "yield fetch failed; cycle abandoned");
                return;
            }
        };
        let Some(pool_stats) = stats.get(sel.pool_index) else {
            warn!(
                cycle,
                pool_index = sel.pool_index,
                pools = stats.len(),
                "selected pool missing from payload; cycle abandoned"
            );
            return;
        };

        let apy_pct = pool_stats.apy.current;
        let rates = convert_rates(apy_pct, balance.to_f64().unwrap_or_default());
        let committed = self.commit(cycle, |s| {
            *s = RewardSnapshot {
                staked_balance: balance,
                apy_pct,
                epoch_apr: rates.epoch_apr,
                epoch_rewards: rates.epoch_rewards,
                daily_rewards: rates.daily_rewards,
                loading: false,
            };
        });
        if committed {
            debug!(cycle, apy_pct, "snapshot committed");
        } else {
            debug!(cycle, "cycle superseded; result discarded");
        }
    }

    /// Atomic check-and-commit. The closure runs under the channel's lock,
    /// so a stale cycle can never interleave with a newer cycle's write.
    fn commit(&self, cycle: u64, mutate: impl FnOnce(&mut RewardSnapshot)) -> bool {
        self.snapshot_tx.send_if_modified(|s| {
            if self.cycle.load(Ordering::SeqCst) != cycle {
                return false;
            }
            mutate(s);
            true
        })
    }
}
