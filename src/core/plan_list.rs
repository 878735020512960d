use crate::core::store::{InvalidateFn, Readable, RunFn, Subscription, Writable};
use crate::core::{Plan, PlanSource};
use crate::utils::error::Result;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const DEFAULT_LOAD_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loading,
    Loaded,
    Failed,
}

impl LoadState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => LoadState::Loading,
            2 => LoadState::Loaded,
            3 => LoadState::Failed,
            _ => LoadState::Unloaded,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Published { count: usize },
    /// A newer `load` started before this one finished; nothing was published.
    Superseded,
}

/// Observable list of course plans, filled from a [`PlanSource`].
pub struct PlanListStore<S: PlanSource> {
    source: S,
    plans: Writable<Vec<Plan>>,
    delay: Duration,
    latest_ticket: AtomicU64,
    publish_lock: Mutex<()>,
    state: AtomicU8,
}

impl<S: PlanSource> PlanListStore<S> {
    pub fn new(source: S) -> Self {
        Self::with_delay(source, DEFAULT_LOAD_DELAY)
    }

    pub fn with_delay(source: S, delay: Duration) -> Self {
        Self {
            source,
            plans: Writable::empty(),
            delay,
            latest_ticket: AtomicU64::new(0),
            publish_lock: Mutex::new(()),
            state: AtomicU8::new(LoadState::Unloaded as u8),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn state(&self) -> LoadState {
        LoadState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Current plans, `None` until a load has succeeded.
    pub fn plans(&self) -> Option<Arc<Vec<Plan>>> {
        self.plans.get()
    }

    /// Waits the configured delay, fetches the plan list and publishes it.
    ///
    /// On error the published list is left untouched.
    pub async fn load(&self) -> Result<LoadOutcome> {
        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        self.set_state(LoadState::Loading);

        if !self.delay.is_zero() {
            tracing::debug!("Waiting {:?} before fetching plans", self.delay);
            tokio::time::sleep(self.delay).await;
        }

        let fetched = self.source.fetch_plans().await;

        let _guard = self
            .publish_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let plans = match fetched {
            Ok(plans) => plans,
            Err(e) => {
                if self.is_latest(ticket) {
                    self.set_state(self.settled_state());
                }
                return Err(e);
            }
        };
        if !self.is_latest(ticket) {
            tracing::warn!("Discarding plan list from superseded load #{}", ticket);
            return Ok(LoadOutcome::Superseded);
        }

        let count = plans.len();
        self.plans.set(plans);
        self.set_state(LoadState::Loaded);
        tracing::info!("Published {} plans", count);
        Ok(LoadOutcome::Published { count })
    }

    fn is_latest(&self, ticket: u64) -> bool {
        self.latest_ticket.load(Ordering::SeqCst) == ticket
    }

    // A failed load keeps whatever list was there before.
    fn settled_state(&self) -> LoadState {
        if self.plans.get().is_some() {
            LoadState::Loaded
        } else {
            LoadState::Failed
        }
    }

    fn set_state(&self, state: LoadState) {
        self.state.store(state as u8, Ordering::SeqCst);
    }
}

impl<S: PlanSource> Readable<Vec<Plan>> for PlanListStore<S> {
    fn subscribe_with(
        &self,
        run: Box<RunFn<Vec<Plan>>>,
        invalidate: Option<Box<InvalidateFn>>,
    ) -> Subscription {
        self.plans.subscribe_with(run, invalidate)
    }

    fn get(&self) -> Option<Arc<Vec<Plan>>> {
        self.plans.get()
    }
}
