//! Debounced values
//!
//! A `Debouncer` turns a rapidly changing input (search text) into a value
//! that only moves after the input has been quiet for a full period.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Quiet period used by the search box
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(400);

struct Shared<T> {
    /// Bumped on every push; a timer only publishes if it is still current
    generation: Mutex<u64>,
    output: watch::Sender<T>,
}

/// Delays propagation of a value until it has been stable for the quiet
/// period.
///
/// Each [`push`](Self::push) cancels the pending timer and schedules a new
/// one, so intermediate values are never published. Subscribers see the
/// settled value through a `watch` channel.
///
/// Timers run on the ambient tokio runtime; `push` must be called from
/// within one.
pub struct Debouncer<T> {
    quiet_period: Duration,
    shared: Arc<Shared<T>>,
    pending: Option<JoinHandle<()>>,
}

impl<T> Debouncer<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a debouncer publishing `initial` until the first settled push
    pub fn new(initial: T, quiet_period: Duration) -> Self {
        let (output, _) = watch::channel(initial);
        Self {
            quiet_period,
            shared: Arc::new(Shared {
                generation: Mutex::new(0),
                output,
            }),
            pending: None,
        }
    }

    /// Quiet period this debouncer waits for
    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Feed a new input value, replacing any not-yet-published one
    pub fn push(&mut self, value: T) {
        let generation = {
            let mut current = self
                .shared
                .generation
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            *current += 1;
            *current
        };

        if let Some(previous) = self.pending.take() {
            previous.abort();
        }

        let shared = Arc::clone(&self.shared);
        let delay = self.quiet_period;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let current = shared
                .generation
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if *current == generation {
                shared.output.send_replace(value);
            }
        }));
    }

    /// Drop the pending value without publishing it
    pub fn cancel(&mut self) {
        *self
            .shared
            .generation
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }

    /// Whether a pushed value is still waiting out the quiet period
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Last published value
    pub fn current(&self) -> T {
        self.shared.output.borrow().clone()
    }

    /// Receiver notified each time a value settles
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.shared.output.subscribe()
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}
