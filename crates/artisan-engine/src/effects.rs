//! Delayed sound effects.
//!
//! An attempt resolves synchronously, but its sounds are spread out in time:
//! the craft sound repeats a few times and some disciplines follow up with a
//! second sound (the anvil strike after the bellows). The engine returns
//! these as [`DelayedEffect`] values; [`EffectTimers`] plays them on a Tokio
//! runtime. Timers are fire-and-forget and are aborted by
//! [`EffectTimers::cancel_all`] or when the timers are dropped.

use std::sync::Arc;
use std::time::Duration;

use artisan_types::{CrafterId, SoundId};
use tokio::task::JoinSet;
use tracing::debug;

use crate::host::EffectSink;

/// A sound to play after a delay, measured from the end of the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DelayedEffect {
    /// How long to wait.
    pub delay: Duration,
    /// What to play.
    pub sound: SoundId,
}

impl DelayedEffect {
    /// A sound after `delay`.
    pub const fn new(delay: Duration, sound: SoundId) -> Self {
        Self { delay, sound }
    }
}

/// Owner of pending effect timers.
#[derive(Debug, Default)]
pub struct EffectTimers {
    tasks: JoinSet<()>,
}

impl EffectTimers {
    /// No pending timers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule every effect for `crafter` onto `sink`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule(&mut self, crafter: CrafterId, effects: &[DelayedEffect], sink: &Arc<dyn EffectSink + Send + Sync>) {
        self.reap();
        for effect in effects.iter().copied() {
            let sink = Arc::clone(sink);
            self.tasks.spawn(async move {
                tokio::time::sleep(effect.delay).await;
                sink.play_sound(crafter, effect.sound);
            });
        }
        debug!(crafter = %crafter, scheduled = effects.len(), pending = self.tasks.len(), "effects scheduled");
    }

    /// Timers that have not fired yet.
    pub fn pending(&mut self) -> usize {
        self.reap();
        self.tasks.len()
    }

    /// Abort every pending timer.
    pub fn cancel_all(&mut self) {
        let cancelled = self.tasks.len();
        self.tasks.abort_all();
        self.tasks.detach_all();
        debug!(cancelled, "effect timers cancelled");
    }

    /// Wait until every scheduled effect has played.
    pub async fn drain(&mut self) {
        while self.tasks.join_next().await.is_some() {}
    }

    fn reap(&mut self) {
        while self.tasks.try_join_next().is_some() {}
    }
}
