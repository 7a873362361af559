//! Async host for tallgrass battle encounters.
//!
//! A [`Session`] owns one [`BattleOrchestrator`] and ticks it on a tokio
//! interval. Player input arrives through a cloneable [`SessionHandle`] and
//! is fed to the encounter one event per frame. Everything the encounter
//! reports is dispatched to an [`EncounterHandler`].
//!
//! ```ignore
//! let (session, handle) = Session::start(&EncounterConfig::wild_encounter(), &AttackTable::builtin())?;
//! let mut ui = MyUi::new(handle);
//! let outcome = session.run(&mut ui).await?;
//! ```

mod handle;
mod handler;

use std::time::Duration;

use anyhow::{Context, Result};
use tallgrass_battle::{
    AttackTable, BattleEvent, BattleOrchestrator, EncounterConfig, EncounterOutcome, InputEvent,
};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

pub use handle::SessionHandle;
pub use handler::EncounterHandler;

pub use tallgrass_battle;

pub struct SessionOptions {
    /// Time between ticks
    pub frame: Duration,
    /// Give up after this many frames; `None` runs until the encounter ends
    pub max_frames: Option<u64>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            frame: Duration::from_millis(16),
            max_frames: None,
        }
    }
}

/// One running encounter
pub struct Session {
    orchestrator: BattleOrchestrator,
    inputs: mpsc::UnboundedReceiver<InputEvent>,
    options: SessionOptions,
}

impl Session {
    /// Start an encounter with the default battle menu and enemy strategy
    pub fn start(config: &EncounterConfig, attacks: &AttackTable) -> Result<(Self, SessionHandle)> {
        let orchestrator =
            BattleOrchestrator::start(config, attacks).context("Failed to start encounter")?;
        Ok(Self::with_orchestrator(orchestrator))
    }

    /// Host an orchestrator built elsewhere, e.g. with a custom strategy
    pub fn with_orchestrator(orchestrator: BattleOrchestrator) -> (Self, SessionHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Self {
            orchestrator,
            inputs: rx,
            options: SessionOptions::default(),
        };
        (session, SessionHandle::new(tx))
    }

    pub fn with_options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn orchestrator(&self) -> &BattleOrchestrator {
        &self.orchestrator
    }

    /// Tick the encounter until it finishes and return its outcome
    pub async fn run<H: EncounterHandler>(mut self, handler: &mut H) -> Result<EncounterOutcome> {
        anyhow::ensure!(
            !self.options.frame.is_zero(),
            "Session frame interval must be non-zero"
        );

        let mut interval = tokio::time::interval(self.options.frame);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last = interval.tick().await;

        tracing::debug!(frame = ?self.options.frame, "session running");

        let mut frames: u64 = 0;
        loop {
            let now = interval.tick().await;
            let delta = now - last;
            last = now;

            let input = self.inputs.try_recv().ok();
            let events = self
                .orchestrator
                .tick(delta, input)
                .context("Encounter tick failed")?;

            for event in events {
                dispatch(handler, event).await;
            }

            if self.orchestrator.is_finished()
                && let Some(outcome) = self.orchestrator.outcome()
            {
                tracing::debug!(?outcome, frames, "session finished");
                return Ok(outcome);
            }

            frames += 1;
            if let Some(max) = self.options.max_frames
                && frames >= max
            {
                anyhow::bail!(
                    "Encounter did not finish within {} frames (stuck in {:?})",
                    max,
                    self.orchestrator.current_state()
                );
            }
        }
    }
}

async fn dispatch<H: EncounterHandler>(handler: &mut H, event: BattleEvent) {
    match event {
        BattleEvent::StateEntered(state) => handler.on_state_entered(state).await,
        BattleEvent::MessageShown(message) => handler.on_message(&message).await,
        BattleEvent::HealthChanged {
            controller,
            current,
            max,
        } => handler.on_health_changed(controller, current, max).await,
        BattleEvent::Finished(outcome) => handler.on_finished(outcome).await,
    }
}
