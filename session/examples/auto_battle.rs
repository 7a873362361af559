//! Plays the built-in wild encounter by always choosing the first attack.
//!
//! Run with `RUST_LOG=tallgrass_battle=debug` to watch the state machine.

use anyhow::Result;
use async_trait::async_trait;
use tallgrass_session::tallgrass_battle::{
    AttackTable, BattleState, Controller, EncounterConfig, EncounterOutcome,
};
use tallgrass_session::{EncounterHandler, Session, SessionHandle};
use tracing_subscriber::EnvFilter;

struct Narrator {
    handle: SessionHandle,
}

#[async_trait]
impl EncounterHandler for Narrator {
    async fn on_state_entered(&mut self, state: BattleState) {
        if state == BattleState::PlayerInput {
            // FIGHT, then the first move
            self.handle.confirm().ok();
            self.handle.confirm().ok();
        }
    }

    async fn on_message(&mut self, message: &str) {
        println!("{message}");
        self.handle.confirm().ok();
    }

    async fn on_health_changed(&mut self, controller: Controller, current: u32, max: u32) {
        println!("  [{controller:?} {current}/{max}]");
    }

    async fn on_finished(&mut self, outcome: EncounterOutcome) {
        println!("outcome: {outcome:?}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => EncounterConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => EncounterConfig::wild_encounter(),
    };

    let (session, handle) = Session::start(&config, &AttackTable::builtin())?;
    let mut narrator = Narrator { handle };
    session.run(&mut narrator).await?;
    Ok(())
}
