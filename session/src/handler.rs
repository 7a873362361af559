use async_trait::async_trait;
use tallgrass_battle::{BattleState, Controller, EncounterOutcome};

/// Trait for reacting to what happens during an encounter.
///
/// Implement this trait to render the battle or drive it from another
/// source. All methods have default no-op implementations, so you only need
/// to implement the events you care about.
///
/// # Example
///
/// ```ignore
/// struct AutoConfirm {
///     handle: SessionHandle,
/// }
///
/// #[async_trait]
/// impl EncounterHandler for AutoConfirm {
///     async fn on_message(&mut self, _message: &str) {
///         self.handle.confirm().ok();
///     }
/// }
/// ```
#[async_trait]
pub trait EncounterHandler: Send {
    /// Called each time the encounter enters a state.
    async fn on_state_entered(&mut self, state: BattleState) {
        let _ = state;
    }

    /// Called when a message appears and waits for CONFIRM.
    async fn on_message(&mut self, message: &str) {
        let _ = message;
    }

    /// Called when damage lands, before the health meter finishes animating.
    async fn on_health_changed(&mut self, controller: Controller, current: u32, max: u32) {
        let _ = (controller, current, max);
    }

    /// Called once, when the encounter reaches `FINISHED`.
    async fn on_finished(&mut self, outcome: EncounterOutcome) {
        let _ = outcome;
    }
}
