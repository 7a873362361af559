use anyhow::{Result, anyhow};
use tallgrass_battle::InputEvent;
use tokio::sync::mpsc;

/// Cloneable sender of player input into a running [`Session`](crate::Session)
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<InputEvent>,
}

impl SessionHandle {
    pub(crate) fn new(tx: mpsc::UnboundedSender<InputEvent>) -> Self {
        Self { tx }
    }

    /// Queue an input; the session feeds one per frame, in order
    pub fn send_input(&self, event: InputEvent) -> Result<()> {
        self.tx
            .send(event)
            .map_err(|_| anyhow!("Session closed"))
    }

    pub fn confirm(&self) -> Result<()> {
        self.send_input(InputEvent::Confirm)
    }

    pub fn cancel(&self) -> Result<()> {
        self.send_input(InputEvent::Cancel)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
