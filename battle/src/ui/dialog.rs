//! Message layer: shows messages one at a time until acknowledged

use std::collections::VecDeque;

/// Result of acknowledging the visible message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acknowledged {
    /// Another message is now visible
    Next(String),
    /// The last message was dismissed; the continuation is ready
    Done,
    /// Nothing was waiting for acknowledgement
    Ignored,
}

/// Queue of messages with one continuation released after the last
#[derive(Debug, Clone)]
pub struct Dialog<K> {
    current: Option<String>,
    queued: VecDeque<String>,
    waiting: Option<K>,
    ready: Option<K>,
}

impl<K> Dialog<K> {
    pub fn new() -> Self {
        Self {
            current: None,
            queued: VecDeque::new(),
            waiting: None,
            ready: None,
        }
    }

    /// Show `messages` in order and hold `on_acknowledged` until the viewer
    /// has advanced past the last one. Returns the first visible message.
    ///
    /// An empty list releases the continuation on the next [`take_ready`].
    ///
    /// [`take_ready`]: Dialog::take_ready
    pub fn display_messages_and_wait(
        &mut self,
        messages: Vec<String>,
        on_acknowledged: K,
    ) -> Option<&str> {
        if self.current.is_some() || self.waiting.is_some() {
            tracing::warn!(dropped = ?self.current, "dialog replaced before acknowledgement");
        }

        self.queued = messages.into();
        self.current = self.queued.pop_front();
        if self.current.is_some() {
            self.waiting = Some(on_acknowledged);
        } else {
            self.waiting = None;
            self.ready = Some(on_acknowledged);
        }
        self.current.as_deref()
    }

    /// Dismiss the visible message
    pub fn acknowledge(&mut self) -> Acknowledged {
        if self.current.is_none() {
            return Acknowledged::Ignored;
        }

        self.current = self.queued.pop_front();
        match &self.current {
            Some(message) => Acknowledged::Next(message.clone()),
            None => {
                self.ready = self.waiting.take();
                Acknowledged::Done
            }
        }
    }

    /// Take the continuation released by the last acknowledgement
    pub fn take_ready(&mut self) -> Option<K> {
        self.ready.take()
    }

    /// Whether a message is on screen awaiting acknowledgement
    pub fn is_waiting(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_message(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

impl<K> Default for Dialog<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(messages: &[&str]) -> Vec<String> {
        messages.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn test_single_message() {
        let mut dialog = Dialog::new();
        let first = dialog.display_messages_and_wait(lines(&["wild Carnodusk appeared!"]), 1);

        assert_eq!(first, Some("wild Carnodusk appeared!"));
        assert!(dialog.is_waiting());
        assert_eq!(dialog.take_ready(), None);

        assert_eq!(dialog.acknowledge(), Acknowledged::Done);
        assert!(!dialog.is_waiting());
        assert_eq!(dialog.take_ready(), Some(1));
        assert_eq!(dialog.take_ready(), None);
    }

    #[test]
    fn test_multiple_messages() {
        let mut dialog = Dialog::new();
        dialog.display_messages_and_wait(lines(&["one", "two"]), "done");

        assert_eq!(dialog.acknowledge(), Acknowledged::Next("two".to_string()));
        assert_eq!(dialog.current_message(), Some("two"));
        assert_eq!(dialog.take_ready(), None);

        assert_eq!(dialog.acknowledge(), Acknowledged::Done);
        assert_eq!(dialog.take_ready(), Some("done"));
    }

    #[test]
    fn test_acknowledge_when_idle() {
        let mut dialog: Dialog<()> = Dialog::new();
        assert_eq!(dialog.acknowledge(), Acknowledged::Ignored);
    }

    #[test]
    fn test_empty_messages_ready_without_input() {
        let mut dialog = Dialog::new();
        let first = dialog.display_messages_and_wait(Vec::new(), 'k');

        assert_eq!(first, None);
        assert!(!dialog.is_waiting());
        assert_eq!(dialog.take_ready(), Some('k'));
    }
}
