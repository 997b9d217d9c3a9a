use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, error};

/// User-facing failure channel. Only prediction failures go through here.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Notifier that only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, message: &str) {
        error!("{message}");
    }
}

#[derive(Debug, Default)]
struct InfoState {
    message: Option<String>,
    generation: u64,
}

/// The single transient status message.
///
/// Each `set` replaces the previous message; nothing is queued. With an
/// auto-clear delay, a message is cleared later only if nothing newer replaced it.
#[derive(Debug, Clone, Default)]
pub struct InfoBoard {
    state: Arc<Mutex<InfoState>>,
    clear_after: Option<Duration>,
}

impl InfoBoard {
    pub fn new(clear_after: Option<Duration>) -> Self {
        Self {
            state: Arc::default(),
            clear_after,
        }
    }

    /// Replaces the current message and returns its generation.
    pub fn set(&self, message: impl Into<String>) -> u64 {
        let generation = {
            let mut state = self.state.lock();
            state.generation += 1;
            state.message = Some(message.into());
            state.generation
        };

        if let Some(delay) = self.clear_after {
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    let board = self.clone();
                    handle.spawn(async move {
                        tokio::time::sleep(delay).await;
                        board.clear_if_current(generation);
                    });
                }
                Err(_) => debug!("no runtime; info message will not auto-clear"),
            }
        }
        generation
    }

    pub fn current(&self) -> Option<String> {
        self.state.lock().message.clone()
    }

    /// Clears the message if `generation` is still the latest one.
    pub fn clear_if_current(&self, generation: u64) -> bool {
        let mut state = self.state.lock();
        if state.generation != generation || state.message.is_none() {
            return false;
        }
        state.message = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::InfoBoard;

    #[test]
    fn newer_message_replaces_older() {
        let board = InfoBoard::default();
        assert_eq!(board.current(), None);
        let first = board.set("one");
        let second = board.set("two");
        assert!(second > first);
        assert_eq!(board.current().as_deref(), Some("two"));
    }

    #[test]
    fn stale_clear_keeps_newer_message() {
        let board = InfoBoard::default();
        let first = board.set("one");
        board.set("two");
        assert!(!board.clear_if_current(first));
        assert_eq!(board.current().as_deref(), Some("two"));
    }

    #[test]
    fn no_expiry_by_default() {
        let board = InfoBoard::new(None);
        board.set("stays");
        assert_eq!(board.current().as_deref(), Some("stays"));
    }

    #[tokio::test(start_paused = true)]
    async fn auto_clear_after_delay() {
        let board = InfoBoard::new(Some(Duration::from_secs(5)));
        board.set("fleeting");
        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(board.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn auto_clear_spares_replacement() {
        let board = InfoBoard::new(Some(Duration::from_secs(5)));
        board.set("first");
        tokio::time::sleep(Duration::from_secs(3)).await;
        board.set("second");
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(board.current().as_deref(), Some("second"));
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(board.current(), None);
    }
}
