//! Load states and the "still mounted" guard shared by every view model.

use std::sync::Arc;

use tokio::sync::watch;

/// Progress of a view's data load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState<T> {
    /// A request is in flight.
    #[default]
    Loading,
    /// Data arrived.
    Ready(T),
    /// The request failed; the message is shown as is.
    Failed(String),
}

impl<T> LoadState<T> {
    /// Whether a request is in flight.
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Borrow the loaded value, if any.
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Loading | Self::Failed(_) => None,
        }
    }
}

/// Tracks whether the view that started a request is still mounted.
///
/// Requests are never cancelled; their results are simply dropped once the
/// scope is closed. Clones share the same flag.
#[derive(Debug, Clone)]
pub struct ViewScope {
    active: Arc<watch::Sender<bool>>,
}

impl ViewScope {
    /// An open scope.
    pub fn new() -> Self {
        let (active, _) = watch::channel(true);
        Self {
            active: Arc::new(active),
        }
    }

    /// Whether results should still be applied.
    pub fn is_active(&self) -> bool {
        *self.active.borrow()
    }

    /// Mark the view as unmounted.
    pub fn close(&self) {
        self.active.send_replace(false);
    }

    /// Resolve once the scope has been closed.
    pub async fn closed(&self) {
        let mut receiver = self.active.subscribe();
        // The sender lives in `self`, so waiting cannot fail.
        drop(receiver.wait_for(|active| !*active).await);
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use std::time::Duration;

    #[test]
    fn clones_share_the_flag() {
        let scope = ViewScope::new();
        let renderer = scope.clone();
        assert!(scope.is_active());
        renderer.close();
        assert!(!scope.is_active());
    }

    #[tokio::test]
    async fn closed_resolves_after_close() {
        let scope = ViewScope::new();
        let closer = scope.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            closer.close();
        });
        tokio::time::timeout(Duration::from_secs(1), scope.closed())
            .await
            .expect("scope closes");
    }

    #[test]
    fn ready_exposes_only_loaded_values() {
        assert_eq!(LoadState::Ready(3).ready(), Some(&3));
        assert_eq!(LoadState::<u8>::Loading.ready(), None);
        assert!(LoadState::<u8>::default().is_loading());
        assert_eq!(LoadState::<u8>::Failed("boom".to_owned()).ready(), None);
    }
}
