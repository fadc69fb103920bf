//! Online/offline signal.

use tokio::sync::watch;

/// Source of the environment's connectivity state
pub trait Connectivity: Send + Sync {
    fn is_online(&self) -> bool;

    /// Receiver that observes every change of the online flag
    fn subscribe(&self) -> watch::Receiver<bool>;
}

/// Connectivity flag driven explicitly by the embedding application
#[derive(Debug)]
pub struct ManualConnectivity {
    sender: watch::Sender<bool>,
}

impl ManualConnectivity {
    #[must_use]
    pub fn new(online: bool) -> Self {
        let (sender, _) = watch::channel(online);
        Self { sender }
    }

    #[must_use]
    pub fn online() -> Self {
        Self::new(true)
    }

    #[must_use]
    pub fn offline() -> Self {
        Self::new(false)
    }

    /// Update the flag; subscribers are only woken on an actual change
    pub fn set_online(&self, online: bool) {
        self.sender.send_if_modified(|current| {
            if *current == online {
                return false;
            }
            tracing::info!("Connectivity changed: {}", if online { "online" } else { "offline" });
            *current = online;
            true
        });
    }
}

impl Default for ManualConnectivity {
    fn default() -> Self {
        Self::online()
    }
}

impl Connectivity for ManualConnectivity {
    fn is_online(&self) -> bool {
        *self.sender.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_see_changes() {
        let connectivity = ManualConnectivity::online();
        let mut receiver = connectivity.subscribe();
        assert!(connectivity.is_online());

        connectivity.set_online(false);
        receiver.changed().await.unwrap();
        assert!(!*receiver.borrow_and_update());
        assert!(!connectivity.is_online());
    }

    #[test]
    fn setting_same_value_does_not_notify() {
        let connectivity = ManualConnectivity::offline();
        let receiver = connectivity.subscribe();

        connectivity.set_online(false);
        assert!(!receiver.has_changed().unwrap());
    }
}
