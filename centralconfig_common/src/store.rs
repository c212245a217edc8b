use futures_channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use futures_util::StreamExt;
use log::{debug, warn};
use std::sync::Arc;
use time::OffsetDateTime;

use crate::{
    api_utils::NotificationSink,
    errors::ConfigError as Error,
    snapshot::{ConfigPayload, ConfigSnapshot},
};

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigAction {
    ReceiveConfigItems(ConfigPayload),
}

/// Cloneable handle used to send actions to the [`ConfigStore`].
#[derive(Clone, Debug)]
pub struct ActionDispatcher {
    send: UnboundedSender<ConfigAction>,
}

impl ActionDispatcher {
    /// # Errors
    /// Returns error if the store has stopped
    pub fn dispatch(&self, action: ConfigAction) -> Result<(), Error> {
        self.send
            .unbounded_send(action)
            .map_err(|_| Error::StoreClosed)
    }
}

impl NotificationSink for ActionDispatcher {
    fn deliver(&self, payload: ConfigPayload) {
        if let Err(e) = self.dispatch(ConfigAction::ReceiveConfigItems(payload)) {
            warn!("dropping config items: {e}");
        }
    }
}

pub type SnapshotReceiver = UnboundedReceiver<Arc<ConfigSnapshot>>;

/// Single owner of the config state.
///
/// Actions come in through [`ActionDispatcher`]s, every applied action
/// produces a new immutable snapshot which is pushed to all subscribers.
pub struct ConfigStore {
    recv: UnboundedReceiver<ConfigAction>,
    state: Arc<ConfigSnapshot>,
    subscribers: Vec<UnboundedSender<Arc<ConfigSnapshot>>>,
}

impl ConfigStore {
    #[must_use]
    pub fn new() -> (Self, ActionDispatcher) {
        let (send, recv) = unbounded();
        let store = Self {
            recv,
            state: Arc::new(ConfigSnapshot::default()),
            subscribers: Vec::new(),
        };
        (store, ActionDispatcher { send })
    }

    /// The receiver gets the current snapshot right away, then every update.
    pub fn subscribe(&mut self) -> SnapshotReceiver {
        let (send, recv) = unbounded();
        if send.unbounded_send(self.state.clone()).is_ok() {
            self.subscribers.push(send);
        }
        recv
    }

    #[must_use]
    pub fn snapshot(&self) -> Arc<ConfigSnapshot> {
        self.state.clone()
    }

    pub fn apply(&mut self, action: ConfigAction) -> Arc<ConfigSnapshot> {
        let next = match action {
            ConfigAction::ReceiveConfigItems(payload) => ConfigSnapshot {
                version: self.state.version + 1,
                payload: Some(payload),
                updated: Some(OffsetDateTime::now_utc()),
            },
        };
        self.state = Arc::new(next);
        self.publish();
        self.state.clone()
    }

    fn publish(&mut self) {
        let state = &self.state;
        self.subscribers
            .retain(|s| s.unbounded_send(state.clone()).is_ok());
        debug!(
            "published version {} to {} subscribers",
            state.version,
            self.subscribers.len()
        );
    }

    /// Process actions until every dispatcher has been dropped.
    pub async fn run(mut self) -> Arc<ConfigSnapshot> {
        while let Some(action) = self.recv.next().await {
            self.apply(action);
        }
        self.state
    }
}
