//! Handle the presentation shell uses to drive the controller.

use tokio::sync::{broadcast, mpsc, watch};

use crate::controller::Action;
use crate::error::{Error, Result};
use crate::notice::Notice;
use crate::state::Snapshot;

/// The shell's side of the controller: action entry points plus read-only
/// state.
///
/// Cloning is cheap. The controller stops once every handle is dropped.
#[derive(Debug, Clone)]
pub struct ShellHandle {
    actions: mpsc::Sender<Action>,
    state: watch::Receiver<Snapshot>,
    notices: broadcast::Sender<Notice>,
}

impl ShellHandle {
    pub(crate) const fn new(
        actions: mpsc::Sender<Action>,
        state: watch::Receiver<Snapshot>,
        notices: broadcast::Sender<Notice>,
    ) -> Self {
        Self {
            actions,
            state,
            notices,
        }
    }

    /// Asks for a new address (the old account is left on the server).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] if the controller has stopped.
    pub async fn request_new_account(&self) -> Result<()> {
        self.send(Action::NewAccount).await
    }

    /// Asks to delete the held account and provision a new one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] if the controller has stopped.
    pub async fn request_delete_and_new(&self) -> Result<()> {
        self.send(Action::DeleteAndNew).await
    }

    /// Asks for an immediate inbox refresh.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] if the controller has stopped.
    pub async fn request_refresh(&self) -> Result<()> {
        self.send(Action::Refresh).await
    }

    /// Asks to open a message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] if the controller has stopped.
    pub async fn request_open(&self, id: impl Into<String>) -> Result<()> {
        self.send(Action::Open(id.into())).await
    }

    /// Asks to leave the message view.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] if the controller has stopped.
    pub async fn request_go_home(&self) -> Result<()> {
        self.send(Action::GoHome).await
    }

    /// Reports that the address was copied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] if the controller has stopped.
    pub async fn notify_copied(&self) -> Result<()> {
        self.send(Action::Copied).await
    }

    /// Reports that the address countdown ran out.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] if the controller has stopped.
    pub async fn notify_timer_expired(&self) -> Result<()> {
        self.send(Action::TimerExpired).await
    }

    /// Asks the controller to stop.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] if the controller has already stopped.
    pub async fn shutdown(&self) -> Result<()> {
        self.send(Action::Shutdown).await
    }

    /// Latest published state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.state.borrow().clone()
    }

    /// Waits until a new state is published and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] once the controller is gone.
    pub async fn changed(&mut self) -> Result<Snapshot> {
        self.state.changed().await.map_err(|_| Error::Closed)?;
        Ok(self.state.borrow_and_update().clone())
    }

    /// Waits until the state satisfies `predicate` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] if the controller stops first.
    pub async fn wait_for(&mut self, predicate: impl FnMut(&Snapshot) -> bool) -> Result<Snapshot> {
        let state = self
            .state
            .wait_for(predicate)
            .await
            .map_err(|_| Error::Closed)?;
        Ok(state.clone())
    }

    /// Subscribes to notices, in the order they are raised.
    #[must_use]
    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    async fn send(&self, action: Action) -> Result<()> {
        self.actions.send(action).await.map_err(|_| Error::Closed)
    }
}
