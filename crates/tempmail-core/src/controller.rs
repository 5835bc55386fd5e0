//! Session and inbox controller.
//!
//! The controller owns the single disposable account, its inbox, the
//! recurring poll and every recovery decision. It runs as one task: user
//! actions, poll ticks and notice expiry are handled one at a time, so no
//! two remote calls are ever in flight together. State changes are published
//! as [`Snapshot`]s; notices are additionally broadcast in order.

use tempmail_api::{Account, MailboxService};
use tokio::sync::{broadcast, mpsc, watch};
use tokio::time::{Instant, sleep, sleep_until};
use tracing::{debug, error, info, warn};

use crate::config::ControllerConfig;
use crate::error::Error;
use crate::inbox::{new_message_count, sort_newest_first};
use crate::notice::{self, Notice, NoticeKind};
use crate::poll::PollHandle;
use crate::shell::ShellHandle;
use crate::state::{Snapshot, View};

const ACTION_QUEUE_CAPACITY: usize = 32;
const NOTICE_QUEUE_CAPACITY: usize = 64;

/// Requests the shell sends to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Provision a new address, keeping the old account alive on the server.
    NewAccount,
    /// Delete the held account, then provision a new one.
    DeleteAndNew,
    /// Synchronize the inbox now.
    Refresh,
    /// Open a message by id.
    Open(String),
    /// Leave the message view.
    GoHome,
    /// The shell copied the address.
    Copied,
    /// The shell's address countdown ran out.
    TimerExpired,
    /// Stop the controller.
    Shutdown,
}

/// Remote operation a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Account creation.
    Provision,
    /// Inbox listing.
    Synchronize,
    /// Message detail fetch.
    OpenMessage,
}

impl Operation {
    /// Returns true for operations authenticated with the held token.
    #[must_use]
    pub const fn is_inbox(self) -> bool {
        matches!(self, Self::Synchronize | Self::OpenMessage)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Provision => "provision",
            Self::Synchronize => "synchronize",
            Self::OpenMessage => "open message",
        })
    }
}

/// What the error handler wants done after a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Nothing; the failure was reported.
    None,
    /// Replace the held account (its token is no longer valid).
    Reprovision,
}

enum Event {
    Action(Option<Action>),
    Poll,
    NoticeExpired,
}

/// Owns the account lifecycle and inbox synchronization.
pub struct Controller<S> {
    service: S,
    config: ControllerConfig,
    state: Snapshot,
    poll: PollHandle,
    /// Account the last immediate synchronization ran for.
    polled_account: Option<String>,
    notice_deadline: Option<Instant>,
    notice_seq: u64,
    actions: mpsc::Receiver<Action>,
    state_tx: watch::Sender<Snapshot>,
    notice_tx: broadcast::Sender<Notice>,
}

impl<S> std::fmt::Debug for Controller<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("poll", &self.poll)
            .finish_non_exhaustive()
    }
}

impl<S: MailboxService> Controller<S> {
    /// Creates a controller and the handle the shell drives it with.
    #[must_use]
    pub fn new(service: S, config: ControllerConfig) -> (Self, ShellHandle) {
        let (action_tx, actions) = mpsc::channel(ACTION_QUEUE_CAPACITY);
        let (state_tx, state_rx) = watch::channel(Snapshot::default());
        let (notice_tx, _) = broadcast::channel(NOTICE_QUEUE_CAPACITY);

        let handle = ShellHandle::new(action_tx, state_rx, notice_tx.clone());
        let controller = Self {
            service,
            config,
            state: Snapshot::default(),
            poll: PollHandle::new(),
            polled_account: None,
            notice_deadline: None,
            notice_seq: 0,
            actions,
            state_tx,
            notice_tx,
        };
        (controller, handle)
    }

    /// Current state.
    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.state
    }

    /// Subscribes to notices, in the order they are raised.
    #[must_use]
    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.notice_tx.subscribe()
    }

    /// Returns true if a recurring poll is active.
    #[must_use]
    pub const fn is_polling(&self) -> bool {
        self.poll.is_armed()
    }

    /// Runs the controller until every shell handle is dropped or
    /// [`Action::Shutdown`] arrives.
    ///
    /// Waits out the splash delay, provisions the first account, dismisses the
    /// splash, then serves actions and poll ticks. Actions sent during the
    /// splash are queued.
    pub async fn run(mut self) {
        sleep(self.config.splash_delay).await;
        self.provision(false).await;
        self.state.splash = false;
        self.publish();
        info!("splash dismissed");

        loop {
            self.ensure_polling().await;

            let deadline = self.notice_deadline;
            let event = tokio::select! {
                action = self.actions.recv() => Event::Action(action),
                () = self.poll.tick() => Event::Poll,
                () = notice_expiry(deadline) => Event::NoticeExpired,
            };

            match event {
                Event::Action(None | Some(Action::Shutdown)) => break,
                Event::Action(Some(action)) => self.dispatch(action).await,
                Event::Poll => {
                    debug!("poll tick");
                    self.synchronize().await;
                }
                Event::NoticeExpired => self.dismiss_notice(),
            }
        }

        self.teardown();
    }

    /// Handles one shell action.
    pub async fn dispatch(&mut self, action: Action) {
        debug!(?action, "action");
        match action {
            Action::NewAccount => self.provision(false).await,
            Action::DeleteAndNew => self.provision(true).await,
            Action::Refresh => self.synchronize().await,
            Action::Open(id) => self.open_message(&id).await,
            Action::GoHome => self.return_home().await,
            Action::Copied => self.notify(NoticeKind::Success, notice::COPIED),
            Action::TimerExpired => self.notify(NoticeKind::Error, notice::TIMER_EXPIRED),
            Action::Shutdown => self.teardown(),
        }
    }

    /// Replaces the held account with a freshly created one.
    ///
    /// The poll is cancelled before any remote call. With `force_delete`, the
    /// held account is deleted first; a failed deletion is logged and
    /// ignored. `loading` (and `deleting`) are cleared on every exit.
    pub async fn provision(&mut self, force_delete: bool) {
        self.poll.disarm();
        self.state.loading = true;
        self.state.deleting = force_delete;
        self.publish();

        if force_delete && let Some(account) = self.state.account.as_ref() {
            if let Err(e) = self
                .service
                .delete_account(&account.id, &account.token)
                .await
            {
                warn!(
                    address = %account.address,
                    error = %e,
                    "could not delete previous account, proceeding with new one"
                );
            }
        }

        match self.service.create_account().await {
            Ok(account) => self.replace_account(account, force_delete),
            Err(e) => {
                self.handle_error(&Error::from_provision(e), Operation::Provision);
            }
        }

        self.state.loading = false;
        self.state.deleting = false;
        self.publish();
    }

    /// Refreshes the inbox of the held account.
    ///
    /// Does nothing without an account. Reports how many messages arrived
    /// since the previous synchronization.
    pub async fn synchronize(&mut self) {
        let Some(token) = self
            .state
            .account
            .as_ref()
            .filter(|account| account.has_token())
            .map(|account| account.token.clone())
        else {
            return;
        };

        match self.service.messages(&token).await {
            Ok(mut messages) => {
                let arrived = new_message_count(self.state.messages.len(), messages.len());
                if arrived > 0 {
                    info!(arrived, "new messages");
                    self.notify(NoticeKind::Success, notice::new_messages(arrived));
                }
                sort_newest_first(&mut messages);
                self.state.messages = messages;
                self.publish();
            }
            Err(e) => self.recover(Error::from(e), Operation::Synchronize).await,
        }
    }

    /// Fetches a message and switches to the details view.
    pub async fn open_message(&mut self, id: &str) {
        let Some(token) = self.state.account.as_ref().map(|a| a.token.clone()) else {
            return;
        };

        self.state.loading = true;
        self.publish();
        let result = self.service.message(id, &token).await;
        self.state.loading = false;

        match result {
            Ok(details) => {
                self.state.selected = Some(details);
                self.state.view = View::Details;
                self.publish();
            }
            Err(e) => {
                self.publish();
                self.recover(Error::from(e), Operation::OpenMessage).await;
            }
        }
    }

    /// Leaves the message view and refreshes the inbox immediately.
    pub async fn return_home(&mut self) {
        self.state.selected = None;
        self.state.view = View::Home;
        self.publish();
        self.synchronize().await;
    }

    /// Reports a failure and decides whether the account must be replaced.
    ///
    /// Only an authentication failure on an inbox operation asks for
    /// re-provisioning; everything else becomes an error notice.
    pub fn handle_error(&mut self, error: &Error, operation: Operation) -> Recovery {
        error!(%operation, %error, "{operation} error");
        match error {
            Error::AuthExpired if operation.is_inbox() => {
                self.notify(NoticeKind::Error, notice::SESSION_EXPIRED);
                Recovery::Reprovision
            }
            other => {
                self.notify(NoticeKind::Error, other.user_message());
                Recovery::None
            }
        }
    }

    async fn recover(&mut self, error: Error, operation: Operation) {
        if self.handle_error(&error, operation) == Recovery::Reprovision {
            self.provision(true).await;
        }
    }

    fn replace_account(&mut self, account: Account, replaced: bool) {
        info!(address = %account.address, replaced, "account provisioned");
        self.state.account = Some(account);
        self.state.messages.clear();
        let text = if replaced {
            notice::ACCOUNT_REPLACED
        } else {
            notice::ACCOUNT_CREATED
        };
        self.notify(NoticeKind::Success, text);
    }

    /// Arms the poll once an account is held and none is active.
    ///
    /// A newly held account is synchronized immediately; re-arming for the
    /// same account (after a failed re-provisioning) waits one period.
    /// Returns only once the poll matches the held account, since the
    /// immediate synchronization may itself replace the account.
    async fn ensure_polling(&mut self) {
        loop {
            let Some(account_id) = self.state.account.as_ref().map(|a| a.id.clone()) else {
                if self.poll.disarm() {
                    self.publish();
                }
                return;
            };

            if self.poll.account_id() == Some(account_id.as_str()) {
                return;
            }

            let fresh = self.polled_account.as_deref() != Some(account_id.as_str());
            self.poll.arm(account_id.clone(), self.config.poll_interval);
            self.polled_account = Some(account_id);
            debug!(fresh, "poll armed");
            self.publish();

            if !fresh {
                return;
            }
            self.synchronize().await;
        }
    }

    fn notify(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.notice_seq += 1;
        let notice = Notice {
            seq: self.notice_seq,
            text: text.into(),
            kind,
        };
        self.notice_deadline = Some(Instant::now() + self.config.notice_ttl);
        self.state.notice = Some(notice.clone());
        // No subscribers is fine; the snapshot still carries the notice.
        let _ = self.notice_tx.send(notice);
        self.publish();
    }

    fn dismiss_notice(&mut self) {
        self.notice_deadline = None;
        if self.state.notice.take().is_some() {
            self.publish();
        }
    }

    fn teardown(&mut self) {
        if self.poll.disarm() {
            info!("poll cancelled on shutdown");
        }
        self.publish();
    }

    fn publish(&mut self) {
        self.state.polling = self.poll.is_armed();
        self.state_tx.send_replace(self.state.clone());
    }
}

async fn notice_expiry(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
