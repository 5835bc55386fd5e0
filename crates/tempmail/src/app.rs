//! Terminal front end driving the controller.

use std::time::Duration;

use tempmail_core::{Notice, ShellHandle, Snapshot};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

use crate::command::{Command, HELP};
use crate::view;

enum Event {
    State(tempmail_core::Result<Snapshot>),
    Notice(Result<Notice, broadcast::error::RecvError>),
    Input(std::io::Result<Option<String>>),
    AddressExpired,
}

/// Reads commands from stdin, prints screens and notices.
pub struct App {
    handle: ShellHandle,
    notices: broadcast::Receiver<Notice>,
    address_ttl: Duration,
    desktop_notifications: bool,
    /// Last screen printed, to skip redundant redraws.
    last_screen: String,
    /// Account the address timer was started for.
    timed_account: Option<String>,
    address_deadline: Option<Instant>,
}

impl App {
    /// Creates the front end.
    pub fn new(handle: ShellHandle, address_ttl: Duration, desktop_notifications: bool) -> Self {
        let notices = handle.subscribe_notices();
        Self {
            handle,
            notices,
            address_ttl,
            desktop_notifications,
            last_screen: String::new(),
            timed_account: None,
            address_deadline: None,
        }
    }

    /// Runs until `q`, end of input, or the controller stops.
    pub async fn run(mut self) {
        let mut input = BufReader::new(tokio::io::stdin()).lines();
        let initial = self.handle.snapshot();
        self.render(&initial);

        loop {
            let deadline = self.address_deadline;
            let event = tokio::select! {
                state = self.handle.changed() => Event::State(state),
                notice = self.notices.recv() => Event::Notice(notice),
                line = input.next_line() => Event::Input(line),
                () = address_expiry(deadline) => Event::AddressExpired,
            };

            match event {
                Event::State(Ok(snapshot)) => self.on_state(&snapshot),
                Event::State(Err(_)) => {
                    info!("controller stopped");
                    break;
                }
                Event::Notice(Ok(notice)) => self.on_notice(&notice),
                Event::Notice(Err(broadcast::error::RecvError::Lagged(skipped))) => {
                    debug!(skipped, "notices skipped");
                }
                Event::Notice(Err(broadcast::error::RecvError::Closed)) => break,
                Event::Input(Ok(Some(line))) => {
                    if !self.on_line(&line).await {
                        break;
                    }
                }
                Event::Input(Ok(None)) => {
                    self.quit().await;
                    break;
                }
                Event::Input(Err(e)) => {
                    warn!("Failed to read input: {}", e);
                    self.quit().await;
                    break;
                }
                Event::AddressExpired => {
                    self.address_deadline = None;
                    if self.handle.notify_timer_expired().await.is_err() {
                        break;
                    }
                }
            }
        }
    }

    fn on_state(&mut self, snapshot: &Snapshot) {
        let account_id = snapshot.account.as_ref().map(|a| a.id.clone());
        if account_id.is_some() && account_id != self.timed_account {
            self.address_deadline = Some(Instant::now() + self.address_ttl);
            self.timed_account = account_id;
        }
        self.render(snapshot);
    }

    fn render(&mut self, snapshot: &Snapshot) {
        let screen = view::view_screen(snapshot);
        if screen != self.last_screen {
            println!("\n{screen}");
            self.last_screen = screen;
        }
    }

    fn on_notice(&self, notice: &Notice) {
        println!("{}", view::view_notice(notice));
        if self.desktop_notifications {
            show_desktop_notification(notice.text.clone());
        }
    }

    /// Handles one input line. Returns false when the app should exit.
    async fn on_line(&self, line: &str) -> bool {
        let Some(command) = Command::parse(line) else {
            return true;
        };
        debug!(?command, "command");

        let sent = match command {
            Command::NewAccount => self.handle.request_new_account().await,
            Command::DeleteAndNew => self.handle.request_delete_and_new().await,
            Command::Refresh => self.handle.request_refresh().await,
            Command::Open(target) => match target.resolve(&self.handle.snapshot()) {
                Some(id) => self.handle.request_open(id).await,
                None => {
                    println!("No such message. Use a number from the list.");
                    Ok(())
                }
            },
            Command::Back => self.handle.request_go_home().await,
            Command::Copy => match self.handle.snapshot().address() {
                Some(address) => {
                    println!("{address}");
                    self.handle.notify_copied().await
                }
                None => {
                    println!("No address yet.");
                    Ok(())
                }
            },
            Command::Help => {
                println!("{HELP}");
                Ok(())
            }
            Command::Quit => {
                self.quit().await;
                return false;
            }
            Command::Unknown(input) => {
                println!("Unknown command: {input} (h for help)");
                Ok(())
            }
        };
        sent.is_ok()
    }

    async fn quit(&self) {
        if self.handle.shutdown().await.is_err() {
            debug!("controller already stopped");
        }
    }
}

async fn address_expiry(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Mirrors a notice as a desktop notification, off the async runtime.
fn show_desktop_notification(text: String) {
    tokio::task::spawn_blocking(move || {
        if let Err(e) = notify_rust::Notification::new()
            .summary("tempmail")
            .body(&text)
            .show()
        {
            warn!("Failed to show desktop notification: {}", e);
        }
    });
}
