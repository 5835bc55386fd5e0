//! # tempmail-core
//!
//! Session and inbox controller for the `tempmail` disposable email client.
//!
//! This crate provides:
//! - Account lifecycle (provision, delete-and-replace)
//! - Inbox synchronization with a recurring poll
//! - Automatic re-provisioning when the session token expires
//! - Immutable state snapshots and notices for a presentation shell
//!
//! ## Example
//!
//! ```ignore
//! use tempmail_api::{ClientConfig, MailTmClient};
//! use tempmail_core::{Controller, ControllerConfig};
//!
//! let service = MailTmClient::new(ClientConfig::mail_tm()?)?;
//! let (controller, mut shell) = Controller::new(service, ControllerConfig::default());
//! tokio::spawn(controller.run());
//!
//! let state = shell.wait_for(|s| !s.splash).await?;
//! println!("{:?}", state.address());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod config;
mod controller;
mod error;
pub mod inbox;
pub mod notice;
mod poll;
mod shell;
mod state;

pub use config::ControllerConfig;
pub use controller::{Action, Controller, Operation, Recovery};
pub use error::{Error, Result, UNKNOWN_ERROR};
pub use notice::{Notice, NoticeKind};
pub use poll::PollHandle;
pub use shell::ShellHandle;
pub use state::{Snapshot, View};

pub use tempmail_api::{Account, Address, MailboxService, Message, MessageDetails};
