//! # tempmail-api
//!
//! Client for mail.tm-compatible disposable mailbox services.
//!
//! ## Features
//!
//! - **Account provisioning**: picks a public domain, registers a random
//!   address and obtains its bearer token in one call
//! - **Inbox access**: list messages and fetch full message bodies
//! - **Typed failures**: a rejected token is always [`Error::Unauthorized`]
//! - **Pluggable**: consumers depend on the [`MailboxService`] trait
//!
//! ## Quick Start
//!
//! ```ignore
//! use tempmail_api::{ClientConfig, MailTmClient, MailboxService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MailTmClient::new(ClientConfig::mail_tm()?)?;
//!
//!     let account = client.create_account().await?;
//!     println!("Your address: {}", account.address);
//!
//!     for message in client.messages(&account.token).await? {
//!         println!("{} - {}", message.from, message.subject);
//!     }
//!
//!     client.delete_account(&account.id, &account.token).await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod client;
pub mod config;
pub mod credentials;
mod error;
pub mod types;

pub use client::{MailTmClient, MailboxService};
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use types::{Account, Address, Domain, Message, MessageDetails};
