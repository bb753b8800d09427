#![deny(clippy::all, clippy::pedantic)]
#![deny(missing_docs)]
#![allow(clippy::must_use_candidate)]
//! # tootline
//!
//! tootline is a small client for Mastodon-compatible servers.
//!
//! It can:
//! - register itself and obtain an access token
//! - dump an account's history, page by page
//! - show the home timeline and notifications
//! - show direct-message conversations with their whole reply chain
//! - post and delete statuses
//!
//! While respecting:
//! - a 1.2 second pause between history pages.
//! - one request in flight at a time.
//!
//! ## Example: Printing a reply chain.
//!
//! ```rust,no_run
//! # type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
//! use tootline::extract::ContentExtractor;
//! use tootline::walker::ConversationWalker;
//! use tootline::{Client, Config};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<()> {
//!     let config = Config::from_env("https://social.example")?;
//!     let client = Client::new(&config)?;
//!     let extractor = ContentExtractor::new();
//!
//!     let status = client.status("109876543210").await?;
//!     let walker = ConversationWalker::new(&client, &extractor);
//!     walker.print_thread(&status, &mut std::io::stdout()).await?;
//!     Ok(())
//! }
//! ```

/// Client module contains [`Client`] for talking to a server.
pub mod client;

/// Command-line definitions.
pub mod cli;

/// The operation behind each subcommand.
pub mod commands;

/// Server address and credentials.
pub mod config;

/// Contains [`Error`]s that can be thrown by the library.
///
/// [`Error`]: crate::error::Error
pub mod error;

/// HTML to text conversion for status bodies.
pub mod extract;

/// Line formats for statuses and notifications.
pub mod format;

/// Paged dumps of an account's statuses.
pub mod history;

pub(crate) mod models;

pub(crate) mod result;

/// The [`StatusSource`](crate::source::StatusSource) trait.
pub mod source;

/// Reply-chain traversal.
pub mod walker;

pub use client::Client;
pub use config::Config;
pub use models::*;
pub use result::Result;
