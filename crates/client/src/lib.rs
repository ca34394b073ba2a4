//! tasktrack_client - CLI client for the tasktrack API.

pub mod cli;
pub mod client;
pub mod error;
pub mod output;

pub use client::TasktrackClient;
pub use error::{ClientError, Result};
