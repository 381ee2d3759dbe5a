//! Unix-socket transport for the battery channel.
//!
//! Newline-delimited JSON: one `MethodCall` per line in, one
//! `MethodResponse` per line out.

mod client;
mod server;

pub use client::ChannelClient;
pub use server::{run_server, ServerOptions};
