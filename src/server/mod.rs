//! Read-only HTTP API over the catalog.

mod requests_logging;
#[allow(clippy::module_inception)]
mod server;
mod state;

pub use server::{make_app, run_server};
pub use state::{ServerState, SharedSource};
