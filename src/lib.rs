//! This is the library of the review relay, which pokes the reviewers of a pull
//! request on Slack whenever a new build of its branch is available.
pub mod config;
pub mod error;
pub mod github;
pub mod relay;
pub mod reviewers;
pub mod server;
pub mod slack;

pub use config::{BrandingConfig, RelayConfig};
pub use error::{RelayError, RelayResult};
pub use relay::ReviewRelay;
pub use server::{create_app, create_relay_process, RelayProcess, ServerState};

#[cfg(test)]
mod tests;
