//! Local Storage Config

use std::path::PathBuf;

use clap::Args;

/// Where the CLI keeps state between runs.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// File holding the `token` and `user` session values
    #[arg(long, env = "BENGKEL_SESSION_FILE", default_value = ".bengkel/session.json")]
    pub session_file: PathBuf,

    /// File holding the checkout hand-off items
    #[arg(
        long,
        env = "BENGKEL_CHECKOUT_FILE",
        default_value = ".bengkel/checkout_items.json"
    )]
    pub checkout_file: PathBuf,
}
