//! API Config

use clap::Args;

/// Production API the storefront talks to.
pub const DEFAULT_API_URL: &str = "https://tekweb-uas-production.up.railway.app/api";

/// Remote API settings.
#[derive(Debug, Args)]
pub struct ApiConfig {
    /// Base URL of the Bengkel REST API
    #[arg(long, env = "BENGKEL_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
}
