//! Client configuration module

use clap::Args;

pub mod api;
pub mod logging;
pub mod storage;

pub use api::{ApiConfig, DEFAULT_API_URL};
pub use logging::{LogFormat, LoggingConfig};
pub use storage::StorageConfig;

/// Bengkel client configuration, read from flags, the environment and `.env`.
#[derive(Debug, Args)]
pub struct ClientConfig {
    /// Remote API settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Local state files.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        config: ClientConfig,
    }

    #[test]
    fn flags_override_defaults() -> TestResult {
        let harness = Harness::try_parse_from([
            "bengkel",
            "--api-url",
            "http://localhost:8000/api",
            "--session-file",
            "/tmp/bengkel/session.json",
            "--log-format",
            "json",
        ])?;

        assert_eq!(harness.config.api.api_url, "http://localhost:8000/api");
        assert_eq!(
            harness.config.storage.session_file,
            Path::new("/tmp/bengkel/session.json")
        );
        assert_eq!(harness.config.logging.log_format, LogFormat::Json);

        Ok(())
    }

    #[test]
    fn unknown_log_formats_are_rejected() {
        let result = Harness::try_parse_from(["bengkel", "--log-format", "pretty"]);

        assert!(result.is_err());
    }
}
