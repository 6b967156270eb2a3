use std::time::Duration;

use clap::Parser;
use todo_sync::{SyncConfig, DEFAULT_BASE_URL};

/// Terminal todo list backed by a remote REST collection.
#[derive(Parser, Debug)]
#[command(name = "todo-app")]
pub struct Config {
    /// Base URL of the todo API (the collection lives at `<base>/todos`)
    #[arg(long, env = "TODO_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds; waits forever when unset
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            timeout: self.timeout_secs.map(Duration::from_secs),
            ..SyncConfig::new(&self.base_url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_public_endpoint_without_timeout() {
        let config = Config::try_parse_from(["todo-app"]).unwrap();
        let sync = config.sync_config();
        assert!(sync.timeout.is_none());
        assert!(!config.verbose);
        // The env var may be set wherever the tests run.
        if std::env::var_os("TODO_API_URL").is_none() {
            assert_eq!(sync.base_url, DEFAULT_BASE_URL);
        }
    }

    #[test]
    fn flags_map_onto_sync_config() {
        let config = Config::try_parse_from([
            "todo-app",
            "--base-url",
            "http://127.0.0.1:3000",
            "--timeout-secs",
            "5",
            "-v",
        ])
        .unwrap();
        let sync = config.sync_config();
        assert_eq!(sync.base_url, "http://127.0.0.1:3000");
        assert_eq!(sync.timeout, Some(Duration::from_secs(5)));
        assert!(config.verbose);
    }
}
