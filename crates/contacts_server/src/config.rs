//! Server configuration.
//!
//! # Responsibility
//! - Define listener, storage, logging and CORS settings.
//! - Parse them from command-line flags with environment fallbacks.

use clap::Parser;
use contacts_core::default_log_level;
use serde::{Deserialize, Serialize};

/// `database` value selecting a throwaway in-memory store.
pub const IN_MEMORY_DATABASE: &str = ":memory:";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATABASE: &str = "contacts.db";

/// Runtime configuration for the contacts HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "127.0.0.1")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 5000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// SQLite file path, or `:memory:` (default: "contacts.db")
    #[serde(default = "default_database")]
    pub database: String,

    /// One of `trace|debug|info|warn|error`
    #[serde(default = "default_level")]
    pub log_level: String,

    /// Absolute directory for rolling log files; stderr when unset
    #[serde(default)]
    pub log_dir: Option<String>,

    /// Allowed CORS origins; any origin when empty
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_database() -> String {
    DEFAULT_DATABASE.to_string()
}

fn default_level() -> String {
    default_log_level().to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database: default_database(),
            log_level: default_level(),
            log_dir: None,
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Config backed by an in-memory database; handy for tests.
    pub fn in_memory() -> Self {
        Self {
            database: IN_MEMORY_DATABASE.to_string(),
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_in_memory(&self) -> bool {
        self.database == IN_MEMORY_DATABASE
    }
}

/// Contacts HTTP service
#[derive(Parser, Debug)]
#[command(name = "contacts-server")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Host to bind to
    #[arg(long, env = "CONTACTS_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "CONTACTS_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// SQLite database file, or `:memory:`
    #[arg(long, env = "CONTACTS_DATABASE", default_value = DEFAULT_DATABASE)]
    pub database: String,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "CONTACTS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files
    #[arg(long, env = "CONTACTS_LOG_DIR")]
    pub log_dir: Option<String>,

    /// Allowed CORS origin; repeat or comma-separate for several
    #[arg(long = "cors-origin", env = "CONTACTS_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,
}

impl From<Cli> for ServerConfig {
    fn from(cli: Cli) -> Self {
        Self {
            host: cli.host,
            port: cli.port,
            database: cli.database,
            log_level: cli.log_level.unwrap_or_else(default_level),
            log_dir: cli.log_dir,
            cors_origins: cli.cors_origins,
        }
    }
}
