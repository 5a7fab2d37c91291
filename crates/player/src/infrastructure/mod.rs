//! Infrastructure adapters: HTTP transport, configuration, credentials.

pub mod config;
pub mod http_client;
pub mod sign_out;
pub mod token_store;

pub use config::{ApiConfig, ConfigError, CoordinatorConfig};
pub use http_client::HttpClient;
pub use sign_out::TerminalSignOut;
pub use token_store::TokenStore;
