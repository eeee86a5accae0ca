pub mod config;

pub use config::{ChainConfig, ConfigError, MAINNET_CONFIG};
