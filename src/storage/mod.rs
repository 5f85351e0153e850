//! Configuration, import discovery, and ride history persistence.

pub mod config;
pub mod history;
pub mod scan;

pub use config::{load_config, save_config, AppConfig, ConfigError};
pub use history::{HistoricalStore, StoreError};
pub use scan::pending_fit_files;
