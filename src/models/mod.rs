pub mod config;
pub mod params;

pub use config::{AppConfig, ServerConfig};
pub use params::ProcessingParams;
