//! # Warden Core
//!
//! Shared foundation for the Warden trigger engine:
//! - Configuration (TOML, serde defaults)
//! - Error taxonomy
//! - Frequency grammar ("1h", "30m", "webhook")
//! - Engine types: task definitions, time windows, dispatch requests
//! - Trait seams: `AgentRunner`, `Tool`

pub mod config;
pub mod error;
pub mod frequency;
pub mod traits;
pub mod types;

pub use config::WardenConfig;
pub use error::{Result, WardenError};
pub use frequency::FrequencySpec;
pub use types::{DispatchOrigin, DispatchRequest, TaskDefinition, TimeWindow};
