pub mod config;
pub mod contact;
pub mod content;
pub mod error;
pub mod viewport;

pub use config::{AppConfig, EasingType, ScrollConfig};
pub use content::{ContentStore, Portfolio};
pub use error::{Error, Result};
