//! geotogether API — authentication, system discovery and live data.

pub mod client;
pub mod error;
pub mod system;
pub mod token;
pub mod types;

pub use client::{GeoClient, DEFAULT_BASE_URL};
pub use error::{ApiError, TokenError};
pub use system::resolve_system;
pub use token::{ensure_token, AccessToken, Credentials, REFRESH_MARGIN};
pub use types::{LiveDataSnapshot, PowerReading, SystemId};
