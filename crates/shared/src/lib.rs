pub mod auth;
pub mod config;
pub mod response;
pub mod telemetry;

pub use auth::*;
pub use config::*;
pub use response::*;
pub use telemetry::*;
