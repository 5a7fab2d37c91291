//! Application layer - game service adapter and session coordination

pub mod api;
pub mod error;
pub mod operation;
pub mod services;

// Re-export common types
pub use error::ServiceError;
pub use operation::GameOperation;
