//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing the game service and session coordinator to talk to the engine,
//! the identity provider and the sign-out flow without depending on concrete
//! implementations.

pub mod api_error;
pub mod auth_port;
pub mod raw_api_port;

pub use api_error::{ApiError, ApiErrorKind};
pub use auth_port::{SignOutPort, TokenPort};
pub use raw_api_port::{ApiRequest, HttpMethod, RawApiPort, UnauthorizedHandler};

#[cfg(any(test, feature = "testing"))]
pub use auth_port::{MockSignOutPort, MockTokenPort};
#[cfg(any(test, feature = "testing"))]
pub use raw_api_port::MockRawApiPort;
