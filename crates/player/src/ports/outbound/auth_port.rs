//! Identity provider boundary.
//!
//! The coordinator treats credentials as opaque. It asks for a token before
//! every authenticated call and never caches one; a provider may hand back a
//! stale token and the engine's 401 is what ends the session.

/// Source of the current bearer token.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait::async_trait]
pub trait TokenPort: Send + Sync {
    /// The token to send right now, or `None` when the user is signed out.
    async fn access_token(&self) -> Option<String>;
}

/// Forced sign-out / re-authentication flow.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait SignOutPort: Send + Sync {
    fn sign_out(&self);
}
