//! Sign-out adapter for the terminal runner.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::infrastructure::token_store::TokenStore;
use crate::ports::outbound::SignOutPort;

/// Drops the stored credential and flags the runner to prompt for a new one.
pub struct TerminalSignOut {
    tokens: Arc<TokenStore>,
    signed_out: AtomicBool,
}

impl TerminalSignOut {
    pub fn new(tokens: Arc<TokenStore>) -> Self {
        Self {
            tokens,
            signed_out: AtomicBool::new(false),
        }
    }

    /// True once after each forced sign-out.
    pub fn take_signed_out(&self) -> bool {
        self.signed_out.swap(false, Ordering::SeqCst)
    }
}

impl SignOutPort for TerminalSignOut {
    fn sign_out(&self) {
        self.tokens.clear();
        self.signed_out.store(true, Ordering::SeqCst);
        tracing::info!("Signed out; waiting for a new access token");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_out_clears_token_and_flags_once() {
        let tokens = Arc::new(TokenStore::new(Some("tok".into())));
        let sign_out = TerminalSignOut::new(tokens.clone());

        sign_out.sign_out();

        assert_eq!(tokens.current(), None);
        assert!(sign_out.take_signed_out());
        assert!(!sign_out.take_signed_out());
    }
}
