//! Forced sign-out after the engine rejects our credentials
//!
//! The transport calls [`SessionTeardown::handle_unauthorized`] synchronously
//! on every 401, before the failure is returned to the caller. State is
//! cleared at once; the external sign-out runs after a short delay so the
//! notification can be seen.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use udh_domain::Notification;

use crate::messages;
use crate::ports::outbound::{SignOutPort, UnauthorizedHandler};
use crate::state::GameStateStore;

#[derive(Clone)]
pub struct SessionTeardown {
    state: GameStateStore,
    sign_out: Arc<dyn SignOutPort>,
    delay: Duration,
    /// Set while a sign-out is scheduled so overlapping 401s sign out once
    pending: Arc<AtomicBool>,
}

impl SessionTeardown {
    pub fn new(state: GameStateStore, sign_out: Arc<dyn SignOutPort>, delay: Duration) -> Self {
        Self {
            state,
            sign_out,
            delay,
            pending: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn state(&self) -> &GameStateStore {
        &self.state
    }

    pub fn handle_unauthorized(&self) {
        let delay_ms = u64::try_from(self.delay.as_millis()).unwrap_or(u64::MAX);
        tracing::warn!(delay_ms, "Session rejected, signing out");

        self.state.update(|s| {
            s.game_data = None;
            s.game_info = None;
            s.notification = Some(Notification::error(messages::SESSION_EXPIRED));
        });

        if self.pending.swap(true, Ordering::SeqCst) {
            tracing::debug!("Sign-out already scheduled");
            return;
        }

        let sign_out = Arc::clone(&self.sign_out);
        let pending = PendingReset(Arc::clone(&self.pending));
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let delay = self.delay;
                // A task dropped by runtime shutdown still clears the flag.
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    drop(pending);
                    sign_out.sign_out();
                });
            }
            Err(_) => {
                drop(pending);
                sign_out.sign_out();
            }
        }
    }

    /// Handler to install on the transport client.
    pub fn handler(&self) -> UnauthorizedHandler {
        let teardown = self.clone();
        Arc::new(move || teardown.handle_unauthorized())
    }
}

/// Clears the scheduled flag when dropped.
struct PendingReset(Arc<AtomicBool>);

impl Drop for PendingReset {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
