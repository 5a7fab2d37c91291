//! In-memory bearer token holder.
//!
//! Stands in for the identity provider's session: the runner seeds it from
//! `UDH_ACCESS_TOKEN` or a `login` command, and sign-out clears it.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::ports::outbound::TokenPort;

pub const ACCESS_TOKEN_ENV: &str = "UDH_ACCESS_TOKEN";

#[derive(Debug, Default)]
pub struct TokenStore {
    token: RwLock<Option<String>>,
}

impl TokenStore {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(normalize(token)),
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var(ACCESS_TOKEN_ENV).ok())
    }

    pub fn set(&self, token: impl Into<String>) {
        let token = normalize(Some(token.into()));
        *self.token.write().unwrap_or_else(|p| p.into_inner()) = token;
    }

    pub fn clear(&self) {
        *self.token.write().unwrap_or_else(|p| p.into_inner()) = None;
    }

    pub fn current(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }
}

fn normalize(token: Option<String>) -> Option<String> {
    token
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

#[async_trait]
impl TokenPort for TokenStore {
    async fn access_token(&self) -> Option<String> {
        self.current()
    }
}
