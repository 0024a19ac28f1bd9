use crate::api::types::{Plan, UserProfile};
use ahash::AHashMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// Services whose tasks need the user's OAuth token.
pub const OAUTH_SERVICES: &[&str] = &["github", "google"];

/// Placeholder token sent for services that do not use OAuth.
pub const NO_TOKEN: &str = "no-token";

/// OAuth tokens of the signed-in user, keyed by service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceTokens {
    tokens: AHashMap<String, String>,
}

impl ServiceTokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_profile(profile: &UserProfile) -> Self {
        let mut tokens = Self::new();
        if let Some(token) = &profile.token {
            if let Some(t) = token.github_token.as_ref().and_then(|g| g.hashed_token.clone()) {
                tokens.insert("github", t);
            }
            if let Some(t) = token.google_token.as_ref().and_then(|g| g.access_token.clone()) {
                tokens.insert("google", t);
            }
        }
        tokens
    }

    pub fn insert(&mut self, service: impl Into<String>, token: impl Into<String>) {
        self.tokens.insert(service.into(), token.into());
    }

    /// The token to send for `service`.
    ///
    /// OAuth services need a non-empty stored token; every other service gets
    /// [`NO_TOKEN`].
    pub fn get(&self, service: &str) -> Option<&str> {
        if OAUTH_SERVICES.contains(&service) {
            self.tokens
                .get(service)
                .map(String::as_str)
                .filter(|t| !t.is_empty())
        } else {
            Some(NO_TOKEN)
        }
    }

    /// OAuth services the user has connected, in [`OAUTH_SERVICES`] order.
    pub fn connected(&self) -> Vec<&'static str> {
        OAUTH_SERVICES
            .iter()
            .copied()
            .filter(|s| self.get(s).is_some())
            .collect()
    }
}

/// Who a task is compiled for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountContext {
    pub user_id: u64,
    pub plan: Plan,
    pub tokens: ServiceTokens,
}

impl AccountContext {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            user_id: profile.id,
            plan: profile.plan.clone(),
            tokens: ServiceTokens::from_profile(profile),
        }
    }
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    profile: Option<UserProfile>,
}

/// Authentication state of the running client.
///
/// Created once at start-up and handed out by `Arc` to everything that needs
/// the bearer token or the signed-in user.
#[derive(Debug, Default)]
pub struct Session {
    state: RwLock<SessionState>,
}

impl Session {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_token(token: impl Into<String>) -> Arc<Self> {
        let session = Self::default();
        session.set_token(token);
        Arc::new(session)
    }

    pub fn token(&self) -> Option<String> {
        self.state.read().token.clone()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        self.state.write().token = Some(token.into());
    }

    /// Signs out: drops the bearer token and the cached profile.
    pub fn clear_token(&self) {
        let mut state = self.state.write();
        state.token = None;
        state.profile = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().token.is_some()
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.state.read().profile.clone()
    }

    pub fn set_profile(&self, profile: UserProfile) {
        self.state.write().profile = Some(profile);
    }

    pub fn service_token(&self, service: &str) -> Option<String> {
        let state = self.state.read();
        let profile = state.profile.as_ref()?;
        ServiceTokens::from_profile(profile)
            .get(service)
            .map(str::to_string)
    }

    pub fn connected_services(&self) -> Vec<&'static str> {
        self.state
            .read()
            .profile
            .as_ref()
            .map(|p| ServiceTokens::from_profile(p).connected())
            .unwrap_or_default()
    }

    /// The account tasks are compiled for, once a profile has been loaded.
    pub fn account(&self) -> Option<AccountContext> {
        self.state
            .read()
            .profile
            .as_ref()
            .map(AccountContext::from_profile)
    }
}
