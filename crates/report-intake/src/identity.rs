//! User identity seam
//!
//! The intake only needs a stable per-session identifier to key the
//! submission guard; authentication itself belongs to an external provider.

/// Identifier used when no provider session exists
pub const ANONYMOUS_USER: &str = "anonymous";

/// Source of the current user identifier
pub trait IdentityProvider: Send + Sync {
    fn current_user_id(&self) -> String;
}

/// Fixed identifier, e.g. an id handed over by the identity provider
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    user_id: String,
}

impl StaticIdentity {
    /// Blank ids fall back to [`ANONYMOUS_USER`]
    pub fn new(user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        let user_id = if user_id.trim().is_empty() {
            ANONYMOUS_USER.to_string()
        } else {
            user_id
        };
        Self { user_id }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user_id(&self) -> String {
        self.user_id.clone()
    }
}

/// No signed-in user
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousIdentity;

impl IdentityProvider for AnonymousIdentity {
    fn current_user_id(&self) -> String {
        ANONYMOUS_USER.to_string()
    }
}

/// Identity from an optional id, anonymous when absent
pub fn identity_from(user_id: Option<String>) -> Box<dyn IdentityProvider> {
    match user_id {
        Some(id) => Box::new(StaticIdentity::new(id)),
        None => Box::new(AnonymousIdentity),
    }
}
