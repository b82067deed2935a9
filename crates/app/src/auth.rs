use dioxus::prelude::*;
use shared_types::AuthUser;

/// Where the current session stands.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SessionStatus {
    /// `get_current_user` has not answered yet.
    #[default]
    Pending,
    Authenticated(AuthUser),
    Anonymous,
}

/// Global authentication state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuthState {
    pub status: Signal<SessionStatus>,
}

impl AuthState {
    pub fn new() -> Self {
        Self::with_status(SessionStatus::Pending)
    }

    pub fn with_status(status: SessionStatus) -> Self {
        Self {
            status: Signal::new(status),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.status.read(), SessionStatus::Authenticated(_))
    }

    pub fn user(&self) -> Option<AuthUser> {
        match &*self.status.read() {
            SessionStatus::Authenticated(user) => Some(user.clone()),
            _ => None,
        }
    }

    pub fn set_user(&mut self, user: AuthUser) {
        self.status.set(SessionStatus::Authenticated(user));
    }

    /// Resolve the session from a `get_current_user` answer.
    pub fn resolve(&mut self, user: Option<AuthUser>) {
        match user {
            Some(user) => self.set_user(user),
            None => self.clear_auth(),
        }
    }

    pub fn clear_auth(&mut self) {
        self.status.set(SessionStatus::Anonymous);
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}

/// Hook to access auth state.
pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}
