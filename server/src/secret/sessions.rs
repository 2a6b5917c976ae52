use std::{
    collections::HashMap,
    sync::{LazyLock, Mutex, MutexGuard, PoisonError},
};

use shared::SessionToken;

/// Live sessions, keyed by the token handed out at login.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<SessionToken, String>>,
}

impl SessionRegistry {
    fn sessions(&self) -> MutexGuard<'_, HashMap<SessionToken, String>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn create(&self, login: &str) -> SessionToken {
        let mut sessions = self.sessions();
        let mut token = SessionToken::generate();
        while sessions.contains_key(&token) {
            token = SessionToken::generate();
        }
        sessions.insert(token, login.to_owned());
        token
    }

    /// Returns the login the session belonged to.
    pub fn remove(&self, token: &SessionToken) -> Option<String> {
        self.sessions().remove(token)
    }

    pub fn lookup(&self, token: &SessionToken) -> Option<String> {
        self.sessions().get(token).cloned()
    }
}

pub static SESSIONS: LazyLock<SessionRegistry> = LazyLock::new(Default::default);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_session_is_found_until_removed() {
        let registry = SessionRegistry::default();
        let token = registry.create("alice");
        assert_eq!(registry.lookup(&token).as_deref(), Some("alice"));
        assert_eq!(registry.remove(&token).as_deref(), Some("alice"));
        assert_eq!(registry.lookup(&token), None);
        assert_eq!(registry.remove(&token), None);
    }

    #[test]
    fn each_login_gets_its_own_token() {
        let registry = SessionRegistry::default();
        let first = registry.create("alice");
        let second = registry.create("alice");
        assert_ne!(first, second);
        registry.remove(&first);
        assert_eq!(registry.lookup(&second).as_deref(), Some("alice"));
    }
}
