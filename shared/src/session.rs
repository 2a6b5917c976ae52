use serde::{Deserialize, Serialize};

use crate::crypto;

/// Who is using the client right now.
///
/// Derived from the persisted [`StoredUser`] every time it is needed; never
/// cached on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated { username: String },
}

impl Session {
    /// Only an empty name counts as no name; one made of spaces is still a
    /// logged in user.
    pub fn from_username(username: Option<String>) -> Self {
        match username {
            Some(username) if !username.is_empty() => Self::Authenticated { username },
            _ => Self::Anonymous,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { username } => Some(username),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

impl From<Option<StoredUser>> for Session {
    fn from(user: Option<StoredUser>) -> Self {
        Self::from_username(user.map(|user| user.login))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(pub [u8; 32]);

impl SessionToken {
    pub fn generate() -> Self {
        Self(crypto::random_bytes())
    }
}

/// The persisted half of a login: the name shown in the UI and the token the
/// backend wants back on logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUser {
    pub login: String,
    pub token: SessionToken,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn absent_and_empty_names_are_anonymous() {
        assert_eq!(Session::from_username(None), Session::Anonymous);
        assert_eq!(Session::from_username(Some(String::new())), Session::Anonymous);
    }

    #[test]
    fn blank_but_non_empty_name_is_still_logged_in() {
        let user = StoredUser {
            login: " ".to_owned(),
            token: SessionToken([1; 32]),
        };
        let session = Session::from(Some(user));
        assert!(session.is_authenticated());
        assert_eq!(session.username(), Some(" "));
    }

    #[test]
    fn named_user_is_authenticated() {
        let session = Session::from_username(Some("alice".to_owned()));
        assert!(session.is_authenticated());
        assert_eq!(session.username(), Some("alice"));
    }

    #[test]
    fn stored_user_becomes_session() {
        let user = StoredUser {
            login: "alice".to_owned(),
            token: SessionToken([7; 32]),
        };
        assert_eq!(
            Session::from(Some(user)),
            Session::Authenticated {
                username: "alice".to_owned()
            }
        );
        assert_eq!(Session::from(None), Session::Anonymous);
    }

    #[test]
    fn generated_tokens_differ() {
        assert_ne!(SessionToken::generate(), SessionToken::generate());
    }

    proptest! {
        #[test]
        fn session_is_authenticated_iff_name_is_non_empty(name in ".{0,16}") {
            let session = Session::from_username(Some(name.clone()));
            prop_assert_eq!(session.is_authenticated(), !name.is_empty());
        }
    }
}
