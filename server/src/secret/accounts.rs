use std::{collections::HashMap, sync::LazyLock};

use dioxus::logger::tracing::{error, info};
use shared::{crypto, limits::LIMITS};

/// Comma-separated `login:password` pairs the server accepts.
pub const ACCOUNTS_ENV: &str = "RPO_ACCOUNTS";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountsError {
    #[error("account entry {0:?} is not in `login:password` form")]
    MalformedEntry(String),
    #[error("account login {0:?} is empty or too long")]
    InvalidLogin(String),
    #[error("account {0:?} is listed more than once")]
    Duplicate(String),
}

struct Account {
    salt: [u8; 32],
    password_hash: String,
}

#[derive(Default)]
pub struct AccountRegistry {
    accounts: HashMap<String, Account>,
}

impl AccountRegistry {
    pub fn parse(list: &str) -> Result<Self, AccountsError> {
        let mut registry = Self::default();
        for entry in list.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
            let Some((login, password)) = entry.split_once(':') else {
                return Err(AccountsError::MalformedEntry(entry.to_owned()));
            };
            let login = login.trim();
            if login.is_empty() || login.len() > LIMITS.max_login_length {
                return Err(AccountsError::InvalidLogin(login.to_owned()));
            }
            if !registry.insert(login, password) {
                return Err(AccountsError::Duplicate(login.to_owned()));
            }
        }
        Ok(registry)
    }

    /// Reads [`ACCOUNTS_ENV`]. A missing or broken variable leaves the server
    /// with no accounts, so every login fails.
    pub fn from_env() -> Self {
        let Ok(list) = std::env::var(ACCOUNTS_ENV) else {
            info!("{ACCOUNTS_ENV} is not set, no accounts can log in");
            return Self::default();
        };
        match Self::parse(&list) {
            Ok(registry) => {
                info!("Loaded {} account(s) from {ACCOUNTS_ENV}", registry.len());
                registry
            }
            Err(err) => {
                error!("Failed to parse {ACCOUNTS_ENV}: {err}");
                Self::default()
            }
        }
    }

    /// Returns `false` if the login is already taken.
    pub fn insert(&mut self, login: &str, password: &str) -> bool {
        if self.accounts.contains_key(login) {
            return false;
        }
        let salt: [u8; 32] = crypto::random_bytes();
        let password_hash = crypto::hash_password(password, &salt);
        self.accounts.insert(
            login.to_owned(),
            Account {
                salt,
                password_hash,
            },
        );
        true
    }

    pub fn verify(&self, login: &str, password: &str) -> bool {
        self.accounts
            .get(login)
            .is_some_and(|account| crypto::hash_password(password, &account.salt) == account.password_hash)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

pub static ACCOUNTS: LazyLock<AccountRegistry> = LazyLock::new(AccountRegistry::from_env);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_accounts_verify_their_own_password_only() {
        let registry = AccountRegistry::parse("alice:wonderland1, bob:builder:2").unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.verify("alice", "wonderland1"));
        assert!(registry.verify("bob", "builder:2"));
        assert!(!registry.verify("alice", "builder:2"));
        assert!(!registry.verify("carol", "wonderland1"));
    }

    #[test]
    fn blank_list_is_empty() {
        let registry = AccountRegistry::parse(" , ").unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn malformed_entries_are_rejected() {
        assert_eq!(
            AccountRegistry::parse("alice").err(),
            Some(AccountsError::MalformedEntry("alice".to_owned()))
        );
        assert_eq!(
            AccountRegistry::parse(":nologin").err(),
            Some(AccountsError::InvalidLogin(String::new()))
        );
        assert_eq!(
            AccountRegistry::parse("alice:a,alice:b").err(),
            Some(AccountsError::Duplicate("alice".to_owned()))
        );
    }

    #[test]
    fn overlong_login_is_rejected() {
        let login = "x".repeat(LIMITS.max_login_length + 1);
        assert!(matches!(
            AccountRegistry::parse(&format!("{login}:pw")),
            Err(AccountsError::InvalidLogin(_))
        ));
    }
}
