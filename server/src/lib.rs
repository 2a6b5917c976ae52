#[cfg(any(feature = "server", test))]
mod secret;

use std::str::FromStr;

use dioxus::{logger::tracing::{info, warn}, prelude::{server_fn::ServerFnError, *}};
use shared::{SessionToken, StoredUser};

#[cfg(feature = "server")]
use shared::limits::LIMITS;

#[cfg(feature = "server")]
use crate::secret::{accounts::ACCOUNTS, sessions::SESSIONS};

/// Errors carried through server functions. `Display` and `FromStr` must
/// round-trip, the variant name is the wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ServerError {
    #[error("InvalidCredentials")]
    InvalidCredentials,
    #[error("UnknownSession")]
    UnknownSession,
    #[error("FieldTooLong")]
    FieldTooLong,
}

impl ServerError {
    pub const ALL: [Self; 3] = [
        Self::InvalidCredentials,
        Self::UnknownSession,
        Self::FieldTooLong,
    ];

    /// Text suitable for showing next to a form.
    pub fn description(self) -> &'static str {
        match self {
            Self::InvalidCredentials => "Wrong login or password",
            Self::UnknownSession => "Session has already ended",
            Self::FieldTooLong => "Login or password is too long",
        }
    }
}

impl FromStr for ServerError {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|err| err.to_string() == s)
            .ok_or(())
    }
}

#[server]
pub async fn login(
    login: String,
    password: String,
) -> Result<StoredUser, ServerFnError<ServerError>> {
    if login.len() > LIMITS.max_login_length || password.len() > LIMITS.max_password_length {
        return Err(ServerFnError::WrappedServerError(ServerError::FieldTooLong));
    }
    if !ACCOUNTS.verify(&login, &password) {
        warn!("Rejected login attempt for {login:?}");
        return Err(ServerFnError::WrappedServerError(
            ServerError::InvalidCredentials,
        ));
    }
    let token = SESSIONS.create(&login);
    info!("User {login:?} logged in");
    Ok(StoredUser { login, token })
}

#[server]
pub async fn logout(token: SessionToken) -> Result<(), ServerFnError<ServerError>> {
    match SESSIONS.remove(&token) {
        Some(login) => {
            info!("User {login:?} logged out");
            Ok(())
        }
        None => Err(ServerFnError::WrappedServerError(ServerError::UnknownSession)),
    }
}

/// Who owns `token`, if the session is still alive.
#[server]
pub async fn current_user(
    token: SessionToken,
) -> Result<Option<String>, ServerFnError<ServerError>> {
    Ok(SESSIONS.lookup(&token))
}

#[cfg(feature = "server")]
pub fn init_server() {
    info!("Initializing server");
    if ACCOUNTS.is_empty() {
        warn!("No accounts configured, set {}", secret::accounts::ACCOUNTS_ENV);
    }
    info!("Server inited");
}
