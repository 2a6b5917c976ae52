use dioxus::{
    logger::tracing::{debug, warn},
    prelude::{server_fn::ServerFnError, *},
};
use ::server::ServerError;
use shared::StoredUser;

pub trait AuthBackend {
    /// Starts ending `user`'s session on the backend and returns at once.
    /// The outcome is only logged.
    fn logout(&self, user: &StoredUser);
}

/// Talks to the `server` crate's server functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerAuthBackend;

impl AuthBackend for ServerAuthBackend {
    fn logout(&self, user: &StoredUser) {
        let token = user.token;
        let login = user.login.clone();
        spawn(async move {
            match ::server::logout(token).await {
                Ok(()) => debug!("Backend ended the session of {login:?}"),
                Err(err) => warn!("Backend logout of {login:?} failed: {err}"),
            }
        });
    }
}

pub async fn login(login: String, password: String) -> Result<StoredUser, String> {
    ::server::login(login, password)
        .await
        .map_err(|err| describe_error(&err))
}

/// What the backend thinks of a stored login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionValidity {
    Valid,
    /// The backend no longer knows the token, or it belongs to someone else.
    Stale,
    /// The backend could not be asked; keep what we have.
    Unknown,
}

pub fn classify_session(
    user: &StoredUser,
    reply: Result<Option<String>, ServerFnError<ServerError>>,
) -> SessionValidity {
    match reply {
        Ok(Some(login)) if login == user.login => SessionValidity::Valid,
        Ok(_) => SessionValidity::Stale,
        Err(err) => {
            warn!("Could not check the session of {:?}: {err}", user.login);
            SessionValidity::Unknown
        }
    }
}

pub async fn check_session(user: &StoredUser) -> SessionValidity {
    classify_session(user, ::server::current_user(user.token).await)
}

pub fn describe_error(err: &ServerFnError<ServerError>) -> String {
    match err {
        ServerFnError::WrappedServerError(err) => err.description().to_owned(),
        other => format!("Server error: {other}"),
    }
}
