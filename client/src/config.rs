pub const DEFAULT_APP_NAME: &str = "my-rpo";
pub const DEFAULT_SESSION_FILE: &str = "session.bin";
pub const DEFAULT_BROWSER_KEY: &str = "user";

/// Where the client keeps its state between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Directory name under the platform data dir.
    pub app_name: String,
    /// Session file, relative to the data dir.
    pub session_file: String,
    /// `localStorage` key holding the JSON-encoded user.
    pub browser_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_owned(),
            session_file: DEFAULT_SESSION_FILE.to_owned(),
            browser_key: DEFAULT_BROWSER_KEY.to_owned(),
        }
    }
}
