/// Per-client state held by the session store.
///
/// The default value is the anonymous state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub logged_in: bool,
    pub username: String,
}

impl SessionState {
    pub fn authenticated(username: impl Into<String>) -> Self {
        Self {
            logged_in: true,
            username: username.into(),
        }
    }
}
