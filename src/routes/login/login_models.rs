use serde::Deserialize;

// Login form. Fields are optional so that a missing one is reported as
// such instead of failing extraction.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
}
