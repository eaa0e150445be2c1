use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: Option<String>,
    pub password: Option<String>,
}
