pub mod flows;
pub mod gate;
pub mod sessions;

pub use flows::{AuthError, Authenticated};
pub use gate::{auth_gate, GateDecision, ALLOW_LIST, LOGIN_PATH};
pub use sessions::{SessionStore, SESSION_COOKIE};
