use serde_json::Value;

use crate::api::{with_timeout, ApiClient};
use crate::error::ApiError;
use crate::models::{LoginRequest, Session, SignupRequest};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

impl AuthMode {
    pub fn title(&self) -> &'static str {
        match self {
            AuthMode::Login => "Login",
            AuthMode::Signup => "Sign Up",
        }
    }

    /// Order in which the identifier fields of a success body are consulted.
    fn id_keys(&self) -> [&'static str; 2] {
        match self {
            AuthMode::Login => ["user_id", "id"],
            AuthMode::Signup => ["id", "user_id"],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub name: String,
    pub mobile: String,
    pub password: String,
}

impl Default for AuthForm {
    fn default() -> Self {
        Self {
            mode: AuthMode::Login,
            name: String::new(),
            mobile: String::new(),
            password: String::new(),
        }
    }
}

pub enum AuthRequest {
    Login(LoginRequest),
    Signup(SignupRequest),
}

impl AuthForm {
    /// Switch between login and signup, dropping whatever was typed.
    pub fn toggle_mode(&self) -> Self {
        let mode = match self.mode {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        };
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn can_submit(&self) -> bool {
        let base = !self.mobile.is_empty() && !self.password.is_empty();
        match self.mode {
            AuthMode::Login => base,
            AuthMode::Signup => base && !self.name.is_empty(),
        }
    }

    pub fn request(&self) -> AuthRequest {
        match self.mode {
            AuthMode::Login => AuthRequest::Login(LoginRequest {
                mobile: self.mobile.clone(),
                password: self.password.clone(),
            }),
            AuthMode::Signup => AuthRequest::Signup(SignupRequest {
                name: self.name.clone(),
                mobile: self.mobile.clone(),
                password: self.password.clone(),
            }),
        }
    }
}

/// Pull the session out of a successful login/signup body.
pub fn extract_identity(mode: AuthMode, payload: &Value) -> Result<Session, ApiError> {
    let user_id = mode
        .id_keys()
        .iter()
        .filter_map(|key| payload.get(*key))
        .find_map(identifier)
        .ok_or(ApiError::MissingIdentity)?;

    let display_name = payload
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(ApiError::MissingIdentity)?;

    Ok(Session {
        user_id,
        display_name: display_name.to_string(),
    })
}

fn identifier(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// One network exchange for the form's mode, bounded by the auth timeout.
pub async fn authenticate(
    client: &ApiClient,
    form: &AuthForm,
    timeout: std::time::Duration,
) -> Result<Session, ApiError> {
    let mode = form.mode;
    let reply = match form.request() {
        AuthRequest::Login(body) => with_timeout(timeout, client.login(&body)).await,
        AuthRequest::Signup(body) => with_timeout(timeout, client.signup(&body)).await,
    };
    identity_from_reply(mode, reply)
}

/// A success status whose body cannot be read is reported like a body
/// without identity fields.
fn identity_from_reply(
    mode: AuthMode,
    reply: Result<Value, ApiError>,
) -> Result<Session, ApiError> {
    match reply {
        Ok(payload) => extract_identity(mode, &payload),
        Err(ApiError::Malformed(reason)) => {
            tracing::warn!(%reason, "unreadable auth response body");
            Err(ApiError::MissingIdentity)
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_prefers_user_id() {
        let session =
            extract_identity(AuthMode::Login, &json!({"user_id": 9, "id": 1, "name": "Mia"}))
                .unwrap();
        assert_eq!(session.user_id, "9");
        assert_eq!(session.display_name, "Mia");
    }

    #[test]
    fn signup_prefers_id_and_accepts_fallback() {
        let session = extract_identity(
            AuthMode::Signup,
            &json!({"id": 3, "user_id": 8, "name": "Ola", "mobile": "555"}),
        )
        .unwrap();
        assert_eq!(session.user_id, "3");

        let session =
            extract_identity(AuthMode::Signup, &json!({"user_id": "8", "name": "Ola"})).unwrap();
        assert_eq!(session.user_id, "8");
    }

    #[test]
    fn missing_fields_are_a_distinct_error() {
        assert_eq!(
            extract_identity(AuthMode::Login, &json!({"name": "Nobody"})),
            Err(ApiError::MissingIdentity)
        );
        assert_eq!(
            extract_identity(AuthMode::Login, &json!({"user_id": 2})),
            Err(ApiError::MissingIdentity)
        );
        assert_eq!(
            extract_identity(AuthMode::Login, &json!({"user_id": 2, "name": ""})),
            Err(ApiError::MissingIdentity)
        );
        assert_eq!(
            extract_identity(AuthMode::Signup, &json!({"id": null, "name": "X"})),
            Err(ApiError::MissingIdentity)
        );
    }

    #[test]
    fn submit_requires_mode_fields() {
        let mut form = AuthForm {
            mobile: "9999".into(),
            password: "secret".into(),
            ..AuthForm::default()
        };
        assert!(form.can_submit());
        form.mode = AuthMode::Signup;
        assert!(!form.can_submit());
        form.name = "Kai".into();
        assert!(form.can_submit());
        form.password.clear();
        assert!(!form.can_submit());
    }

    #[test]
    fn toggle_clears_fields() {
        let form = AuthForm {
            mode: AuthMode::Login,
            name: "x".into(),
            mobile: "1".into(),
            password: "p".into(),
        };
        let toggled = form.toggle_mode();
        assert_eq!(toggled.mode, AuthMode::Signup);
        assert!(toggled.mobile.is_empty() && toggled.password.is_empty() && toggled.name.is_empty());
        assert_eq!(toggled.toggle_mode().mode, AuthMode::Login);
    }

    #[test]
    fn request_matches_mode() {
        let form = AuthForm {
            mode: AuthMode::Signup,
            name: "Kai".into(),
            mobile: "1".into(),
            password: "p".into(),
        };
        match form.request() {
            AuthRequest::Signup(body) => assert_eq!(body.name, "Kai"),
            AuthRequest::Login(_) => panic!("expected signup"),
        }
    }

    #[test]
    fn unreadable_success_body_is_missing_identity() {
        let reply = Err(ApiError::Malformed("expected value at line 1".into()));
        let err = identity_from_reply(AuthMode::Login, reply).unwrap_err();
        assert_eq!(err, ApiError::MissingIdentity);
        assert_eq!(err.user_message(), "Missing identity fields in server response.");

        let rejected = ApiError::from_response(401, r#"{"detail":"Invalid mobile or password"}"#);
        assert_eq!(
            identity_from_reply(AuthMode::Login, Err(rejected.clone())),
            Err(rejected)
        );
    }
}
