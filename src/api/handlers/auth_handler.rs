//! Authentication handlers.

use std::borrow::Cow;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::MIN_PASSWORD_LENGTH;
use crate::domain::{AccountSummary, SignupData};
use crate::errors::AppResult;
use crate::types::ApiMessage;

/// Signup request body.
///
/// `phone`, `position`, and `securityCode` are opaque passthrough metadata.
#[derive(Deserialize, ToSchema)]
pub struct SignupRequest {
    /// Display name
    #[schema(example = "Alice")]
    pub name: String,
    /// Email address (normalized before storage)
    #[schema(example = "a@b.com")]
    pub email: String,
    /// Password (minimum 6 characters)
    #[schema(example = "secret1", min_length = 6)]
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default, rename = "securityCode")]
    pub security_code: Option<String>,
}

/// Login request body.
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Email address
    #[schema(example = "a@b.com")]
    pub email: String,
    /// Password
    #[schema(example = "secret1")]
    pub password: String,
}

/// Successful login response.
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub ok: bool,
    /// Signed session token
    pub token: String,
    pub user: AccountSummary,
}

/// Authenticated identity response for `/me`.
#[derive(Serialize, ToSchema)]
pub struct MeResponse {
    pub ok: bool,
    pub user: AccountSummary,
}

// Validation rules run in contract order and emit at most one error, so the
// client always sees the message for the first failed rule.
impl Validate for SignupRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        if self.name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.password.is_empty()
        {
            return Err(single_error(
                "name",
                "required",
                "Name, email, and password are required.",
            ));
        }
        if !self.email.trim().contains('@') {
            return Err(single_error("email", "email", "Invalid email."));
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(single_error(
                "password",
                "length",
                format!(
                    "Password must be at least {} characters.",
                    MIN_PASSWORD_LENGTH
                ),
            ));
        }
        Ok(())
    }
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(single_error(
                "email",
                "required",
                "Email and password are required.",
            ));
        }
        Ok(())
    }
}

fn single_error(
    field: &'static str,
    code: &'static str,
    message: impl Into<Cow<'static, str>>,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    errors.add(field, error);
    errors
}

impl From<SignupRequest> for SignupData {
    fn from(req: SignupRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
            phone: req.phone,
            position: req.position,
            security_code: req.security_code,
        }
    }
}

/// Public authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

/// Routes that require a valid session token
pub fn session_routes() -> Router<AppState> {
    Router::new().route("/me", get(me))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "Authentication",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Signup successful", body = ApiMessage),
        (status = 400, description = "Validation error", body = ApiMessage),
        (status = 409, description = "Email already exists or signup failed", body = ApiMessage)
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<ApiMessage>)> {
    state.auth_service.signup(payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiMessage::ok("Signup successful. Please log in.")),
    ))
}

/// Verify credentials and get a session token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation error", body = ApiMessage),
        (status = 401, description = "Invalid credentials", body = ApiMessage)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let session = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(LoginResponse {
        ok: true,
        token: session.token,
        user: session.user,
    }))
}

/// Get the identity carried by the presented session token
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current identity", body = MeResponse),
        (status = 401, description = "Missing, invalid, or expired token", body = ApiMessage)
    )
)]
pub async fn me(Extension(user): Extension<CurrentUser>) -> Json<MeResponse> {
    Json(MeResponse {
        ok: true,
        user: AccountSummary {
            id: user.id,
            name: user.name,
            email: user.email,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup_request(name: &str, email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            phone: None,
            position: None,
            security_code: None,
        }
    }

    fn first_message(errors: ValidationErrors) -> String {
        errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .next()
            .unwrap()
    }

    #[test]
    fn signup_missing_fields_message() {
        let err = signup_request("", "a@b.com", "secret1").validate().unwrap_err();
        assert_eq!(first_message(err), "Name, email, and password are required.");

        let err = signup_request("Alice", "", "secret1").validate().unwrap_err();
        assert_eq!(first_message(err), "Name, email, and password are required.");

        let err = signup_request("Alice", "a@b.com", "").validate().unwrap_err();
        assert_eq!(first_message(err), "Name, email, and password are required.");
    }

    #[test]
    fn signup_invalid_email_message() {
        let err = signup_request("Alice", "not-an-email", "secret1")
            .validate()
            .unwrap_err();
        assert_eq!(first_message(err), "Invalid email.");
    }

    #[test]
    fn signup_short_password_message() {
        let err = signup_request("Alice", "a@b.com", "abc").validate().unwrap_err();
        assert_eq!(first_message(err), "Password must be at least 6 characters.");
    }

    #[test]
    fn signup_short_multibyte_password_message() {
        // 3 characters, 6 bytes; the minimum counts characters
        let err = signup_request("Alice", "a@b.com", "ééé").validate().unwrap_err();
        assert_eq!(first_message(err), "Password must be at least 6 characters.");
    }

    #[test]
    fn signup_valid_request_passes() {
        assert!(signup_request("Alice", "a@b.com", "secret1").validate().is_ok());
    }

    #[test]
    fn login_missing_fields_message() {
        let req = LoginRequest {
            email: String::new(),
            password: "secret1".to_string(),
        };
        let err = req.validate().unwrap_err();
        assert_eq!(first_message(err), "Email and password are required.");
    }

    #[test]
    fn login_valid_request_passes() {
        let req = LoginRequest {
            email: "a@b.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(req.validate().is_ok());
    }
}
