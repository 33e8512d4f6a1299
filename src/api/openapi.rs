//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::auth_handler;
use crate::domain::AccountSummary;
use crate::types::ApiMessage;

/// OpenAPI documentation for the VoiceUp backend
#[derive(OpenApi)]
#[openapi(
    info(
        title = "VoiceUp Backend",
        version = "0.1.0",
        description = "Credential-management service: signup, login, and JWT session tokens",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        auth_handler::signup,
        auth_handler::login,
        auth_handler::me,
    ),
    components(
        schemas(
            AccountSummary,
            ApiMessage,
            auth_handler::SignupRequest,
            auth_handler::LoginRequest,
            auth_handler::LoginResponse,
            auth_handler::MeResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Account signup, login, and session identity")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
